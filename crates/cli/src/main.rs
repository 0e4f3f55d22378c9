use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tsm::check::{number_of_cross, precheck};
use tsm::ortho::{IlpCfg, ShapeSolver};
use tsm::{ortho_layout, LayoutCfg};

mod io;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Orthogonal layouts of planar graphs")]
struct Cmd {
    /// Log pipeline stages at DEBUG level
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Lay out a graph file and write the drawing as JSON
    Layout {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = SolverArg::Mcf)]
        solver: SolverArg,
        /// Weight of right angles at degree-2 and degree-3 nodes (ilp only)
        #[arg(long, default_value_t = 1.0)]
        corner_weight: f64,
    },
    /// Validate a graph file without laying it out
    Check {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small version JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    Mcf,
    Ilp,
}

impl SolverArg {
    fn solver(self, corner_weight: f64) -> ShapeSolver {
        match self {
            SolverArg::Mcf => ShapeSolver::MinCostFlow,
            SolverArg::Ilp => ShapeSolver::Ilp(IlpCfg { corner_weight }),
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Layout {
            input,
            out,
            solver,
            corner_weight,
        } => layout(&input, &out, solver.solver(corner_weight)).map(|_| ()),
        Action::Check { input } => {
            let summary = check(&input)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Action::Report => report(),
    }
}

fn layout(input: &Path, out: &Path, solver: ShapeSolver) -> Result<io::LayoutFile> {
    tracing::info!(input = %input.display(), out = %out.display(), ?solver, "layout");
    let file = io::read_graph(input)?;
    let graph = file.graph();
    let pos = file.positions();
    let cfg = LayoutCfg { solver };
    let drawing = ortho_layout(&graph, pos.as_ref(), &cfg)
        .with_context(|| format!("laying out {}", input.display()))?;
    let result = io::LayoutFile::from(&drawing);
    io::write_json(out, &result)?;
    tracing::info!(
        nodes = result.nodes.len(),
        bends = result.bends,
        "layout written"
    );
    Ok(result)
}

fn check(input: &Path) -> Result<serde_json::Value> {
    let file = io::read_graph(input)?;
    let graph = file.graph();
    let pos = file.positions();
    precheck(&graph, pos.as_ref()).with_context(|| format!("checking {}", input.display()))?;
    Ok(serde_json::json!({
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
        "max_degree": graph.max_degree(),
        "crossings": pos.as_ref().map(|p| number_of_cross(&graph, p)),
    }))
}

fn report() -> Result<()> {
    let rev = option_env!("GIT_COMMIT").unwrap_or("unknown");
    let obj = serde_json::json!({
        "code_rev": rev,
        "tsm": tsm::VERSION,
        "solvers": ["mcf", "ilp"],
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
