//! Lay out a random grid subgraph and print the drawing as text.
//!
//! Usage:
//!   cargo run -p tsm --example grid_layout -- [seed]
//!
//! Input nodes print as `o`, bends as `+`, edges as `-` and `|`.

use std::collections::HashMap;

use tsm::api::{layout_with_defaults, random_grid_subgraph, GridReplay, GridSampleCfg, Node};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025);
    let cfg = GridSampleCfg {
        width: 5,
        height: 4,
        extra_edge_prob: 0.35,
        jitter: 0.1,
    };
    let (g, pos) = random_grid_subgraph(cfg, GridReplay { seed, index: 0 });
    let layout = match layout_with_defaults(&g, Some(&pos)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("layout failed: {e}");
            return;
        }
    };
    println!(
        "{} nodes, {} edges, {} bends",
        g.node_count(),
        g.edge_count(),
        layout.bends
    );

    // two text cells per grid unit so edges have room
    let w = layout.pos.values().map(|p| p.x).max().unwrap_or(0) as usize * 2 + 1;
    let h = layout.pos.values().map(|p| p.y).max().unwrap_or(0) as usize * 2 + 1;
    let mut canvas: HashMap<(usize, usize), char> = HashMap::new();
    for (a, b) in layout.graph.edges() {
        let (p, q) = (layout.pos[a], layout.pos[b]);
        let (x0, x1) = (p.x.min(q.x) as usize * 2, p.x.max(q.x) as usize * 2);
        let (y0, y1) = (p.y.min(q.y) as usize * 2, p.y.max(q.y) as usize * 2);
        for x in x0..=x1 {
            for y in y0..=y1 {
                canvas.insert((x, y), if p.y == q.y { '-' } else { '|' });
            }
        }
    }
    for (n, p) in &layout.pos {
        let mark = if matches!(n, Node::Bend(_)) { '+' } else { 'o' };
        canvas.insert((p.x as usize * 2, p.y as usize * 2), mark);
    }
    for y in (0..h).rev() {
        let row: String = (0..w)
            .map(|x| canvas.get(&(x, y)).copied().unwrap_or(' '))
            .collect();
        println!("{}", row.trim_end());
    }
}
