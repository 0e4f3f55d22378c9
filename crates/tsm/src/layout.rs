//! Pipeline entry: planarize, orthogonalize, compact.

use std::collections::HashMap;

use tracing::{debug, info_span};

use crate::check::{postcheck, precheck};
use crate::compact::compact;
use crate::dcel::VertexKind;
use crate::error::LayoutError;
use crate::graph::{Graph, GridPos, NodeKey, Point};
use crate::ortho::{orthogonalize, ShapeSolver};
use crate::planar::planarize;

/// Output node: an input node or a bend point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node<N> {
    Input(N),
    Bend(usize),
}

impl<N> Node<N> {
    pub fn is_bend(&self) -> bool {
        matches!(self, Node::Bend(_))
    }

    pub fn input(&self) -> Option<&N> {
        match self {
            Node::Input(n) => Some(n),
            Node::Bend(_) => None,
        }
    }
}

/// Pipeline configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutCfg {
    pub solver: ShapeSolver,
}

/// Orthogonal drawing. Coordinates are translated so that the smallest x and
/// the smallest y are both 0.
#[derive(Clone, Debug)]
pub struct OrthoLayout<N> {
    pub graph: Graph<Node<N>>,
    pub pos: HashMap<Node<N>, GridPos>,
    /// Bends reported by the shape solver.
    pub bends: usize,
}

impl<N: NodeKey> OrthoLayout<N> {
    /// Number of bend nodes in the drawing.
    pub fn bend_count(&self) -> usize {
        self.graph.nodes().filter(|n| n.is_bend()).count()
    }

    /// Every edge shares exactly one coordinate between its endpoints.
    pub fn is_axis_aligned(&self) -> bool {
        self.graph.edges().all(|(a, b)| match (self.pos.get(a), self.pos.get(b)) {
            (Some(p), Some(q)) => (p.x == q.x) != (p.y == q.y),
            _ => false,
        })
    }

    /// Axis-parallel edges, no crossings, no shared positions, no overlays.
    pub fn postcheck(&self) -> Result<(), LayoutError> {
        let pos: HashMap<Node<N>, Point> = self
            .pos
            .iter()
            .map(|(n, p)| (n.clone(), p.cast::<f64>()))
            .collect();
        postcheck(&self.graph, &pos)
    }

    pub fn position_of(&self, n: &N) -> Option<GridPos> {
        self.pos.get(&Node::Input(n.clone())).copied()
    }
}

/// Lay out a connected planar graph of maximum degree four.
///
/// With `positions`, the rotation system and outer face of that straight-line
/// drawing are kept.
pub fn ortho_layout<N: NodeKey>(
    graph: &Graph<N>,
    positions: Option<&HashMap<N, Point>>,
    cfg: &LayoutCfg,
) -> Result<OrthoLayout<N>, LayoutError> {
    let _span = info_span!("ortho_layout", nodes = graph.node_count(), edges = graph.edge_count()).entered();
    precheck(graph, positions)?;
    if graph.edge_count() == 0 {
        // connected and non-empty, so a single node
        let n = Node::Input(graph.node(0).clone());
        let mut out = Graph::new();
        out.add_node(n.clone());
        return Ok(OrthoLayout {
            graph: out,
            pos: HashMap::from([(n, GridPos::zeros())]),
            bends: 0,
        });
    }

    let planar = planarize(graph, positions)?;
    let ortho = orthogonalize(planar, cfg.solver)?;
    let comp = compact(&ortho)?;

    let node_of = |v| -> Result<Node<N>, LayoutError> {
        match comp.dcel.kind(v) {
            VertexKind::Input(i) => Ok(Node::Input(ortho.planar.graph.node(i).clone())),
            VertexKind::Bend(b) => Ok(Node::Bend(b)),
            k => Err(LayoutError::Structure(format!("{k:?} left in the output"))),
        }
    };
    let mut out = Graph::new();
    for &(u, v) in &comp.edges {
        out.add_edge(node_of(u)?, node_of(v)?);
    }
    let kept: Vec<_> = comp.output_vertices().collect();
    let min = kept
        .iter()
        .map(|&v| comp.pos(v))
        .reduce(|a, b| a.inf(&b))
        .unwrap_or_else(GridPos::zeros);
    let mut pos = HashMap::with_capacity(kept.len());
    for v in kept {
        pos.insert(node_of(v)?, comp.pos(v) - min);
    }
    debug!(
        bends = comp.bends,
        cost = ortho.cost,
        nodes = out.node_count(),
        "layout done"
    );
    Ok(OrthoLayout {
        graph: out,
        pos,
        bends: ortho.cost as usize,
    })
}

/// [`ortho_layout`] with the default configuration.
pub fn layout_with_defaults<N: NodeKey>(
    graph: &Graph<N>,
    positions: Option<&HashMap<N, Point>>,
) -> Result<OrthoLayout<N>, LayoutError> {
    ortho_layout(graph, positions, &LayoutCfg::default())
}
