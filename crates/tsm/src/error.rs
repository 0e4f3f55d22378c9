//! Error types for the layout pipeline.
//!
//! Input validation errors are the caller's to fix; everything else means a
//! solver or structural invariant broke and the run is abandoned.

use thiserror::Error;

use crate::dcel::DcelError;
use crate::flownet::FlowError;

/// Pipeline stage a solver failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Orthogonalization,
    HorizontalLengths,
    VerticalLengths,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Orthogonalization => "orthogonalization",
            Stage::HorizontalLengths => "horizontal compaction",
            Stage::VerticalLengths => "vertical compaction",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("node {node} has degree {degree}; at most 4 is supported")]
    DegreeTooHigh { node: String, degree: usize },
    #[error("graph contains a self-loop at {node}")]
    SelfLoop { node: String },
    #[error("graph is not connected")]
    Disconnected,
    #[error("graph is not planar")]
    NonPlanar,
    #[error("given layout has crossing edges: {0}")]
    CrossingLayout(String),
    #[error("no position given for node {0}")]
    MissingPosition(String),
    #[error("{stage} flow problem failed: {source}")]
    Solver {
        stage: Stage,
        #[source]
        source: FlowError,
    },
    #[error(transparent)]
    Dcel(#[from] DcelError),
    #[error("no front half-edge found in face {face} while refining")]
    FrontNotFound { face: usize },
    #[error("structural invariant violated: {0}")]
    Structure(String),
}

impl LayoutError {
    pub(crate) fn solver(stage: Stage) -> impl FnOnce(FlowError) -> LayoutError {
        move |source| LayoutError::Solver { stage, source }
    }

    /// True for errors caused by invalid input rather than an internal failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LayoutError::EmptyGraph
                | LayoutError::DegreeTooHigh { .. }
                | LayoutError::SelfLoop { .. }
                | LayoutError::Disconnected
                | LayoutError::NonPlanar
                | LayoutError::CrossingLayout(_)
                | LayoutError::MissingPosition(_)
        )
    }
}
