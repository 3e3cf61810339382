//! Quadtree error types.

use thiserror::Error;

/// Errors raised when constructing or refreshing a [`QuadTree`](crate::QuadTree).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuadTreeError {
    #[error("Cell capacity must be at least 1")]
    ZeroCapacity,

    #[error("Boundary {w}x{h} has no area")]
    EmptyBoundary { w: i32, h: i32 },

    #[error("Point storage changed size while indexed: expected {expected} points, found {found}")]
    SourceResized { expected: usize, found: usize },
}
