//! Region quadtree for proximity queries over moving points.
//!
//! This crate contains:
//! - Geometric predicates (rectangles, circles) used for cell boundaries and queries
//! - The quadtree index itself, with rebuild and incremental refresh
//!
//! The index never owns points. It stores indices into a caller-owned slice of
//! anything implementing [`Positioned`] and reads positions through that slice.

mod error;
mod region;
mod tree;

pub use error::QuadTreeError;
pub use region::{Bounds, Circle, Positioned, Rect, Region};
pub use tree::{QuadTree, RefreshReport, RefreshStrategy, TreeStats, DEFAULT_MAX_DEPTH};
