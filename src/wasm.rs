//! Bindings for JavaScript renderers.
//!
//! Coordinates cross the boundary as flat `Int32Array`s, `D` values per point.

pub mod d2;
pub mod d3;
pub mod utils;

pub use utils::{is_bouncing, is_corner};
