//! `mx-geometry` - Triangle-mesh payloads for the example bindings.
//!
//! Per-face doubled areas, mean-normalized area statistics, and the
//! rotate-and-scale vertex transform used by the `mesh_stats` binding.

pub mod area;
pub mod error;
pub mod transform;

pub use area::{double_area, AreaStats};
pub use error::{GeometryError, Result};
pub use transform::rotate_scale;
