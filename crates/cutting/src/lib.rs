//! Toolpath optimization for laser jobs.
//!
//! Given a job as a list of [`ToolpathLayer`](laserpath_core::ToolpathLayer)s,
//! this crate produces a new job whose paths are cheaper to run:
//! - fewer redundant vertices
//! - softened sharp corners
//! - less non-cutting (rapid) travel between paths
//! - layers ordered so engraving runs before cutting
//!
//! # Algorithm
//!
//! 1. **Work area check**: Warn about paths outside the machine envelope
//! 2. **Simplification**: Drop vertices within tolerance of the line through
//!    their neighbours
//! 3. **Corner smoothing**: Insert a midpoint ahead of over-sharp vertices
//! 4. **Safety margin**: Pull points away from the work area edges
//! 5. **Limit clamping**: Keep power, speed and passes inside machine and
//!    material limits
//! 6. **Sequencing**: Group paths by settings, then nearest-neighbour order
//!    with path reversal, never accepting an order with more travel
//! 7. **Layer ordering**: Engrave, then score, then cut
//!
//! # Feature Flags
//!
//! - `serde`: Serializable settings and results
//! - `parallel`: Optimize layers on the rayon thread pool

pub mod bounds;
pub mod config;
pub mod path;
pub mod result;
pub mod sequence;
pub mod simplify;
pub mod smooth;

pub use bounds::{apply_margin, in_bounds};
pub use config::OptimizationSettings;
pub use path::{optimize_toolpaths, optimize_toolpaths_with};
pub use result::{LayerMetrics, OptimizedJob, PathOptimizationResult};
pub use sequence::{
    get_recommended_layer_order, group_similar, order_layers, reorder, reorder_from,
    travel_distance,
};
pub use simplify::{simplify, simplify_path};
pub use smooth::{count_sharp_corners, smooth, smooth_path};
