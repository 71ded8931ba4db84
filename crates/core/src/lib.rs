//! # laserpath core
//!
//! Shared types for laser toolpath optimization and settings
//! recommendation.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Point2D`], [`polyline_length`], [`perpendicular_distance`]
//! - **Toolpaths**: [`LaserPath`], [`ToolpathLayer`], [`LaserSettings`], [`Operation`]
//! - **Reference data**: [`MachineProfile`], [`MaterialProfile`], [`Registry`]
//!
//! ## Registry
//!
//! ```rust
//! use laserpath_core::{Registry, MaterialCategory};
//!
//! let registry = Registry::builtin();
//! let d1 = registry.get_machine("xtool-d1").unwrap();
//! assert!(d1.supports(MaterialCategory::Wood));
//!
//! let report = registry.validate_compatibility("basswood-3mm", "xtool-d1");
//! assert!(report.compatible);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support and JSON registries

mod builtin;
pub mod error;
pub mod geometry;
pub mod machine;
pub mod material;
pub mod path;
pub mod registry;
pub mod settings;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{interior_angle_deg, perpendicular_distance, polyline_length, Point2D};
pub use machine::{MachineFeature, MachineProfile, Range, WorkArea};
pub use material::{MaterialCategory, MaterialProfile};
pub use path::{LaserPath, LayerId, ToolpathLayer};
pub use registry::{CompatibilityReport, Registry, DEFAULT_THICKNESS_TOLERANCE};
pub use settings::{LaserSettings, Operation};
