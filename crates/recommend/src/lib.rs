//! # laserpath recommend
//!
//! Power, speed and pass recommendations for laser operations.
//!
//! Reference settings come from the material tables in
//! [`laserpath_core::Registry`]. A request for another thickness, a
//! quality preset, a score line or an unlisted material is answered by
//! scaling the nearest reference, then clamping to the machine. Each
//! heuristic step lowers [`PowerSpeedRecommendation::confidence`] and
//! explains itself in `notes`.
//!
//! ```rust
//! use laserpath_core::{Operation, Registry};
//! use laserpath_recommend::{QualityLevel, Recommender};
//!
//! let engine = Recommender::new(Registry::builtin());
//! let rec = engine
//!     .recommend("basswood-3mm", 6.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
//!     .unwrap();
//! assert!(rec.confidence < 1.0);
//! assert!(rec.notes.iter().any(|n| n.contains("thickness")));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serializable recommendations and quality presets

pub mod engine;
pub mod error;
pub mod quality;
pub mod result;
pub mod scaling;

pub use engine::{recommend, Recommender};
pub use error::{RecommendationError, Result};
pub use quality::QualityLevel;
pub use result::PowerSpeedRecommendation;
