//! Archsplit Geometry
//!
//! Validation and splitting of building limits by height plateaus, on top of
//! a pluggable 2D geometry kernel (`geo` by default).
//!
//! ```rust,ignore
//! use archsplit_geometry::{SplitConfig, Splitter};
//!
//! let splitter = Splitter::new(SplitConfig::default());
//! let split = splitter.split(&building_limits, &height_plateaus)?;
//! ```

pub mod config;
pub mod convert;
pub mod coverage;
pub mod error;
pub mod kernel;
pub mod overlap;
pub mod split;

// Re-export geo types for convenience
pub use geo::{Geometry, MultiPolygon, Polygon};

pub use config::{OverlapCheck, SplitConfig, DEFAULT_CRS, DEFAULT_TOLERANCE};
pub use coverage::covers;
pub use error::{Error, Result, SplittingError};
pub use kernel::{GeoKernel, GeometryKernel};
pub use overlap::has_self_overlap;
pub use split::{split_building_limits, Splitter};
