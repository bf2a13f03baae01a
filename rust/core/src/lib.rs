// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Archsplit Core
//!
//! GeoJSON data model for the building limit splitter.
//!
//! ## Overview
//!
//! - **Polygons**: [`Polygon2d`], a closed, strictly two dimensional polygon
//! - **Features**: [`Feature`] and [`FeatureCollection`] following RFC 7946
//! - **Domain collections**: [`BuildingLimits`], [`HeightPlateaus`] and [`Split`]
//!
//! All structural checks (geometry type, 2D coordinates, closed rings,
//! non-empty collections, float `elevation`) run during deserialization, so
//! the geometry layer only ever sees well-formed input.
//!
//! ```rust,ignore
//! use archsplit_core::HeightPlateaus;
//!
//! let plateaus: HeightPlateaus = serde_json::from_str(body)?;
//! for feature in plateaus.features() {
//!     println!("{:?}", feature.elevation());
//! }
//! ```

pub mod error;
pub mod geojson;
pub mod models;

pub use error::{Error, Result};
pub use geojson::{Feature, FeatureCollection, Polygon2d, Position, Properties, ELEVATION};
pub use models::{BuildingLimits, HeightPlateaus, Split};
