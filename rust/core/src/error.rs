// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for data model construction
pub type Result<T> = std::result::Result<T, Error>;

/// Structural validation errors raised while building the data model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Only 2D Polygons are supported")]
    NotTwoDimensional,

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("FeatureCollection must contain at least 1 feature")]
    EmptyCollection,

    #[error("Missing 'elevation' property on feature {index}")]
    MissingElevation { index: usize },

    #[error("'elevation' property must be a float (feature {index})")]
    InvalidElevation { index: usize },
}
