// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable parameters for validation and splitting.

/// GeoJSON coordinates are WGS 84 (RFC 7946, section 4)
pub const DEFAULT_CRS: &str = "EPSG:4326";

/// Absorbs floating point noise in unions and shared boundaries, in squared
/// degrees for areas and degrees for the coverage buffer. Determined on the
/// vaterlandsparken data set.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Strategy used to detect overlapping polygons within one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapCheck {
    /// Compare the summed polygon areas with the area of their union.
    /// Fast, but overlap can be masked by numeric cancellation.
    #[default]
    AreaDifference,
    /// Intersect every pair of polygons with intersecting bounding boxes.
    Pairwise,
}

/// Split configuration, passed explicitly to every check
#[derive(Debug, Clone, PartialEq)]
pub struct SplitConfig {
    /// Overlap and coverage tolerance
    pub tolerance: f64,
    /// Coordinate reference system identifier of all inputs
    pub crs: String,
    pub overlap_check: OverlapCheck,
}

impl SplitConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }

    pub fn with_overlap_check(mut self, overlap_check: OverlapCheck) -> Self {
        self.overlap_check = overlap_check;
        self
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            crs: DEFAULT_CRS.to_string(),
            overlap_check: OverlapCheck::default(),
        }
    }
}
