// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Domain collections: building limits, height plateaus and splits.
//!
//! Each wraps a [`FeatureCollection`] and checks its invariants on
//! construction and on deserialization.

use crate::error::{Error, Result};
use crate::geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};

/// Footprint to be subdivided. Non-empty, attributes are free-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureCollection", into = "FeatureCollection")]
pub struct BuildingLimits(FeatureCollection);

/// Elevation zones. Non-empty, every feature has a float `elevation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureCollection", into = "FeatureCollection")]
pub struct HeightPlateaus(FeatureCollection);

/// Building limits split by height plateaus. Same invariants as
/// [`HeightPlateaus`]; every geometry is a single polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureCollection", into = "FeatureCollection")]
pub struct Split(FeatureCollection);

fn check_non_empty(collection: &FeatureCollection) -> Result<()> {
    if collection.features.is_empty() {
        return Err(Error::EmptyCollection);
    }
    Ok(())
}

fn check_elevations(collection: &FeatureCollection) -> Result<()> {
    for (index, feature) in collection.features.iter().enumerate() {
        feature.require_elevation(index)?;
    }
    Ok(())
}

impl BuildingLimits {
    pub fn new(collection: FeatureCollection) -> Result<Self> {
        check_non_empty(&collection)?;
        Ok(Self(collection))
    }

    pub fn features(&self) -> &[Feature] {
        &self.0.features
    }

    pub fn len(&self) -> usize {
        self.0.features.len()
    }

    /// Always false for a constructed value; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.features.is_empty()
    }
}

impl HeightPlateaus {
    pub fn new(collection: FeatureCollection) -> Result<Self> {
        check_non_empty(&collection)?;
        check_elevations(&collection)?;
        Ok(Self(collection))
    }

    pub fn features(&self) -> &[Feature] {
        &self.0.features
    }

    pub fn len(&self) -> usize {
        self.0.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.features.is_empty()
    }
}

impl Split {
    pub fn new(collection: FeatureCollection) -> Result<Self> {
        check_non_empty(&collection)?;
        check_elevations(&collection)?;
        Ok(Self(collection))
    }

    pub fn features(&self) -> &[Feature] {
        &self.0.features
    }

    pub fn len(&self) -> usize {
        self.0.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.features.is_empty()
    }
}

impl TryFrom<FeatureCollection> for BuildingLimits {
    type Error = Error;

    fn try_from(collection: FeatureCollection) -> Result<Self> {
        Self::new(collection)
    }
}

impl TryFrom<FeatureCollection> for HeightPlateaus {
    type Error = Error;

    fn try_from(collection: FeatureCollection) -> Result<Self> {
        Self::new(collection)
    }
}

impl TryFrom<FeatureCollection> for Split {
    type Error = Error;

    fn try_from(collection: FeatureCollection) -> Result<Self> {
        Self::new(collection)
    }
}

impl From<BuildingLimits> for FeatureCollection {
    fn from(limits: BuildingLimits) -> Self {
        limits.0
    }
}

impl From<HeightPlateaus> for FeatureCollection {
    fn from(plateaus: HeightPlateaus) -> Self {
        plateaus.0
    }
}

impl From<Split> for FeatureCollection {
    fn from(split: Split) -> Self {
        split.0
    }
}
