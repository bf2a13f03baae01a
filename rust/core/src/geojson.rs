// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GeoJSON Polygon, Feature and FeatureCollection
//!
//! A strict subset of RFC 7946: the only geometry accepted is a 2D `Polygon`.
//! Every structural rule is checked while deserializing, so a value of any
//! type in this module is well-formed by construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `[longitude, latitude]` in WGS 84 degrees
pub type Position = [f64; 2];

/// Free-form feature attributes
pub type Properties = Map<String, Value>;

/// Name of the property carrying a plateau elevation
pub const ELEVATION: &str = "elevation";

/// Minimum number of positions in a closed linear ring
const MIN_RING_LEN: usize = 4;

/// Polygon without a z component.
///
/// The first ring is the exterior, any further rings are holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRepr", into = "PolygonRepr")]
pub struct Polygon2d {
    rings: Vec<Vec<Position>>,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum PolygonRepr {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
}

impl Polygon2d {
    /// Build a polygon from closed rings, exterior first.
    pub fn new(rings: Vec<Vec<Position>>) -> Result<Self> {
        if rings.is_empty() {
            return Err(Error::InvalidPolygon(
                "polygon must have an exterior ring".to_string(),
            ));
        }

        for (i, ring) in rings.iter().enumerate() {
            if ring.len() < MIN_RING_LEN {
                return Err(Error::InvalidPolygon(format!(
                    "ring {} has {} positions, at least {} required",
                    i,
                    ring.len(),
                    MIN_RING_LEN
                )));
            }
            if ring.first() != ring.last() {
                return Err(Error::InvalidPolygon(format!(
                    "ring {} is not closed (first and last position differ)",
                    i
                )));
            }
            if ring.iter().flatten().any(|c| !c.is_finite()) {
                return Err(Error::InvalidPolygon(format!(
                    "ring {} contains a non-finite coordinate",
                    i
                )));
            }
        }

        Ok(Self { rings })
    }

    /// All rings, exterior first
    pub fn rings(&self) -> &[Vec<Position>] {
        &self.rings
    }

    pub fn exterior(&self) -> &[Position] {
        &self.rings[0]
    }

    pub fn interiors(&self) -> &[Vec<Position>] {
        &self.rings[1..]
    }
}

impl TryFrom<PolygonRepr> for Polygon2d {
    type Error = Error;

    fn try_from(repr: PolygonRepr) -> Result<Self> {
        let PolygonRepr::Polygon { coordinates } = repr;
        let rings = coordinates
            .into_iter()
            .map(|ring| {
                ring.into_iter()
                    .map(|position| match position.as_slice() {
                        [x, y] => Ok([*x, *y]),
                        _ => Err(Error::NotTwoDimensional),
                    })
                    .collect::<Result<Vec<Position>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Polygon2d::new(rings)
    }
}

impl From<Polygon2d> for PolygonRepr {
    fn from(polygon: Polygon2d) -> Self {
        PolygonRepr::Polygon {
            coordinates: polygon
                .rings
                .into_iter()
                .map(|ring| ring.into_iter().map(|p| p.to_vec()).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// Polygon feature with arbitrary attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Polygon2d,
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl Feature {
    pub fn new(geometry: Polygon2d, properties: Option<Properties>) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: None,
            geometry,
            properties,
        }
    }

    /// Look up a property by name
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    /// Elevation of the feature, if it carries a numeric one
    pub fn elevation(&self) -> Option<f64> {
        self.property(ELEVATION).and_then(Value::as_f64)
    }

    /// Validate the `elevation` property. Only JSON floats are accepted;
    /// integers and other types are rejected.
    pub(crate) fn require_elevation(&self, index: usize) -> Result<f64> {
        match self.property(ELEVATION) {
            None => Err(Error::MissingElevation { index }),
            Some(Value::Number(n)) if n.is_f64() => {
                n.as_f64().ok_or(Error::InvalidElevation { index })
            }
            Some(_) => Err(Error::InvalidElevation { index }),
        }
    }
}

/// Ordered collection of polygon features
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    tag: FeatureCollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: FeatureCollectionTag::FeatureCollection,
            features,
        }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
