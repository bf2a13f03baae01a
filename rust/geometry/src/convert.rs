// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion between the GeoJSON data model and `geo` types

use crate::error::Result;
use archsplit_core::{Feature, Polygon2d, Position};
use geo::{Coord, LineString, Polygon};

fn ring_to_line_string(ring: &[Position]) -> LineString {
    ring.iter().map(|&[x, y]| Coord { x, y }).collect()
}

fn line_string_to_ring(line: &LineString) -> Vec<Position> {
    line.coords().map(|c| [c.x, c.y]).collect()
}

/// Convert a data model polygon, exterior first, into a `geo` polygon
pub fn to_geo(polygon: &Polygon2d) -> Polygon {
    Polygon::new(
        ring_to_line_string(polygon.exterior()),
        polygon
            .interiors()
            .iter()
            .map(|ring| ring_to_line_string(ring))
            .collect(),
    )
}

/// Convert a `geo` polygon back into the data model.
///
/// `geo` keeps rings closed, so this only fails on degenerate rings.
pub fn from_geo(polygon: &Polygon) -> Result<Polygon2d> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(line_string_to_ring(polygon.exterior()));
    rings.extend(polygon.interiors().iter().map(line_string_to_ring));
    Ok(Polygon2d::new(rings)?)
}

/// Geometries of all features, in order
pub fn feature_polygons(features: &[Feature]) -> Vec<Polygon> {
    features.iter().map(|f| to_geo(&f.geometry)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_with_hole_survives_conversion() {
        let source = Polygon2d::new(vec![
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
            vec![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0], [2.0, 1.0], [1.0, 1.0]],
        ])
        .unwrap();

        let polygon = to_geo(&source);
        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.interiors().len(), 1);

        assert_eq!(from_geo(&polygon).unwrap(), source);
    }
}
