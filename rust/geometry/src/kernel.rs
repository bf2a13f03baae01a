// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry kernel capability interface
//!
//! Validation and splitting only need a handful of robust polygon
//! operations. They are gathered behind [`GeometryKernel`] so another
//! computational geometry backend can be substituted. [`GeoKernel`] is the
//! default, backed by the `geo` crate (boolean operations and buffering run
//! on `i_overlay`).

use geo::{unary_union, Area, BooleanOps, Buffer, Covers, Geometry, MultiPolygon, Polygon};

/// Polygon operations required by the validator, coverage checker and splitter
pub trait GeometryKernel: Sync {
    /// Unsigned area of a single polygon
    fn polygon_area(&self, polygon: &Polygon) -> f64;

    /// Unsigned area of a possibly multi-part region
    fn region_area(&self, region: &MultiPolygon) -> f64;

    /// Union of all polygons into one possibly multi-part region
    fn union(&self, polygons: &[Polygon]) -> MultiPolygon;

    /// Expand a region outwards by `distance`
    fn buffer(&self, region: &MultiPolygon, distance: f64) -> MultiPolygon;

    /// True when every point of `inner` lies in the closed `outer` region
    fn covers(&self, outer: &MultiPolygon, inner: &MultiPolygon) -> bool;

    /// Intersection of two polygons. Callers must be prepared for any
    /// geometry type, although polygonal results are the only valid ones.
    fn intersection(&self, a: &Polygon, b: &Polygon) -> Geometry;
}

/// [`GeometryKernel`] implemented with the `geo` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl GeometryKernel for GeoKernel {
    fn polygon_area(&self, polygon: &Polygon) -> f64 {
        polygon.unsigned_area()
    }

    fn region_area(&self, region: &MultiPolygon) -> f64 {
        region.unsigned_area()
    }

    fn union(&self, polygons: &[Polygon]) -> MultiPolygon {
        unary_union(polygons)
    }

    fn buffer(&self, region: &MultiPolygon, distance: f64) -> MultiPolygon {
        region.buffer(distance)
    }

    fn covers(&self, outer: &MultiPolygon, inner: &MultiPolygon) -> bool {
        outer.covers(inner)
    }

    fn intersection(&self, a: &Polygon, b: &Polygon) -> Geometry {
        Geometry::MultiPolygon(a.intersection(b))
    }
}

/// Area of an arbitrary kernel result; non-polygonal geometries have none
pub fn geometry_area<K: GeometryKernel>(kernel: &K, geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Polygon(p) => kernel.polygon_area(p),
        Geometry::MultiPolygon(mp) => kernel.region_area(mp),
        Geometry::Rect(r) => kernel.polygon_area(&r.to_polygon()),
        Geometry::Triangle(t) => kernel.polygon_area(&t.to_polygon()),
        Geometry::GeometryCollection(gc) => gc.iter().map(|g| geometry_area(kernel, g)).sum(),
        _ => 0.0,
    }
}

/// Human readable GeoJSON-style name of a geometry variant
pub fn geometry_type_name(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
