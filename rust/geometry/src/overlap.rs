// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Self-overlap detection within one polygon collection
//!
//! Polygons that only share boundary edges or points do not overlap.

use crate::config::{OverlapCheck, SplitConfig};
use crate::kernel::{geometry_area, GeometryKernel};
use geo::{BoundingRect, Intersects, Polygon};

/// Check if any two polygons of the collection share area beyond the
/// configured tolerance
pub fn has_self_overlap<K: GeometryKernel>(
    kernel: &K,
    polygons: &[Polygon],
    config: &SplitConfig,
) -> bool {
    if polygons.len() < 2 {
        return false;
    }

    match config.overlap_check {
        OverlapCheck::AreaDifference => area_difference_overlap(kernel, polygons, config.tolerance),
        OverlapCheck::Pairwise => pairwise_overlap(kernel, polygons, config.tolerance),
    }
}

/// Overlapping area is counted twice in the sum of polygon areas but only
/// once in the area of the union.
///
/// Known approximation: an overlap can be masked when it cancels against
/// area lost in the union numerically. [`OverlapCheck::Pairwise`] does not
/// have this blind spot.
fn area_difference_overlap<K: GeometryKernel>(kernel: &K, polygons: &[Polygon], tolerance: f64) -> bool {
    let union_area = kernel.region_area(&kernel.union(polygons));
    let sum_area: f64 = polygons.iter().map(|p| kernel.polygon_area(p)).sum();

    let difference = (sum_area - union_area).abs();
    tracing::trace!(sum_area, union_area, difference, "Area difference overlap check");
    difference > tolerance
}

fn pairwise_overlap<K: GeometryKernel>(kernel: &K, polygons: &[Polygon], tolerance: f64) -> bool {
    let bounds: Vec<_> = polygons.iter().map(|p| p.bounding_rect()).collect();

    for i in 0..polygons.len() {
        let Some(rect_i) = bounds[i] else { continue };
        for j in (i + 1)..polygons.len() {
            let Some(rect_j) = bounds[j] else { continue };
            if !rect_i.intersects(&rect_j) {
                continue;
            }

            let shared = geometry_area(kernel, &kernel.intersection(&polygons[i], &polygons[j]));
            if shared > tolerance {
                tracing::trace!(i, j, shared, "Pairwise overlap found");
                return true;
            }
        }
    }

    false
}
