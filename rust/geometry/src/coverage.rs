// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant coverage check between two polygon collections

use crate::kernel::GeometryKernel;
use geo::Polygon;

/// Check that the union of `inner` lies within the union of `outer`.
///
/// Only the covering side is buffered by `tolerance`: boundaries that should
/// coincide rarely do at floating point precision, while buffering `inner`
/// as well could hide plateaus that fall just short of a limit edge.
pub fn covers<K: GeometryKernel>(
    kernel: &K,
    outer: &[Polygon],
    inner: &[Polygon],
    tolerance: f64,
) -> bool {
    let outer_union = kernel.union(outer);
    let inner_union = kernel.union(inner);
    let outer_buffered = kernel.buffer(&outer_union, tolerance);
    kernel.covers(&outer_buffered, &inner_union)
}
