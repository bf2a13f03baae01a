// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting building limits by height plateaus
//!
//! [`Splitter::split`] validates both inputs, checks coverage and then
//! intersects every plateau with every building limit. Each resulting piece
//! is a single polygon carrying the elevation of the plateau it came from.
//!
//! Plateaus are always the first operand of the overlay: attributes are
//! inherited from them, with building limit properties only filling keys the
//! plateau does not define.

use crate::config::SplitConfig;
use crate::convert::{feature_polygons, from_geo};
use crate::coverage::covers;
use crate::error::{Error, Result, SplittingError};
use crate::kernel::{geometry_type_name, GeoKernel, GeometryKernel};
use crate::overlap::has_self_overlap;
use archsplit_core::{BuildingLimits, Feature, FeatureCollection, HeightPlateaus, Properties, Split};
use geo::{BoundingRect, Geometry, Intersects, Polygon};
use rayon::prelude::*;

/// Validates inputs and computes the split
#[derive(Debug, Clone)]
pub struct Splitter<K = GeoKernel> {
    kernel: K,
    config: SplitConfig,
}

impl Splitter<GeoKernel> {
    pub fn new(config: SplitConfig) -> Self {
        Self::with_kernel(GeoKernel, config)
    }
}

impl<K: GeometryKernel> Splitter<K> {
    pub fn with_kernel(kernel: K, config: SplitConfig) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split `building_limits` by `height_plateaus`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// building limit self-overlap, plateau self-overlap, then coverage.
    pub fn split(
        &self,
        building_limits: &BuildingLimits,
        height_plateaus: &HeightPlateaus,
    ) -> Result<Split> {
        let _span = tracing::debug_span!(
            "split",
            crs = %self.config.crs,
            building_limits = building_limits.len(),
            height_plateaus = height_plateaus.len(),
        )
        .entered();

        let limit_polygons = feature_polygons(building_limits.features());
        let plateau_polygons = feature_polygons(height_plateaus.features());

        if has_self_overlap(&self.kernel, &limit_polygons, &self.config) {
            return Err(SplittingError::BuildingLimitsOverlap.into());
        }
        if has_self_overlap(&self.kernel, &plateau_polygons, &self.config) {
            return Err(SplittingError::HeightPlateausOverlap.into());
        }
        if !covers(&self.kernel, &plateau_polygons, &limit_polygons, self.config.tolerance) {
            return Err(SplittingError::NotCovering.into());
        }
        tracing::debug!("Inputs validated");

        let features = self.overlay(
            height_plateaus.features(),
            &plateau_polygons,
            building_limits.features(),
            &limit_polygons,
        )?;
        tracing::debug!(pieces = features.len(), "Overlay done");

        Ok(Split::new(FeatureCollection::new(features))?)
    }

    /// Intersect plateaus with limits, plateau-major. Pairs with disjoint
    /// bounding boxes are skipped.
    fn overlay(
        &self,
        plateaus: &[Feature],
        plateau_polygons: &[Polygon],
        limits: &[Feature],
        limit_polygons: &[Polygon],
    ) -> Result<Vec<Feature>> {
        let limit_bounds: Vec<_> = limit_polygons.iter().map(|p| p.bounding_rect()).collect();

        let mut pairs = Vec::new();
        for (i, plateau) in plateau_polygons.iter().enumerate() {
            let Some(plateau_rect) = plateau.bounding_rect() else { continue };
            for (j, limit_rect) in limit_bounds.iter().enumerate() {
                if limit_rect.is_some_and(|r| r.intersects(&plateau_rect)) {
                    pairs.push((i, j));
                }
            }
        }
        tracing::trace!(candidates = pairs.len(), "Overlay candidate pairs");

        let pieces = pairs
            .par_iter()
            .map(|&(i, j)| -> Result<Vec<Feature>> {
                let geometry = self
                    .kernel
                    .intersection(&plateau_polygons[i], &limit_polygons[j]);
                let properties = merge_properties(&plateaus[i], &limits[j]);

                self.decompose(geometry)?
                    .iter()
                    .map(|part| -> Result<Feature> {
                        Ok(Feature::new(from_geo(part)?, Some(properties.clone())))
                    })
                    .collect()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(pieces.into_iter().flatten().collect())
    }

    /// Flatten an intersection result into simple polygons with area.
    ///
    /// Multi-part results become one polygon per part, empty results yield
    /// nothing. Lines and points mean the kernel and tolerance disagree and
    /// are reported instead of dropped.
    fn decompose(&self, geometry: Geometry) -> Result<Vec<Polygon>> {
        let parts = match geometry {
            Geometry::Polygon(polygon) => vec![polygon],
            Geometry::MultiPolygon(multi) => multi.0,
            other => return Err(Error::UnexpectedGeometry(geometry_type_name(&other))),
        };

        Ok(parts
            .into_iter()
            .filter(|p| self.kernel.polygon_area(p) > 0.0)
            .collect())
    }
}

/// Plateau properties, completed with building limit keys it lacks
fn merge_properties(plateau: &Feature, limit: &Feature) -> Properties {
    let mut properties = plateau.properties.clone().unwrap_or_default();
    if let Some(limit_properties) = &limit.properties {
        for (key, value) in limit_properties {
            properties
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
    properties
}

/// Split with the default kernel and configuration
pub fn split_building_limits(
    building_limits: &BuildingLimits,
    height_plateaus: &HeightPlateaus,
) -> Result<Split> {
    Splitter::new(SplitConfig::default()).split(building_limits, height_plateaus)
}
