// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splits the shared GeoJSON test cases under `tests/testcases`.

use approx::assert_relative_eq;
use archsplit_core::{BuildingLimits, HeightPlateaus};
use archsplit_geometry::convert::{feature_polygons, to_geo};
use archsplit_geometry::{
    covers, has_self_overlap, split_building_limits, Error, GeoKernel, GeometryKernel,
    OverlapCheck, SplitConfig, Splitter, SplittingError, DEFAULT_TOLERANCE,
};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

const TESTCASES_PATH: &str = "../../tests/testcases";

fn testcase_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(TESTCASES_PATH)
        .join(name)
}

fn load_json(name: &str, file: &str) -> Value {
    let path = testcase_dir(name).join(file);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Test case file {} not readable: {}", path.display(), e));
    serde_json::from_str(&content).unwrap()
}

/// Load a test case as raw JSON: (building limits, height plateaus)
fn load_raw(name: &str) -> (Value, Value) {
    (
        load_json(name, "building_limits.geojson"),
        load_json(name, "height_plateaus.geojson"),
    )
}

fn load(name: &str) -> (BuildingLimits, HeightPlateaus) {
    let (limits, plateaus) = load_raw(name);
    (
        serde_json::from_value(limits).unwrap(),
        serde_json::from_value(plateaus).unwrap(),
    )
}

fn all_configs() -> [SplitConfig; 2] {
    [
        SplitConfig::default(),
        SplitConfig::default().with_overlap_check(OverlapCheck::Pairwise),
    ]
}

#[test]
fn test_overlap_detection_on_testcases() {
    for config in all_configs() {
        let (limits, plateaus) = load("vaterlandsparken");
        assert!(!has_self_overlap(&GeoKernel, &feature_polygons(limits.features()), &config));
        assert!(!has_self_overlap(&GeoKernel, &feature_polygons(plateaus.features()), &config));

        let (limits, plateaus) = load("invalid_overlapping_height_plateaus");
        assert!(!has_self_overlap(&GeoKernel, &feature_polygons(limits.features()), &config));
        assert!(has_self_overlap(&GeoKernel, &feature_polygons(plateaus.features()), &config));

        let (limits, plateaus) = load("invalid_overlapping_building_limits");
        assert!(has_self_overlap(&GeoKernel, &feature_polygons(limits.features()), &config));
        assert!(!has_self_overlap(&GeoKernel, &feature_polygons(plateaus.features()), &config));
    }
}

#[test]
fn test_vaterlandsparken_split() {
    let (limits, plateaus) = load("vaterlandsparken");
    let split = split_building_limits(&limits, &plateaus).unwrap();

    assert_eq!(split.len(), 3);
    let elevations: Vec<f64> = split.features().iter().map(|f| f.elevation().unwrap()).collect();
    assert_ne!(elevations[0], elevations[1]);
    assert_ne!(elevations[0], elevations[2]);
    assert_ne!(elevations[1], elevations[2]);

    // Plateau-major output order
    assert_eq!(elevations, vec![3.63, 4.63, 6.63]);

    // Building limit properties are carried along
    for feature in split.features() {
        assert_eq!(
            feature.property("name").and_then(Value::as_str),
            Some("Vaterlandsparken")
        );
    }
}

#[test]
fn test_split_partitions_building_limits() {
    let kernel = GeoKernel;
    let (limits, plateaus) = load("vaterlandsparken");
    let split = split_building_limits(&limits, &plateaus).unwrap();

    let limit_polygons = feature_polygons(limits.features());
    let split_polygons = feature_polygons(split.features());

    let limit_area = kernel.region_area(&kernel.union(&limit_polygons));
    let split_area: f64 = split_polygons.iter().map(|p| kernel.polygon_area(p)).sum();
    let split_union_area = kernel.region_area(&kernel.union(&split_polygons));

    assert_relative_eq!(split_area, limit_area, epsilon = DEFAULT_TOLERANCE);
    assert_relative_eq!(split_union_area, limit_area, epsilon = DEFAULT_TOLERANCE);
    assert!(!has_self_overlap(&kernel, &split_polygons, &SplitConfig::default()));
}

#[test]
fn test_split_pieces_inherit_covering_plateau_elevation() {
    let (limits, plateaus) = load("vaterlandsparken");
    let split = split_building_limits(&limits, &plateaus).unwrap();

    for piece in split.features() {
        let piece_polygon = [to_geo(&piece.geometry)];
        let sources: Vec<_> = plateaus
            .features()
            .iter()
            .filter(|plateau| {
                covers(&GeoKernel, &[to_geo(&plateau.geometry)], &piece_polygon, DEFAULT_TOLERANCE)
            })
            .collect();

        assert_eq!(sources.len(), 1, "each piece lies in exactly one plateau");
        assert_eq!(piece.elevation(), sources[0].elevation());
    }
}

#[test]
fn test_split_features_are_simple_polygons() {
    let (limits, plateaus) = load("vaterlandsparken");
    let split = split_building_limits(&limits, &plateaus).unwrap();
    let value = serde_json::to_value(&split).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    for feature in value["features"].as_array().unwrap() {
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert!(feature["properties"]["elevation"].is_f64());
    }
}

#[test]
fn test_invalid_testcases_fail_with_splitting_error() {
    let cases = [
        (
            "invalid_overlapping_building_limits",
            SplittingError::BuildingLimitsOverlap,
            "The building limits must not overlap with themselves",
        ),
        (
            "invalid_overlapping_height_plateaus",
            SplittingError::HeightPlateausOverlap,
            "The height plateaus must not overlap with themselves",
        ),
        (
            "invalid_not_covering",
            SplittingError::NotCovering,
            "The height plateaus do not completely cover the building limits",
        ),
    ];

    for config in all_configs() {
        let splitter = Splitter::new(config);
        for (name, expected, message) in cases {
            let (limits, plateaus) = load(name);
            match splitter.split(&limits, &plateaus) {
                Err(Error::Splitting(err)) => {
                    assert_eq!(err, expected, "{}", name);
                    assert_eq!(err.to_string(), message);
                }
                other => panic!("{}: expected splitting error, got {:?}", name, other),
            }
        }
    }
}

#[test]
fn test_removing_plateau_corner_breaks_coverage() {
    let (limits, mut plateaus) = load_raw("vaterlandsparken");

    // Drop the last corner of the first plateau and close the ring again
    let ring = plateaus["features"][0]["geometry"]["coordinates"][0]
        .as_array_mut()
        .unwrap();
    ring.pop();
    let first = ring[0].clone();
    *ring.last_mut().unwrap() = first;

    let limits: BuildingLimits = serde_json::from_value(limits).unwrap();
    let plateaus: HeightPlateaus = serde_json::from_value(plateaus).unwrap();
    let err = split_building_limits(&limits, &plateaus).unwrap_err();
    assert!(matches!(err, Error::Splitting(SplittingError::NotCovering)));
}

#[test]
fn test_plateaus_cover_themselves() {
    let (_, plateaus) = load("vaterlandsparken");
    let polygons = feature_polygons(plateaus.features());
    assert!(covers(&GeoKernel, &polygons, &polygons, DEFAULT_TOLERANCE));
}
