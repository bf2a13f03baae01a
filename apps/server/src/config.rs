// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use archsplit_geometry::{OverlapCheck, SplitConfig, DEFAULT_CRS, DEFAULT_TOLERANCE};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Directory for the split document store.
    pub data_dir: String,
    /// Maximum request body size in MB.
    pub max_body_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of worker threads for parallel overlay.
    pub worker_threads: usize,
    /// Upper bound for `limit` when listing splits.
    pub max_page_size: usize,
    /// Overlap and coverage tolerance.
    pub split_tolerance: f64,
    /// Coordinate reference system of incoming GeoJSON.
    pub split_crs: String,
    /// Use the pairwise overlap check instead of the area difference.
    pub strict_overlap_check: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing or unparsable values
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        }

        Self {
            host: parse_or(lookup("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_or(lookup("PORT"), 8000),
            data_dir: lookup("DATA_DIR").unwrap_or_else(|| {
                // Docker: /app/data, local dev: ./.data in the working directory
                if std::path::Path::new("/.dockerenv").exists() {
                    "/app/data".into()
                } else {
                    std::env::current_dir()
                        .ok()
                        .and_then(|dir| dir.join(".data").to_str().map(|s| s.to_string()))
                        .unwrap_or_else(|| "./.data".into())
                }
            }),
            max_body_size_mb: parse_or(lookup("MAX_BODY_SIZE_MB"), 50),
            request_timeout_secs: parse_or(lookup("REQUEST_TIMEOUT_SECS"), 60),
            worker_threads: parse_or(lookup("WORKER_THREADS"), num_cpus::get()),
            max_page_size: parse_or(lookup("MAX_PAGE_SIZE"), 100),
            split_tolerance: parse_or(lookup("SPLIT_TOLERANCE"), DEFAULT_TOLERANCE),
            split_crs: lookup("SPLIT_CRS").unwrap_or_else(|| DEFAULT_CRS.into()),
            strict_overlap_check: parse_or(lookup("STRICT_OVERLAP_CHECK"), false),
        }
    }

    /// Request body limit in bytes, saturating at `usize::MAX`.
    pub fn max_body_size_bytes(&self) -> usize {
        self.max_body_size_mb.saturating_mul(1024 * 1024)
    }

    /// Splitter configuration derived from the server settings.
    pub fn split_config(&self) -> SplitConfig {
        let overlap_check = if self.strict_overlap_check {
            OverlapCheck::Pairwise
        } else {
            OverlapCheck::AreaDifference
        };

        SplitConfig::default()
            .with_tolerance(self.split_tolerance)
            .with_crs(self.split_crs.clone())
            .with_overlap_check(overlap_check)
    }
}
