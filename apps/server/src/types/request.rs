// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use archsplit_core::{BuildingLimits, HeightPlateaus};
use serde::Deserialize;

/// Body of `POST /projects/:project/splits`.
///
/// Deserializing validates both collections, so a value of this type is
/// ready to be split.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSplitInput {
    pub building_limits: BuildingLimits,
    pub height_plateaus: HeightPlateaus,
}

/// Query parameters for listing splits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Number of records to skip.
    #[serde(default)]
    pub skip: usize,

    /// Page size, capped by the server's maximum page size.
    #[serde(default)]
    pub limit: Option<usize>,
}
