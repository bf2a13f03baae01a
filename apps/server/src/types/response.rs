// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use archsplit_core::{BuildingLimits, HeightPlateaus, Split};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted split together with the inputs that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRecord {
    pub id: Uuid,
    pub project: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: u64,
    pub building_limits: BuildingLimits,
    pub height_plateaus: HeightPlateaus,
    pub split: Split,
}

/// Result of deleting every split of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub num_deleted: usize,
}
