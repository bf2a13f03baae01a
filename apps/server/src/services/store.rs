// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disk-based split document store using cacache.
//!
//! Every split triple is one JSON document keyed by `{project, id}`.

use crate::error::ApiError;
use crate::types::SplitRecord;
use archsplit_core::{BuildingLimits, HeightPlateaus, Split};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const KEY_PREFIX: &str = "split:";

/// Persistent store of split triples.
#[derive(Debug, Clone)]
pub struct SplitStore {
    data_dir: PathBuf,
    max_page_size: usize,
}

impl SplitStore {
    /// Create a new store in the specified directory.
    pub async fn new(data_dir: &str, max_page_size: usize) -> Self {
        let path = PathBuf::from(data_dir);

        if let Err(e) = tokio::fs::create_dir_all(&path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to create data directory"
            );
        }

        Self {
            data_dir: path,
            max_page_size: max_page_size.max(1),
        }
    }

    /// Store key. The id comes first: it never contains the separator, so
    /// any project name can follow it unambiguously.
    fn key(project: &str, id: &Uuid) -> String {
        format!("{}{}:{}", KEY_PREFIX, id, project)
    }

    fn key_project(key: &str) -> Option<&str> {
        let (id, project) = key.strip_prefix(KEY_PREFIX)?.split_once(':')?;
        id.parse::<Uuid>().ok()?;
        Some(project)
    }

    /// Persist a split triple under a fresh id.
    pub async fn save(
        &self,
        project: &str,
        building_limits: BuildingLimits,
        height_plateaus: HeightPlateaus,
        split: Split,
    ) -> Result<SplitRecord, ApiError> {
        let record = SplitRecord {
            id: Uuid::new_v4(),
            project: project.to_string(),
            created_at: now_millis(),
            building_limits,
            height_plateaus,
            split,
        };

        let data = serde_json::to_vec(&record)?;
        cacache::write(&self.data_dir, Self::key(project, &record.id), &data).await?;
        tracing::debug!(project = %project, id = %record.id, size = data.len(), "Stored split");

        Ok(record)
    }

    /// Get a split by project and id.
    pub async fn get(&self, project: &str, id: &Uuid) -> Result<Option<SplitRecord>, ApiError> {
        match cacache::read(&self.data_dir, Self::key(project, id)).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a split. Returns false if it did not exist.
    pub async fn delete(&self, project: &str, id: &Uuid) -> Result<bool, ApiError> {
        let key = Self::key(project, id);
        if cacache::metadata(&self.data_dir, &key).await?.is_none() {
            return Ok(false);
        }
        cacache::remove(&self.data_dir, &key).await?;
        tracing::debug!(project = %project, id = %id, "Removed split");
        Ok(true)
    }

    /// Remove every split of a project, returning how many were removed.
    pub async fn delete_all(&self, project: &str) -> Result<usize, ApiError> {
        let entries = self.entries(project).await?;
        for entry in &entries {
            cacache::remove(&self.data_dir, &entry.key).await?;
        }
        tracing::debug!(project = %project, count = entries.len(), "Removed all splits");
        Ok(entries.len())
    }

    /// List splits of a project, oldest first. `limit` defaults to and is
    /// capped by the maximum page size.
    pub async fn list(
        &self,
        project: &str,
        skip: usize,
        limit: Option<usize>,
    ) -> Result<Vec<SplitRecord>, ApiError> {
        let limit = limit.unwrap_or(self.max_page_size).min(self.max_page_size);
        let entries = self.entries(project).await?;

        let mut records = Vec::with_capacity(limit.min(entries.len()));
        for entry in entries.into_iter().skip(skip).take(limit) {
            let data = cacache::read_hash(&self.data_dir, &entry.integrity).await?;
            records.push(serde_json::from_slice(&data)?);
        }
        Ok(records)
    }

    /// Index entries of one project, ordered by write time.
    async fn entries(&self, project: &str) -> Result<Vec<cacache::Metadata>, ApiError> {
        let data_dir = self.data_dir.clone();
        let project = project.to_string();

        let mut entries = tokio::task::spawn_blocking(move || {
            cacache::list_sync(&data_dir)
                .filter_map(|entry| match entry {
                    Ok(metadata) => (Self::key_project(&metadata.key) == Some(project.as_str()))
                        .then_some(Ok(metadata)),
                    // No index yet: nothing has been stored
                    Err(cacache::Error::IoError(e, _)) if e.kind() == std::io::ErrorKind::NotFound => {
                        None
                    }
                    Err(e) => Some(Err(e)),
                })
                .collect::<Result<Vec<_>, cacache::Error>>()
        })
        .await??;

        entries.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.key.cmp(&b.key)));
        Ok(entries)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
