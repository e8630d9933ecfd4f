//! Registry of long-running engine jobs (offline map generation, tile
//! exports, geodatabase sync, geoprocessing).
//!
//! The registry is an explicit value owned by the host. Every change is
//! written through a [`JobStore`] so jobs can be resumed after a restart.

mod store;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ToolkitError, ToolkitResult};

pub use store::{JOB_DOCUMENT_VERSION, JobDocument, JobStore, JsonFileJobStore, MemoryJobStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Engine capability a job drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    GenerateOfflineMap,
    SyncOfflineMap,
    ExportTileCache,
    EstimateTileCacheSize,
    ExportVectorTiles,
    GenerateGeodatabase,
    SyncGeodatabase,
    Geoprocessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    NotStarted,
    Started,
    Paused,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Terminal states; a finished job never changes status again.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub kind: JobKind,
    pub status: JobStatus,
    /// Host-defined payload needed to resume the job (service URL, area of
    /// interest, output path, ...).
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertion-ordered set of jobs backed by a [`JobStore`].
pub struct JobRegistry<S: JobStore> {
    store: S,
    jobs: IndexMap<JobId, JobRecord>,
    next_id: u64,
}

impl<S: JobStore> JobRegistry<S> {
    /// Loads previously saved jobs from `store`.
    pub fn open(mut store: S) -> ToolkitResult<Self> {
        let records = store.load()?;
        let mut jobs = IndexMap::with_capacity(records.len());
        for record in records {
            if jobs.insert(record.id, record).is_some() {
                warn!("duplicate job id in store; keeping the last record");
            }
        }
        let next_id = jobs.keys().map(|id: &JobId| id.raw()).max().map_or(1, |max| max + 1);
        debug!(job_count = jobs.len(), "job registry opened");
        Ok(Self {
            store,
            jobs,
            next_id,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: JobId) -> Option<&JobRecord> {
        self.jobs.get(&id)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.values()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a job in `NotStarted` state.
    ///
    /// Like every mutation below, the change only lands in memory once the
    /// store accepted it; a failed save leaves the registry untouched.
    pub fn register(&mut self, kind: JobKind, parameters: serde_json::Value) -> ToolkitResult<JobId> {
        let id = JobId(self.next_id);
        let now = Utc::now();
        let mut jobs = self.jobs.clone();
        jobs.insert(
            id,
            JobRecord {
                id,
                kind,
                status: JobStatus::NotStarted,
                parameters,
                error: None,
                created_at: now,
                updated_at: now,
            },
        );
        self.commit(jobs)?;
        self.next_id += 1;
        debug!(job_id = id.raw(), ?kind, "job registered");
        Ok(id)
    }

    /// Moves a job to `status`. `error` is kept only for failed jobs.
    pub fn update_status(
        &mut self,
        id: JobId,
        status: JobStatus,
        error: Option<String>,
    ) -> ToolkitResult<()> {
        let current = self
            .jobs
            .get(&id)
            .ok_or_else(|| ToolkitError::InvalidData(format!("unknown job id {}", id.raw())))?;
        if current.status.is_finished() {
            return Err(ToolkitError::InvalidData(format!(
                "job {} already finished with status {:?}",
                id.raw(),
                current.status
            )));
        }
        let mut jobs = self.jobs.clone();
        if let Some(record) = jobs.get_mut(&id) {
            record.status = status;
            record.error = if status == JobStatus::Failed { error } else { None };
            record.updated_at = Utc::now();
        }
        self.commit(jobs)?;
        debug!(job_id = id.raw(), ?status, "job status updated");
        Ok(())
    }

    /// Removes a job. Returns `false` when the id is unknown.
    pub fn unregister(&mut self, id: JobId) -> ToolkitResult<bool> {
        if !self.jobs.contains_key(&id) {
            return Ok(false);
        }
        let mut jobs = self.jobs.clone();
        jobs.shift_remove(&id);
        self.commit(jobs)?;
        Ok(true)
    }

    /// Drops every finished job; returns how many were removed.
    pub fn clear_finished(&mut self) -> ToolkitResult<usize> {
        let mut jobs = self.jobs.clone();
        jobs.retain(|_, record| !record.status.is_finished());
        let removed = self.jobs.len() - jobs.len();
        if removed > 0 {
            self.commit(jobs)?;
        }
        Ok(removed)
    }

    /// Jobs a host should resume after restart, in registration order.
    pub fn resumable_jobs(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs
            .values()
            .filter(|record| !record.status.is_finished())
    }

    /// Writes the final state and hands the store back.
    pub fn close(mut self) -> ToolkitResult<S> {
        let records: Vec<JobRecord> = self.jobs.values().cloned().collect();
        self.store.save(&records)?;
        Ok(self.store)
    }

    /// Saves `jobs` and adopts them as the registry state on success.
    fn commit(&mut self, jobs: IndexMap<JobId, JobRecord>) -> ToolkitResult<()> {
        let records: Vec<JobRecord> = jobs.values().cloned().collect();
        if let Err(err) = self.store.save(&records) {
            warn!(error = %err, "job store rejected save; registry unchanged");
            return Err(err);
        }
        self.jobs = jobs;
        Ok(())
    }
}
