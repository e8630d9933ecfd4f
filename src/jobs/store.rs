use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ToolkitError, ToolkitResult};

use super::JobRecord;

pub const JOB_DOCUMENT_VERSION: u32 = 1;

/// Persistence hook for [`super::JobRegistry`].
pub trait JobStore {
    fn load(&mut self) -> ToolkitResult<Vec<JobRecord>>;
    fn save(&mut self, jobs: &[JobRecord]) -> ToolkitResult<()>;
}

/// On-disk layout of a saved registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    pub version: u32,
    pub jobs: Vec<JobRecord>,
}

impl JobDocument {
    pub fn to_json_pretty(&self) -> ToolkitResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ToolkitError::Persistence(format!("failed to serialize jobs: {e}")))
    }

    pub fn from_json_str(input: &str) -> ToolkitResult<Self> {
        let document: Self = serde_json::from_str(input)
            .map_err(|e| ToolkitError::Persistence(format!("failed to parse jobs: {e}")))?;
        if document.version != JOB_DOCUMENT_VERSION {
            return Err(ToolkitError::Persistence(format!(
                "unsupported job document version: {}",
                document.version
            )));
        }
        Ok(document)
    }
}

#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: Vec<JobRecord>,
    save_count: usize,
}

impl MemoryJobStore {
    #[must_use]
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs,
            save_count: 0,
        }
    }

    #[must_use]
    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl JobStore for MemoryJobStore {
    fn load(&mut self) -> ToolkitResult<Vec<JobRecord>> {
        Ok(self.jobs.clone())
    }

    fn save(&mut self, jobs: &[JobRecord]) -> ToolkitResult<()> {
        self.jobs = jobs.to_vec();
        self.save_count += 1;
        Ok(())
    }
}

/// Stores jobs as a JSON document; a missing file loads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileJobStore {
    path: PathBuf,
}

impl JsonFileJobStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobStore for JsonFileJobStore {
    fn load(&mut self) -> ToolkitResult<Vec<JobRecord>> {
        let input = match fs::read_to_string(&self.path) {
            Ok(input) => input,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(ToolkitError::Persistence(format!(
                    "failed to read `{}`: {err}",
                    self.path.display()
                )));
            }
        };
        Ok(JobDocument::from_json_str(&input)?.jobs)
    }

    fn save(&mut self, jobs: &[JobRecord]) -> ToolkitResult<()> {
        let document = JobDocument {
            version: JOB_DOCUMENT_VERSION,
            jobs: jobs.to_vec(),
        };
        let output = document.to_json_pretty()?;
        // Write beside the target, then rename, so readers never see a torn file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, output)
            .and_then(|()| fs::rename(&staging, &self.path))
            .map_err(|e| {
                ToolkitError::Persistence(format!(
                    "failed to write `{}`: {e}",
                    self.path.display()
                ))
            })?;
        trace!(path = %self.path.display(), job_count = jobs.len(), "saved jobs");
        Ok(())
    }
}
