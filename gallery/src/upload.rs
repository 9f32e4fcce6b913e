//! Upload orchestration: targets → transfer → register, one file at a time.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bytes never pass through the backend. The backend hands out one pre-signed
//! storage URL per file, the client PUTs straight to storage, and then tells
//! the backend to create the Photo record.
//!
//! ORDERING
//! ========
//! Targets for the whole batch come from a single request; if it fails no
//! file moves. Files are then processed strictly in input order with one unit
//! of work outstanding, so the status log reads top to bottom and at most one
//! file is ever half-done. The first failure aborts the rest of the batch;
//! files already registered stay registered.
//!
//! A transfer that succeeds but whose registration fails leaves an object in
//! storage with no Photo record. That end state is reported
//! ([`UploadJob::orphaned`]) but not repaired.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::api::ApiClient;
use crate::error::{ClientError, UploadError};
use crate::session::SessionProvider;
use crate::transport::Transport;
use crate::types::{PhotoRegistration, UploadTarget};

/// One file picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

/// Why a file did not reach `Registered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCause {
    /// The batch target request failed.
    TargetRequest,
    /// The backend returned no target for this filename.
    NoTarget,
    Transfer,
    /// Stored, but the Photo record was not created.
    Registration,
    /// An earlier file failed; this one was never attempted.
    Aborted,
}

/// Per-file state machine: `Pending → Uploading → Uploaded → Registered`,
/// or `Failed` from any non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Pending,
    Uploading,
    Uploaded,
    Registered,
    Failed(FailureCause),
}

impl FileStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Registered | Self::Failed(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobEntry {
    pub file: LocalFile,
    pub target: Option<UploadTarget>,
    pub status: FileStatus,
}

/// Progress notifications, in the order they happen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadEvent {
    Uploading { index: usize, filename: String },
    Uploaded { index: usize, filename: String },
    Failed { index: usize, filename: String, cause: FailureCause },
}

impl UploadEvent {
    /// Human-readable status line, if this event adds one to the log.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Uploading { filename, .. } => Some(format!("Uploading {filename}...")),
            Self::Uploaded { filename, .. } => Some(format!("Uploaded {filename}")),
            Self::Failed { .. } => None,
        }
    }
}

/// Client-side aggregate for one "start upload" action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadJob {
    album_id: String,
    entries: Vec<JobEntry>,
    log: Vec<String>,
}

impl UploadJob {
    /// # Errors
    ///
    /// [`UploadError::EmptyBatch`] when no files were picked.
    pub fn new(album_id: impl Into<String>, files: Vec<LocalFile>) -> Result<Self, UploadError> {
        if files.is_empty() {
            return Err(UploadError::EmptyBatch);
        }
        let entries = files
            .into_iter()
            .map(|file| JobEntry { file, target: None, status: FileStatus::Pending })
            .collect();
        Ok(Self { album_id: album_id.into(), entries, log: Vec::new() })
    }

    #[must_use]
    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    #[must_use]
    pub fn entries(&self) -> &[JobEntry] {
        &self.entries
    }

    /// Append-only status log.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<FileStatus> {
        self.entries.iter().map(|e| e.status).collect()
    }

    #[must_use]
    pub fn registered(&self) -> Vec<&str> {
        self.filenames_where(|s| s == FileStatus::Registered)
    }

    /// Files stored without a Photo record.
    #[must_use]
    pub fn orphaned(&self) -> Vec<&str> {
        self.filenames_where(|s| s == FileStatus::Failed(FailureCause::Registration))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.entries.iter().all(|e| e.status.is_terminal())
    }

    fn filenames_where(&self, pred: impl Fn(FileStatus) -> bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| pred(e.status))
            .map(|e| e.file.name.as_str())
            .collect()
    }

    fn filenames(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.file.name.clone()).collect()
    }

    /// Give each entry the first unclaimed target with the exact same name.
    fn assign_targets(&mut self, mut targets: Vec<UploadTarget>) {
        for entry in &mut self.entries {
            if let Some(pos) = targets.iter().position(|t| t.filename == entry.file.name) {
                entry.target = Some(targets.remove(pos));
            }
        }
        if !targets.is_empty() {
            log::debug!("ignoring {} upload targets with no matching file", targets.len());
        }
    }

    fn fail_from(&mut self, start: usize, cause: FailureCause) {
        for entry in self.entries.iter_mut().skip(start) {
            if !entry.status.is_terminal() {
                entry.status = FileStatus::Failed(cause);
            }
        }
    }

    fn emit<F: FnMut(&UploadEvent)>(&mut self, event: UploadEvent, on_event: &mut F) {
        if let Some(line) = event.status_line() {
            self.log.push(line);
        }
        on_event(&event);
    }
}

/// Counts for a job that ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadSummary {
    pub registered: usize,
}

/// Run every file of `job` through transfer and registration.
///
/// `on_event` observes progress as it happens; the same lines are appended to
/// [`UploadJob::log`]. Each file's bytes are handed to the transport and are
/// no longer held by the job afterwards.
///
/// # Errors
///
/// Returns the first failure. Every file then has a terminal status: files
/// before it `Registered`, the failing file `Failed(cause)`, files after it
/// `Failed(Aborted)`.
pub async fn run<T, S, F>(api: &ApiClient<T, S>, job: &mut UploadJob, mut on_event: F) -> Result<UploadSummary, UploadError>
where
    T: Transport,
    S: SessionProvider,
    F: FnMut(&UploadEvent),
{
    let filenames = job.filenames();
    log::info!("requesting {} upload targets for album {}", filenames.len(), job.album_id);
    let targets = match api.upload_targets(&job.album_id, &filenames).await {
        Ok(targets) => targets,
        Err(err) => {
            job.fail_from(0, FailureCause::TargetRequest);
            return Err(UploadError::Targets(err));
        }
    };
    job.assign_targets(targets);

    for index in 0..job.entries.len() {
        if let Err(err) = upload_one(api, job, index, &mut on_event).await {
            job.fail_from(index + 1, FailureCause::Aborted);
            log::warn!("upload batch for album {} stopped at file {}: {err}", job.album_id, index + 1);
            return Err(err);
        }
    }
    Ok(UploadSummary { registered: job.entries.len() })
}

async fn upload_one<T, S, F>(api: &ApiClient<T, S>, job: &mut UploadJob, index: usize, on_event: &mut F) -> Result<(), UploadError>
where
    T: Transport,
    S: SessionProvider,
    F: FnMut(&UploadEvent),
{
    let filename = job.entries[index].file.name.clone();
    let Some(target) = job.entries[index].target.clone() else {
        fail(job, index, FailureCause::NoTarget, on_event);
        return Err(UploadError::NoTarget { filename });
    };

    job.entries[index].status = FileStatus::Uploading;
    job.emit(UploadEvent::Uploading { index, filename: filename.clone() }, on_event);

    let bytes = std::mem::take(&mut job.entries[index].file.bytes);
    log::info!("uploading {filename} ({} bytes)", bytes.len());
    if let Err(source) = api.put_object(&target.upload_url, bytes).await {
        fail(job, index, FailureCause::Transfer, on_event);
        return Err(UploadError::Transfer { filename, source });
    }
    job.entries[index].status = FileStatus::Uploaded;

    let registration = match api.settings().public_object_url(&target.blob_path) {
        Ok(public_url) => PhotoRegistration {
            album_id: job.album_id.clone(),
            filename: filename.clone(),
            blob_path: target.blob_path.clone(),
            public_url,
        },
        Err(err) => return Err(orphan(job, index, filename, target, err.into(), on_event)),
    };
    if let Err(err) = api.register_photo(&registration).await {
        return Err(orphan(job, index, filename, target, err, on_event));
    }

    job.entries[index].status = FileStatus::Registered;
    job.emit(UploadEvent::Uploaded { index, filename }, on_event);
    Ok(())
}

fn fail<F: FnMut(&UploadEvent)>(job: &mut UploadJob, index: usize, cause: FailureCause, on_event: &mut F) {
    job.entries[index].status = FileStatus::Failed(cause);
    let filename = job.entries[index].file.name.clone();
    job.emit(UploadEvent::Failed { index, filename, cause }, on_event);
}

fn orphan<F: FnMut(&UploadEvent)>(
    job: &mut UploadJob,
    index: usize,
    filename: String,
    target: UploadTarget,
    source: ClientError,
    on_event: &mut F,
) -> UploadError {
    log::warn!("{} is stored at {} but has no photo record", filename, target.blob_path);
    fail(job, index, FailureCause::Registration, on_event);
    UploadError::Registration { filename, blob_path: target.blob_path, source }
}
