//! Output formatting for command results.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::path::Path;

use gallery::upload::{FailureCause, FileStatus, UploadJob};
use serde::Serialize;

use crate::CliError;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// File name as sent to the backend: the last path component, as-is.
pub fn upload_name(path: &Path) -> Result<String, CliError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::FileName(path.display().to_string()))
}

/// One-line outcome of a finished or aborted job.
pub fn upload_summary(job: &UploadJob) -> String {
    let mut registered = 0;
    let mut failed = 0;
    let mut skipped = 0;
    for status in job.statuses() {
        match status {
            FileStatus::Registered => registered += 1,
            FileStatus::Failed(FailureCause::Aborted) => skipped += 1,
            FileStatus::Failed(_) => failed += 1,
            FileStatus::Pending | FileStatus::Uploading | FileStatus::Uploaded => {}
        }
    }
    let mut summary = format!("{registered} registered, {failed} failed, {skipped} not attempted");
    let orphaned = job.orphaned();
    if !orphaned.is_empty() {
        summary.push_str(&format!("; stored without a photo record: {}", orphaned.join(", ")));
    }
    summary
}
