//! List command handler

use std::io;
use std::path::Path;

use tokio::fs;

use crate::domain::recording::RecordingName;

use super::presenter::Presenter;

/// A saved recording found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingEntry {
    pub file_name: String,
    pub size: u64,
    suffix: u32,
}

/// Print the recordings in `dir` named after `name`
pub async fn handle_list_command(
    dir: &Path,
    name: &RecordingName,
    presenter: &Presenter,
) -> io::Result<()> {
    let entries = collect_recordings(dir, name).await?;

    if entries.is_empty() {
        presenter.info(&format!("No recordings in {}", dir.display()));
        return Ok(());
    }

    for entry in &entries {
        presenter.key_value(&entry.file_name, &format_size(entry.size));
    }
    Ok(())
}

/// Recordings in `dir` ordered by suffix. A missing directory has none.
pub async fn collect_recordings(
    dir: &Path,
    name: &RecordingName,
) -> io::Result<Vec<RecordingEntry>> {
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(suffix) = name.suffix_of(&file_name) else {
            continue;
        };
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        entries.push(RecordingEntry {
            file_name,
            size: metadata.len(),
            suffix,
        });
    }

    entries.sort_by_key(|e| e.suffix);
    Ok(entries)
}

/// Format a byte count for display
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
