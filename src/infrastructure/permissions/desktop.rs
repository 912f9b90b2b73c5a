//! Desktop permission adapter
//!
//! On a desktop there is no runtime grant dialog. The microphone grant is
//! held when an input device is available, the storage grant when the
//! recordings directory accepts writes.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::application::ports::{PermissionStatus, Permissions};
use crate::infrastructure::recording::CpalRecorder;

/// Probe file written to test storage access
const PROBE_FILE: &str = ".voice-memo-probe";

/// Checks input device availability and recordings directory access
pub struct DesktopPermissions {
    storage_dir: PathBuf,
    microphone_probe: fn() -> bool,
}

impl DesktopPermissions {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            microphone_probe: default_input_available,
        }
    }

    /// Replace the microphone probe
    pub fn with_microphone_probe(mut self, probe: fn() -> bool) -> Self {
        self.microphone_probe = probe;
        self
    }

    fn storage_writable(&self) -> bool {
        if !self.storage_dir.is_dir() {
            return false;
        }
        let probe = self.storage_dir.join(PROBE_FILE);
        match fs::write(&probe, b"") {
            Ok(()) => {
                let _ = fs::remove_file(&probe);
                true
            }
            Err(e) => {
                debug!(dir = %self.storage_dir.display(), "Storage not writable: {}", e);
                false
            }
        }
    }
}

fn default_input_available() -> bool {
    CpalRecorder::get_input_device().is_ok()
}

impl Permissions for DesktopPermissions {
    fn check(&self) -> PermissionStatus {
        PermissionStatus {
            microphone: (self.microphone_probe)(),
            storage: self.storage_writable(),
        }
    }

    fn request(&self) -> PermissionStatus {
        if let Err(e) = fs::create_dir_all(&self.storage_dir) {
            warn!(
                dir = %self.storage_dir.display(),
                "Failed to create recordings directory: {}", e
            );
        }
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present() -> bool {
        true
    }

    fn absent() -> bool {
        false
    }

    #[test]
    fn missing_dir_denies_storage() {
        let dir = tempfile::tempdir().unwrap();
        let permissions =
            DesktopPermissions::new(dir.path().join("recordings")).with_microphone_probe(present);

        let status = permissions.check();
        assert!(status.microphone);
        assert!(!status.storage);
        assert!(!status.is_granted());
    }

    #[test]
    fn request_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("a").join("recordings");
        let permissions = DesktopPermissions::new(&storage).with_microphone_probe(present);

        let status = permissions.request();
        assert!(status.is_granted());
        assert!(storage.is_dir());
        assert!(!storage.join(PROBE_FILE).exists());
    }

    #[test]
    fn missing_input_device_denies_microphone() {
        let dir = tempfile::tempdir().unwrap();
        let permissions = DesktopPermissions::new(dir.path()).with_microphone_probe(absent);

        let status = permissions.request();
        assert!(!status.microphone);
        assert!(status.storage);
    }

    #[test]
    fn file_in_place_of_dir_denies_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("recordings");
        fs::write(&storage, b"").unwrap();
        let permissions = DesktopPermissions::new(&storage).with_microphone_probe(present);

        assert!(!permissions.request().storage);
    }
}
