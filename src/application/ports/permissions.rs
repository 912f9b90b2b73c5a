//! Permission port interface
//!
//! Recording needs two grants: microphone capture and write access to the
//! recordings directory.

use std::fmt;

/// Result of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionStatus {
    pub microphone: bool,
    pub storage: bool,
}

impl PermissionStatus {
    pub const fn granted() -> Self {
        Self {
            microphone: true,
            storage: true,
        }
    }

    /// Both grants are held
    pub const fn is_granted(&self) -> bool {
        self.microphone && self.storage
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { "granted" } else { "denied" };
        write!(
            f,
            "microphone {}, storage {}",
            flag(self.microphone),
            flag(self.storage)
        )
    }
}

/// Port for checking and requesting recording permissions
pub trait Permissions: Send + Sync {
    /// Check the current grants without side effects
    fn check(&self) -> PermissionStatus;

    /// Try to obtain missing grants and report the result
    fn request(&self) -> PermissionStatus;
}
