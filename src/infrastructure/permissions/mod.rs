//! Permission adapters

mod desktop;

pub use desktop::DesktopPermissions;
