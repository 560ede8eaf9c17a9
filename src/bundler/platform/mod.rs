//! Platform-specific bundle finishing.
//!
//! - **macOS**: icon copy and `Info.plist`
//! - **Windows**: icon resources embedded in the executable
//! - **Linux**: nothing beyond file assembly

pub mod macos;
pub mod windows;
