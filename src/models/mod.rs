//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`VirtualFile`] - One project source file
//! - [`VersionKey`], [`Versions`] - Switchable library versions
//! - [`UserOptions`], [`Layout`] - Display preferences from URL query parameters
//! - [`CdnProvider`] - CDN selection for generated package URLs

mod file;
mod options;
mod provider;
mod versions;

pub use file::VirtualFile;
pub use options::{Layout, UserOptions};
pub use provider::CdnProvider;
pub use versions::{VersionKey, Versions};
