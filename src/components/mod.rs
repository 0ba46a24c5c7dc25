//! UI components built with Leptos.
//!
//! - [`toolbar`] - Version pickers, CDN selection, share and export actions
//! - [`editor`] - File tab bar and source editor
//! - [`output`] - Sandbox preview pane and compile diagnostics
//! - [`icons`] - Centralized icon definitions

pub mod editor;
pub mod icons;
pub mod output;
pub mod toolbar;

pub use editor::Editor;
pub use output::OutputPane;
pub use toolbar::Toolbar;
