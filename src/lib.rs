//! Browser playground for Vue single-file components with Element Plus.
//!
//! The binary in `main.rs` mounts the Leptos app; the library target exists
//! so integration tests can drive the store and the sandbox bridge directly.

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
