//! Utility modules for web, DOM, and encoding operations.
//!
//! Provides:
//! - [`DebounceGate`] - Cancel-and-reset debounce generations
//! - [`fetch_json`], [`fetch_json_cached`] - Network fetching with timeout
//! - [`compress_to_token`], [`decompress_from_token`] - Share-token transforms
//! - [`at_least`] - Lenient version floor comparison

pub mod cache;
mod debounce;
pub mod dom;
mod encode;
mod fetch;
mod version;

pub use debounce::DebounceGate;
pub use encode::{compress_to_token, decompress_from_token};
pub use fetch::{fetch_json, fetch_json_cached};
pub use version::at_least;
