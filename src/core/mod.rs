//! Core business logic for the playground.
//!
//! This module provides:
//! - [`PlaygroundStore`] project orchestration (files, versions, options)
//! - [`gen_import_map`] CDN import-map synthesis
//! - [`serialize_state`] / [`deserialize_state`] share-token codec
//! - [`ReplBridge`] boundary to the external sandbox library
//! - [`build_project_zip`] project export

pub mod codec;
pub mod dependency;
pub mod error;
mod export;
mod import_map;
pub mod repl;
mod store;

pub use codec::{ProjectState, deserialize_state, serialize_state};
pub use dependency::{gen_cdn_link, gen_compiler_sfc_link, gen_import_map};
pub use export::build_project_zip;
pub use import_map::ImportMap;
pub use repl::{CompileError, JsReplBridge, ReplBridge};
pub use store::{PlaygroundStore, generate_element_plus_code};
