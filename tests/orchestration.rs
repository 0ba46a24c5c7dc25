//! End-to-end orchestration over the mock sandbox bridge.
//!
//! Drives a [`PlaygroundStore`] the way the UI layer does, pushing every
//! dirty file through a recording [`MockRepl`], and asserts the call
//! pattern the external REPL library would observe.

use sfc_playground::config::{APP_FILE, ELEMENT_PLUS_FILE, PINIA_FILE};
use sfc_playground::core::repl::mock::MockRepl;
use sfc_playground::core::repl::{CompileError, ReplBridge};
use sfc_playground::core::{PlaygroundStore, gen_compiler_sfc_link};
use sfc_playground::models::{CdnProvider, UserOptions, VersionKey};
use sfc_playground::utils::DebounceGate;

fn store() -> PlaygroundStore {
    PlaygroundStore::new(None, UserOptions::default(), CdnProvider::default(), None)
}

/// Compile `paths` in order, collecting diagnostics the way the UI does:
/// the first path replaces the list, the rest append to it.
async fn compile_all(
    store: &mut PlaygroundStore,
    bridge: &MockRepl,
    paths: &[String],
) {
    for (i, path) in paths.iter().enumerate() {
        let Some(file) = store.file(path).cloned() else {
            continue;
        };
        let errors = bridge.compile_file(&file).await.unwrap();
        if i == 0 {
            store.errors = errors;
        } else {
            store.errors.extend(errors);
        }
    }
}

#[tokio::test]
async fn initial_pass_compiles_active_file_first() {
    let mut store = store();
    let bridge = MockRepl::new();

    let mut paths = vec![store.active_path().to_string()];
    let active = paths[0].clone();
    paths.extend(
        store
            .files()
            .iter()
            .map(|f| f.path.clone())
            .filter(|p| p != &active),
    );
    compile_all(&mut store, &bridge, &paths).await;

    let compiled = bridge.calls().compiled;
    assert_eq!(compiled[0], APP_FILE);
    assert_eq!(compiled.len(), store.files().len());
}

#[tokio::test]
async fn element_plus_version_change_recompiles_glue_only() {
    let mut store = store();
    let bridge = MockRepl::new();

    let dirty = store.set_version(VersionKey::ElementPlus, "2.3.0");
    assert_eq!(dirty, vec![ELEMENT_PLUS_FILE.to_string()]);

    compile_all(&mut store, &bridge, &dirty).await;
    assert_eq!(bridge.calls().compiled, vec![ELEMENT_PLUS_FILE.to_string()]);
}

#[tokio::test]
async fn pinia_version_change_recompiles_its_glue() {
    let mut store = store();
    let bridge = MockRepl::new();

    let dirty = store.set_version(VersionKey::Pinia, "2.1.0");
    assert_eq!(dirty, vec![PINIA_FILE.to_string()]);

    compile_all(&mut store, &bridge, &dirty).await;
    assert_eq!(bridge.calls().compiled, vec![PINIA_FILE.to_string()]);
}

#[tokio::test]
async fn vue_version_loads_compiler_before_commit() {
    let mut store = store();
    let bridge = MockRepl::new();

    let url = gen_compiler_sfc_link(store.provider, "3.4.0");
    bridge.load_compiler(&url).await.unwrap();
    store.set_version(VersionKey::Vue, "3.4.0");

    assert_eq!(bridge.calls().loaded_compilers, vec![url]);
    assert_eq!(store.versions.vue, "3.4.0");
}

#[tokio::test]
async fn typescript_version_routes_to_bridge_without_compiles() {
    let mut store = store();
    let bridge = MockRepl::new();

    bridge.set_typescript_version("5.4.5");
    let dirty = store.set_version(VersionKey::TypeScript, "5.4.5");

    assert!(dirty.is_empty());
    let calls = bridge.calls();
    assert_eq!(calls.typescript_versions, vec!["5.4.5".to_string()]);
    assert!(calls.compiled.is_empty());
}

#[tokio::test]
async fn diagnostics_replace_then_append() {
    let mut store = store();
    let bridge = MockRepl::new();
    bridge
        .diagnostics
        .borrow_mut()
        .push(CompileError("boom".into()));

    let active = store.active_path().to_string();
    let glue = ELEMENT_PLUS_FILE.to_string();
    compile_all(&mut store, &bridge, &[active, glue]).await;

    // One diagnostic per compiled file, first replacing, second appending
    assert_eq!(
        store.errors,
        vec![CompileError("boom".into()), CompileError("boom".into())]
    );
}

#[tokio::test]
async fn coalesced_reload_fires_language_tools_once() {
    let bridge = MockRepl::new();
    let gate = DebounceGate::new();

    // Three rapid triggers; only the last generation survives the window
    let first = gate.arm();
    let second = gate.arm();
    let third = gate.arm();
    for generation in [first, second, third] {
        if gate.is_current(generation) {
            bridge.reload_language_tools();
        }
    }

    assert_eq!(bridge.calls().language_tool_reloads, 1);
}
