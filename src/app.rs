//! Root application module.
//!
//! Contains the main App component, the [`PlaygroundContext`] definition,
//! and the startup logic that reads query parameters and restores a shared
//! project before the first render.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen_futures::spawn_local;

use crate::components::{Editor, OutputPane, Toolbar};
use crate::config::{
    CDN_SETTING_KEY, EXPORT_ARCHIVE_NAME, LANGUAGE_TOOLS_DEBOUNCE_MS, TSCONFIG, query,
};
use crate::core::repl::CompileError;
use crate::core::{
    JsReplBridge, PlaygroundStore, ReplBridge, build_project_zip, codec, gen_compiler_sfc_link,
};
use crate::models::{CdnProvider, Layout, UserOptions, VersionKey, VirtualFile};
use crate::utils::{DebounceGate, dom};

// ============================================================================
// Startup
// ============================================================================

/// Everything decided before the first render: restored project state,
/// display options, preview identifier, and CDN provider.
fn read_startup() -> (Option<codec::ProjectState>, UserOptions, Option<String>, CdnProvider) {
    let params = dom::query_params();
    let param = |name: &str| params.as_ref().and_then(|p| p.get(name));

    // A malformed share token falls back to the default project
    let saved = {
        let token = dom::get_hash();
        (!token.is_empty())
            .then(|| codec::deserialize_state(&token).ok())
            .flatten()
    };

    let mut options = UserOptions {
        style_source: saved.as_ref().and_then(|s| s.options.style_source.clone()),
        show_hidden: param(query::DEBUG).is_some().then_some(true),
        show_output: !param(query::SHOW_OUTPUT).is_some_and(|v| v.eq_ignore_ascii_case("false")),
        show_compile_output: !param(query::SHOW_COMPILE_OUTPUT)
            .is_some_and(|v| v.eq_ignore_ascii_case("false")),
        layout: Layout::Horizontal,
    };
    if param(query::LAYOUT).is_some_and(|v| v.eq_ignore_ascii_case("vertical")) {
        options.layout = Layout::Vertical;
    }

    let preview_pr = param(query::PR)
        .filter(|pr| !pr.is_empty() && pr.chars().all(|c| c.is_ascii_digit()))
        .or_else(|| options.style_source_pr());

    let provider = param(query::CDN)
        .as_deref()
        .and_then(CdnProvider::from_id)
        .or_else(|| {
            let stored = dom::local_storage()?.get_item(CDN_SETTING_KEY).ok()??;
            CdnProvider::from_id(&stored)
        })
        .unwrap_or_default();

    (saved, options, preview_pr, provider)
}

// ============================================================================
// PlaygroundContext
// ============================================================================

/// Application-wide reactive context.
///
/// The store is a plain struct inside an `RwSignal`; every mutation goes
/// through a method here, which also schedules the sandbox compiles the
/// mutation made necessary. Compiles are never cancelled: a superseded
/// compile's diagnostics simply get overwritten (last write wins).
#[derive(Clone)]
pub struct PlaygroundContext {
    pub store: RwSignal<PlaygroundStore>,
    bridge: SendWrapper<Rc<dyn ReplBridge>>,
    /// Set once the initial compiler load and compile pass finished.
    pub ready: RwSignal<bool>,
    reload_gate: SendWrapper<DebounceGate>,
}

impl PlaygroundContext {
    /// Build the context from the page URL (query parameters and share
    /// token) and the given sandbox bridge.
    pub fn from_page(bridge: Rc<dyn ReplBridge>) -> Self {
        let (saved, options, preview_pr, provider) = read_startup();
        let store = PlaygroundStore::new(saved, options, provider, preview_pr);
        Self {
            store: RwSignal::new(store),
            bridge: SendWrapper::new(bridge),
            ready: RwSignal::new(false),
            reload_gate: SendWrapper::new(DebounceGate::new()),
        }
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compile one file, replacing the diagnostics list with its result.
    pub fn compile(&self, path: &str) {
        self.compile_inner(path, false);
    }

    fn compile_inner(&self, path: &str, append: bool) {
        let Some(file) = self.store.with_untracked(|s| s.file(path).cloned()) else {
            return;
        };
        let bridge = self.bridge.clone();
        let store = self.store;
        spawn_local(async move {
            match bridge.compile_file(&file).await {
                Ok(errors) => store.update(|s| {
                    if append {
                        s.errors.extend(errors);
                    } else {
                        s.errors = errors;
                    }
                }),
                Err(e) => dom::console_warn(&format!("compile failed for {}: {e}", file.path)),
            }
        });
    }

    /// Initial compile pass plus the language-tools reload watcher.
    ///
    /// The active file compiles first and owns the diagnostics list; errors
    /// from the remaining files are appended rather than replacing it.
    pub fn init(&self) {
        let ctx = self.clone();
        let vue_version = self.store.with_untracked(|s| s.versions.vue.clone());
        let provider = self.store.with_untracked(|s| s.provider);
        spawn_local(async move {
            let url = gen_compiler_sfc_link(provider, &vue_version);
            if let Err(e) = ctx.bridge.load_compiler(&url).await {
                dom::console_warn(&e.to_string());
            }

            let (active, rest) = ctx.store.with_untracked(|s| {
                let active = s.active_path().to_string();
                let rest: Vec<String> = s
                    .files()
                    .iter()
                    .map(|f| f.path.clone())
                    .filter(|p| *p != active)
                    .collect();
                (active, rest)
            });
            ctx.compile_inner(&active, false);
            for path in rest {
                ctx.compile_inner(&path, true);
            }
            ctx.ready.set(true);
        });

        self.watch_language_tools();
    }

    /// Debounced language-tools reload on tsconfig or toolchain changes.
    ///
    /// Rapid changes within the window coalesce into one reload; each new
    /// trigger cancels the pending one.
    fn watch_language_tools(&self) {
        let store = self.store;
        let deps = Memo::new(move |_| {
            store.with(|s| {
                (
                    s.file(TSCONFIG).map(|f| f.content.clone()),
                    s.versions.typescript.clone(),
                    s.versions.vue.clone(),
                )
            })
        });

        let bridge = self.bridge.clone();
        let gate = self.reload_gate.clone();
        Effect::new(move |prev: Option<()>| {
            let _ = deps.get();
            // The initial run observes state, it is not a change
            if prev.is_none() {
                return;
            }
            let generation = gate.arm();
            let bridge = bridge.clone();
            let gate = gate.clone();
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(LANGUAGE_TOOLS_DEBOUNCE_MS).await;
                if gate.is_current(generation) {
                    bridge.reload_language_tools();
                }
            });
        });
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    fn report(&self, err: impl std::fmt::Display) {
        self.store
            .update(|s| s.errors = vec![CompileError(err.to_string())]);
    }

    pub fn set_active(&self, path: &str) {
        let result = self.store.try_update(|s| s.set_active(path)).unwrap_or(Ok(()));
        match result {
            Ok(()) => self.compile(path),
            Err(e) => self.report(e),
        }
    }

    pub fn add_file(&self, path: &str) {
        let path = path.to_string();
        self.store
            .update(|s| s.add_file(VirtualFile::empty(path.clone())));
        self.compile(&path);
    }

    pub fn rename_file(&self, old: &str, new: &str) {
        let result = self
            .store
            .try_update(|s| s.rename_file(old, new))
            .unwrap_or(Err(crate::core::error::ValidationError::FileNotFound(
                old.to_string(),
            )));
        match result {
            Ok(path) => self.compile(&path),
            Err(e) => self.report(e),
        }
    }

    /// Delete a file after interactive confirmation.
    pub fn delete_file(&self, path: &str) {
        let display = path.strip_prefix("src/").unwrap_or(path);
        if !dom::confirm(&format!("Are you sure you want to delete {display}?")) {
            return;
        }
        let result = self
            .store
            .try_update(|s| s.remove_file(path))
            .unwrap_or(Ok(()));
        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Update the active file's contents and recompile it.
    pub fn update_active_content(&self, content: &str) {
        let path = self.store.with_untracked(|s| s.active_path().to_string());
        self.store.update(|s| s.set_content(&path, content));
        self.compile(&path);
    }

    // =========================================================================
    // Versions & Settings
    // =========================================================================

    /// Change a library version.
    ///
    /// For the Vue key the matching compiler module is loaded before the
    /// version is committed; the other keys commit synchronously.
    pub fn set_version(&self, key: VersionKey, version: String) {
        match key {
            VersionKey::Vue => {
                let ctx = self.clone();
                let provider = self.store.with_untracked(|s| s.provider);
                spawn_local(async move {
                    let url = gen_compiler_sfc_link(provider, &version);
                    if let Err(e) = ctx.bridge.load_compiler(&url).await {
                        dom::console_warn(&e.to_string());
                        return;
                    }
                    ctx.store.update(|s| {
                        s.set_version(VersionKey::Vue, &version);
                    });
                });
            }
            VersionKey::TypeScript => {
                self.bridge.set_typescript_version(&version);
                self.store.update(|s| {
                    s.set_version(VersionKey::TypeScript, &version);
                });
            }
            _ => {
                let dirty = self
                    .store
                    .try_update(|s| s.set_version(key, &version))
                    .unwrap_or_default();
                for path in dirty {
                    self.compile(&path);
                }
            }
        }
    }

    pub fn toggle_nightly(&self, nightly: bool) {
        self.store.update(|s| s.set_nightly(nightly));
    }

    /// Switch CDN provider and persist the choice.
    pub fn set_provider(&self, provider: CdnProvider) {
        self.store.update(|s| s.set_provider(provider));
        if let Some(storage) = dom::local_storage() {
            let _ = storage.set_item(CDN_SETTING_KEY, provider.id());
        }
    }

    // =========================================================================
    // Share & Export
    // =========================================================================

    /// Write the share token into the URL hash and copy the link.
    pub fn share(&self) {
        match self.store.with_untracked(|s| s.serialize()) {
            Ok(token) => {
                dom::replace_hash(&token);
                if let Some(url) = dom::current_url() {
                    dom::copy_to_clipboard(&url);
                }
            }
            Err(e) => self.report(e),
        }
    }

    /// Download the project as a zip archive, after confirmation.
    pub fn download(&self) {
        if !dom::confirm("Download project files?") {
            return;
        }
        let include_hidden = self
            .store
            .with_untracked(|s| s.user_options.show_hidden.unwrap_or(false));
        let result = self
            .store
            .with_untracked(|s| build_project_zip(s.files(), include_hidden));
        match result {
            Ok(bytes) => dom::save_blob(&bytes, EXPORT_ARCHIVE_NAME, "application/zip"),
            Err(e) => self.report(e),
        }
    }
}

// ============================================================================
// App Component
// ============================================================================

stylance::import_crate_style!(css, "src/app.module.css");

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = PlaygroundContext::from_page(Rc::new(JsReplBridge));
    provide_context(ctx.clone());
    ctx.init();

    let layout = ctx
        .store
        .with_untracked(|s| s.user_options.layout);
    let show_output = ctx
        .store
        .with_untracked(|s| s.user_options.show_output);
    let panes_class = match layout {
        Layout::Horizontal => css::panesHorizontal,
        Layout::Vertical => css::panesVertical,
    };

    view! {
        <ErrorBoundary fallback=|errors| {
            view! {
                <div class=css::crash>
                    <h1>"Something went wrong"</h1>
                    <ul>
                        {move || {
                            errors
                                .get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </div>
            }
        }>
            <div class=css::app>
                <Toolbar />
                <main class=panes_class>
                    <Editor />
                    <Show when=move || show_output>
                        <OutputPane />
                    </Show>
                </main>
            </div>
        </ErrorBoundary>
    }
}
