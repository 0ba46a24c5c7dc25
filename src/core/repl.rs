//! Sandbox bridge.
//!
//! Compilation, module resolution, and preview execution are delegated to
//! the REPL library loaded by the host page, reached through the
//! `window.__vue_repl__` object via direct JavaScript interop. This module
//! only defines the boundary: the [`ReplBridge`] trait, the browser
//! implementation, and a recording mock for tests.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::core::error::ReplError;
use crate::models::VirtualFile;
use crate::utils::dom;

/// Single-threaded boxed future, the bridge's return currency.
pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// One compile diagnostic reported by the sandbox for a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError(pub String);

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operations the external REPL library provides to the playground.
///
/// Compiles are idempotent pure functions of file content, so callers may
/// let a superseded compile's result overwrite a newer one (last write
/// wins) without cancellation.
pub trait ReplBridge {
    /// Compile one file in the sandbox, returning its diagnostics.
    fn compile_file(&self, file: &VirtualFile) -> LocalFuture<Result<Vec<CompileError>, ReplError>>;

    /// Load a version-specific compiler module before a core version change
    /// is committed.
    fn load_compiler(&self, url: &str) -> LocalFuture<Result<(), ReplError>>;

    /// Tell the language tools which TypeScript version to use.
    fn set_typescript_version(&self, version: &str);

    /// Restart the language/type-checking tooling.
    fn reload_language_tools(&self);
}

// =============================================================================
// Browser Implementation
// =============================================================================

/// [`ReplBridge`] over the `window.__vue_repl__` host object.
#[derive(Clone, Copy, Default)]
pub struct JsReplBridge;

impl JsReplBridge {
    /// Get the host object injected by the page.
    fn host() -> Result<Object, ReplError> {
        let window = dom::window().ok_or(ReplError::HostMissing)?;
        Reflect::get(&window, &"__vue_repl__".into())
            .ok()
            .and_then(|v| v.dyn_into::<Object>().ok())
            .ok_or(ReplError::HostMissing)
    }

    /// Look up a method on the host object.
    fn method(host: &Object, name: &str) -> Result<Function, ReplError> {
        Reflect::get(host, &name.into())
            .map_err(|_| ReplError::HostMissing)?
            .dyn_into::<Function>()
            .map_err(|_| ReplError::HostMissing)
    }

    /// Call a host method returning a promise and await it.
    async fn call_async(name: &'static str, arg: JsValue) -> Result<JsValue, ReplError> {
        let host = Self::host()?;
        let method = Self::method(&host, name)?;
        let promise: Promise = method
            .call1(&host, &arg)
            .map_err(|e| ReplError::CallFailed(format!("{e:?}")))?
            .into();
        JsFuture::from(promise)
            .await
            .map_err(|e| ReplError::CallFailed(format!("{e:?}")))
    }

    /// Call a fire-and-forget host method, ignoring failures.
    fn call_sync(name: &str, arg: Option<JsValue>) {
        let Ok(host) = Self::host() else { return };
        let Ok(method) = Self::method(&host, name) else {
            return;
        };
        let _ = match arg {
            Some(arg) => method.call1(&host, &arg),
            None => method.call0(&host),
        };
    }
}

impl ReplBridge for JsReplBridge {
    fn compile_file(&self, file: &VirtualFile) -> LocalFuture<Result<Vec<CompileError>, ReplError>> {
        let file = file.clone();
        Box::pin(async move {
            let arg = serde_wasm_bindgen::to_value(&file)
                .map_err(|e| ReplError::CallFailed(e.to_string()))?;
            let result = Self::call_async("compileFile", arg).await?;

            let errors = js_sys::Array::from(&result)
                .iter()
                .filter_map(|v| v.as_string())
                .map(CompileError)
                .collect();
            Ok(errors)
        })
    }

    fn load_compiler(&self, url: &str) -> LocalFuture<Result<(), ReplError>> {
        let url = url.to_string();
        Box::pin(async move {
            Self::call_async("loadCompiler", JsValue::from_str(&url))
                .await
                .map(|_| ())
                .map_err(|e| ReplError::CompilerLoadFailed(e.to_string()))
        })
    }

    fn set_typescript_version(&self, version: &str) {
        Self::call_sync("setTypeScriptVersion", Some(JsValue::from_str(version)));
    }

    fn reload_language_tools(&self) {
        Self::call_sync("reloadLanguageTools", None);
    }
}

// =============================================================================
// Mock Implementation
// =============================================================================

/// Recording [`ReplBridge`] for tests. Returns no diagnostics and logs
/// every call.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Calls observed by a [`MockRepl`].
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct MockCalls {
        pub compiled: Vec<String>,
        pub loaded_compilers: Vec<String>,
        pub typescript_versions: Vec<String>,
        pub language_tool_reloads: usize,
    }

    #[derive(Clone, Default)]
    pub struct MockRepl {
        calls: Rc<RefCell<MockCalls>>,
        /// Diagnostics returned for every compile.
        pub diagnostics: Rc<RefCell<Vec<CompileError>>>,
    }

    impl MockRepl {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> MockCalls {
            self.calls.borrow().clone()
        }
    }

    impl ReplBridge for MockRepl {
        fn compile_file(
            &self,
            file: &VirtualFile,
        ) -> LocalFuture<Result<Vec<CompileError>, ReplError>> {
            self.calls.borrow_mut().compiled.push(file.path.clone());
            let diagnostics = self.diagnostics.borrow().clone();
            Box::pin(async move { Ok(diagnostics) })
        }

        fn load_compiler(&self, url: &str) -> LocalFuture<Result<(), ReplError>> {
            self.calls.borrow_mut().loaded_compilers.push(url.to_string());
            Box::pin(async { Ok(()) })
        }

        fn set_typescript_version(&self, version: &str) {
            self.calls
                .borrow_mut()
                .typescript_versions
                .push(version.to_string());
        }

        fn reload_language_tools(&self) {
            self.calls.borrow_mut().language_tool_reloads += 1;
        }
    }
}
