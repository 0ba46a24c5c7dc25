//! Project store.
//!
//! [`PlaygroundStore`] owns the authoritative project state: the ordered
//! file set, the active file, the selected library versions, and the user
//! options. It is a plain struct wrapped in a signal at the UI boundary;
//! every mutation goes through a method here, and methods that invalidate
//! compiled output return the affected paths so the caller can schedule
//! sandbox compiles.

use crate::config::{
    APP_FILE, ELEMENT_PLUS_CODE, ELEMENT_PLUS_FILE, ELEMENT_PLUS_NIGHTLY_PKG, IMPORT_MAP,
    MAIN_CODE, MAIN_FILE, PINIA_CODE, PINIA_FILE, PROTECTED_FILES, TSCONFIG, TSCONFIG_CODE,
    WELCOME_CODE,
};
use crate::core::codec::{self, ProjectState};
use crate::core::dependency::{gen_cdn_link, gen_import_map, preview_overrides};
use crate::core::error::{EncodeError, ValidationError};
use crate::core::import_map::ImportMap;
use crate::core::repl::CompileError;
use crate::models::{CdnProvider, UserOptions, VersionKey, Versions, VirtualFile};

/// Generate the Element Plus glue file for `version`.
///
/// Substitutes the stylesheet URL and its dark-theme variant into the fixed
/// template. A custom `style_source` takes precedence, with `#VERSION#`
/// replaced by the selected version.
pub fn generate_element_plus_code(
    version: &str,
    style_source: Option<&str>,
    nightly: bool,
    provider: CdnProvider,
) -> String {
    let style = match style_source {
        Some(source) => source.replace("#VERSION#", version),
        None => gen_cdn_link(
            provider,
            if nightly {
                ELEMENT_PLUS_NIGHTLY_PKG
            } else {
                "element-plus"
            },
            Some(version),
            "/dist/index.css",
        ),
    };
    let dark_style = style.replace("/dist/index.css", "/theme-chalk/dark/css-vars.css");

    ELEMENT_PLUS_CODE
        .replace("#STYLE#", &style)
        .replace("#DARKSTYLE#", &dark_style)
        .trim()
        .to_string()
}

/// Authoritative in-memory project state.
#[derive(Clone)]
pub struct PlaygroundStore {
    /// Project files in insertion order. Paths are unique.
    files: Vec<VirtualFile>,
    active_path: String,
    pub versions: Versions,
    pub user_options: UserOptions,
    /// Use the Element Plus nightly bundle in the import map.
    pub nightly: bool,
    pub provider: CdnProvider,
    /// Preview deployment identifier from the `pr` query parameter.
    pub preview_pr: Option<String>,
    /// Accumulated sandbox diagnostics, replaced or appended by the caller.
    pub errors: Vec<CompileError>,
}

impl PlaygroundStore {
    /// Build a project from a restored state, or from defaults when `saved`
    /// is `None` (fresh visit or unreadable share token).
    ///
    /// Playground-managed files missing from the saved state are injected;
    /// the glue files and the wrapper stay hidden unless debug mode reveals
    /// them.
    pub fn new(
        saved: Option<ProjectState>,
        user_options: UserOptions,
        provider: CdnProvider,
        preview_pr: Option<String>,
    ) -> Self {
        let hide = !user_options.show_hidden.unwrap_or(false);

        let mut versions = Versions::default();
        if preview_pr.is_some() {
            versions.element_plus = "preview".into();
        }

        let mut store = Self {
            files: Vec::new(),
            active_path: APP_FILE.to_string(),
            versions,
            user_options,
            nightly: false,
            provider,
            preview_pr,
            errors: Vec::new(),
        };

        match saved {
            Some(state) => {
                for (path, content) in state.files {
                    store.upsert(VirtualFile::new(path, content));
                }
            }
            None => store.files.push(VirtualFile::new(APP_FILE, WELCOME_CODE)),
        }

        if store.file(APP_FILE).is_none() {
            store.files.push(VirtualFile::new(APP_FILE, WELCOME_CODE));
        }
        if store.file(MAIN_FILE).is_none() {
            store.files.push(VirtualFile::new(MAIN_FILE, MAIN_CODE));
        }
        if store.file(ELEMENT_PLUS_FILE).is_none() {
            let code = generate_element_plus_code(
                &store.versions.element_plus,
                store.user_options.style_source.as_deref(),
                store.nightly,
                store.provider,
            );
            store.files.push(VirtualFile::new(ELEMENT_PLUS_FILE, code));
        }
        if store.file(PINIA_FILE).is_none() {
            store
                .files
                .push(VirtualFile::new(PINIA_FILE, PINIA_CODE.trim()));
        }
        if store.file(TSCONFIG).is_none() {
            store.files.push(VirtualFile::new(TSCONFIG, TSCONFIG_CODE));
        }

        for path in [MAIN_FILE, ELEMENT_PLUS_FILE, PINIA_FILE] {
            if let Some(idx) = store.position(path) {
                store.files[idx].hidden = hide;
            }
        }

        store.sync_import_map();
        store
    }

    // =========================================================================
    // File Access
    // =========================================================================

    /// All files, in iteration order.
    pub fn files(&self) -> &[VirtualFile] {
        &self.files
    }

    /// Files shown in the UI (hidden ones excluded).
    pub fn visible_files(&self) -> impl Iterator<Item = &VirtualFile> {
        self.files.iter().filter(|f| !f.hidden)
    }

    pub fn file(&self, path: &str) -> Option<&VirtualFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn active_file(&self) -> Option<&VirtualFile> {
        self.file(&self.active_path)
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|f| f.path == path)
    }

    /// Insert a file, or replace the one already at its path in place.
    fn upsert(&mut self, file: VirtualFile) {
        match self.position(&file.path) {
            Some(idx) => self.files[idx] = file,
            None => self.files.push(file),
        }
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// Make `path` the active file. Hidden and missing files are rejected.
    pub fn set_active(&mut self, path: &str) -> Result<(), ValidationError> {
        let file = self
            .file(path)
            .ok_or_else(|| ValidationError::FileNotFound(path.to_string()))?;
        if file.hidden {
            return Err(ValidationError::Hidden(path.to_string()));
        }
        self.active_path = path.to_string();
        Ok(())
    }

    /// Add a file and make it active.
    ///
    /// A file already at the same path is overwritten in place (last write
    /// wins); this mirrors map assignment semantics and is intentional.
    pub fn add_file(&mut self, file: VirtualFile) {
        let path = file.path.clone();
        self.upsert(file);
        let _ = self.set_active(&path);
    }

    /// Update the contents of an existing file.
    pub fn set_content(&mut self, path: &str, content: &str) {
        if let Some(idx) = self.position(path) {
            self.files[idx].content = content.to_string();
        }
    }

    /// Rename a file, preserving its position in iteration order.
    ///
    /// Returns the new path, which needs recompiling.
    pub fn rename_file(&mut self, old: &str, new: &str) -> Result<String, ValidationError> {
        let Some(idx) = self.position(old) else {
            return Err(ValidationError::FileNotFound(old.to_string()));
        };

        if new.is_empty() || new == old {
            return Err(ValidationError::InvalidRename {
                old: old.to_string(),
                new: new.to_string(),
            });
        }

        if PROTECTED_FILES.contains(&old) {
            return Err(ValidationError::Protected(old.to_string()));
        }
        if self.files[idx].hidden {
            return Err(ValidationError::Hidden(old.to_string()));
        }

        self.files[idx].path = new.to_string();
        // Paths stay unique: a pre-existing file at the target is displaced
        if let Some(dup) = self
            .files
            .iter()
            .enumerate()
            .position(|(i, f)| i != idx && f.path == new)
        {
            self.files.remove(dup);
        }

        if self.active_path == old {
            self.active_path = new.to_string();
        }
        Ok(new.to_string())
    }

    /// Remove a file. Protected paths are refused; removing the active file
    /// falls back to the primary application file.
    pub fn remove_file(&mut self, path: &str) -> Result<(), ValidationError> {
        if PROTECTED_FILES.contains(&path) {
            return Err(ValidationError::Protected(path.to_string()));
        }
        let idx = self
            .position(path)
            .ok_or_else(|| ValidationError::FileNotFound(path.to_string()))?;

        self.files.remove(idx);
        if self.active_path == path {
            self.active_path = APP_FILE.to_string();
        }
        Ok(())
    }

    // =========================================================================
    // Versions & Import Map
    // =========================================================================

    /// Commit a version selection, regenerating the affected glue file and
    /// re-syncing the import map.
    ///
    /// Returns the paths whose compiled output is now stale. For the core
    /// (Vue) key the caller must load the matching compiler module *before*
    /// calling this, so the compiler and declared version never disagree.
    pub fn set_version(&mut self, key: VersionKey, version: &str) -> Vec<String> {
        self.versions.set(key, version);
        match key {
            VersionKey::Vue => {
                self.sync_import_map();
                Vec::new()
            }
            VersionKey::ElementPlus => {
                let code = generate_element_plus_code(
                    version,
                    self.user_options.style_source.as_deref(),
                    self.nightly,
                    self.provider,
                );
                self.set_content(ELEMENT_PLUS_FILE, &code);
                self.sync_import_map();
                vec![ELEMENT_PLUS_FILE.to_string()]
            }
            VersionKey::Pinia => {
                // The Pinia template does not depend on the selected version;
                // only the unpinned import-map entry governs what loads.
                self.set_content(PINIA_FILE, PINIA_CODE.trim());
                self.sync_import_map();
                vec![PINIA_FILE.to_string()]
            }
            VersionKey::TypeScript => Vec::new(),
        }
    }

    /// Toggle the nightly Element Plus bundle in the import map.
    pub fn set_nightly(&mut self, nightly: bool) {
        self.nightly = nightly;
        self.sync_import_map();
    }

    /// Switch the CDN provider and rebuild every generated URL.
    pub fn set_provider(&mut self, provider: CdnProvider) {
        self.provider = provider;
        self.sync_import_map();
    }

    /// Merge the synthesized import map into `import-map.json`.
    ///
    /// Entries a user added by hand are preserved; synthesized specifiers
    /// overwrite stale ones. The file is created if missing and its content
    /// is never replaced wholesale.
    pub fn sync_import_map(&mut self) {
        let mut builtin = gen_import_map(&self.versions, self.provider, self.nightly);
        if let Some(pr) = &self.preview_pr {
            builtin = builtin.merge(&preview_overrides(pr));
        }

        let current = self
            .file(IMPORT_MAP)
            .and_then(|f| ImportMap::from_json(&f.content).ok())
            .unwrap_or_default();
        let content = current.merge(&builtin).to_json_pretty();

        self.upsert(VirtualFile::new(IMPORT_MAP, content));
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Serialize the project into a share token. Hidden (playground-managed)
    /// files are omitted; they are regenerated on load.
    pub fn serialize(&self) -> Result<String, EncodeError> {
        codec::serialize_state(
            self.visible_files()
                .map(|f| (f.path.as_str(), f.content.as_str())),
            &self.user_options,
        )
    }
}
