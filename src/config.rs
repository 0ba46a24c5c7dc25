//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Project templates and the export scaffold are loaded at compile time
//! using `include_str!`.

// =============================================================================
// Project Templates (loaded at compile time)
// =============================================================================

/// Default `src/App.vue` shown on a fresh playground.
pub const WELCOME_CODE: &str = include_str!("../assets/templates/welcome.vue");

/// Wrapper component that installs the optional libraries before mounting.
pub const MAIN_CODE: &str = include_str!("../assets/templates/playground-main.vue");

/// Element Plus glue file template. `#STYLE#` and `#DARKSTYLE#` are replaced
/// with version-specific stylesheet URLs when the file is generated.
pub const ELEMENT_PLUS_CODE: &str = include_str!("../assets/templates/element-plus.js");

/// Pinia glue file template.
pub const PINIA_CODE: &str = include_str!("../assets/templates/pinia.js");

/// Default `tsconfig.json` contents.
pub const TSCONFIG_CODE: &str = include_str!("../assets/templates/tsconfig.json");

// =============================================================================
// Export Scaffold (loaded at compile time)
// =============================================================================

/// Static files placed into an exported project archive,
/// as `(archive path, content)` pairs.
pub const SCAFFOLD_FILES: &[(&str, &str)] = &[
    ("index.html", include_str!("../assets/scaffold/index.html")),
    ("package.json", include_str!("../assets/scaffold/package.json")),
    ("vite.config.js", include_str!("../assets/scaffold/vite.config.js")),
    ("README.md", include_str!("../assets/scaffold/README.md")),
    ("src/main.js", include_str!("../assets/scaffold/main.js")),
];

/// File name of the downloaded archive.
pub const EXPORT_ARCHIVE_NAME: &str = "vue-project.zip";

// =============================================================================
// Project File Paths
// =============================================================================

/// Wrapper component compiled as the sandbox entry point.
pub const MAIN_FILE: &str = "src/PlaygroundMain.vue";

/// Primary application file; the default active file.
pub const APP_FILE: &str = "src/App.vue";

/// Element Plus glue file, regenerated on version changes.
pub const ELEMENT_PLUS_FILE: &str = "src/element-plus.js";

/// Pinia glue file.
pub const PINIA_FILE: &str = "src/pinia.js";

/// Import map consumed by the sandbox module loader.
pub const IMPORT_MAP: &str = "import-map.json";

/// TypeScript configuration picked up by the language tools.
pub const TSCONFIG: &str = "tsconfig.json";

/// Import map path used by older share tokens; remapped to [`IMPORT_MAP`]
/// during deserialization.
pub const LEGACY_IMPORT_MAP: &str = "src/import_map.json";

/// Prefix prepended to bare file names restored from a share token.
pub const SRC_PREFIX: &str = "src/";

/// Files the playground depends on; they can never be renamed or deleted.
pub const PROTECTED_FILES: &[&str] = &[
    APP_FILE,
    MAIN_FILE,
    ELEMENT_PLUS_FILE,
    PINIA_FILE,
    IMPORT_MAP,
];

/// Reserved key holding [`UserOptions`](crate::models::UserOptions) inside a
/// serialized project state. Contains no `/` or extension, so a normalized
/// file path can never take this shape.
pub const OPTIONS_KEY: &str = "_o";

// =============================================================================
// Version Configuration
// =============================================================================

/// Minimum Vue version offered by the version picker.
pub const MIN_VUE_VERSION: &str = "3.2.0";

/// Minimum Element Plus version offered by the version picker.
pub const MIN_ELEMENT_PLUS_VERSION: &str = "2.0.0";

/// Nightly variant of the Element Plus package.
pub const ELEMENT_PLUS_NIGHTLY_PKG: &str = "@element-plus/nightly";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Package metadata API for version lists.
pub const PKG_METADATA_API: &str = "https://data.jsdelivr.com/v1/package/npm";

// =============================================================================
// Storage Keys
// =============================================================================

/// localStorage key for the CDN provider setting.
pub const CDN_SETTING_KEY: &str = "setting-cdn";

/// sessionStorage key prefix for cached version lists.
pub const VERSIONS_CACHE_PREFIX: &str = "versions";

// =============================================================================
// Timing
// =============================================================================

/// Debounce window for language tools reloads, in milliseconds.
pub const LANGUAGE_TOOLS_DEBOUNCE_MS: u32 = 300;

// =============================================================================
// URL Query Parameters (read once at startup)
// =============================================================================

/// Query parameter names recognized on the playground URL.
pub mod query {
    /// Reveals hidden files.
    pub const DEBUG: &str = "debug";
    /// Numeric preview deployment identifier for Element Plus.
    pub const PR: &str = "pr";
    /// `false` hides the output pane.
    pub const SHOW_OUTPUT: &str = "showOutput";
    /// `false` hides the compile output.
    pub const SHOW_COMPILE_OUTPUT: &str = "showCompileOutput";
    /// `horizontal` (default) or `vertical`.
    pub const LAYOUT: &str = "layout";
    /// CDN provider override.
    pub const CDN: &str = "cdn";
}
