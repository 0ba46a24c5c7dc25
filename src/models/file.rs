use serde::{Deserialize, Serialize};

/// One project source file.
///
/// The `path` is the file's identity inside the project; two files never
/// share a path. Hidden files are excluded from listings and from the share
/// token, and cannot become the active file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VirtualFile {
    /// Unique project-relative path (e.g. `src/App.vue`).
    pub path: String,
    /// Full text contents.
    pub content: String,
    /// Hidden files are managed by the playground, not the user.
    #[serde(default)]
    pub hidden: bool,
}

impl VirtualFile {
    /// Create a visible file.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            hidden: false,
        }
    }

    /// Create a file with an explicit hidden flag.
    pub fn with_hidden(path: impl Into<String>, content: impl Into<String>, hidden: bool) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            hidden,
        }
    }

    /// Create an empty visible file, as used when a new tab is added.
    pub fn empty(path: impl Into<String>) -> Self {
        Self::new(path, "")
    }

    /// File name without the `src/` prefix, for display.
    pub fn display_name(&self) -> &str {
        self.path
            .strip_prefix(crate::config::SRC_PREFIX)
            .unwrap_or(&self.path)
    }
}
