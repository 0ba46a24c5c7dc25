use serde::{Deserialize, Serialize};

/// Editor/output layout orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

/// Display preferences, populated once from URL query parameters at startup
/// and persisted inside the share token under the reserved options key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserOptions {
    /// Custom stylesheet URL template for Element Plus. `#VERSION#` is
    /// replaced with the selected version when the glue file is generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_source: Option<String>,
    /// Reveal playground-managed files (set by the `debug` query parameter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_hidden: Option<bool>,
    /// Show the preview pane.
    pub show_output: bool,
    /// Show the compiled output tab.
    pub show_compile_output: bool,
    /// Pane layout orientation.
    pub layout: Layout,
}

// Both panes are visible unless a query parameter turns one off, so the
// derived all-false default would be wrong.
impl Default for UserOptions {
    fn default() -> Self {
        Self {
            style_source: None,
            show_hidden: None,
            show_output: true,
            show_compile_output: true,
            layout: Layout::default(),
        }
    }
}

impl UserOptions {
    /// Preview deployment identifier embedded in a custom style source of
    /// the form `preview-{pr}-element-plus...`, if any.
    pub fn style_source_pr(&self) -> Option<String> {
        let source = self.style_source.as_deref()?;
        let pr = source.split('-').nth(1)?;
        (!pr.is_empty() && pr.chars().all(|c| c.is_ascii_digit())).then(|| pr.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_source_pr_extraction() {
        let options = UserOptions {
            style_source: Some(
                "https://preview-1234-element-plus.surge.sh/dist/index.css".into(),
            ),
            ..Default::default()
        };
        // The identifier sits between the first two dashes.
        assert_eq!(options.style_source_pr(), Some("1234".to_string()));

        let options = UserOptions {
            style_source: Some("https://unpkg.com/element-plus@#VERSION#/dist/index.css".into()),
            ..Default::default()
        };
        assert_eq!(options.style_source_pr(), None);
    }

    #[test]
    fn test_default_shows_both_panes() {
        let options = UserOptions::default();
        assert!(options.show_output);
        assert!(options.show_compile_output);
        assert_eq!(options.layout, Layout::Horizontal);
    }

    #[test]
    fn test_layout_serde_shape() {
        let json = serde_json::to_string(&Layout::Vertical).unwrap();
        assert_eq!(json, "\"vertical\"");
    }
}
