//! Import map model.
//!
//! An import map tells the sandbox module loader where bare specifiers
//! resolve to. Specifiers ending in `/` act as URL prefixes for deep imports
//! (e.g. `element-plus/es/components/...`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from bare module specifiers to resolvable URLs.
///
/// Uses ordered maps so serialization is deterministic. Top-level JSON keys
/// other than `imports` (such as `scopes` a user may have added by hand) are
/// carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImportMap {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub imports: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ImportMap {
    /// Parse an import map from its JSON file content.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render as pretty-printed JSON for the `import-map.json` file.
    pub fn to_json_pretty(&self) -> String {
        // A BTreeMap of strings always serializes
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Merge `other` into `self`: entries of `other` overwrite same-key
    /// entries, keys only in `self` are preserved. Idempotent.
    pub fn merge(mut self, other: &ImportMap) -> ImportMap {
        for (specifier, url) in &other.imports {
            self.imports.insert(specifier.clone(), url.clone());
        }
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
        self
    }

    /// Insert a single specifier mapping.
    pub fn insert(&mut self, specifier: impl Into<String>, url: impl Into<String>) {
        self.imports.insert(specifier.into(), url.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> ImportMap {
        let mut m = ImportMap::default();
        for (specifier, url) in entries {
            m.insert(*specifier, *url);
        }
        m
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let base = map(&[
            ("vue", "https://unpkg.com/@vue/runtime-dom@3.3.0/dist/runtime-dom.esm-browser.js"),
            ("lodash-es", "https://unpkg.com/lodash-es@4.17.21/lodash.js"),
        ]);
        let update = map(&[(
            "vue",
            "https://unpkg.com/@vue/runtime-dom@3.4.0/dist/runtime-dom.esm-browser.js",
        )]);

        let merged = base.merge(&update);
        assert_eq!(
            merged.imports["vue"],
            "https://unpkg.com/@vue/runtime-dom@3.4.0/dist/runtime-dom.esm-browser.js"
        );
        // User-added entry survives
        assert_eq!(
            merged.imports["lodash-es"],
            "https://unpkg.com/lodash-es@4.17.21/lodash.js"
        );
    }

    #[test]
    fn test_merge_idempotent() {
        let m = map(&[
            ("vue", "https://unpkg.com/@vue/runtime-dom@latest/dist/runtime-dom.esm-browser.js"),
            ("element-plus/", "https://unpkg.com/element-plus@latest/"),
        ]);
        assert_eq!(m.clone().merge(&m), m);
    }

    #[test]
    fn test_unknown_top_level_keys_survive_round_trip() {
        let json = r#"{
            "imports": { "vue": "https://example.com/vue.js" },
            "scopes": { "/scope/": { "dep": "https://example.com/dep.js" } }
        }"#;
        let parsed = ImportMap::from_json(json).unwrap();
        assert!(parsed.extra.contains_key("scopes"));

        let merged = parsed.clone().merge(&ImportMap::default());
        assert!(merged.extra.contains_key("scopes"));
        assert!(merged.to_json_pretty().contains("scopes"));
    }

    #[test]
    fn test_serialization_deterministic() {
        let m = map(&[("b", "https://b"), ("a", "https://a")]);
        assert_eq!(m.to_json_pretty(), m.clone().to_json_pretty());
    }
}
