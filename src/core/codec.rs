//! Project state codec.
//!
//! Serializes the project files plus [`UserOptions`] into a compact,
//! URL-safe share token and parses tokens back, including path
//! normalization for states saved by older playground versions.
//!
//! Token format: JSON object of `path -> content` with the options under
//! the reserved [`OPTIONS_KEY`], zlib-compressed, then URL-safe base64.

use serde_json::Value;

use crate::config::{IMPORT_MAP, LEGACY_IMPORT_MAP, OPTIONS_KEY, SRC_PREFIX, TSCONFIG};
use crate::core::error::{DecodeError, EncodeError};
use crate::models::UserOptions;
use crate::utils::{compress_to_token, decompress_from_token};

/// The externally visible persisted shape of a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectState {
    /// `path -> content`, in token order. Hidden files are not persisted.
    pub files: Vec<(String, String)>,
    pub options: UserOptions,
}

/// Serialize files and options into a share token.
///
/// Deterministic for identical input. Fails loudly if a real file path
/// collides with the reserved options key instead of silently corrupting
/// the state.
pub fn serialize_state<'a, I>(files: I, options: &UserOptions) -> Result<String, EncodeError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut state = serde_json::Map::new();
    for (path, content) in files {
        if path == OPTIONS_KEY {
            return Err(EncodeError::ReservedPath(path.to_string()));
        }
        state.insert(path.to_string(), Value::String(content.to_string()));
    }
    state.insert(
        OPTIONS_KEY.to_string(),
        serde_json::to_value(options).unwrap_or(Value::Null),
    );

    let json = Value::Object(state).to_string();
    Ok(compress_to_token(&json))
}

/// Parse a share token back into a [`ProjectState`].
///
/// Exact inverse of [`serialize_state`], with path normalization applied to
/// every file key:
/// - the legacy import-map path is remapped to the current one,
/// - keys that are not top-level special files and not already under the
///   source root get the `src/` prefix prepended.
pub fn deserialize_state(token: &str) -> Result<ProjectState, DecodeError> {
    let json = decompress_from_token(token)?;
    let value: Value = serde_json::from_str(&json).map_err(|_| DecodeError::Json)?;
    let Value::Object(state) = value else {
        return Err(DecodeError::Json);
    };

    let mut files: Vec<(String, String)> = Vec::with_capacity(state.len());
    let mut options = UserOptions::default();

    for (key, value) in state {
        if key == OPTIONS_KEY {
            options = serde_json::from_value(value).map_err(|_| DecodeError::Json)?;
            continue;
        }
        let Value::String(content) = value else {
            return Err(DecodeError::Json);
        };
        let path = normalize_path(&key);
        // Last write wins if normalization makes two keys collide
        if let Some(slot) = files.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = content;
        } else {
            files.push((path, content));
        }
    }

    Ok(ProjectState { files, options })
}

/// Normalize a file key from a saved state to its current project path.
fn normalize_path(key: &str) -> String {
    if key == LEGACY_IMPORT_MAP {
        return IMPORT_MAP.to_string();
    }
    if key == IMPORT_MAP || key == TSCONFIG || key.starts_with(SRC_PREFIX) {
        return key.to_string();
    }
    format!("{SRC_PREFIX}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Layout;

    fn sample_options() -> UserOptions {
        UserOptions {
            style_source: None,
            show_hidden: Some(true),
            show_output: true,
            show_compile_output: false,
            layout: Layout::Vertical,
        }
    }

    #[test]
    fn test_round_trip() {
        let files = vec![
            ("src/App.vue".to_string(), "<template>hi</template>".to_string()),
            ("src/store.ts".to_string(), "export const n = 1".to_string()),
            ("tsconfig.json".to_string(), "{}".to_string()),
        ];
        let options = sample_options();

        let token = serialize_state(
            files.iter().map(|(p, c)| (p.as_str(), c.as_str())),
            &options,
        )
        .unwrap();
        let state = deserialize_state(&token).unwrap();

        let mut restored = state.files.clone();
        restored.sort();
        let mut expected = files.clone();
        expected.sort();
        assert_eq!(restored, expected);
        assert_eq!(state.options, options);
    }

    #[test]
    fn test_reserved_key_collision_fails_loudly() {
        let files = vec![("_o", "not a file")];
        let err = serialize_state(files, &UserOptions::default()).unwrap_err();
        assert_eq!(err, EncodeError::ReservedPath("_o".to_string()));
    }

    #[test]
    fn test_bare_names_gain_src_prefix() {
        let token = serialize_state(
            vec![("Comp.vue", "<template/>"), ("tsconfig.json", "{}")],
            &UserOptions::default(),
        )
        .unwrap();
        let state = deserialize_state(&token).unwrap();

        assert!(state.files.iter().any(|(p, _)| p == "src/Comp.vue"));
        // Top-level special files stay at the root
        assert!(state.files.iter().any(|(p, _)| p == "tsconfig.json"));
    }

    #[test]
    fn test_legacy_import_map_migration() {
        let token = serialize_state(
            vec![("src/import_map.json", r#"{"imports":{}}"#)],
            &UserOptions::default(),
        )
        .unwrap();
        let state = deserialize_state(&token).unwrap();

        assert!(state.files.iter().any(|(p, _)| p == "import-map.json"));
        assert!(!state.files.iter().any(|(p, _)| p == "src/import_map.json"));
    }

    #[test]
    fn test_legacy_migration_no_duplicate_when_both_present() {
        let token = serialize_state(
            vec![
                ("import-map.json", r#"{"imports":{"a":"https://a"}}"#),
                ("src/import_map.json", r#"{"imports":{"b":"https://b"}}"#),
            ],
            &UserOptions::default(),
        )
        .unwrap();
        let state = deserialize_state(&token).unwrap();

        let matches: Vec<_> = state
            .files
            .iter()
            .filter(|(p, _)| p == "import-map.json")
            .collect();
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        assert!(deserialize_state("%%%not base64%%%").is_err());
        // Valid transform over non-object JSON
        let token = compress_to_token("[1,2,3]");
        assert_eq!(deserialize_state(&token), Err(DecodeError::Json));
    }

    #[test]
    fn test_missing_options_defaults() {
        let token = compress_to_token(r#"{"src/App.vue":"x"}"#);
        let state = deserialize_state(&token).unwrap();
        assert_eq!(state.options, UserOptions::default());
    }
}
