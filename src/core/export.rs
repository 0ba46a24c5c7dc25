//! Project export.
//!
//! Packs the current project into a downloadable zip archive: a static Vite
//! scaffold at the root, every project file under `src/`, and the import
//! map at the archive root where the scaffold's `index.html` references it.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::{IMPORT_MAP, SCAFFOLD_FILES};
use crate::core::error::ExportError;
use crate::models::VirtualFile;

/// Build the archive bytes for the given project files.
///
/// Hidden (playground-managed) files are skipped unless `include_hidden` is
/// set (debug mode).
pub fn build_project_zip(
    files: &[VirtualFile],
    include_hidden: bool,
) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (path, content) in SCAFFOLD_FILES {
        write_entry(&mut zip, path, content, options)?;
    }

    for file in files {
        if file.hidden && !include_hidden {
            continue;
        }
        if file.path == IMPORT_MAP {
            write_entry(&mut zip, IMPORT_MAP, &file.content, options)?;
        } else {
            let archive_path = format!("src/{}", file.display_name());
            write_entry(&mut zip, &archive_path, &file.content, options)?;
        }
    }

    let cursor = zip
        .finish()
        .map_err(|e| ExportError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn write_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<(), ExportError> {
    zip.start_file(path, options)
        .map_err(|e| ExportError::Archive(e.to_string()))?;
    zip.write_all(content.as_bytes())
        .map_err(|e| ExportError::Archive(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        archive.file_names().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_archive_layout() {
        let files = vec![
            VirtualFile::new("src/App.vue", "<template>hi</template>"),
            VirtualFile::new("tsconfig.json", "{}"),
            VirtualFile::new(IMPORT_MAP, r#"{"imports":{}}"#),
            VirtualFile::with_hidden("src/element-plus.js", "glue", true),
        ];
        let bytes = build_project_zip(&files, false).unwrap();
        let names = entry_names(&bytes);

        // Scaffold at root
        assert!(names.contains(&"index.html".to_string()));
        assert!(names.contains(&"package.json".to_string()));
        assert!(names.contains(&"vite.config.js".to_string()));
        assert!(names.contains(&"README.md".to_string()));
        assert!(names.contains(&"src/main.js".to_string()));

        // Project files under src/, import map at root
        assert!(names.contains(&"src/App.vue".to_string()));
        assert!(names.contains(&"src/tsconfig.json".to_string()));
        assert!(names.contains(&IMPORT_MAP.to_string()));

        // Hidden files excluded outside debug mode
        assert!(!names.contains(&"src/element-plus.js".to_string()));
    }

    #[test]
    fn test_debug_mode_includes_hidden_files() {
        let files = vec![VirtualFile::with_hidden("src/element-plus.js", "glue", true)];
        let bytes = build_project_zip(&files, true).unwrap();
        assert!(entry_names(&bytes).contains(&"src/element-plus.js".to_string()));
    }

    #[test]
    fn test_contents_round_trip() {
        let files = vec![VirtualFile::new("src/App.vue", "<template>hi</template>")];
        let bytes = build_project_zip(&files, false).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name("src/App.vue").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "<template>hi</template>");
    }
}
