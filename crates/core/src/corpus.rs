//! Teaching-corpus loader.
//!
//! Reads every document in the configured directory and concatenates the
//! extracted text into a single blob. Plain text and Markdown are read
//! verbatim, PDFs go through text extraction, and everything else is
//! ignored. The blob is a pure function of the filesystem at call time.

use crate::error::TutorError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Auxiliary links file appended at the end of the corpus under its own
/// marker instead of being treated as a regular document.
pub const LINKS_FILE: &str = "videos_utiles.txt";

/// Loads all teaching material under `dir` into one text blob.
///
/// Each document contributes a `[Documento: <filename>]` section; sections
/// are joined with blank lines in sorted filename order so the blob is
/// deterministic. An empty directory yields an empty string, while a
/// missing or unreadable directory is a [`TutorError::StorageAccess`] —
/// the two cases are deliberately distinguishable.
pub fn load_corpus(dir: &Path) -> Result<String, TutorError> {
    let entries = fs::read_dir(dir).map_err(|source| TutorError::StorageAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "Skipping unreadable directory entry");
                None
            }
        })
        .collect();
    paths.sort();

    let mut sections: Vec<String> = Vec::new();
    let mut links: Option<String> = None;

    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name == LINKS_FILE {
            match fs::read_to_string(&path) {
                Ok(text) => links = Some(text),
                Err(err) => warn!(file = name, error = %err, "Skipping unreadable links file"),
            }
            continue;
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let text = match extension.as_deref() {
            Some("txt") | Some("md") => match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    warn!(file = name, error = %err, "Skipping unreadable document");
                    continue;
                }
            },
            Some("pdf") => match pdf_extract::extract_text(&path) {
                Ok(text) => text,
                Err(err) => {
                    warn!(file = name, error = %err, "Skipping PDF that could not be parsed");
                    continue;
                }
            },
            _ => continue,
        };

        debug!(file = name, bytes = text.len(), "Loaded teaching document");
        sections.push(format!("[Documento: {name}]\n{}", text.trim()));
    }

    if let Some(links) = links {
        sections.push(format!("[Enlaces útiles]\n{}", links.trim()));
    }

    Ok(sections.join("\n\n"))
}
