use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning the notes tree.
pub struct ScanResult {
    /// Markdown documents in a stable, sorted order.
    pub files: Vec<PathBuf>,
    /// Paths the walk could not access.
    pub skipped_count: usize,
}

pub fn scan_notes(notes_root: &Path, ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            // Literal path mode: anchor under the notes root for prefix matching
            literal_ignore_paths.push(notes_root.join(p));
        }
    }

    for entry in WalkDir::new(notes_root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        // Check if path matches any literal ignore path (prefix match)
        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        // Check if path matches any glob pattern
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if path.is_file() && is_note_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_note_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("md"))
}
