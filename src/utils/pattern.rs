// imgtool/src/utils/pattern.rs
use super::is_supported_format;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn has_glob_syntax(pattern: &str) -> bool {
    pattern.contains(&['*', '?', '['][..])
}

/// Expands a literal path, a `*` wildcard or a recursive `**` glob into the existing files it
/// names, sorted and without duplicates. No match is an empty list, never an error.
///
/// A literal directory expands to the supported images directly inside it.
pub fn expand(pattern: &str) -> Vec<PathBuf> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Vec::new();
    }

    if !has_glob_syntax(pattern) {
        return expand_literal(Path::new(pattern));
    }

    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Invalid glob pattern '{}': {}", pattern, e);
            return Vec::new();
        }
    };

    let matches = sorted_unique(
        entries
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file()),
    );

    log::debug!("Pattern '{}' matched {} file(s)", pattern, matches.len());
    matches
}

/// Orders by the path's string form, so `a.png` sorts before `a/b.png`.
fn sorted_unique(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let by_name: BTreeMap<String, PathBuf> = paths
        .map(|path| (path.to_string_lossy().into_owned(), path))
        .collect();
    by_name.into_values().collect()
}

fn expand_literal(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    if !path.is_dir() {
        return Vec::new();
    }

    sorted_unique(
        WalkDir::new(path)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_supported_format(path)),
    )
}

/// Expands every pattern in order and drops files already produced by an earlier pattern.
///
/// Two spellings of one file (`./a.png`, `a.png`) count as the same file.
pub fn expand_all<S: AsRef<str>>(patterns: &[S]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        for path in expand(pattern.as_ref()) {
            let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                files.push(path);
            }
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("icons/nested")).unwrap();
        for name in ["icons/b.png", "icons/a.png", "icons/notes.txt", "icons/nested/c.png"] {
            fs::write(root.join(name), b"x").unwrap();
        }
        dir
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn single_level_wildcard_is_sorted() {
        let dir = tree();
        let pattern = format!("{}/icons/*.png", dir.path().display());
        assert_eq!(names(&expand(&pattern), dir.path()), ["icons/a.png", "icons/b.png"]);
    }

    #[test]
    fn recursive_wildcard_descends() {
        let dir = tree();
        let pattern = format!("{}/icons/**/*.png", dir.path().display());
        assert_eq!(
            names(&expand(&pattern), dir.path()),
            ["icons/a.png", "icons/b.png", "icons/nested/c.png"]
        );
    }

    #[test]
    fn ordering_follows_the_path_string() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join("a/b.png"), b"x").unwrap();

        let pattern = format!("{}/**/*.png", dir.path().display());
        assert_eq!(names(&expand(&pattern), dir.path()), ["a.png", "a/b.png"]);
    }

    #[test]
    fn literal_file_and_directory() {
        let dir = tree();
        let file = dir.path().join("icons/a.png");
        assert_eq!(expand(&file.to_string_lossy()), vec![file.clone()]);

        let folder = dir.path().join("icons");
        assert_eq!(
            names(&expand(&folder.to_string_lossy()), dir.path()),
            ["icons/a.png", "icons/b.png"]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let dir = tree();
        assert!(expand(&format!("{}/missing/*.png", dir.path().display())).is_empty());
        assert!(expand(&format!("{}/nope.png", dir.path().display())).is_empty());
        assert!(expand("").is_empty());
    }

    #[test]
    fn overlapping_patterns_are_deduplicated_in_pattern_order() {
        let dir = tree();
        let root = dir.path().display();
        let patterns = vec![
            format!("{}/icons/b.png", root),
            format!("{}/icons/*.png", root),
        ];
        assert_eq!(
            names(&expand_all(&patterns), dir.path()),
            ["icons/b.png", "icons/a.png"]
        );
    }
}
