//! Tolerant recursive directory walk.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

/// An error that was swallowed while walking the mail store.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", .path.display())]
pub struct WalkError {
    /// Path that could not be examined.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}

/// Walks `root` depth-first, calling `visit` for `root` and every entry
/// beneath it.
///
/// Symlinks are reported but never followed. Entries of a directory are
/// visited in byte order of their names. Paths that cannot be examined are
/// skipped and recorded in `errors`.
pub fn walk(root: &Path, errors: &mut Vec<WalkError>, mut visit: impl FnMut(&Path, &Metadata)) {
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(source) => {
                record(errors, path, source);
                continue;
            }
        };

        visit(&path, &metadata);

        if !metadata.is_dir() {
            continue;
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(source) => {
                record(errors, path, source);
                continue;
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => names.push(entry.file_name()),
                Err(source) => record(errors, path.clone(), source),
            }
        }
        names.sort_unstable();

        stack.extend(names.iter().rev().map(|name| path.join(name)));
    }
}

fn record(errors: &mut Vec<WalkError>, path: PathBuf, source: io::Error) {
    trace!(path = %path.display(), error = %source, "skipping unreadable path");
    errors.push(WalkError { path, source });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn visits_in_name_order_depth_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/file"), "x").unwrap();
        fs::write(root.join("c"), "x").unwrap();

        let mut seen = Vec::new();
        let mut errors = Vec::new();
        walk(root, &mut errors, |path, _| {
            seen.push(path.strip_prefix(root).unwrap().to_path_buf());
        });

        let expected: Vec<PathBuf> = ["", "a", "a/file", "b", "b/inner", "c"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(seen, expected);
        assert!(errors.is_empty());
    }

    #[test]
    fn missing_root_is_recorded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let mut visited = 0;
        let mut errors = Vec::new();
        walk(&missing, &mut errors, |_, _| visited += 1);

        assert_eq!(visited, 0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, missing);
        assert!(errors[0].to_string().contains("nope"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real/child")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let mut seen = Vec::new();
        let mut errors = Vec::new();
        walk(root, &mut errors, |path, metadata| {
            seen.push((
                path.strip_prefix(root).unwrap().to_path_buf(),
                metadata.file_type().is_symlink(),
            ));
        });

        assert!(seen.contains(&(PathBuf::from("link"), true)));
        assert!(!seen.iter().any(|(p, _)| p == Path::new("link/child")));
    }
}
