//! Maildir folder scanning.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::WalkReport;
use super::walk::walk;

/// Subdirectories every maildir folder must have.
pub const MAILDIR_SUBDIRS: [&str; 3] = ["cur", "new", "tmp"];

/// Returns true if `path` has `cur/`, `new/` and `tmp/` subdirectories.
#[must_use]
pub fn is_maildir(path: &Path) -> bool {
    MAILDIR_SUBDIRS
        .iter()
        .all(|sub| fs::metadata(path.join(sub)).is_ok_and(|m| m.is_dir()))
}

/// Returns every maildir folder beneath `root`, `root` included.
///
/// Nested folders are reported alongside their parents. A directory whose
/// path ends in `cur`, `new` or `tmp` is never reported, even if it looks
/// like a maildir; the check is on the path text, so `renew` and
/// `Archive.tmp` are skipped too. Results are sorted case-insensitively by
/// path.
#[must_use]
pub fn maildirs(root: &Path) -> Vec<PathBuf> {
    maildirs_with_errors(root).paths
}

/// Like [`maildirs`], also returning the errors swallowed on the way.
#[must_use]
pub fn maildirs_with_errors(root: &Path) -> WalkReport {
    let mut report = WalkReport::default();

    walk(root, &mut report.errors, |path, metadata| {
        if !metadata.is_dir() || is_maildir_subdir(path) {
            return;
        }
        if is_maildir(path) {
            report.paths.push(path.to_path_buf());
        }
    });

    report
        .paths
        .sort_by_cached_key(|path| path.to_string_lossy().to_lowercase());

    debug!(
        root = %root.display(),
        folders = report.paths.len(),
        skipped = report.errors.len(),
        "scanned maildirs"
    );
    report
}

fn is_maildir_subdir(path: &Path) -> bool {
    let path = path.to_string_lossy();
    MAILDIR_SUBDIRS.iter().any(|sub| path.ends_with(sub))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn make_maildir(path: &Path) {
        for sub in MAILDIR_SUBDIRS {
            fs::create_dir_all(path.join(sub)).unwrap();
        }
    }

    fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn incomplete_folders_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        make_maildir(&root.join("inbox"));
        fs::create_dir_all(root.join("inbox/drafts/cur")).unwrap();
        fs::create_dir_all(root.join("inbox/drafts/new")).unwrap();

        assert_eq!(relative(root, &maildirs(root)), vec!["inbox"]);
    }

    #[test]
    fn nested_folders_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        make_maildir(&root.join("inbox"));
        make_maildir(&root.join("inbox/archive"));

        assert_eq!(
            relative(root, &maildirs(root)),
            vec!["inbox", "inbox/archive"]
        );
    }

    #[test]
    fn folder_named_like_a_subdir_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        make_maildir(&root.join("tmp"));
        make_maildir(&root.join("work/new"));

        assert!(maildirs(root).is_empty());
    }

    #[test]
    fn folder_ending_in_a_subdir_name_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        make_maildir(&root.join("renew"));
        make_maildir(&root.join("Archive.tmp"));
        make_maildir(&root.join("inbox"));
        make_maildir(&root.join("new.box"));

        assert_eq!(relative(root, &maildirs(root)), vec!["inbox", "new.box"]);
    }

    #[test]
    fn files_are_not_folders() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        make_maildir(&root.join("inbox"));
        fs::write(root.join("dovecot.index"), "x").unwrap();
        fs::write(root.join("inbox/dovecot-uidlist"), "x").unwrap();

        assert_eq!(relative(root, &maildirs(root)), vec!["inbox"]);
    }

    #[test]
    fn sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["beta", "Alpha", "gamma", "Delta"] {
            make_maildir(&root.join(name));
        }

        assert_eq!(
            relative(root, &maildirs(root)),
            vec!["Alpha", "beta", "Delta", "gamma"]
        );
    }

    #[test]
    fn root_itself_can_be_a_maildir() {
        let dir = tempfile::tempdir().unwrap();
        make_maildir(dir.path());

        assert_eq!(maildirs(dir.path()), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = maildirs_with_errors(&dir.path().join("missing"));
        assert!(report.paths.is_empty());
        assert_eq!(report.errors.len(), 1);
    }
}
