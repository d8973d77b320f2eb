//! Message enumeration within a single maildir folder.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::flags::{Flags, UnreadPolicy};

use super::WalkReport;
use super::walk::walk;

/// Subdirectories holding delivered messages. `tmp/` is never listed.
const MESSAGE_SUBDIRS: [&str; 2] = ["cur", "new"];

/// Returns the message files of a maildir folder, oldest first.
///
/// Only regular files beneath `cur/` and `new/` are listed. Files with the
/// same modification time keep the order the walk found them in (`cur/`
/// before `new/`, names in byte order).
#[must_use]
pub fn messages(folder: &Path) -> Vec<PathBuf> {
    messages_with_errors(folder).paths
}

/// Like [`messages`], also returning the errors swallowed on the way.
#[must_use]
pub fn messages_with_errors(folder: &Path) -> WalkReport {
    let mut report = WalkReport::default();
    let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();

    for sub in MESSAGE_SUBDIRS {
        walk(&folder.join(sub), &mut report.errors, |path, metadata| {
            if metadata.is_file() {
                let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                found.push((modified, path.to_path_buf()));
            }
        });
    }

    // Stable: equal times keep discovery order.
    found.sort_by_key(|(modified, _)| *modified);
    report.paths = found.into_iter().map(|(_, path)| path).collect();
    report
}

/// Message totals of a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCounts {
    /// Number of messages in `cur/` and `new/`.
    pub total: usize,
    /// Number of messages counted as unread under the policy used.
    pub unread: usize,
}

/// Counts the messages of a folder.
#[must_use]
pub fn count_messages(folder: &Path, policy: UnreadPolicy) -> MessageCounts {
    let paths = messages(folder);
    let unread = paths
        .iter()
        .filter(|path| policy.is_unread(&Flags::from_path(path)))
        .count();

    MessageCounts {
        total: paths.len(),
        unread,
    }
}
