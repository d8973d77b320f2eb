//! Discovery of maildir folders and the messages inside them.
//!
//! Both walks are tolerant: paths that cannot be read are left out of the
//! results instead of failing the whole scan. The `*_with_errors`
//! variants return the swallowed errors as well, for diagnostics.

mod maildirs;
mod messages;
mod walk;

pub use maildirs::{MAILDIR_SUBDIRS, is_maildir, maildirs, maildirs_with_errors};
pub use messages::{MessageCounts, count_messages, messages, messages_with_errors};
pub use walk::WalkError;

use std::path::PathBuf;

/// Paths found by a walk together with the errors it swallowed.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Paths found, in the documented order.
    pub paths: Vec<PathBuf>,
    /// Errors encountered while walking.
    pub errors: Vec<WalkError>,
}
