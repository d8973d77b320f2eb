//! Folder and message listings: scanning, resolving and rendering put
//! together.

mod folders;
mod messages;
mod view;

pub use folders::MaildirListing;
pub use messages::MessageListing;
pub use view::{DEFAULT_MESSAGE_TEMPLATE, EMPTY_BODY, render_message};

use std::path::PathBuf;

use crate::error::Error;
use crate::finder::WalkError;

/// One rendered folder line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaildirSummary {
    /// Folder path.
    pub path: PathBuf,
    /// The folder template expanded for this folder.
    pub rendered: String,
}

/// One rendered message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSummary {
    /// Message file.
    pub path: PathBuf,
    /// The message template expanded for this message.
    pub rendered: String,
}

/// A message that could not be rendered.
#[derive(Debug)]
pub struct RenderFailure {
    /// 0-based position of the message in its folder.
    pub index: usize,
    /// Message file.
    pub path: PathBuf,
    /// Why rendering failed.
    pub error: Error,
}

/// A folder listing along with the filesystem errors skipped while
/// scanning.
#[derive(Debug, Default)]
pub struct MaildirReport {
    /// Rendered folders, in scan order.
    pub folders: Vec<MaildirSummary>,
    /// Paths the scan could not read.
    pub errors: Vec<WalkError>,
}

/// A message listing. Messages that failed to render are reported
/// separately and never appear in `messages`.
#[derive(Debug, Default)]
pub struct MessageReport {
    /// Rendered messages, ordered by position in the folder.
    pub messages: Vec<MessageSummary>,
    /// Messages that could not be rendered, ordered by position.
    pub failures: Vec<RenderFailure>,
}

impl MessageReport {
    /// Returns true if every message rendered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
