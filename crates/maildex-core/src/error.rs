//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
///
/// Walking the mail store never fails; see [`crate::finder`] for the
/// errors that are swallowed there.
#[derive(Debug, Error)]
pub enum Error {
    /// The folder given to a message listing does not exist.
    #[error("maildir '{0}' wasn't found")]
    MaildirNotFound(String),

    /// A message could not be parsed.
    #[error("Mail parsing error: {0}")]
    Mime(#[from] maildex_mime::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
