//! The narrow interface through which the core reads mail content.

use std::path::Path;

use maildex_mime::Message;

use crate::error::Result;

/// Header and body access to one parsed message.
pub trait MailSource {
    /// Returns the decoded value of a header, or an empty string.
    fn header(&self, name: &str) -> String;

    /// Returns the readable body: plain text if there is any, HTML
    /// otherwise.
    fn body(&self) -> String;
}

/// Turns a message file into a [`MailSource`].
///
/// Parsers are shared between render workers, hence `Sync`.
pub trait MailParser: Sync {
    /// The parsed message type.
    type Mail: MailSource;

    /// Parses the message file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn parse(&self, path: &Path) -> Result<Self::Mail>;
}

impl MailSource for Message {
    fn header(&self, name: &str) -> String {
        Self::header(self, name)
    }

    fn body(&self) -> String {
        Self::body(self)
    }
}

/// Parser backed by `maildex-mime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeParser;

impl MailParser for MimeParser {
    type Mail = Message;

    fn parse(&self, path: &Path) -> Result<Message> {
        Ok(Message::read(path)?)
    }
}
