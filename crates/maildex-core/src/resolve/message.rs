//! Fields of a message listing.

use std::path::Path;

use crate::flags::{Flags, UnreadPolicy};
use crate::mail::MailSource;

use super::{DEFAULT_HIGHLIGHT_MARKER, Resolver};

/// Fields known to [`MessageResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageField<'a> {
    /// `flags`: canonical flag string.
    Flags,
    /// `file`: path of the message file.
    File,
    /// `index`: 1-based position in the folder listing.
    Index,
    /// `total`: number of messages in the folder.
    Total,
    /// `unread_highlight`: the highlight marker if the message is unread.
    UnreadHighlight,
    /// `body`: readable message body.
    Body,
    /// Anything else is looked up as a mail header.
    Header(&'a str),
}

impl<'a> MessageField<'a> {
    /// Classifies a field name.
    #[must_use]
    pub fn parse(field: &'a str) -> Self {
        match field {
            "flags" => Self::Flags,
            "file" => Self::File,
            "index" => Self::Index,
            "total" => Self::Total,
            "unread_highlight" => Self::UnreadHighlight,
            "body" => Self::Body,
            header => Self::Header(header),
        }
    }
}

/// Resolves message fields for one parsed message.
pub struct MessageResolver<'a, M: ?Sized> {
    path: &'a Path,
    mail: &'a M,
    index: usize,
    total: usize,
    highlight: &'a str,
    policy: UnreadPolicy,
}

impl<'a, M: MailSource + ?Sized> MessageResolver<'a, M> {
    /// Creates a resolver for the message file at `path`.
    ///
    /// Until [`position`](Self::position) is called the message is the
    /// only one of its listing.
    #[must_use]
    pub const fn new(path: &'a Path, mail: &'a M) -> Self {
        Self {
            path,
            mail,
            index: 0,
            total: 1,
            highlight: DEFAULT_HIGHLIGHT_MARKER,
            policy: UnreadPolicy::Location,
        }
    }

    /// Sets the 0-based position of the message and the listing size.
    #[must_use]
    pub const fn position(mut self, index: usize, total: usize) -> Self {
        self.index = index;
        self.total = total;
        self
    }

    /// Sets the marker rendered by `unread_highlight`.
    #[must_use]
    pub const fn highlight(mut self, marker: &'a str) -> Self {
        self.highlight = marker;
        self
    }

    /// Sets how an unread message is recognised.
    #[must_use]
    pub const fn policy(mut self, policy: UnreadPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<M: MailSource + ?Sized> Resolver for MessageResolver<'_, M> {
    fn resolve(&self, field: &str) -> String {
        match MessageField::parse(field) {
            MessageField::Flags => Flags::from_path(self.path).to_string(),
            MessageField::File => self.path.to_string_lossy().into_owned(),
            MessageField::Index => (self.index + 1).to_string(),
            MessageField::Total => self.total.to_string(),
            MessageField::UnreadHighlight => {
                if self.policy.is_unread(&Flags::from_path(self.path)) {
                    self.highlight.to_string()
                } else {
                    String::new()
                }
            }
            MessageField::Body => self.mail.body(),
            MessageField::Header(name) => self.mail.header(name),
        }
    }
}
