//! Fields of a maildir folder listing.

use std::cell::OnceCell;
use std::path::Path;

use crate::finder::{MessageCounts, count_messages};
use crate::flags::UnreadPolicy;

use super::{DEFAULT_HIGHLIGHT_MARKER, Resolver, unknown_variable};

/// Fields known to [`FolderResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderField {
    /// `name`: full folder path (the short name with `--short`).
    Name,
    /// `shortname`: path relative to the scan root.
    ShortName,
    /// `total`: number of messages.
    Total,
    /// `unread`: number of unread messages.
    Unread,
    /// `unread_highlight`: the highlight marker if anything is unread.
    UnreadHighlight,
}

impl FolderField {
    /// Looks up a field by name.
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "shortname" => Some(Self::ShortName),
            "total" => Some(Self::Total),
            "unread" => Some(Self::Unread),
            "unread_highlight" => Some(Self::UnreadHighlight),
            _ => None,
        }
    }

    /// Returns true for fields that need the folder's messages counted.
    #[must_use]
    pub const fn is_counting(self) -> bool {
        matches!(self, Self::Total | Self::Unread | Self::UnreadHighlight)
    }
}

/// Resolves folder fields for one maildir.
///
/// Message counts are computed on first use and then reused for the other
/// counting fields of the same folder.
#[derive(Debug)]
pub struct FolderResolver<'a> {
    path: &'a Path,
    root: &'a Path,
    short_names: bool,
    highlight: &'a str,
    policy: UnreadPolicy,
    counts: OnceCell<MessageCounts>,
}

impl<'a> FolderResolver<'a> {
    /// Creates a resolver for the folder at `path`, found beneath `root`.
    #[must_use]
    pub fn new(path: &'a Path, root: &'a Path) -> Self {
        Self {
            path,
            root,
            short_names: false,
            highlight: DEFAULT_HIGHLIGHT_MARKER,
            policy: UnreadPolicy::default(),
            counts: OnceCell::new(),
        }
    }

    /// Renders `name` as the short name.
    #[must_use]
    pub const fn short_names(mut self, short_names: bool) -> Self {
        self.short_names = short_names;
        self
    }

    /// Sets the marker rendered by `unread_highlight`.
    #[must_use]
    pub const fn highlight(mut self, marker: &'a str) -> Self {
        self.highlight = marker;
        self
    }

    /// Sets how unread messages are counted.
    #[must_use]
    pub const fn policy(mut self, policy: UnreadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Supplies counts computed ahead of time.
    #[must_use]
    pub fn with_counts(self, counts: MessageCounts) -> Self {
        // First counts supplied win.
        let _ = self.counts.set(counts);
        self
    }

    /// Returns the folder path relative to the scan root.
    #[must_use]
    pub fn short_name(&self) -> String {
        self.path
            .strip_prefix(self.root)
            .unwrap_or(self.path)
            .to_string_lossy()
            .into_owned()
    }

    /// Returns the message counts, counting on first use.
    pub fn counts(&self) -> MessageCounts {
        *self
            .counts
            .get_or_init(|| count_messages(self.path, self.policy))
    }
}

impl Resolver for FolderResolver<'_> {
    fn resolve(&self, field: &str) -> String {
        let Some(known) = FolderField::parse(field) else {
            return unknown_variable(field);
        };

        match known {
            FolderField::Name if self.short_names => self.short_name(),
            FolderField::Name => self.path.to_string_lossy().into_owned(),
            FolderField::ShortName => self.short_name(),
            FolderField::Total => self.counts().total.to_string(),
            FolderField::Unread => self.counts().unread.to_string(),
            FolderField::UnreadHighlight if self.counts().unread > 0 => self.highlight.to_string(),
            FolderField::UnreadHighlight => String::new(),
        }
    }
}
