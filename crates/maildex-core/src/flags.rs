//! Maildir flag decoding.
//!
//! Flags live in the message filename after the `:2,` info marker
//! (`1700000000.M1P2.host:2,RS`). A message that still sits in `new/`
//! additionally gets the synthetic [`NEW_FLAG`].

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Synthetic flag for messages located under `new/`.
pub const NEW_FLAG: char = 'N';

/// Maildir flag letter for a message that has been read.
pub const SEEN_FLAG: char = 'S';

const INFO_MARKER: &str = ":2,";
const NEW_SEGMENT: &str = "/new/";

/// Canonical flag string of a message.
///
/// Letters are sorted by code point; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Flags(String);

impl Flags {
    /// Decodes the flags of the message at `path`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self::parse(&path.to_string_lossy())
    }

    /// Decodes the flags from a path string.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let mut letters: Vec<char> = path
            .rfind(INFO_MARKER)
            .map(|i| path[i + INFO_MARKER.len()..].chars().collect())
            .unwrap_or_default();

        if path.contains(NEW_SEGMENT) {
            letters.push(NEW_FLAG);
        }

        letters.sort_unstable();
        Self(letters.into_iter().collect())
    }

    /// Returns the canonical flag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the flag letter is present.
    #[must_use]
    pub fn contains(&self, flag: char) -> bool {
        self.0.contains(flag)
    }

    /// Returns true if the message is still in `new/`.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.contains(NEW_FLAG)
    }

    /// Returns true if the message carries the `S` flag.
    #[must_use]
    pub fn is_seen(&self) -> bool {
        self.contains(SEEN_FLAG)
    }

    /// Returns true if there are no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a message is classified as unread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnreadPolicy {
    /// Unread means "the file is under `new/`", whatever its flags say.
    #[default]
    Location,
    /// Unread means "the `S` flag is missing", wherever the file is.
    SeenFlag,
}

impl UnreadPolicy {
    /// Returns true if a message with these flags counts as unread.
    #[must_use]
    pub fn is_unread(self, flags: &Flags) -> bool {
        match self {
            Self::Location => flags.is_new(),
            Self::SeenFlag => !flags.is_seen(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_marker_outside_new_is_empty() {
        let flags = Flags::parse("/home/u/Maildir/inbox/cur/1700000000.1.host");
        assert!(flags.is_empty());
        assert_eq!(flags.as_str(), "");
    }

    #[test]
    fn marker_letters_are_sorted() {
        let flags = Flags::parse("/home/u/Maildir/inbox/cur/1700000000.1.host:2,SRF");
        assert_eq!(flags.as_str(), "FRS");
        assert!(flags.is_seen());
        assert!(!flags.is_new());
    }

    #[test]
    fn new_adds_synthetic_flag() {
        let flags = Flags::parse("/home/u/Maildir/inbox/new/1700000000.1.host:2,RS");
        assert_eq!(flags.as_str(), "NRS");
        assert!(flags.is_new());

        let flags = Flags::parse("/home/u/Maildir/inbox/new/1700000000.1.host");
        assert_eq!(flags.as_str(), "N");
    }

    #[test]
    fn last_marker_wins() {
        let flags = Flags::parse("/mail/odd:2,X/cur/1700000000.1.host:2,S");
        assert_eq!(flags.as_str(), "S");
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(Flags::parse("/m/cur/a:2,SS").as_str(), "SS");
    }

    #[test]
    fn from_path_matches_parse() {
        let path = Path::new("/m/new/a:2,F");
        assert_eq!(Flags::from_path(path), Flags::parse("/m/new/a:2,F"));
        assert_eq!(Flags::from_path(path).to_string(), "FN");
    }

    #[test]
    fn unread_policies() {
        let fresh = Flags::parse("/m/new/a");
        let moved_unseen = Flags::parse("/m/cur/a:2,");
        let seen = Flags::parse("/m/cur/a:2,S");

        assert!(UnreadPolicy::Location.is_unread(&fresh));
        assert!(!UnreadPolicy::Location.is_unread(&moved_unseen));
        assert!(!UnreadPolicy::Location.is_unread(&seen));

        assert!(UnreadPolicy::SeenFlag.is_unread(&fresh));
        assert!(UnreadPolicy::SeenFlag.is_unread(&moved_unseen));
        assert!(!UnreadPolicy::SeenFlag.is_unread(&seen));
    }

    #[test]
    fn unread_policy_serde_names() {
        let policy: UnreadPolicy = serde_json::from_str("\"seen-flag\"").unwrap();
        assert_eq!(policy, UnreadPolicy::SeenFlag);
    }

    proptest! {
        #[test]
        fn flags_are_always_sorted(letters in "[A-Za-z]{0,12}", in_new in any::<bool>()) {
            let dir = if in_new { "new" } else { "cur" };
            let flags = Flags::parse(&format!("/m/{dir}/1.host:2,{letters}"));
            let chars: Vec<char> = flags.as_str().chars().collect();
            prop_assert!(chars.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(chars.len(), letters.len() + usize::from(in_new));
        }
    }
}
