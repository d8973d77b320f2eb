//! Maildir folder listings.

use std::path::Path;

use tracing::debug;

use crate::finder::{MessageCounts, count_messages, maildirs_with_errors};
use crate::flags::UnreadPolicy;
use crate::format::Template;
use crate::resolve::{DEFAULT_HIGHLIGHT_MARKER, FolderField, FolderResolver};

use super::{MaildirReport, MaildirSummary};

/// Renders one line per maildir found beneath a root.
#[derive(Debug, Clone)]
pub struct MaildirListing<'a> {
    root: &'a Path,
    template: &'a Template,
    short_names: bool,
    unread_only: bool,
    highlight: &'a str,
    policy: UnreadPolicy,
    counter: fn(&Path, UnreadPolicy) -> MessageCounts,
}

impl<'a> MaildirListing<'a> {
    /// Creates a listing of the maildirs beneath `root`.
    #[must_use]
    pub fn new(root: &'a Path, template: &'a Template) -> Self {
        Self {
            root,
            template,
            short_names: false,
            unread_only: false,
            highlight: DEFAULT_HIGHLIGHT_MARKER,
            policy: UnreadPolicy::default(),
            counter: count_messages,
        }
    }

    /// Renders `name` as the path relative to the root.
    #[must_use]
    pub const fn short_names(mut self, short_names: bool) -> Self {
        self.short_names = short_names;
        self
    }

    /// Lists only folders with unread messages.
    #[must_use]
    pub const fn unread_only(mut self, unread_only: bool) -> Self {
        self.unread_only = unread_only;
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

    /// Returns true if rendering needs each folder's messages counted.
    #[must_use]
    pub fn needs_counts(&self) -> bool {
        self.unread_only
            || self
                .template
                .references(|field| FolderField::parse(field).is_some_and(FolderField::is_counting))
    }

    /// Renders the folders beneath the root.
    #[must_use]
    pub fn list(&self) -> Vec<MaildirSummary> {
        self.list_with_errors().folders
    }

    /// Like [`list`](Self::list), also returning the filesystem errors
    /// skipped while scanning.
    #[must_use]
    pub fn list_with_errors(&self) -> MaildirReport {
        let scan = maildirs_with_errors(self.root);
        let needs_counts = self.needs_counts();
        debug!(
            root = %self.root.display(),
            folders = scan.paths.len(),
            needs_counts,
            "Listing maildirs"
        );

        let mut folders = Vec::with_capacity(scan.paths.len());
        for path in scan.paths {
            let rendered = {
                let mut resolver = FolderResolver::new(&path, self.root)
                    .short_names(self.short_names)
                    .highlight(self.highlight)
                    .policy(self.policy);

                if needs_counts {
                    let counts = (self.counter)(&path, self.policy);
                    if self.unread_only && counts.unread == 0 {
                        continue;
                    }
                    resolver = resolver.with_counts(counts);
                }

                self.template.expand(&resolver)
            };
            folders.push(MaildirSummary { path, rendered });
        }

        MaildirReport {
            folders,
            errors: scan.errors,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::path::PathBuf;

    thread_local! {
        static COUNTED: Cell<usize> = const { Cell::new(0) };
    }

    fn tallying_counter(folder: &Path, policy: UnreadPolicy) -> MessageCounts {
        COUNTED.with(|counted| counted.set(counted.get() + 1));
        count_messages(folder, policy)
    }

    fn counted_listing(root: &Path, source: &str, unread_only: bool) -> (Vec<String>, usize) {
        COUNTED.with(|counted| counted.set(0));
        let template = Template::new(source);
        let mut listing = MaildirListing::new(root, &template).unread_only(unread_only);
        listing.counter = tallying_counter;
        let lines = listing.list().into_iter().map(|summary| summary.rendered).collect();
        (lines, COUNTED.with(Cell::get))
    }

    fn maildir(root: &Path, name: &str) -> PathBuf {
        let path = root.join(name);
        for sub in ["cur", "new", "tmp"] {
            fs::create_dir_all(path.join(sub)).unwrap();
        }
        path
    }

    #[test]
    fn counting_fields_are_detected_once() {
        let root = Path::new("/m");

        let plain = Template::new("#{name} #{shortname}");
        assert!(!MaildirListing::new(root, &plain).needs_counts());
        assert!(MaildirListing::new(root, &plain).unread_only(true).needs_counts());

        for source in ["#{06total}", "#{unread}", "#{unread_highlight}#{name}"] {
            let template = Template::new(source);
            assert!(MaildirListing::new(root, &template).needs_counts(), "{source}");
        }
    }

    #[test]
    fn folders_are_not_counted_unless_needed() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = maildir(dir.path(), "inbox");
        maildir(dir.path(), "sent");
        fs::write(inbox.join("new/1.host"), "x").unwrap();

        let (lines, counted) = counted_listing(dir.path(), "#{shortname}", false);
        assert_eq!(lines, vec!["inbox", "sent"]);
        assert_eq!(counted, 0);

        let (lines, counted) = counted_listing(dir.path(), "#{total} #{shortname}", false);
        assert_eq!(lines, vec!["1 inbox", "0 sent"]);
        assert_eq!(counted, 2);

        let (lines, counted) = counted_listing(dir.path(), "#{shortname}", true);
        assert_eq!(lines, vec!["inbox"]);
        assert_eq!(counted, 2);
    }

    #[test]
    fn renders_each_folder() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = maildir(dir.path(), "inbox");
        maildir(dir.path(), "Archive");
        fs::write(inbox.join("new/1.host"), "x").unwrap();
        fs::write(inbox.join("cur/2.host:2,S"), "x").unwrap();

        let template = Template::new("#{unread_highlight}#{02unread}/#{02total} #{name}");
        let lines: Vec<String> = MaildirListing::new(dir.path(), &template)
            .short_names(true)
            .list()
            .into_iter()
            .map(|summary| summary.rendered)
            .collect();

        assert_eq!(lines, vec!["00/00 Archive", "*01/02 inbox"]);
    }

    #[test]
    fn unread_only_skips_read_folders() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = maildir(dir.path(), "inbox");
        let sent = maildir(dir.path(), "sent");
        fs::write(inbox.join("new/1.host"), "x").unwrap();
        fs::write(sent.join("cur/2.host:2,S"), "x").unwrap();

        let template = Template::new("#{shortname}");
        let listed = MaildirListing::new(dir.path(), &template)
            .unread_only(true)
            .list();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, inbox);
        assert_eq!(listed[0].rendered, "inbox");
    }

    #[test]
    fn empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let template = Template::new("#{name}");
        let report = MaildirListing::new(dir.path(), &template).list_with_errors();
        assert!(report.folders.is_empty());
        assert!(report.errors.is_empty());
    }
}
