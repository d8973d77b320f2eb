//! Message listings of a single maildir folder.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::finder::messages;
use crate::flags::UnreadPolicy;
use crate::format::Template;
use crate::mail::MailParser;
use crate::render::{RenderResult, Renderer, default_workers};
use crate::resolve::DEFAULT_HIGHLIGHT_MARKER;

use super::{MessageReport, MessageSummary, RenderFailure};

/// Renders one line per message of a maildir folder.
#[derive(Debug)]
pub struct MessageListing<'a, P> {
    root: &'a Path,
    template: &'a Template,
    parser: &'a P,
    workers: usize,
    highlight: &'a str,
    policy: UnreadPolicy,
}

impl<'a, P: MailParser> MessageListing<'a, P> {
    /// Creates a listing for folders found directly or beneath `root`.
    #[must_use]
    pub fn new(root: &'a Path, template: &'a Template, parser: &'a P) -> Self {
        Self {
            root,
            template,
            parser,
            workers: default_workers(),
            highlight: DEFAULT_HIGHLIGHT_MARKER,
            policy: UnreadPolicy::default(),
        }
    }

    /// Sets the number of render workers.
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
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

    /// Finds the directory named by `folder`.
    ///
    /// `folder` may be a path of its own or relative to the root; the
    /// latter wins when both exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaildirNotFound`] if neither is a directory.
    pub fn resolve_folder(&self, folder: &str) -> Result<PathBuf> {
        [self.root.join(folder), PathBuf::from(folder)]
            .into_iter()
            .find(|candidate| candidate.is_dir())
            .ok_or_else(|| Error::MaildirNotFound(folder.to_string()))
    }

    /// Renders the messages of `folder`, oldest first.
    ///
    /// Messages that fail to parse are collected in
    /// [`MessageReport::failures`]; the rest are still rendered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaildirNotFound`] if the folder does not exist.
    pub fn list(&self, folder: &str) -> Result<MessageReport> {
        let path = self.resolve_folder(folder)?;
        let mut report = MessageReport::default();

        for result in self.renderer().collect(messages(&path)) {
            push_result(&mut report, result);
        }

        debug!(
            folder = %path.display(),
            rendered = report.messages.len(),
            failed = report.failures.len(),
            "Listed messages"
        );
        Ok(report)
    }

    /// Renders the messages of `folder`, handing each result to `sink` in
    /// the order rendering completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaildirNotFound`] if the folder does not exist. No
    /// result reaches `sink` in that case.
    pub fn stream(&self, folder: &str, sink: impl FnMut(RenderResult)) -> Result<()> {
        let path = self.resolve_folder(folder)?;
        self.renderer().run(messages(&path), sink);
        Ok(())
    }

    fn renderer(&self) -> Renderer<'a, P> {
        Renderer::new(self.parser, self.template)
            .workers(self.workers)
            .highlight(self.highlight)
            .policy(self.policy)
    }
}

fn push_result(report: &mut MessageReport, result: RenderResult) {
    match result.outcome {
        Ok(rendered) => report.messages.push(MessageSummary {
            path: result.path,
            rendered,
        }),
        Err(error) => report.failures.push(RenderFailure {
            index: result.index,
            path: result.path,
            error,
        }),
    }
}
