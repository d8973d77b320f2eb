//! Concurrent message rendering.
//!
//! Numbered jobs go through a bounded queue to a fixed pool of workers.
//! The calling thread receives results as they complete, so arrival order
//! is unspecified; every result carries the index it was queued with.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use crossbeam::channel::bounded;
use tracing::{debug, warn};

use crate::error::Result;
use crate::flags::UnreadPolicy;
use crate::format::Template;
use crate::mail::MailParser;
use crate::resolve::{DEFAULT_HIGHLIGHT_MARKER, MessageResolver};

/// One message to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// 0-based position in the folder listing.
    pub index: usize,
    /// Number of messages in the listing.
    pub total: usize,
    /// Message file.
    pub path: PathBuf,
}

/// Outcome of one [`RenderJob`].
#[derive(Debug)]
pub struct RenderResult {
    /// Index of the job this result belongs to.
    pub index: usize,
    /// Message file.
    pub path: PathBuf,
    /// Rendered line, or why the message could not be rendered.
    pub outcome: Result<String>,
}

/// Worker count used when none is configured: twice the available
/// parallelism.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get) * 2
}

/// Renders message files through a template on a pool of workers.
#[derive(Debug)]
pub struct Renderer<'a, P> {
    parser: &'a P,
    template: &'a Template,
    highlight: &'a str,
    policy: UnreadPolicy,
    workers: usize,
}

impl<'a, P: MailParser> Renderer<'a, P> {
    /// Creates a renderer with [`default_workers`] workers.
    #[must_use]
    pub fn new(parser: &'a P, template: &'a Template) -> Self {
        Self {
            parser,
            template,
            highlight: DEFAULT_HIGHLIGHT_MARKER,
            policy: UnreadPolicy::default(),
            workers: default_workers(),
        }
    }

    /// Sets the number of workers. Zero is treated as one.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
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

    /// Parses and renders a single job on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be parsed.
    pub fn render(&self, job: &RenderJob) -> Result<String> {
        let mail = self.parser.parse(&job.path)?;
        let resolver = MessageResolver::new(&job.path, &mail)
            .position(job.index, job.total)
            .highlight(self.highlight)
            .policy(self.policy);
        Ok(self.template.expand(&resolver))
    }

    /// Renders every path, handing each result to `sink` as it completes.
    ///
    /// Returns once every job has produced exactly one result. `sink` runs
    /// on the calling thread.
    pub fn run(&self, paths: Vec<PathBuf>, mut sink: impl FnMut(RenderResult)) {
        let total = paths.len();
        if total == 0 {
            return;
        }

        let workers = self.workers.min(total);
        debug!(total, workers, "Rendering messages");

        let (job_tx, job_rx) = bounded::<RenderJob>(workers);
        let (result_tx, result_rx) = bounded::<RenderResult>(workers);

        thread::scope(|scope| {
            scope.spawn(move || {
                for (index, path) in paths.into_iter().enumerate() {
                    if job_tx.send(RenderJob { index, total, path }).is_err() {
                        break;
                    }
                }
            });

            for _ in 0..workers {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                scope.spawn(move || {
                    for job in jobs {
                        let outcome = self.render(&job);
                        if let Err(e) = &outcome {
                            warn!(path = %job.path.display(), "Failed to render message: {e}");
                        }
                        let result = RenderResult {
                            index: job.index,
                            path: job.path,
                            outcome,
                        };
                        if results.send(result).is_err() {
                            break;
                        }
                    }
                });
            }

            // The result stream ends once the last worker hangs up.
            drop(job_rx);
            drop(result_tx);

            for result in result_rx {
                sink(result);
            }
        });
    }

    /// Renders every path and returns the results ordered by index.
    #[must_use]
    pub fn collect(&self, paths: Vec<PathBuf>) -> Vec<RenderResult> {
        let mut results = Vec::with_capacity(paths.len());
        self.run(paths, |result| results.push(result));
        results.sort_by_key(|result| result.index);
        results
    }
}
