//! # maildex-core
//!
//! Maildir indexing for maildex.
//!
//! This crate provides:
//! - Maildir discovery beneath a root directory
//! - Message enumeration within a folder, oldest first
//! - Flag decoding from maildir file names
//! - **Template engine** - `#{[width]field[.name|.email]}` placeholders
//! - **Field resolvers** - folder and message fields behind the placeholders
//! - **Concurrent renderer** - a bounded worker pool for message listings
//! - Folder and message listings built from all of the above
//!
//! ## Quick Start
//!
//! ```ignore
//! use maildex_core::{MaildirListing, MessageListing, MimeParser, Template};
//!
//! let root = std::path::Path::new("/home/user/Maildir");
//!
//! let folders = Template::new("#{06unread}/#{06total} - #{name}");
//! for folder in MaildirListing::new(root, &folders).short_names(true).list() {
//!     println!("{}", folder.rendered);
//! }
//!
//! let messages = Template::new("[#{index}/#{total} - #{flags}] #{subject}");
//! let report = MessageListing::new(root, &messages, &MimeParser).list("inbox")?;
//! for message in &report.messages {
//!     println!("{}", message.rendered);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod finder;
pub mod flags;
pub mod format;
pub mod listing;
pub mod mail;
pub mod render;
pub mod resolve;

pub use error::{Error, Result};
pub use finder::{MessageCounts, WalkError, count_messages, is_maildir, maildirs, messages};
pub use flags::{Flags, UnreadPolicy};
pub use format::{Template, expand};
pub use listing::{
    DEFAULT_MESSAGE_TEMPLATE, EMPTY_BODY, MaildirListing, MaildirReport, MaildirSummary,
    MessageListing, MessageReport, MessageSummary, RenderFailure, render_message,
};
pub use mail::{MailParser, MailSource, MimeParser};
pub use render::{RenderJob, RenderResult, Renderer, default_workers};
pub use resolve::{DEFAULT_HIGHLIGHT_MARKER, FolderResolver, MessageResolver, Resolver};
