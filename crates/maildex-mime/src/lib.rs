//! # maildex-mime
//!
//! MIME message parsing for maildex.
//!
//! The listing engine only ever asks a message two questions: "what is the
//! value of this header?" and "what is the readable body?". This crate
//! answers both.
//!
//! ## Features
//!
//! - **Message parsing**: Headers, single-part and (nested) multipart bodies
//! - **Header decoding**: RFC 2047 encoded words (B and Q encodings)
//! - **Body decoding**: Base64 and Quoted-Printable transfer encodings
//! - **Body selection**: `text/plain` preferred, `text/html` fallback
//!
//! ## Quick Start
//!
//! ```ignore
//! use maildex_mime::Message;
//!
//! let message = Message::read("/home/user/Maildir/inbox/cur/1700000000.1:2,S")?;
//! println!("Subject: {}", message.header("subject"));
//! println!("{}", message.body());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;
mod header;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Message, Part, TransferEncoding};
