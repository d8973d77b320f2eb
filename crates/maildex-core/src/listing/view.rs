//! The single-message view.

use std::path::Path;

use crate::error::Result;
use crate::format::Template;
use crate::mail::{MailParser, MailSource};
use crate::render::{RenderJob, Renderer};

/// Template of the single-message view.
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "To: #{to}\nFrom: #{from}\nCc: #{cc}\nDate: #{date}\nSubject: #{subject}\n\n#{body}";

/// Shown as `body` when a message has neither a text nor an HTML body.
pub const EMPTY_BODY: &str = "No body";

/// Renders one message file through `template`, as the only message of its
/// listing.
///
/// A message without a readable body renders [`EMPTY_BODY`] as its `body`.
///
/// # Errors
///
/// Returns an error if the message cannot be read or parsed.
pub fn render_message<P: MailParser>(parser: &P, template: &Template, path: &Path) -> Result<String> {
    Renderer::new(&ViewParser(parser), template).render(&RenderJob {
        index: 0,
        total: 1,
        path: path.to_path_buf(),
    })
}

struct ViewParser<'a, P>(&'a P);

struct ViewMail<M>(M);

impl<P: MailParser> MailParser for ViewParser<'_, P> {
    type Mail = ViewMail<P::Mail>;

    fn parse(&self, path: &Path) -> Result<Self::Mail> {
        self.0.parse(path).map(ViewMail)
    }
}

impl<M: MailSource> MailSource for ViewMail<M> {
    fn header(&self, name: &str) -> String {
        self.0.header(name)
    }

    fn body(&self) -> String {
        let body = self.0.body();
        if body.is_empty() { EMPTY_BODY.to_string() } else { body }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mail::MimeParser;

    #[test]
    fn default_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.host:2,S");
        std::fs::write(
            &path,
            "To: bob@example.com\nFrom: \"Alice\" <alice@example.com>\n\
             Date: Mon, 1 Jan 2024 10:00:00 +0000\nSubject: =?UTF-8?Q?Caf=C3=A9?=\n\nSee you there.\n",
        )
        .unwrap();

        let template = Template::new(DEFAULT_MESSAGE_TEMPLATE);
        let rendered = render_message(&MimeParser, &template, &path).unwrap();
        assert_eq!(
            rendered,
            "To: bob@example.com\nFrom: \"Alice\" <alice@example.com>\nCc: \n\
             Date: Mon, 1 Jan 2024 10:00:00 +0000\nSubject: Café\n\nSee you there.\n"
        );
    }

    #[test]
    fn custom_view_sees_listing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.host:2,FS");
        std::fs::write(&path, "Subject: Hi\n\nbody\n").unwrap();

        let template = Template::new("#{index}/#{total} [#{flags}] #{subject}");
        assert_eq!(
            render_message(&MimeParser, &template, &path).unwrap(),
            "1/1 [FS] Hi"
        );
    }

    #[test]
    fn message_without_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.host:2,S");
        std::fs::write(&path, "Subject: Empty\n\n").unwrap();

        let template = Template::new("#{subject}: #{body}");
        assert_eq!(
            render_message(&MimeParser, &template, &path).unwrap(),
            "Empty: No body"
        );
    }

    #[test]
    fn unreadable_message() {
        let dir = tempfile::tempdir().unwrap();
        let template = Template::new(DEFAULT_MESSAGE_TEMPLATE);
        assert!(render_message(&MimeParser, &template, &dir.path().join("gone")).is_err());
    }
}
