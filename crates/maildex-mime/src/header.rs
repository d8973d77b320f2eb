//! Header blocks.

use crate::encoding::decode_rfc2047;

/// The header fields of a message or part, in the order they appeared.
///
/// Lookups ignore case. Repeated fields are all kept.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    fields: Vec<(String, String)>,
}

impl Headers {
    /// Parses a header block.
    ///
    /// Folded lines (starting with a space or tab) are joined to the field
    /// they continue with a single space. Parsing stops at the first empty
    /// line; lines that are neither fields nor continuations are dropped.
    #[must_use]
    pub fn parse(block: &str) -> Self {
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut open = false;

        for line in block.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with([' ', '\t']) {
                if let (true, Some((_, value))) = (open, fields.last_mut()) {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(line.trim());
                }
                continue;
            }

            open = match line.split_once(':') {
                Some((name, value)) if !name.trim().is_empty() => {
                    fields.push((name.trim().to_string(), value.trim().to_string()));
                    true
                }
                _ => false,
            };
        }

        Self { fields }
    }

    /// Raw value of the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).next()
    }

    /// Value of the first field called `name`, with RFC 2047 encoded words
    /// decoded.
    #[must_use]
    pub fn decoded(&self, name: &str) -> Option<String> {
        self.get(name).map(decode_rfc2047)
    }

    /// Raw values of every field called `name`.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the block held no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let headers = Headers::parse("Message-ID: <1@host>\nX-Mailer: mutt\n");
        assert_eq!(headers.get("message-id"), Some("<1@host>"));
        assert_eq!(headers.get("X-MAILER"), Some("mutt"));
        assert_eq!(headers.get("subject"), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_repeated_fields_keep_order() {
        let headers = Headers::parse("Received: first\nSubject: s\nreceived: second\n");
        assert_eq!(headers.get_all("Received").collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(headers.get("received"), Some("first"));
    }

    #[test]
    fn test_folding_and_end_of_block() {
        let block = concat!(
            "From: sender@example.com\r\n",
            "Subject: a long\r\n",
            "\tsubject line\r\n",
            "Content-Type: text/plain;\r\n",
            " charset=utf-8\r\n",
            "\r\n",
            "Not-A-Header: body text\r\n"
        );

        let headers = Headers::parse(block);
        assert_eq!(headers.get("subject"), Some("a long subject line"));
        assert_eq!(headers.get("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(headers.get("not-a-header"), None);
    }

    #[test]
    fn test_stray_lines_are_dropped() {
        let headers = Headers::parse("garbage\n  continued garbage\nTo: a@example.com\n");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("to"), Some("a@example.com"));
    }

    #[test]
    fn test_decoded_value() {
        let headers = Headers::parse("Subject: =?utf-8?B?SMOpbGxv?= there\n");
        assert_eq!(headers.get("subject"), Some("=?utf-8?B?SMOpbGxv?= there"));
        assert_eq!(headers.decoded("subject").unwrap(), "Héllo there");
    }
}
