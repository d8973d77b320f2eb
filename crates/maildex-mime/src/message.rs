//! MIME message structure and handling.

use crate::content_type::{ContentType, parameters};
use crate::encoding::{decode_base64, decode_charset, decode_quoted_printable};
use crate::error::{Error, Result};
use crate::header::Headers;
use std::fmt;
use std::path::Path;

/// `Content-Transfer-Encoding` of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    /// `7bit`, `8bit`, `binary` or anything unrecognised: bytes as they are.
    #[default]
    Identity,
    /// `base64`.
    Base64,
    /// `quoted-printable`.
    QuotedPrintable,
}

impl TransferEncoding {
    /// Interprets a header value. Unknown encodings pass bytes through.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("base64") {
            Self::Base64
        } else if value.eq_ignore_ascii_case("quoted-printable") {
            Self::QuotedPrintable
        } else {
            Self::Identity
        }
    }

    fn of(headers: &Headers) -> Self {
        headers
            .get("content-transfer-encoding")
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Undoes the encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not valid for the encoding.
    pub fn decode(self, raw: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Identity => Ok(raw.to_vec()),
            Self::Base64 => decode_base64(&String::from_utf8_lossy(raw)),
            Self::QuotedPrintable => decode_quoted_printable(&String::from_utf8_lossy(raw)),
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Identity => "identity",
            Self::Base64 => "base64",
            Self::QuotedPrintable => "quoted-printable",
        })
    }
}

/// MIME message part.
///
/// Parts of nested multiparts are flattened into their enclosing message.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body (raw bytes, still transfer-encoded).
    pub body: Vec<u8>,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Gets the content type, defaulting to `text/plain`.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        content_type_of(&self.headers)
    }

    /// Gets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        TransferEncoding::of(&self.headers)
    }

    /// Gets the decoded body as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer encoding cannot be decoded.
    pub fn body_text(&self) -> Result<String> {
        decode_text(&self.headers, &self.body)
    }

    /// Returns the attachment filename, if this part carries one.
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        self.headers
            .get("content-disposition")
            .and_then(|d| parameter(d, "filename"))
            .or_else(|| self.content_type().name().map(ToString::to_string))
    }
}

/// MIME message.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message headers.
    pub headers: Headers,
    /// Message parts (empty for single-part messages).
    pub parts: Vec<Part>,
    /// Body for single-part messages.
    pub body: Option<Vec<u8>>,
}

impl Message {
    /// Reads and parses a message file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a message.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Parses a raw RFC 5322 message.
    ///
    /// # Errors
    ///
    /// Returns an error if no header could be found, or if a multipart
    /// message does not declare a boundary.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let (header_block, body) = split_head(raw);
        let headers = Headers::parse(&String::from_utf8_lossy(header_block));
        if headers.is_empty() {
            return Err(Error::Parse("no headers found".to_string()));
        }

        let content_type = content_type_of(&headers);
        if !content_type.is_multipart() {
            return Ok(Self {
                headers,
                parts: Vec::new(),
                body: Some(body.to_vec()),
            });
        }

        let boundary = content_type.boundary().ok_or(Error::MissingBoundary)?;
        let mut parts = Vec::new();
        collect_parts(body, boundary, &mut parts)?;

        Ok(Self {
            headers,
            parts,
            body: None,
        })
    }

    /// Returns the value of a header with RFC 2047 words decoded, or an
    /// empty string when the header is absent.
    #[must_use]
    pub fn header(&self, name: &str) -> String {
        self.headers.decoded(name).unwrap_or_default()
    }

    /// Returns the readable body of the message.
    ///
    /// The first `text/plain` part wins, then the first `text/html` part.
    /// Single-part messages return their decoded body when it is text.
    /// Returns an empty string when there is nothing readable.
    #[must_use]
    pub fn body(&self) -> String {
        if let Some(body) = &self.body {
            let content_type = content_type_of(&self.headers);
            if content_type.main_type() != "text" {
                return String::new();
            }
            return decode_text(&self.headers, body)
                .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
        }

        ["plain", "html"]
            .iter()
            .find_map(|sub_type| {
                self.parts
                    .iter()
                    .find(|part| part.content_type().is_text(sub_type) && part.filename().is_none())
            })
            .map(|part| {
                part.body_text()
                    .unwrap_or_else(|_| String::from_utf8_lossy(&part.body).into_owned())
            })
            .unwrap_or_default()
    }

    /// Returns the filenames of all attachments.
    #[must_use]
    pub fn attachments(&self) -> Vec<String> {
        self.parts.iter().filter_map(Part::filename).collect()
    }
}

fn content_type_of(headers: &Headers) -> ContentType {
    headers
        .get("content-type")
        .and_then(|value| ContentType::parse(value).ok())
        .unwrap_or_else(ContentType::implicit)
}

fn decode_text(headers: &Headers, body: &[u8]) -> Result<String> {
    let decoded = TransferEncoding::of(headers).decode(body)?;
    let charset = content_type_of(headers).charset().map(str::to_string);
    Ok(decode_charset(&decoded, charset.as_deref().unwrap_or("utf-8")))
}

/// Looks up `key` in the parameters of a structured header such as
/// `attachment; filename="report.pdf"`.
fn parameter(value: &str, key: &str) -> Option<String> {
    let params = value.split_once(';').map_or("", |(_, params)| params);
    parameters(params).find_map(|(name, value)| (name == key).then_some(value))
}

/// Splits raw bytes into header block and body at the first empty line.
fn split_head(raw: &[u8]) -> (&[u8], &[u8]) {
    if raw.starts_with(b"\r\n") {
        return (&[], &raw[2..]);
    }
    if raw.starts_with(b"\n") {
        return (&[], &raw[1..]);
    }

    let mut offset = 0;
    for line in raw.split_inclusive(|&b| b == b'\n') {
        offset += line.len();
        if line == b"\n" || line == b"\r\n" {
            return (&raw[..offset - line.len()], &raw[offset..]);
        }
    }
    (raw, &[])
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits a multipart body on its boundary, recursing into nested
/// multiparts.
fn collect_parts(body: &[u8], boundary: &str, parts: &mut Vec<Part>) -> Result<()> {
    let delimiter = format!("--{boundary}");
    let mut start: Option<usize> = None;
    let mut offset = 0;
    let mut sections = Vec::new();

    for line in body.split_inclusive(|&b| b == b'\n') {
        let trimmed = trim_line_end(line);
        if let Some(rest) = trimmed.strip_prefix(delimiter.as_bytes()) {
            let closing = rest.starts_with(b"--");
            if closing || rest.iter().all(u8::is_ascii_whitespace) {
                if let Some(begin) = start.take() {
                    sections.push(trim_line_end(&body[begin..offset]));
                }
                if closing {
                    break;
                }
                start = Some(offset + line.len());
            }
        }
        offset += line.len();
    }

    // Unterminated multipart: keep what we have.
    if let Some(begin) = start {
        sections.push(&body[begin..]);
    }

    for section in sections {
        let (header_block, part_body) = split_head(section);
        let headers = Headers::parse(&String::from_utf8_lossy(header_block));
        let content_type = content_type_of(&headers);
        if content_type.is_multipart() {
            let nested = content_type.boundary().ok_or(Error::MissingBoundary)?;
            collect_parts(part_body, nested, parts)?;
        } else {
            parts.push(Part::new(headers, part_body.to_vec()));
        }
    }

    Ok(())
}
