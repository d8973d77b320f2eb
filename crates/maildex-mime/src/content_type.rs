//! `Content-Type` values.

use std::fmt;

use crate::error::{Error, Result};

/// A parsed `Content-Type`: the lowercased `type/subtype` essence and its
/// parameters in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    essence: String,
    slash: usize,
    params: Vec<(String, String)>,
}

impl ContentType {
    /// Type assumed for a part without a `Content-Type` header
    /// (RFC 2045 section 5.2): `text/plain; charset=us-ascii`.
    #[must_use]
    pub fn implicit() -> Self {
        Self {
            essence: "text/plain".to_string(),
            slash: 4,
            params: vec![("charset".to_string(), "us-ascii".to_string())],
        }
    }

    /// Parses a header value such as `text/plain; charset="utf-8"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContentType`] if the value has no
    /// `type/subtype` pair.
    pub fn parse(value: &str) -> Result<Self> {
        let (essence, rest) = value.split_once(';').unwrap_or((value, ""));
        let essence = essence.trim().to_ascii_lowercase();

        let slash = essence
            .find('/')
            .filter(|&at| at > 0 && at + 1 < essence.len())
            .ok_or_else(|| Error::InvalidContentType(value.trim().to_string()))?;

        Ok(Self {
            essence,
            slash,
            params: parameters(rest).collect(),
        })
    }

    /// The part before the slash, e.g. `text`.
    #[must_use]
    pub fn main_type(&self) -> &str {
        &self.essence[..self.slash]
    }

    /// The part after the slash, e.g. `plain`.
    #[must_use]
    pub fn sub_type(&self) -> &str {
        &self.essence[self.slash + 1..]
    }

    /// Looks up a parameter by case-insensitive name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `charset` parameter.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    /// The `boundary` parameter of a multipart type.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.param("boundary")
    }

    /// The `name` parameter some mailers use instead of a
    /// `Content-Disposition` filename.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.param("name")
    }

    /// Returns true for `multipart/*`.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.main_type() == "multipart"
    }

    /// Returns true for `text/<sub_type>`.
    #[must_use]
    pub fn is_text(&self, sub_type: &str) -> bool {
        self.main_type() == "text" && self.sub_type().eq_ignore_ascii_case(sub_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.essence)
    }
}

/// Splits `; key=value; key="quoted value"` into pairs. Segments without
/// `=` are skipped.
pub(crate) fn parameters(list: &str) -> impl Iterator<Item = (String, String)> + '_ {
    list.split(';').filter_map(|segment| {
        let (key, value) = segment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_ascii_lowercase(), value.trim().trim_matches('"').to_string()))
    })
}
