//! Template expansion.
//!
//! A template is literal text with `#{...}` placeholders:
//!
//! ```text
//! #{06unread}/#{06total} - #{name}
//! [#{index}/#{total}] #{20from.name} #{subject}
//! ```
//!
//! A placeholder is an optional width (`06`: pad with zeros to six
//! characters, `20`: pad with spaces to twenty, longer values are cut), a
//! field name, and an optional `.name` / `.email` suffix that picks the
//! display name or the `<address>` out of a mail address.
//!
//! Field values come from a [`Resolver`]; the engine knows nothing about
//! what it is rendering.

mod placeholder;

pub use placeholder::{Filter, Placeholder, Width};

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::resolve::Resolver;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{([^}]+)\}").expect("placeholder pattern"));

/// Expands every placeholder of `template` against `resolver`.
///
/// Placeholders are matched left to right without overlapping. An
/// unterminated `#{`, or an empty `#{}`, is kept as literal text.
#[must_use]
pub fn expand<R: Resolver + ?Sized>(template: &str, resolver: &R) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(caps) = PLACEHOLDER.captures(rest) {
        let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let placeholder = Placeholder::parse(spec.as_str());
        let value = placeholder.apply(resolver.resolve(placeholder.field));

        out.push_str(&rest[..whole.start()]);
        out.push_str(&value);
        rest = &rest[whole.end()..];
    }

    out.push_str(rest);
    out
}

/// An immutable format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    /// Creates a template.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the placeholders of the template, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder<'_>> {
        PLACEHOLDER
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1))
            .map(|spec| Placeholder::parse(spec.as_str()))
    }

    /// Returns true if any placeholder names a field accepted by
    /// `predicate`.
    pub fn references(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.placeholders().any(|p| predicate(p.field))
    }

    /// Expands the template against `resolver`.
    #[must_use]
    pub fn expand<R: Resolver + ?Sized>(&self, resolver: &R) -> String {
        expand(&self.source, resolver)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
