//! A single `#{...}` placeholder.

use std::iter;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals; compiling them cannot fail.
#[allow(clippy::expect_used)]
static DISPLAY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"(.*)".*<.*>$"#).expect("display name pattern"));

#[allow(clippy::expect_used)]
static ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*?(<.*>)$").expect("address pattern"));

/// Address part selected by a `.name` / `.email` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// `"Display Name" <addr>` becomes `Display Name`.
    Name,
    /// `Display Name <addr>` becomes `<addr>`.
    Email,
}

impl Filter {
    /// Applies the filter, leaving values that do not match untouched.
    #[must_use]
    pub fn apply(self, value: String) -> String {
        let pattern = match self {
            Self::Name => &DISPLAY_NAME,
            Self::Email => &ADDRESS,
        };
        let captured = pattern
            .captures(&value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        captured.unwrap_or(value)
    }
}

/// Fixed field width from a leading digit run such as `06`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// Exact length of the rendered value, in characters.
    pub len: usize,
    /// Left padding character: `0` if the digits start with `0`.
    pub pad: char,
}

impl Width {
    /// Pads on the left or truncates on the right to exactly `len`
    /// characters.
    #[must_use]
    pub fn apply(self, value: String) -> String {
        let count = value.chars().count();
        if count < self.len {
            iter::repeat_n(self.pad, self.len - count)
                .chain(value.chars())
                .collect()
        } else if count > self.len {
            value.chars().take(self.len).collect()
        } else {
            value
        }
    }
}

/// Parsed form of the text between `#{` and `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Width, when the spec starts with digits.
    pub width: Option<Width>,
    /// Field name handed to the resolver.
    pub field: &'a str,
    /// Address filter, when the field ends in `.name` or `.email`.
    pub filter: Option<Filter>,
}

impl<'a> Placeholder<'a> {
    /// Parses a placeholder spec, e.g. `06from.name`.
    ///
    /// A digit run too long to be a width is treated as no width at all.
    #[must_use]
    pub fn parse(spec: &'a str) -> Self {
        let digits = spec.bytes().take_while(u8::is_ascii_digit).count();
        let (width, field) = spec.split_at(digits);

        let width = if width.is_empty() {
            None
        } else {
            width.parse().ok().map(|len| Width {
                len,
                pad: if width.starts_with('0') { '0' } else { ' ' },
            })
        };

        let (field, filter) = if let Some(field) = field.strip_suffix(".name") {
            (field, Some(Filter::Name))
        } else if let Some(field) = field.strip_suffix(".email") {
            (field, Some(Filter::Email))
        } else {
            (field, None)
        };

        Self {
            width,
            field,
            filter,
        }
    }

    /// Applies the filter, then the width, to a resolved value.
    #[must_use]
    pub fn apply(&self, value: String) -> String {
        let value = match self.filter {
            Some(filter) => filter.apply(value),
            None => value,
        };
        match self.width {
            Some(width) => width.apply(value),
            None => value,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_field() {
        let p = Placeholder::parse("subject");
        assert_eq!(p.field, "subject");
        assert_eq!(p.width, None);
        assert_eq!(p.filter, None);
    }

    #[test]
    fn parse_width_and_pad() {
        let p = Placeholder::parse("06unread");
        assert_eq!(p.field, "unread");
        assert_eq!(p.width, Some(Width { len: 6, pad: '0' }));

        let p = Placeholder::parse("12subject");
        assert_eq!(p.width, Some(Width { len: 12, pad: ' ' }));
    }

    #[test]
    fn parse_filters() {
        let p = Placeholder::parse("20from.name");
        assert_eq!(p.field, "from");
        assert_eq!(p.filter, Some(Filter::Name));

        let p = Placeholder::parse("to.email");
        assert_eq!(p.field, "to");
        assert_eq!(p.filter, Some(Filter::Email));

        // Only one suffix is stripped.
        let p = Placeholder::parse("x.email.name");
        assert_eq!(p.field, "x.email");
        assert_eq!(p.filter, Some(Filter::Name));
    }

    #[test]
    fn parse_overlong_width_is_ignored() {
        let p = Placeholder::parse("99999999999999999999999field");
        assert_eq!(p.field, "field");
        assert_eq!(p.width, None);
    }

    #[test]
    fn zero_width_empties_the_value() {
        let p = Placeholder::parse("0field");
        assert_eq!(p.width, Some(Width { len: 0, pad: '0' }));
        assert_eq!(p.apply("anything".to_string()), "");
    }

    #[test]
    fn name_filter() {
        assert_eq!(
            Filter::Name.apply("\"Steve\"<steve@example.com>".to_string()),
            "Steve"
        );
        assert_eq!(
            Filter::Name.apply("\"Steve Kemp\" <steve@example.com>".to_string()),
            "Steve Kemp"
        );
        assert_eq!(
            Filter::Name.apply("Steve <steve@example.com>".to_string()),
            "Steve <steve@example.com>"
        );
    }

    #[test]
    fn email_filter() {
        assert_eq!(
            Filter::Email.apply("Steve Kemp <steve@example.com>".to_string()),
            "<steve@example.com>"
        );
        assert_eq!(
            Filter::Email.apply("steve@example.com".to_string()),
            "steve@example.com"
        );
    }

    #[test]
    fn width_counts_characters() {
        let width = Width { len: 3, pad: ' ' };
        assert_eq!(width.apply("é".to_string()), "  é");
        assert_eq!(width.apply("ééééé".to_string()), "ééé");
    }
}
