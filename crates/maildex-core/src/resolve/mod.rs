//! Field resolvers: the values behind template placeholders.

mod folder;
mod message;

pub use folder::{FolderField, FolderResolver};
pub use message::{MessageField, MessageResolver};

/// Marker rendered by `unread_highlight` when nothing else is configured.
pub const DEFAULT_HIGHLIGHT_MARKER: &str = "*";

/// Maps a field name to its value.
///
/// Closures taking `&str` and returning `String` are resolvers too.
pub trait Resolver {
    /// Returns the value of `field`.
    ///
    /// Fields the resolver does not know render as
    /// [`unknown_variable`].
    fn resolve(&self, field: &str) -> String;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, field: &str) -> String {
        self(field)
    }
}

/// The value rendered for a field no resolver knows.
#[must_use]
pub fn unknown_variable(field: &str) -> String {
    format!("Unknown variable {field}")
}
