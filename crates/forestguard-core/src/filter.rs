//! Case-insensitive substring filtering over entity fields.
//!
//! An entity matches when the lowercased query occurs in the lowercased
//! display form of at least one of the requested fields. The empty query
//! matches everything. Whitespace is significant; nothing is trimmed.

use crate::error::{RegistryError, RegistryResult};
use crate::types::Entity;

/// Default upper bound on query length, in characters.
pub const DEFAULT_MAX_QUERY_LEN: usize = 128;

// ─── Filtered ───────────────────────────────────────────────────────────────

/// Lazy, order-preserving iterator returned by [`filter`].
#[derive(Debug, Clone)]
pub struct Filtered<'f, I> {
    inner: I,
    needle: String,
    fields: &'f [&'f str],
}

impl<'e, 'f, E, I> Iterator for Filtered<'f, I>
where
    E: Entity + 'e,
    I: Iterator<Item = &'e E>,
{
    type Item = &'e E;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = self.needle.as_str();
        let fields = self.fields;
        self.inner
            .find(|entity| needle.is_empty() || matches(*entity, needle, fields))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Filter `entities` by `query` over the named `fields`.
///
/// The query is lowercased once per call; each entity is checked field by
/// field until one matches.
pub fn filter<'e, 'f, E, I>(entities: I, query: &str, fields: &'f [&'f str]) -> Filtered<'f, I::IntoIter>
where
    E: Entity + 'e,
    I: IntoIterator<Item = &'e E>,
{
    Filtered {
        inner: entities.into_iter(),
        needle: query.to_lowercase(),
        fields,
    }
}

/// Whether one entity matches an already-lowercased needle.
#[must_use]
pub fn matches<E: Entity>(entity: &E, lowered_needle: &str, fields: &[&str]) -> bool {
    if lowered_needle.is_empty() {
        return true;
    }
    fields.iter().any(|name| {
        entity
            .field(name)
            .is_some_and(|value| value.to_string().to_lowercase().contains(lowered_needle))
    })
}

// ─── Filter Query ───────────────────────────────────────────────────────────

/// Editable query text owned by a registry view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    text: String,
}

impl FilterQuery {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove the last character, if any.
    pub fn pop_char(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check the query against a length limit.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidQuery`] when the query is longer than `max_len`
    /// characters.
    pub fn validate(&self, max_len: usize) -> RegistryResult<()> {
        let len = self.char_len();
        if len > max_len {
            return Err(RegistryError::InvalidQuery { len, max: max_len });
        }
        Ok(())
    }
}
