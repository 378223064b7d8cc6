//! Typed collection identifiers.
//!
//! Sequential documents are indexed one chunk per collection, named
//! `{mode}-{chunk}__{base}`. [`CollectionId::parse`] recognises that shape
//! for a given mode; anything else is a plain, atomic identifier.

use std::fmt;

use crate::error::SearchError;

/// Separator between the chunk number and the document base name.
const BASE_SEPARATOR: &str = "__";

/// A collection identifier interpreted against a mode tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionId {
    /// One chunk of a sequential document.
    Chunked(ChunkedCollection),
    /// Any other identifier. Never expanded.
    Plain(String),
}

impl CollectionId {
    /// Interpret `raw` as a chunked identifier for `mode`, falling back to
    /// a plain identifier when it does not match.
    pub fn parse(mode: &str, raw: &str) -> Self {
        match ChunkedCollection::parse(mode, raw) {
            Some(chunked) => Self::Chunked(chunked),
            None => Self::Plain(raw.to_owned()),
        }
    }

    /// Returns the chunked form, if any.
    pub fn as_chunked(&self) -> Option<&ChunkedCollection> {
        match self {
            Self::Chunked(chunked) => Some(chunked),
            Self::Plain(_) => None,
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunked(chunked) => fmt::Display::fmt(chunked, f),
            Self::Plain(name) => f.write_str(name),
        }
    }
}

/// A `{mode}-{chunk}__{base}` collection, with `chunk >= 1` and a non-empty base.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkedCollection {
    mode: String,
    chunk: u64,
    base: String,
}

impl ChunkedCollection {
    /// Build a chunked identifier, validating its parts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] if `chunk` is 0 or `base` is empty.
    pub fn new(
        mode: impl Into<String>,
        chunk: u64,
        base: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let base = base.into();
        if chunk == 0 {
            return Err(SearchError::InvalidRequest(
                "chunk number must be at least 1".into(),
            ));
        }
        if base.is_empty() {
            return Err(SearchError::InvalidRequest(
                "chunked collection base name must not be empty".into(),
            ));
        }
        Ok(Self {
            mode: mode.into(),
            chunk,
            base,
        })
    }

    /// Parse `raw` as `{mode}-{chunk}__{base}`.
    ///
    /// The chunk must be a base-10 number of at least 1 and the base must be
    /// non-empty. Leading zeros are accepted (`qa-03__x` is chunk 3).
    ///
    /// Chunk numbers are held as `u64`. A chunk above `u64::MAX` does not
    /// parse, so the identifier is treated as plain and never expanded, and
    /// chunk `u64::MAX` itself has no next neighbour.
    pub fn parse(mode: &str, raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(mode)?.strip_prefix('-')?;
        let (digits, base) = rest.split_once(BASE_SEPARATOR)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let chunk = digits.parse::<u64>().ok()?;
        Self::new(mode, chunk, base).ok()
    }

    /// The mode tag.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// The 1-based chunk number.
    pub fn chunk(&self) -> u64 {
        self.chunk
    }

    /// The opaque document base name.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The preceding chunk, or `None` for chunk 1.
    pub fn previous_chunk(&self) -> Option<Self> {
        let chunk = self.chunk.checked_sub(1).filter(|&n| n >= 1)?;
        Some(self.with_chunk(chunk))
    }

    /// The following chunk, or `None` if the chunk number would overflow.
    pub fn next_chunk(&self) -> Option<Self> {
        let chunk = self.chunk.checked_add(1)?;
        Some(self.with_chunk(chunk))
    }

    /// Both neighbours that exist, previous first.
    pub fn neighbors(&self) -> impl Iterator<Item = Self> {
        self.previous_chunk().into_iter().chain(self.next_chunk())
    }

    fn with_chunk(&self, chunk: u64) -> Self {
        Self {
            mode: self.mode.clone(),
            chunk,
            base: self.base.clone(),
        }
    }
}

impl fmt::Display for ChunkedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{BASE_SEPARATOR}{}", self.mode, self.chunk, self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chunked_identifier() {
        let id = CollectionId::parse("qa", "qa-3__manual");
        let chunked = id.as_chunked().expect("should be chunked");
        assert_eq!(chunked.mode(), "qa");
        assert_eq!(chunked.chunk(), 3);
        assert_eq!(chunked.base(), "manual");
    }

    #[test]
    fn format_round_trips_canonical_names() {
        let chunked = ChunkedCollection::parse("qa", "qa-12__hr_policy.pdf").expect("parse");
        assert_eq!(chunked.to_string(), "qa-12__hr_policy.pdf");
    }

    #[test]
    fn leading_zeros_are_normalised_on_format() {
        let chunked = ChunkedCollection::parse("qa", "qa-03__manual").expect("parse");
        assert_eq!(chunked.chunk(), 3);
        assert_eq!(chunked.to_string(), "qa-3__manual");
    }

    #[test]
    fn base_may_contain_separator() {
        let chunked = ChunkedCollection::parse("qa", "qa-2___x__y").expect("parse");
        assert_eq!(chunked.chunk(), 2);
        assert_eq!(chunked.base(), "_x__y");
    }

    #[test]
    fn other_mode_is_plain() {
        let id = CollectionId::parse("qa", "faq-3__manual");
        assert_eq!(id, CollectionId::Plain("faq-3__manual".into()));
    }

    #[test]
    fn malformed_chunk_is_plain() {
        for raw in [
            "qa-",
            "qa-x__manual",
            "qa-3manual",
            "qa-3__",
            "qa-__manual",
            "qa--3__manual",
            "qa-0__manual",
            "qa-99999999999999999999999__manual",
            "qa3__manual",
        ] {
            assert!(
                CollectionId::parse("qa", raw).as_chunked().is_none(),
                "{raw} should not parse as chunked"
            );
        }
    }

    #[test]
    fn plain_display_is_unchanged() {
        assert_eq!(CollectionId::parse("qa", "docsA").to_string(), "docsA");
    }

    #[test]
    fn new_rejects_zero_chunk() {
        let err = ChunkedCollection::new("qa", 0, "manual").unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn new_rejects_empty_base() {
        let err = ChunkedCollection::new("qa", 1, "").unwrap_err();
        assert!(err.to_string().contains("base name"));
    }

    #[test]
    fn first_chunk_has_no_previous() {
        let first = ChunkedCollection::new("qa", 1, "manual").expect("valid");
        assert!(first.previous_chunk().is_none());
        let neighbors: Vec<String> = first.neighbors().map(|c| c.to_string()).collect();
        assert_eq!(neighbors, vec!["qa-2__manual"]);
    }

    #[test]
    fn middle_chunk_has_both_neighbors() {
        let chunk = ChunkedCollection::new("qa", 3, "manual").expect("valid");
        let neighbors: Vec<String> = chunk.neighbors().map(|c| c.to_string()).collect();
        assert_eq!(neighbors, vec!["qa-2__manual", "qa-4__manual"]);
    }

    #[test]
    fn last_representable_chunk_has_no_next() {
        let chunk = ChunkedCollection::new("qa", u64::MAX, "manual").expect("valid");
        assert!(chunk.next_chunk().is_none());
        assert!(chunk.previous_chunk().is_some());
    }
}
