//! Error types for the recency-index library.
//!
//! ## Key Components
//!
//! - [`DuplicateItem`]: Returned by [`OrderedIndex::push_tail`] when the item
//!   is already a member and the index rejects duplicates. Hands the item back.
//! - [`StaleCursor`]: Returned when a [`Cursor`] is advanced after the index
//!   it was created from has been mutated.
//! - [`InvariantError`]: Returned when the chain or membership map is
//!   inconsistent (`check_invariants` methods). Only an implementation bug
//!   produces one.
//! - [`ConfigError`]: Returned when builder parameters are invalid.
//!
//! Absence (removing or promoting an item that is not a member) is not an
//! error; those operations return `bool` or `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use recency_index::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! index.push_tail("a").unwrap();
//!
//! let err = index.push_tail("a").unwrap_err();
//! assert_eq!(err.into_inner(), "a");
//! assert_eq!(index.len(), 1);
//! ```
//!
//! [`OrderedIndex::push_tail`]: crate::OrderedIndex::push_tail
//! [`Cursor`]: crate::Cursor

use std::fmt;

// ---------------------------------------------------------------------------
// DuplicateItem
// ---------------------------------------------------------------------------

/// Error returned when inserting an item that is already a member.
///
/// Carries the rejected item so the caller keeps ownership of it. The index
/// is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateItem<T>(pub T);

impl<T> DuplicateItem<T> {
    /// Returns the rejected item.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Borrows the rejected item.
    #[inline]
    pub fn item(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Display for DuplicateItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("item already present in ordered index")
    }
}

impl<T: fmt::Debug> std::error::Error for DuplicateItem<T> {}

// ---------------------------------------------------------------------------
// StaleCursor
// ---------------------------------------------------------------------------

/// Error returned when a cursor outlives the index state it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleCursor {
    /// Generation the cursor was created under.
    pub cursor_generation: u64,
    /// Generation of the index at the time of the failed advance.
    pub index_generation: u64,
    /// `true` if the cursor was advanced against an index other than the
    /// one that created it.
    pub foreign_index: bool,
}

impl fmt::Display for StaleCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.foreign_index {
            return f.write_str("cursor used with a different ordered index");
        }
        write!(
            f,
            "cursor created at generation {} used at generation {}",
            self.cursor_generation, self.index_generation
        )
    }
}

impl std::error::Error for StaleCursor {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal index invariants are violated.
///
/// Produced by [`OrderedIndex::check_invariants`](crate::OrderedIndex::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when index configuration parameters are invalid.
///
/// Produced by [`OrderedIndexBuilder::try_build`](crate::builder::OrderedIndexBuilder::try_build).
///
/// # Example
///
/// ```
/// use recency_index::builder::OrderedIndexBuilder;
///
/// let err = OrderedIndexBuilder::<u64>::new()
///     .capacity(usize::MAX)
///     .try_build()
///     .unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error<T: std::error::Error>() {}

    // -- DuplicateItem ----------------------------------------------------

    #[test]
    fn duplicate_returns_item() {
        let err = DuplicateItem(String::from("k"));
        assert_eq!(err.item(), "k");
        assert_eq!(err.into_inner(), "k");
    }

    #[test]
    fn duplicate_display_is_item_agnostic() {
        let err = DuplicateItem(42u32);
        assert_eq!(err.to_string(), "item already present in ordered index");
    }

    #[test]
    fn duplicate_implements_std_error() {
        assert_error::<DuplicateItem<u64>>();
    }

    // -- StaleCursor ------------------------------------------------------

    #[test]
    fn stale_display_shows_generations() {
        let err = StaleCursor {
            cursor_generation: 3,
            index_generation: 5,
            foreign_index: false,
        };
        assert_eq!(
            err.to_string(),
            "cursor created at generation 3 used at generation 5"
        );
        assert_error::<StaleCursor>();
    }

    #[test]
    fn stale_display_names_foreign_index() {
        let err = StaleCursor {
            cursor_generation: 2,
            index_generation: 2,
            foreign_index: true,
        };
        assert_eq!(err.to_string(), "cursor used with a different ordered index");
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("membership length mismatch");
        assert_eq!(err.to_string(), "membership length mismatch");
        assert_eq!(err.message(), "membership length mismatch");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity hint too large");
        assert_eq!(err.to_string(), "capacity hint too large");
        assert_eq!(err.message(), "capacity hint too large");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad hint");
        assert!(format!("{err:?}").contains("bad hint"));
        assert_error::<ConfigError>();
    }
}
