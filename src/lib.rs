//! recency-index: an access-ordered index of unique items.
//!
//! [`OrderedIndex`] keeps a sequence of unique keys with O(1) membership,
//! insertion at either end, removal, promotion to the head, and eviction
//! from either end. It is the ordering core an eviction policy builds on:
//! the policy decides when to evict and how large the index may grow, the
//! index decides which item sits at which end.
//!
//! ```
//! use recency_index::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! index.push_tail("a").unwrap();
//! index.push_tail("b").unwrap();
//! index.push_tail("c").unwrap();
//!
//! index.mark_accessed(&"b");
//! assert_eq!(index.snapshot(), vec!["b", "a", "c"]);
//!
//! // LRU victim at the tail, MRU victim at the head
//! assert_eq!(index.evict_tail(), Some("c"));
//! assert_eq!(index.evict_head(), Some("b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use builder::{DuplicatePolicy, OrderedIndexBuilder};
pub use ds::{Cursor, Iter, OrderedIndex};
pub use error::{ConfigError, DuplicateItem, InvariantError, StaleCursor};
