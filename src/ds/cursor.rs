//! Detached, generation-checked position in an [`OrderedIndex`].
//!
//! [`OrderedIndex::iter`] ties the traversal to a shared borrow, which is
//! enough for most callers. A [`Cursor`] is for callers that need to hold a
//! position across calls without keeping the index borrowed, e.g. a policy
//! that scans a few items per tick. The cursor remembers the index
//! generation it was created at; once the index is mutated every further
//! advance fails with [`StaleCursor`] instead of walking a relinked chain or
//! a reused slot.
//!
//! ```
//! use recency_index::OrderedIndex;
//!
//! let mut index: OrderedIndex<u32> = (1..=3).collect();
//! let mut cursor = index.cursor();
//! assert_eq!(cursor.advance(&index), Ok(Some(&1)));
//!
//! index.mark_accessed(&3);
//! assert!(cursor.advance(&index).is_err());
//! ```

use tracing::debug;

use crate::ds::ordered_index::OrderedIndex;
use crate::ds::slot_arena::SlotId;
use crate::error::StaleCursor;

/// Position in an [`OrderedIndex`], valid until the next mutation.
///
/// Bound to the index that created it; any other index reports the cursor
/// as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    next: Option<SlotId>,
    generation: u64,
    index_id: u64,
}

impl Cursor {
    pub(crate) fn new(next: Option<SlotId>, generation: u64, index_id: u64) -> Self {
        Self {
            next,
            generation,
            index_id,
        }
    }

    /// Generation of the index when this cursor was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if `index` created this cursor and has not been
    /// mutated since.
    pub fn is_valid_for<T>(&self, index: &OrderedIndex<T>) -> bool {
        self.index_id == index.id() && self.generation == index.generation()
    }

    /// Returns `true` once every item has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Yields the next item head-to-tail, `Ok(None)` at the end.
    ///
    /// Fails with [`StaleCursor`] if `index` was mutated after the cursor was
    /// created, or if `index` is not the index that created it.
    pub fn advance<'a, T>(
        &mut self,
        index: &'a OrderedIndex<T>,
    ) -> Result<Option<&'a T>, StaleCursor> {
        if !self.is_valid_for(index) {
            let foreign_index = self.index_id != index.id();
            debug!(
                cursor_generation = self.generation,
                index_generation = index.generation(),
                foreign_index,
                "stale cursor advanced"
            );
            return Err(StaleCursor {
                cursor_generation: self.generation,
                index_generation: index.generation(),
                foreign_index,
            });
        }

        let Some(id) = self.next else {
            return Ok(None);
        };
        match index.slot(id) {
            Some((item, next)) => {
                self.next = next;
                Ok(Some(item))
            },
            None => {
                self.next = None;
                Ok(None)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Clone>(cursor: &mut Cursor, index: &OrderedIndex<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(item) = cursor.advance(index).unwrap() {
            out.push(item.clone());
        }
        out
    }

    #[test]
    fn cursor_walks_head_to_tail() {
        let index: OrderedIndex<u32> = (1..=4).collect();
        let mut cursor = index.cursor();
        assert_eq!(drain(&mut cursor, &index), vec![1, 2, 3, 4]);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(&index), Ok(None));
    }

    #[test]
    fn cursor_on_empty_index_is_exhausted() {
        let index: OrderedIndex<u32> = OrderedIndex::new();
        let mut cursor = index.cursor();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(&index), Ok(None));
    }

    #[test]
    fn copies_restart_from_the_same_position() {
        let index: OrderedIndex<&str> = ["a", "b", "c"].into_iter().collect();
        let mut cursor = index.cursor();
        cursor.advance(&index).unwrap();
        let saved = cursor;
        assert_eq!(drain(&mut cursor, &index), vec!["b", "c"]);
        let mut replay = saved;
        assert_eq!(drain(&mut replay, &index), vec!["b", "c"]);
    }

    #[test]
    fn mutation_invalidates_cursor() {
        let mut index: OrderedIndex<u32> = (1..=3).collect();
        let mut cursor = index.cursor();
        assert_eq!(cursor.advance(&index), Ok(Some(&1)));

        index.remove(&2);
        assert!(!cursor.is_valid_for(&index));
        let err = cursor.advance(&index).unwrap_err();
        assert_eq!(err.cursor_generation, cursor.generation());
        assert_eq!(err.index_generation, index.generation());
        assert!(!err.foreign_index);
    }

    #[test]
    fn cursor_from_another_index_is_rejected() {
        let source: OrderedIndex<u32> = (1..=8).collect();
        let mut cursor = source.cursor();
        for _ in 0..4 {
            cursor.advance(&source).unwrap();
        }

        let other: OrderedIndex<u32> = (10..=17).collect();
        assert_eq!(other.generation(), source.generation());
        assert!(!cursor.is_valid_for(&other));
        let err = cursor.advance(&other).unwrap_err();
        assert!(err.foreign_index);
        assert_eq!(err.cursor_generation, err.index_generation);
        assert!(cursor.is_valid_for(&source));
    }

    #[test]
    fn slot_reuse_after_clear_is_caught() {
        let mut index: OrderedIndex<u32> = (1..=3).collect();
        let mut cursor = index.cursor();
        index.clear();
        index.push_tail(9).unwrap();
        assert!(cursor.advance(&index).is_err());
    }

    #[test]
    fn no_op_calls_keep_cursor_valid() {
        let mut index: OrderedIndex<u32> = (1..=3).collect();
        let mut cursor = index.cursor();
        assert!(!index.remove(&42));
        assert!(index.mark_accessed(&1));
        assert!(index.push_tail(3).is_err());
        assert_eq!(drain(&mut cursor, &index), vec![1, 2, 3]);
    }
}
