//! Access-ordered index of unique items.
//!
//! Pairs an [`IntrusiveList`] with a membership map so that every item can be
//! found, unlinked, or promoted in O(1). The index orders keys only; the
//! caller keeps whatever payload belongs to each key.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<T, SlotId>         list: IntrusiveList<T>
//!   ┌─────────┬─────────┐
//!   │  item A │  id_1   │──┐           head                           tail
//!   │  item B │  id_2   │──┼──────►    [A] ◄──► [B] ◄──► [C]
//!   │  item C │  id_3   │──┘         promoted              appended
//!   └─────────┴─────────┘
//! ```
//!
//! ## Ends
//!
//! The head is the *most recently promoted* end: `push_head` and
//! `mark_accessed` put items there. The tail is the *append* end used by
//! `push_tail`. Eviction is offered at both ends and named by position:
//!
//! - [`evict_head`](OrderedIndex::evict_head): removes the most recently
//!   promoted item (an MRU victim).
//! - [`evict_tail`](OrderedIndex::evict_tail): removes the least recently
//!   promoted item (an LRU victim).
//!
//! ## Operations
//!
//! | Operation       | Time  | Notes                                        |
//! |-----------------|-------|----------------------------------------------|
//! | `push_head`     | O(1)  | Moves an existing member instead of copying  |
//! | `push_tail`     | O(1)  | Duplicates handled per [`DuplicatePolicy`]   |
//! | `remove`        | O(1)  | `false` if absent                            |
//! | `mark_accessed` | O(1)  | Promote to head, `false` if absent           |
//! | `evict_head`    | O(1)  |                                              |
//! | `evict_tail`    | O(1)  |                                              |
//! | `contains`      | O(1)  | Map lookup only                              |
//! | `iter`          | O(n)  | Head to tail, borrows the index              |
//! | `cursor`        | O(1)  | Detached, generation-checked                 |
//!
//! ## Example Usage
//!
//! ```
//! use recency_index::OrderedIndex;
//!
//! let mut index = OrderedIndex::new();
//! index.push_tail(1).unwrap();
//! index.push_tail(2).unwrap();
//! index.push_tail(3).unwrap();
//!
//! assert!(index.mark_accessed(&2));
//! assert_eq!(index.iter().copied().collect::<Vec<_>>(), vec![2, 1, 3]);
//!
//! assert_eq!(index.evict_head(), Some(2));
//! assert_eq!(index.evict_tail(), Some(3));
//! assert_eq!(index.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. A policy that shares an index between threads wraps the
//! whole index in its own lock.

use std::collections::TryReserveError;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::{DuplicatePolicy, OrderedIndexBuilder};
use crate::ds::cursor::Cursor;
use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::{DuplicateItem, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::OrderedIndexMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::OrderedIndexMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsSnapshotProvider, OrderedIndexMetricsRecorder};

static NEXT_INDEX_ID: AtomicU64 = AtomicU64::new(0);

/// Sequence of unique items with O(1) membership, promotion and eviction.
///
/// See the [module documentation](self) for which end is which.
pub struct OrderedIndex<T> {
    list: IntrusiveList<T>,
    index: FxHashMap<T, SlotId>,
    duplicate_policy: DuplicatePolicy,
    generation: u64,
    id: u64,
    #[cfg(feature = "metrics")]
    metrics: OrderedIndexMetrics,
}

impl<T> OrderedIndex<T> {
    /// Creates an empty index that rejects duplicate `push_tail` calls.
    pub fn new() -> Self {
        Self::from_config(0, DuplicatePolicy::default())
    }

    /// Creates an empty index with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(capacity, DuplicatePolicy::default())
    }

    /// Returns a builder for non-default configuration.
    pub fn builder() -> OrderedIndexBuilder<T> {
        OrderedIndexBuilder::new()
    }

    pub(crate) fn from_config(capacity: usize, duplicate_policy: DuplicatePolicy) -> Self {
        let (list, index) = if capacity == 0 {
            (IntrusiveList::new(), FxHashMap::default())
        } else {
            (
                IntrusiveList::with_capacity(capacity),
                FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            )
        };
        Self {
            list,
            index,
            duplicate_policy,
            generation: 0,
            id: NEXT_INDEX_ID.fetch_add(1, Ordering::Relaxed),
            #[cfg(feature = "metrics")]
            metrics: OrderedIndexMetrics::default(),
        }
    }

    /// Fallible counterpart of [`from_config`](Self::from_config): both
    /// reservations report failure instead of aborting.
    pub(crate) fn try_from_config(
        capacity: usize,
        duplicate_policy: DuplicatePolicy,
    ) -> Result<Self, TryReserveError>
    where
        T: Eq + Hash,
    {
        let list = IntrusiveList::try_with_capacity(capacity)?;
        let mut index = FxHashMap::default();
        index.try_reserve(capacity)?;
        Ok(Self {
            list,
            index,
            duplicate_policy,
            generation: 0,
            id: NEXT_INDEX_ID.fetch_add(1, Ordering::Relaxed),
            #[cfg(feature = "metrics")]
            metrics: OrderedIndexMetrics::default(),
        })
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of items the index can hold before its node storage reallocates.
    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// How `push_tail` treats an item that is already a member.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Counter bumped by every mutation that changes membership or order.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the head (most recently promoted) item without removing it.
    pub fn peek_head(&self) -> Option<&T> {
        self.list.front()
    }

    /// Returns the tail (append end) item without removing it.
    pub fn peek_tail(&self) -> Option<&T> {
        self.list.back()
    }

    /// Iterates items from head to tail.
    ///
    /// The iterator borrows the index, so the index cannot be mutated until
    /// the iterator is dropped. Call `iter` again for a fresh pass.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Returns a detached cursor positioned at the head.
    ///
    /// Unlike [`iter`](Self::iter) the cursor does not hold a borrow; it is
    /// checked against [`generation`](Self::generation) on every advance and
    /// reports [`StaleCursor`](crate::error::StaleCursor) once the index has
    /// been mutated.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.list.front_id(), self.generation, self.id)
    }

    /// Identity token distinguishing this index from every other one.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Returns the item at `id` and the id tail-ward of it.
    pub(crate) fn slot(&self, id: SlotId) -> Option<(&T, Option<SlotId>)> {
        let item = self.list.get(id)?;
        Some((item, self.list.next_id(id)))
    }

    /// Approximate memory footprint in bytes (node arena plus membership map).
    pub fn approx_bytes(&self) -> usize {
        mem::size_of::<Self>() - mem::size_of::<IntrusiveList<T>>()
            + self.list.approx_bytes()
            + self.index.capacity() * (mem::size_of::<T>() + mem::size_of::<SlotId>())
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        trace!(len = self.len(), "clearing ordered index");
        self.list.clear();
        self.index.clear();
        self.bump_generation();
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T> OrderedIndex<T>
where
    T: Eq + Hash + Clone,
{
    /// Returns `true` if `item` is a member.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Inserts `item` at the head.
    ///
    /// An item that is already a member is moved to the head rather than
    /// inserted twice. Returns `true` if the item was newly inserted.
    pub fn push_head(&mut self, item: T) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_push_head_call();

        if let Some(&id) = self.index.get(&item) {
            #[cfg(feature = "metrics")]
            self.metrics.record_push_head_moved();

            self.promote(id);
            return false;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_push_head_new();

        let id = self.list.push_front(item.clone());
        self.index.insert(item, id);
        self.bump_generation();
        true
    }

    /// Inserts `item` at the tail.
    ///
    /// If `item` is already a member the outcome depends on the
    /// [`DuplicatePolicy`]: `Reject` returns the item in a [`DuplicateItem`]
    /// error and leaves the index untouched, `MoveToTail` relinks the existing
    /// node at the tail.
    ///
    /// # Example
    ///
    /// ```
    /// use recency_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.push_tail("a").unwrap();
    /// index.push_tail("b").unwrap();
    /// assert!(index.push_tail("a").is_err());
    /// assert_eq!(index.peek_tail(), Some(&"b"));
    /// ```
    pub fn push_tail(&mut self, item: T) -> Result<(), DuplicateItem<T>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_push_tail_call();

        if let Some(&id) = self.index.get(&item) {
            return match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_push_tail_rejected();

                    debug!(len = self.len(), "push_tail rejected duplicate item");
                    Err(DuplicateItem(item))
                },
                DuplicatePolicy::MoveToTail => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_push_tail_moved();

                    self.demote(id);
                    Ok(())
                },
            };
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_push_tail_new();

        self.append(item);
        Ok(())
    }

    /// Removes `item`; returns `false` if it was not a member.
    pub fn remove(&mut self, item: &T) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let Some(id) = self.index.remove(item) else {
            return false;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        let removed = self.list.remove(id);
        debug_assert!(removed.is_some(), "membership entry pointed at a freed slot");
        self.bump_generation();
        true
    }

    /// Promotes `item` to the head; returns `false` if it was not a member.
    ///
    /// Leaves the same order as `remove` followed by `push_head`, but relinks
    /// the existing node instead of reallocating it. Promoting twice in a row
    /// is the same as promoting once.
    pub fn mark_accessed(&mut self, item: &T) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_mark_accessed_call();

        let Some(&id) = self.index.get(item) else {
            return false;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_mark_accessed_found();

        self.promote(id);
        true
    }

    /// Removes and returns the head (most recently promoted) item.
    pub fn evict_head(&mut self) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_head_call();

        let item = self.list.pop_front()?;
        self.forget(&item);

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_head_found();

        trace!(len = self.len(), "evicted head");
        Some(item)
    }

    /// Removes and returns the tail (least recently promoted) item.
    pub fn evict_tail(&mut self) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_tail_call();

        let item = self.list.pop_back()?;
        self.forget(&item);

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_tail_found();

        trace!(len = self.len(), "evicted tail");
        Some(item)
    }

    /// Clones the current order, head to tail, into a `Vec`.
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Verifies that the chain and the membership map agree.
    ///
    /// Walks the chain (head has no `prev`, tail has no `next`, links are
    /// symmetric, no cycles, every live node reached) and then checks that
    /// each map entry points at a live node holding an equal item. Together
    /// with equal sizes this makes the map and the chain a bijection.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "membership holds {} entries, chain holds {}",
                self.index.len(),
                self.list.len()
            )));
        }

        for (item, &id) in &self.index {
            match self.list.get(id) {
                Some(value) if value == item => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "membership entry points at {id:?}, which holds a different item"
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "membership entry points at freed slot {id:?}"
                    )));
                },
            }
        }
        Ok(())
    }

    /// Panics if [`check_invariants`](Self::check_invariants) fails.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ordered index invariant violated: {err}");
        }
    }

    fn append(&mut self, item: T) {
        let id = self.list.push_back(item.clone());
        self.index.insert(item, id);
        self.bump_generation();
    }

    fn promote(&mut self, id: SlotId) {
        if self.list.front_id() != Some(id) {
            self.list.move_to_front(id);
            self.bump_generation();
        }
    }

    fn demote(&mut self, id: SlotId) {
        if self.list.back_id() != Some(id) {
            self.list.move_to_back(id);
            self.bump_generation();
        }
    }

    fn forget(&mut self, item: &T) {
        let removed = self.index.remove(item);
        debug_assert!(removed.is_some(), "evicted item missing from membership");
        self.bump_generation();
    }

    /// Appends `item`, relinking an existing member at the tail.
    fn append_or_demote(&mut self, item: T) {
        match self.index.get(&item) {
            Some(&id) => self.demote(id),
            None => self.append(item),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> OrderedIndex<T> {
    /// Copies the operation counters together with the current size.
    pub fn metrics_snapshot(&self) -> OrderedIndexMetricsSnapshot {
        OrderedIndexMetricsSnapshot {
            push_head_calls: self.metrics.push_head_calls,
            push_head_new: self.metrics.push_head_new,
            push_head_moved: self.metrics.push_head_moved,
            push_tail_calls: self.metrics.push_tail_calls,
            push_tail_new: self.metrics.push_tail_new,
            push_tail_moved: self.metrics.push_tail_moved,
            push_tail_rejected: self.metrics.push_tail_rejected,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            mark_accessed_calls: self.metrics.mark_accessed_calls,
            mark_accessed_found: self.metrics.mark_accessed_found,
            evict_head_calls: self.metrics.evict_head_calls,
            evict_head_found: self.metrics.evict_head_found,
            evict_tail_calls: self.metrics.evict_tail_calls,
            evict_tail_found: self.metrics.evict_tail_found,
            clear_calls: self.metrics.clear_calls,
            len: self.len(),
            capacity: self.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<OrderedIndexMetricsSnapshot> for OrderedIndex<T> {
    fn snapshot(&self) -> OrderedIndexMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("items", &DebugItems(self))
            .field("duplicate_policy", &self.duplicate_policy)
            .field("generation", &self.generation)
            .finish()
    }
}

struct DebugItems<'a, T>(&'a OrderedIndex<T>);

impl<T: fmt::Debug> fmt::Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T> Default for OrderedIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends at the tail; an item already present is moved to the tail.
///
/// Duplicates are always relinked here, whatever the [`DuplicatePolicy`],
/// because `extend` has no way to report a rejection.
impl<T> Extend<T> for OrderedIndex<T>
where
    T: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append_or_demote(item);
        }
    }
}

/// Collects into an index ordered by each item's last occurrence.
impl<T> FromIterator<T> for OrderedIndex<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut index = Self::with_capacity(iter.size_hint().0);
        index.extend(iter);
        index
    }
}

impl<'a, T> IntoIterator for &'a OrderedIndex<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator returned by [`OrderedIndex::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: IntrusiveListIter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}


#[cfg(test)]
mod property_tests {
    use std::collections::VecDeque;

    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        PushHead(u8),
        PushTail(u8),
        Remove(u8),
        MarkAccessed(u8),
        EvictHead,
        EvictTail,
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // small key space so duplicates and hits are common
        let key = 0u8..16;
        prop_oneof![
            4 => key.clone().prop_map(Op::PushHead),
            4 => key.clone().prop_map(Op::PushTail),
            3 => key.clone().prop_map(Op::Remove),
            3 => key.prop_map(Op::MarkAccessed),
            2 => Just(Op::EvictHead),
            2 => Just(Op::EvictTail),
            1 => Just(Op::Clear),
        ]
    }

    /// Reference model: a deque searched linearly.
    #[derive(Default)]
    struct Model {
        items: VecDeque<u8>,
    }

    impl Model {
        fn position(&self, key: u8) -> Option<usize> {
            self.items.iter().position(|&k| k == key)
        }

        fn take(&mut self, key: u8) -> bool {
            match self.position(key) {
                Some(pos) => {
                    self.items.remove(pos);
                    true
                },
                None => false,
            }
        }
    }

    fn apply(index: &mut OrderedIndex<u8>, model: &mut Model, op: &Op) {
        match *op {
            Op::PushHead(k) => {
                let was_new = !model.take(k);
                model.items.push_front(k);
                assert_eq!(index.push_head(k), was_new);
            },
            Op::PushTail(k) => {
                let present = model.position(k).is_some();
                if !present {
                    model.items.push_back(k);
                }
                assert_eq!(index.push_tail(k).is_err(), present);
            },
            Op::Remove(k) => {
                assert_eq!(index.remove(&k), model.take(k));
            },
            Op::MarkAccessed(k) => {
                let found = model.take(k);
                if found {
                    model.items.push_front(k);
                }
                assert_eq!(index.mark_accessed(&k), found);
            },
            Op::EvictHead => assert_eq!(index.evict_head(), model.items.pop_front()),
            Op::EvictTail => assert_eq!(index.evict_tail(), model.items.pop_back()),
            Op::Clear => {
                model.items.clear();
                index.clear();
            },
        }
    }

    proptest! {
        /// Property: order, length and membership match the deque model
        /// after every operation, and the structural invariants hold.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut index = OrderedIndex::new();
            let mut model = Model::default();

            for op in &ops {
                apply(&mut index, &mut model, op);

                prop_assert!(index.check_invariants().is_ok());
                prop_assert_eq!(index.len(), model.items.len());
                let expected: Vec<u8> = model.items.iter().copied().collect();
                prop_assert_eq!(index.snapshot(), expected);
                for k in 0u8..16 {
                    prop_assert_eq!(index.contains(&k), model.items.contains(&k));
                }
            }
        }

        /// Property: iteration never yields the same item twice
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_iteration_has_no_duplicates(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut index = OrderedIndex::new();
            let mut model = Model::default();
            for op in &ops {
                apply(&mut index, &mut model, op);
            }

            let mut seen = std::collections::HashSet::new();
            for item in index.iter() {
                prop_assert!(seen.insert(*item));
            }
            prop_assert_eq!(seen.len(), index.len());
        }

        /// Property: promoting twice leaves the same order as promoting once
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_mark_accessed_idempotent(
            keys in prop::collection::vec(0u8..32, 1..64),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut index: OrderedIndex<u8> = keys.iter().copied().collect();
            let target = keys[pick.index(keys.len())];

            prop_assert!(index.mark_accessed(&target));
            let once = index.snapshot();
            prop_assert!(index.mark_accessed(&target));
            prop_assert_eq!(index.snapshot(), once);
            prop_assert_eq!(index.peek_head(), Some(&target));
        }

        /// Property: evicting from the head drains in push_tail order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_evict_head_is_fifo_without_promotion(
            keys in prop::collection::hash_set(any::<u32>(), 0..64)
        ) {
            let keys: Vec<u32> = keys.into_iter().collect();
            let mut index = OrderedIndex::new();
            for &k in &keys {
                index.push_tail(k).unwrap();
            }
            let drained: Vec<u32> = std::iter::from_fn(|| index.evict_head()).collect();
            prop_assert_eq!(drained, keys);
            prop_assert!(index.is_empty());
        }
    }
}
