//! Builder for [`OrderedIndex`].
//!
//! Collects the per-instance configuration: how many nodes to pre-reserve and
//! how `push_tail` treats an item that is already a member.
//!
//! ## Example
//!
//! ```rust
//! use recency_index::builder::{DuplicatePolicy, OrderedIndexBuilder};
//!
//! let mut index = OrderedIndexBuilder::new()
//!     .capacity(64)
//!     .duplicate_policy(DuplicatePolicy::MoveToTail)
//!     .build();
//!
//! index.push_tail(1).unwrap();
//! index.push_tail(2).unwrap();
//! index.push_tail(1).unwrap();
//! assert_eq!(index.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::ordered_index::OrderedIndex;
use crate::error::ConfigError;

/// What `push_tail` does with an item that is already a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Leave the index unchanged and hand the item back in a
    /// [`DuplicateItem`](crate::error::DuplicateItem) error.
    #[default]
    Reject,
    /// Relink the existing node at the tail, as if the item had been removed
    /// and inserted again.
    MoveToTail,
}

/// Largest capacity hint accepted for items of type `T`.
///
/// The arena for that many nodes is the most that fits in `isize::MAX`
/// bytes; asking for more would overflow the allocation size.
pub fn max_capacity_hint<T>() -> usize {
    isize::MAX as usize / IntrusiveList::<T>::slot_size().max(1)
}

/// Configures and builds an [`OrderedIndex`].
///
/// Typed by the item so that `OrderedIndex::builder()` infers `T` from how
/// the built index is used.
pub struct OrderedIndexBuilder<T> {
    capacity: usize,
    duplicate_policy: DuplicatePolicy,
    _items: PhantomData<fn() -> T>,
}

impl<T> OrderedIndexBuilder<T> {
    /// Starts from no pre-reservation and [`DuplicatePolicy::Reject`].
    pub fn new() -> Self {
        Self {
            capacity: 0,
            duplicate_policy: DuplicatePolicy::default(),
            _items: PhantomData,
        }
    }

    /// Number of items to reserve room for up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// How `push_tail` on the built index treats an existing member.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builds the index.
    ///
    /// # Panics
    ///
    /// Panics if [`try_build`](Self::try_build) would fail. Use `try_build`
    /// for user-supplied hints.
    pub fn build(self) -> OrderedIndex<T>
    where
        T: Eq + Hash,
    {
        match self.try_build() {
            Ok(index) => index,
            Err(err) => panic!("invalid ordered index configuration: {err}"),
        }
    }

    /// Builds the index, validating the configuration.
    ///
    /// Fails if the capacity hint exceeds [`max_capacity_hint`] or if the
    /// up-front reservation cannot be allocated.
    pub fn try_build(self) -> Result<OrderedIndex<T>, ConfigError>
    where
        T: Eq + Hash,
    {
        let max = max_capacity_hint::<T>();
        if self.capacity > max {
            return Err(ConfigError::new(format!(
                "capacity hint {} exceeds maximum of {max} nodes",
                self.capacity
            )));
        }
        OrderedIndex::try_from_config(self.capacity, self.duplicate_policy).map_err(|err| {
            ConfigError::new(format!(
                "cannot reserve capacity for {} nodes: {err}",
                self.capacity
            ))
        })
    }
}

impl<T> Default for OrderedIndexBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OrderedIndexBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            capacity: self.capacity,
            duplicate_policy: self.duplicate_policy,
            _items: PhantomData,
        }
    }
}

impl<T> fmt::Debug for OrderedIndexBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndexBuilder")
            .field("capacity", &self.capacity)
            .field("duplicate_policy", &self.duplicate_policy)
            .finish()
    }
}
