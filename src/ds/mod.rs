//! Data structures behind the ordered index.
//!
//! `slot_arena` and `intrusive_list` are storage internals; only
//! [`OrderedIndex`] and its iteration types are public.

pub mod cursor;
pub(crate) mod intrusive_list;
pub mod ordered_index;
pub(crate) mod slot_arena;

pub use cursor::Cursor;
pub use ordered_index::{Iter, OrderedIndex};
