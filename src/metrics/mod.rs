//! Operation counters for [`OrderedIndex`](crate::OrderedIndex).
//!
//! Enabled by the `metrics` cargo feature. Recording and snapshotting are
//! split the same way as for cache policies: the index drives a recorder,
//! callers read a `Copy` snapshot.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
