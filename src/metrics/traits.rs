//! Recorder trait for ordered-index operations.
//!
//! Only mutating operations are counted. Read-only calls (`contains`,
//! `peek_*`, iteration) take `&self` and are left out so that the index stays
//! free of interior mutability.

/// Counters driven by [`OrderedIndex`](crate::OrderedIndex) mutators.
pub trait OrderedIndexMetricsRecorder {
    fn record_push_head_call(&mut self);
    fn record_push_head_new(&mut self);
    fn record_push_head_moved(&mut self);

    fn record_push_tail_call(&mut self);
    fn record_push_tail_new(&mut self);
    fn record_push_tail_moved(&mut self);
    fn record_push_tail_rejected(&mut self);

    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);

    fn record_mark_accessed_call(&mut self);
    fn record_mark_accessed_found(&mut self);

    fn record_evict_head_call(&mut self);
    fn record_evict_head_found(&mut self);
    fn record_evict_tail_call(&mut self);
    fn record_evict_tail_found(&mut self);

    fn record_clear(&mut self);
}

/// Produces a point-in-time snapshot of recorded metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
