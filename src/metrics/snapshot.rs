#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderedIndexMetricsSnapshot {
    pub push_head_calls: u64,
    pub push_head_new: u64,
    pub push_head_moved: u64,

    pub push_tail_calls: u64,
    pub push_tail_new: u64,
    pub push_tail_moved: u64,
    pub push_tail_rejected: u64,

    pub remove_calls: u64,
    pub remove_found: u64,

    pub mark_accessed_calls: u64,
    pub mark_accessed_found: u64,

    pub evict_head_calls: u64,
    pub evict_head_found: u64,
    pub evict_tail_calls: u64,
    pub evict_tail_found: u64,

    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}
