use crate::metrics::traits::OrderedIndexMetricsRecorder;

#[derive(Debug, Default, Clone)]
pub struct OrderedIndexMetrics {
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
}

impl OrderedIndexMetricsRecorder for OrderedIndexMetrics {
    fn record_push_head_call(&mut self) {
        self.push_head_calls += 1;
    }

    fn record_push_head_new(&mut self) {
        self.push_head_new += 1;
    }

    fn record_push_head_moved(&mut self) {
        self.push_head_moved += 1;
    }

    fn record_push_tail_call(&mut self) {
        self.push_tail_calls += 1;
    }

    fn record_push_tail_new(&mut self) {
        self.push_tail_new += 1;
    }

    fn record_push_tail_moved(&mut self) {
        self.push_tail_moved += 1;
    }

    fn record_push_tail_rejected(&mut self) {
        self.push_tail_rejected += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_mark_accessed_call(&mut self) {
        self.mark_accessed_calls += 1;
    }

    fn record_mark_accessed_found(&mut self) {
        self.mark_accessed_found += 1;
    }

    fn record_evict_head_call(&mut self) {
        self.evict_head_calls += 1;
    }

    fn record_evict_head_found(&mut self) {
        self.evict_head_found += 1;
    }

    fn record_evict_tail_call(&mut self) {
        self.evict_tail_calls += 1;
    }

    fn record_evict_tail_found(&mut self) {
        self.evict_tail_found += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}
