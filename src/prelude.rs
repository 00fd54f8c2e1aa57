pub use crate::builder::{DuplicatePolicy, OrderedIndexBuilder};
pub use crate::ds::{Cursor, OrderedIndex};
pub use crate::error::{DuplicateItem, StaleCursor};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::OrderedIndexMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
