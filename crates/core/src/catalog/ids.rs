use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::product::ProductId;

/// Hands out ids for locally created products.
///
/// Ids are millisecond timestamps, bumped past the previous id when two
/// requests land in the same millisecond and past any id the caller reports
/// as taken.
#[derive(Debug, Default)]
pub struct LocalIdGenerator {
    last: Mutex<u64>,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, is_taken: impl Fn(ProductId) -> bool) -> ProductId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.next_from(now, is_taken)
    }

    fn next_from(&self, now: u64, is_taken: impl Fn(ProductId) -> bool) -> ProductId {
        let mut last = self.last.lock();
        let mut candidate = now.max(last.saturating_add(1));
        while is_taken(ProductId(candidate)) {
            candidate = candidate.saturating_add(1);
        }
        *last = candidate;
        ProductId(candidate)
    }
}
