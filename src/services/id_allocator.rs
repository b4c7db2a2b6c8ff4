use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out task ids. Ids are never reused within a process, and after a
/// restart the counter resumes past the highest id still on disk.
#[derive(Debug)]
pub struct IdAllocator {
    // Highest id handed out or found on disk; 0 before the first task
    last: AtomicI64,
}

impl IdAllocator {
    pub fn after(last: i64) -> Self {
        Self { last: AtomicI64::new(last) }
    }

    pub fn seeded_from(ids: impl IntoIterator<Item = i64>) -> Self {
        Self::after(ids.into_iter().max().unwrap_or(0))
    }

    /// The next id, or `None` once `i64::MAX` has been handed out.
    pub fn next_id(&self) -> Option<i64> {
        self.last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| last.checked_add(1))
            .ok()
            .map(|previous| previous + 1)
    }

    pub fn last_issued(&self) -> i64 {
        self.last.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_without_tasks() {
        let ids = IdAllocator::seeded_from(std::iter::empty());
        assert_eq!(ids.next_id(), Some(1));
        assert_eq!(ids.next_id(), Some(2));
    }

    #[test]
    fn resumes_after_highest_existing_id() {
        let ids = IdAllocator::seeded_from([4, 11, 2]);
        assert_eq!(ids.last_issued(), 11);
        assert_eq!(ids.next_id(), Some(12));
        assert_eq!(ids.last_issued(), 12);
    }

    #[test]
    fn negative_ids_seed_like_any_other() {
        let ids = IdAllocator::seeded_from([-7, -3]);
        assert_eq!(ids.next_id(), Some(-2));
    }

    #[test]
    fn stops_at_max_instead_of_wrapping() {
        let ids = IdAllocator::seeded_from([i64::MAX - 1]);
        assert_eq!(ids.next_id(), Some(i64::MAX));
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.last_issued(), i64::MAX);
    }
}
