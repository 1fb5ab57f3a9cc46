use std::sync::atomic::{AtomicU64, Ordering};

/// Returns a process-unique connection id for log correlation.
pub fn conn_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Seed for a new duel: the pinned one if configured, otherwise fresh entropy.
pub fn session_seed(fixed: Option<u64>) -> u64 {
    fixed.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conn_ids_are_unique_and_increasing() {
        let a = conn_id();
        let b = conn_id();
        assert!(b > a);
    }

    #[test]
    fn pinned_seed_wins() {
        assert_eq!(session_seed(Some(77)), 77);
    }
}
