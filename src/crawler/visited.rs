//! Shared visited set
//!
//! The only shared mutable state of a crawl run. Every membership test and
//! insertion happens under one mutex, so check-then-insert is a single critical
//! section across all concurrent crawl units.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Set of every normalized URL ever scheduled during a run
///
/// Grows monotonically; there is no removal operation.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panicking unit cannot leave the set half-updated, so a poisoned
        // lock still guards a consistent set.
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if the URL has already been recorded
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Records the URL if it is not present yet
    ///
    /// # Returns
    ///
    /// `true` if this call performed the insertion, `false` if the URL was
    /// already recorded (by this or any other crawl unit).
    pub fn insert_if_absent(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns the number of distinct URLs recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether no URL has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a sorted copy of the recorded URLs
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_set_is_empty() {
        let visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert_eq!(visited.len(), 0);
        assert!(!visited.contains("http://example.com/"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let visited = VisitedSet::new();
        assert!(visited.insert_if_absent("http://example.com/a"));
        assert!(!visited.insert_if_absent("http://example.com/a"));
        assert_eq!(visited.len(), 1);
        assert!(visited.contains("http://example.com/a"));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let visited = VisitedSet::new();
        visited.insert_if_absent("http://example.com/b");
        visited.insert_if_absent("http://example.com/a");
        assert_eq!(
            visited.snapshot(),
            vec![
                "http://example.com/a".to_string(),
                "http://example.com/b".to_string()
            ]
        );
    }

    #[test]
    fn test_concurrent_inserts_count_distinct_urls() {
        let visited = Arc::new(VisitedSet::new());
        let threads = 8;
        let distinct = 50;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let visited = Arc::clone(&visited);
                std::thread::spawn(move || {
                    (0..distinct)
                        .filter(|i| visited.insert_if_absent(&format!("http://example.com/{}", i)))
                        .count()
                })
            })
            .collect();

        let inserted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        // Every URL was offered by every thread, but only one insert won.
        assert_eq!(inserted, distinct);
        assert_eq!(visited.len(), distinct);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_from_tasks() {
        let visited = Arc::new(VisitedSet::new());
        let mut tasks = tokio::task::JoinSet::new();

        for task in 0..16 {
            let visited = Arc::clone(&visited);
            tasks.spawn(async move {
                let mut won = 0;
                for i in 0..20 {
                    // Half the URLs are shared by every task, half are unique.
                    let url = if i % 2 == 0 {
                        format!("http://example.com/shared/{}", i)
                    } else {
                        format!("http://example.com/task/{}/{}", task, i)
                    };
                    if visited.insert_if_absent(&url) {
                        won += 1;
                    }
                    tokio::task::yield_now().await;
                }
                won
            });
        }

        let mut inserted = 0;
        while let Some(result) = tasks.join_next().await {
            inserted += result.unwrap();
        }

        let expected = 10 + 16 * 10;
        assert_eq!(inserted, expected);
        assert_eq!(visited.len(), expected);
    }
}
