//! Windowed concurrent execution of fetch operations.
//!
//! This module is the concurrency core of the crate: it takes N
//! independent fetch operations and runs them with a hard bound of K
//! in-flight at a time, by partitioning the index range into consecutive
//! windows of size K. Each window is dispatched all at once as spawned
//! tasks, then joined in full before the next window starts — a barrier,
//! not a sliding limit. Results land in dispatch order, never completion
//! order.

use crate::types::{FailureReason, FetchOutcome};
use futures::future::join_all;
use std::future::Future;

/// Run `total` fetch operations with at most `window_size` in flight.
///
/// `task_for(i)` must produce the future for the i-th operation; it is
/// called exactly once per index, in index order, and only after every
/// operation of the preceding window has completed. The returned vector
/// has length `total`, with the outcome at index `i` belonging to
/// operation `i` regardless of how completions interleaved inside a
/// window.
///
/// Each operation runs as its own spawned task; a task that fails to
/// complete (panicked or cancelled) contributes
/// `FailureReason::Interrupted` at its slot and does not disturb its
/// siblings or later windows.
///
/// Callers must validate `window_size >= 1` first.
pub(crate) async fn run_windowed<F, Fut>(
    total: usize,
    window_size: usize,
    mut task_for: F,
) -> Vec<FetchOutcome>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = FetchOutcome> + Send + 'static,
{
    debug_assert!(window_size >= 1, "window_size must be validated upstream");

    let mut results = Vec::with_capacity(total);
    let mut start = 0;

    while start < total {
        let end = usize::min(start + window_size, total);
        tracing::trace!(start, end, total, "dispatching window");

        // Launch the whole window before awaiting anything.
        let handles: Vec<tokio::task::JoinHandle<FetchOutcome>> =
            (start..end).map(|i| tokio::spawn(task_for(i))).collect();

        // Full join barrier. `join_all` yields in handle order, which is
        // dispatch order, whatever order completions arrived in.
        for (offset, joined) in join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    tracing::warn!(index = start + offset, error = %e, "fetch task did not complete");
                    results.push(FetchOutcome::Failed(FailureReason::Interrupted));
                }
            }
        }

        start = end;
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn content(i: usize) -> FetchOutcome {
        FetchOutcome::Content(format!("item-{}", i))
    }

    #[tokio::test]
    async fn test_empty_input_runs_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let results = run_windowed(0, 3, move |i| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            async move { content(i) }
        })
        .await;

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_in_dispatch_order_despite_reverse_completion() {
        // Earlier items in each window sleep longer, so completion order
        // inside a window is reversed from dispatch order.
        let results = run_windowed(6, 3, |i| async move {
            let delay = 30 - 10 * (i % 3) as u64;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            content(i)
        })
        .await;

        let expected: Vec<FetchOutcome> = (0..6).map(content).collect();
        assert_eq!(results, expected);
    }

    #[tokio::test]
    async fn test_peak_concurrency_never_exceeds_window_size() {
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let results = run_windowed(10, 3, |i| {
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                content(i)
            }
        })
        .await;

        assert_eq!(results.len(), 10);
        assert!(max_seen.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_window_barrier_holds() {
        // Before operation i starts, every operation of all preceding
        // windows must have completed.
        let completed = Arc::new(AtomicUsize::new(0));
        let violated = Arc::new(AtomicBool::new(false));
        let window = 4;

        run_windowed(11, window, |i| {
            let completed = Arc::clone(&completed);
            let violated = Arc::clone(&violated);
            async move {
                let preceding = (i / window) * window;
                if completed.load(Ordering::SeqCst) < preceding {
                    violated.store(true, Ordering::SeqCst);
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
                completed.fetch_add(1, Ordering::SeqCst);
                content(i)
            }
        })
        .await;

        assert!(!violated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_single_window_when_limit_covers_batch() {
        // K >= N: everything runs in one window.
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        run_windowed(4, 100, |i| {
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                content(i)
            }
        })
        .await;

        // All four overlap when given enough headroom.
        assert_eq!(max_seen.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_panicked_task_becomes_interrupted_outcome() {
        let results = run_windowed(3, 2, |i| async move {
            if i == 1 {
                panic!("worker blew up");
            }
            content(i)
        })
        .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], content(0));
        assert_eq!(
            results[1],
            FetchOutcome::Failed(FailureReason::Interrupted)
        );
        assert_eq!(results[2], content(2));
    }
}
