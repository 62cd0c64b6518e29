//! Independent window queries on a pool of worker threads.
//!
//! Workers receive [`WindowJob`]s through a crossbeam channel, sieve the
//! window against the shared read-only seed list, and send the result
//! back tagged with the job's position. Results are returned in
//! submission order. Windows share nothing but the seeds, so no other
//! synchronization is needed.

use crate::engine::{prepare_with_seeds, SieveEngine};
use crate::oracle::PrimeOracle;
use crate::window::{Window, WindowSieve};
use crossbeam_channel::{Receiver, Sender};
use gprime_core::{isqrt, GaussianInteger, SieveError};
use std::thread;

/// One window to sieve, tagged with its position in the batch.
#[derive(Clone, Copy, Debug)]
struct WindowJob {
    index: usize,
    window: Window,
}

fn worker_loop<T, F>(
    jobs: Receiver<WindowJob>,
    replies: Sender<(usize, T)>,
    seeds: &[GaussianInteger],
    f: &F,
) where
    F: Fn(&WindowSieve) -> T,
{
    while let Ok(job) = jobs.recv() {
        let mut sieve = WindowSieve::new(job.window);
        prepare_with_seeds(&mut sieve, seeds);
        // receiver outlives every worker inside the scope
        let _ = replies.send((job.index, f(&sieve)));
    }
}

/// Sieve every window and apply `f` to each, using up to `workers`
/// threads. Seeds are fetched once for the largest window.
pub fn map_windows<T, F>(
    windows: &[Window],
    workers: usize,
    oracle: &dyn PrimeOracle,
    f: F,
) -> Result<Vec<T>, SieveError>
where
    T: Send,
    F: Fn(&WindowSieve) -> T + Sync,
{
    if windows.is_empty() {
        return Ok(Vec::new());
    }
    let max_norm = windows.iter().map(Window::max_norm).max().unwrap_or(0);
    let seeds = oracle.primes_up_to(isqrt(max_norm))?;
    let workers = workers.clamp(1, windows.len());

    let (job_tx, job_rx) = crossbeam_channel::unbounded();
    let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
    for (index, &window) in windows.iter().enumerate() {
        // job_rx is alive, so the unbounded send cannot fail
        let _ = job_tx.send(WindowJob { index, window });
    }
    drop(job_tx);

    let mut results: Vec<Option<T>> = Vec::with_capacity(windows.len());
    results.resize_with(windows.len(), || None);
    thread::scope(|scope| {
        for _ in 0..workers {
            let jobs = job_rx.clone();
            let replies = reply_tx.clone();
            let (seeds, f) = (&seeds, &f);
            scope.spawn(move || worker_loop(jobs, replies, seeds, f));
        }
        drop(reply_tx);
        for (index, value) in reply_rx.iter() {
            results[index] = Some(value);
        }
    });
    tracing::debug!(windows = windows.len(), workers, "batch finished");
    Ok(results.into_iter().flatten().collect())
}

/// Prime count of each window.
pub fn count_windows(
    windows: &[Window],
    workers: usize,
    oracle: &dyn PrimeOracle,
) -> Result<Vec<u64>, SieveError> {
    map_windows(windows, workers, oracle, |s| s.count())
}

/// Sorted primes of each window.
pub fn primes_in_windows(
    windows: &[Window],
    workers: usize,
    oracle: &dyn PrimeOracle,
) -> Result<Vec<Vec<GaussianInteger>>, SieveError> {
    map_windows(windows, workers, oracle, |s| s.harvest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run;
    use crate::oracle::RecursiveOracle;

    fn windows() -> Vec<Window> {
        (0..12)
            .map(|k| Window::new(k * 977, k * 31, 50 + k, 40).unwrap())
            .collect()
    }

    #[test]
    fn results_in_submission_order() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let ws = windows();
        let counts = count_windows(&ws, 4, &oracle).unwrap();
        let expected: Vec<u64> = ws
            .iter()
            .map(|&w| run(&mut WindowSieve::new(w), &oracle).unwrap().count)
            .collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let oracle = RecursiveOracle::builtin().unwrap();
        let ws = windows();
        let one = primes_in_windows(&ws, 1, &oracle).unwrap();
        let many = primes_in_windows(&ws, 16, &oracle).unwrap();
        assert_eq!(one, many);
        assert_eq!(one.len(), ws.len());
    }

    #[test]
    fn empty_batch() {
        let oracle = RecursiveOracle::builtin().unwrap();
        assert!(count_windows(&[], 4, &oracle).unwrap().is_empty());
    }
}
