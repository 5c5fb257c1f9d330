use std::{
    fmt,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

use humantime_serde::re::humantime::format_duration;
use serde::{Deserialize, Serialize};

/// How the independent loci of one simulation are spread over threads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Parallelism {
    #[default]
    Monolithic,
    Threads(ThreadsParallelism),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct ThreadsParallelism {
    #[serde(alias = "n", alias = "threads")]
    pub num_threads: NonZeroUsize,
    #[serde(alias = "progress")]
    #[serde(with = "humantime_serde")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: Duration,
}

impl fmt::Debug for ThreadsParallelism {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        struct FormattedDuration(Duration);

        impl fmt::Debug for FormattedDuration {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                fmt.write_str(&format_duration(self.0).to_string())
            }
        }

        fmt.debug_struct(stringify!(ThreadsParallelism))
            .field("num_threads", &self.num_threads.get())
            .field(
                "progress_interval",
                &FormattedDuration(self.progress_interval),
            )
            .finish()
    }
}

impl ThreadsParallelism {
    const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1_u64);

    #[must_use]
    pub fn new(num_threads: NonZeroUsize) -> Self {
        Self {
            num_threads,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

fn default_progress_interval() -> Duration {
    ThreadsParallelism::DEFAULT_PROGRESS_INTERVAL
}

impl Parallelism {
    /// Runs `simulate` once for every locus in `0..loci` and returns the
    /// results ordered by locus.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing locus. With several threads,
    /// this is the failing locus with the smallest index among those that
    /// were attempted.
    pub fn simulate_loci<T, E, F>(&self, loci: u64, simulate: F) -> Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(u64) -> Result<T, E> + Sync,
    {
        match self {
            Self::Monolithic => (0..loci).map(simulate).collect(),
            Self::Threads(threads) => threads.simulate_loci(loci, simulate),
        }
    }
}

impl ThreadsParallelism {
    fn simulate_loci<T, E, F>(&self, loci: u64, simulate: F) -> Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(u64) -> Result<T, E> + Sync,
    {
        let num_threads = usize::try_from(loci)
            .map_or(self.num_threads.get(), |loci| loci.min(self.num_threads.get()))
            .max(1);

        log::debug!("Simulating {loci} loci on {num_threads} threads.");

        let progress = Progress::new(loci, self.progress_interval);

        std::thread::scope(|scope| {
            let workers = (0..num_threads)
                .map(|worker| {
                    let simulate = &simulate;
                    let progress = &progress;

                    scope.spawn(move || {
                        let mut results = Vec::new();

                        for locus in (worker as u64..loci).step_by(num_threads) {
                            match simulate(locus) {
                                Ok(result) => results.push((locus, result)),
                                Err(err) => return Err((locus, err)),
                            }

                            progress.tick();
                        }

                        Ok(results)
                    })
                })
                .collect::<Vec<_>>();

            let mut results = Vec::new();
            let mut first_error: Option<(u64, E)> = None;

            for worker in workers {
                match worker.join() {
                    Ok(Ok(worker_results)) => results.extend(worker_results),
                    Ok(Err((locus, err))) => {
                        if first_error.as_ref().map_or(true, |(first, _)| locus < *first) {
                            first_error = Some((locus, err));
                        }
                    },
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }

            if let Some((_, err)) = first_error {
                return Err(err);
            }

            results.sort_unstable_by_key(|(locus, _)| *locus);

            Ok(results.into_iter().map(|(_, result)| result).collect())
        })
    }
}

struct Progress {
    total: u64,
    done: AtomicU64,
    interval: Duration,
    last_report: Mutex<Instant>,
}

impl Progress {
    fn new(total: u64, interval: Duration) -> Self {
        Self {
            total,
            done: AtomicU64::new(0),
            interval,
            last_report: Mutex::new(Instant::now()),
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;

        // Only one worker reports at a time, the others carry on
        if let Ok(mut last_report) = self.last_report.try_lock() {
            if last_report.elapsed() >= self.interval {
                log::info!("Simulated {done}/{} loci.", self.total);

                *last_report = Instant::now();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::{Parallelism, ThreadsParallelism};

    #[test]
    fn threads_preserve_locus_order() {
        let threads = Parallelism::Threads(ThreadsParallelism::new(NonZeroUsize::new(3).unwrap()));

        let results = threads
            .simulate_loci(10, |locus| Ok::<_, ()>(locus * 2))
            .unwrap();

        assert_eq!(results, (0..10).map(|locus| locus * 2).collect::<Vec<_>>());
    }

    #[test]
    fn more_threads_than_loci() {
        let threads = Parallelism::Threads(ThreadsParallelism::new(NonZeroUsize::new(8).unwrap()));

        assert_eq!(threads.simulate_loci(2, Ok::<_, ()>).unwrap(), vec![0, 1]);
        assert!(threads.simulate_loci(0, Ok::<_, ()>).unwrap().is_empty());
    }

    #[test]
    fn reports_the_earliest_failing_locus() {
        let fail_from_three = |locus: u64| if locus >= 3 { Err(locus) } else { Ok(locus) };

        assert_eq!(
            Parallelism::Monolithic.simulate_loci(10, fail_from_three),
            Err(3)
        );
        assert_eq!(
            Parallelism::Threads(ThreadsParallelism::new(NonZeroUsize::new(2).unwrap()))
                .simulate_loci(10, fail_from_three),
            Err(3)
        );
    }
}
