//! Wall-clock comparison of the shuffles.
//!
//! This is a quick sanity check to be run from tests or small drivers; for
//! careful measurements use the criterion benchmarks.

use crate::api::Algorithm;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Input lengths to measure.
    pub sizes: Vec<usize>,
    /// Fresh inputs shuffled per size and algorithm; the report holds the mean.
    pub trials_per_size: usize,
    pub algorithms: Vec<Algorithm>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sizes: vec![10, 100, 1000, 10000],
            trials_per_size: 4,
            algorithms: vec![
                Algorithm::RandomSort,
                Algorithm::NaiveSwap,
                Algorithm::FisherYates,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingReport {
    pub algorithm: Algorithm,
    pub size: usize,
    pub trials: usize,
    pub mean: Duration,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>20} n={:<6} avg {:.4} ms",
            self.algorithm.name(),
            self.size,
            self.mean.as_secs_f64() * 1e3
        )
    }
}

/// Shuffles `0..size` with every configured algorithm and reports the mean
/// time per shuffle, size by size. All algorithms see the same inputs.
pub fn compare<R: Rng>(rng: &mut R, config: &TimingConfig) -> Vec<TimingReport> {
    let mut reports = Vec::with_capacity(config.sizes.len() * config.algorithms.len());

    for &size in &config.sizes {
        let input: Vec<i64> = (0..size as i64).collect();

        for &algorithm in &config.algorithms {
            let mut total = Duration::ZERO;

            for _ in 0..config.trials_per_size {
                let mut data = input.clone();

                let start = Instant::now();
                algorithm.apply(rng, &mut data);
                total += start.elapsed();

                std::hint::black_box(&data);
            }

            let report = TimingReport {
                algorithm,
                size,
                trials: config.trials_per_size,
                mean: mean_of(total, config.trials_per_size),
            };
            log::info!("{report}");
            reports.push(report);
        }
    }

    reports
}

fn mean_of(total: Duration, trials: usize) -> Duration {
    match trials {
        0 => Duration::ZERO,
        trials => total.div_f64(trials as f64),
    }
}

/// The algorithm with the smallest mean for `size`, if it was measured.
pub fn fastest(reports: &[TimingReport], size: usize) -> Option<Algorithm> {
    reports
        .iter()
        .filter(|r| r.size == size)
        .min_by_key(|r| r.mean)
        .map(|r| r.algorithm)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::ShuffleContext;

    #[test]
    fn one_report_per_size_and_algorithm() {
        let mut ctx = ShuffleContext::from_seed(10);
        let config = TimingConfig {
            sizes: vec![0, 1, 50],
            trials_per_size: 2,
            ..TimingConfig::default()
        };

        let reports = compare(&mut ctx, &config);
        assert_eq!(reports.len(), 9);

        for (chunk, &size) in reports.chunks(3).zip(&config.sizes) {
            assert!(chunk.iter().all(|r| r.size == size && r.trials == 2));
            let algos: Vec<_> = chunk.iter().map(|r| r.algorithm).collect();
            assert_eq!(algos, config.algorithms);
        }
    }

    #[test]
    fn zero_trials_report_zero() {
        let mut ctx = ShuffleContext::from_seed(10);
        let config = TimingConfig {
            sizes: vec![5],
            trials_per_size: 0,
            algorithms: vec![Algorithm::FisherYates],
        };

        let reports = compare(&mut ctx, &config);
        assert_eq!(reports[0].mean, Duration::ZERO);
    }

    #[test]
    fn mean_handles_huge_trial_counts() {
        let trials = u32::MAX as usize + 2;
        let total = Duration::from_secs(trials as u64);

        assert_eq!(mean_of(total, trials), Duration::from_secs(1));
        assert_eq!(mean_of(Duration::from_secs(9), 3), Duration::from_secs(3));
        assert_eq!(mean_of(Duration::from_secs(5), 0), Duration::ZERO);
    }

    #[test]
    fn fastest_picks_minimum() {
        let mk = |algorithm, size, micros| TimingReport {
            algorithm,
            size,
            trials: 1,
            mean: Duration::from_micros(micros),
        };

        let reports = [
            mk(Algorithm::RandomSort, 10, 30),
            mk(Algorithm::FisherYates, 10, 5),
            mk(Algorithm::NaiveSwap, 10, 7),
            mk(Algorithm::NaiveSwap, 20, 1),
        ];

        assert_eq!(fastest(&reports, 10), Some(Algorithm::FisherYates));
        assert_eq!(fastest(&reports, 20), Some(Algorithm::NaiveSwap));
        assert_eq!(fastest(&reports, 30), None);
    }

    #[test]
    fn report_mentions_algorithm() {
        let report = TimingReport {
            algorithm: Algorithm::NaiveSwap,
            size: 100,
            trials: 4,
            mean: Duration::from_millis(2),
        };

        let line = report.to_string();
        assert!(line.contains("naive-swap"));
        assert!(line.contains("n=100"));
        assert!(line.contains("2.0000 ms"));
    }
}
