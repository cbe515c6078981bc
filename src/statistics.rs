//! Empirical and exact distributions of shuffle outputs.
//!
//! All sampling helpers shuffle the identity `0..size` so that a value also
//! names its original position.

use crate::error::{Error, Result};
use rand::Rng;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::{BTreeMap, HashMap};

/// How often each value ended up at each position, over a number of shuffles
/// of the identity permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionCounts {
    size: usize,
    trials: u64,
    counts: Vec<u64>,
}

impl PositionCounts {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            trials: 0,
            counts: vec![0; size * size],
        }
    }

    /// Adds one shuffled identity. Fails, leaving the counts untouched, if
    /// `perm` is not a permutation of `0..size`.
    pub fn record(&mut self, perm: &[usize]) -> Result<()> {
        check_permutation(perm, self.size)?;

        for (pos, &value) in perm.iter().enumerate() {
            self.counts[value * self.size + pos] += 1;
        }
        self.trials += 1;
        Ok(())
    }

    /// Combines the counts of two disjoint sets of trials over the same size.
    pub fn merge(mut self, other: &Self) -> Result<Self> {
        if self.size != other.size {
            return Err(Error::InvalidParameter(format!(
                "cannot merge position counts of size {} and {}",
                self.size, other.size
            )));
        }

        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self.trials += other.trials;
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of trials in which `value` was found at `position`.
    pub fn get(&self, value: usize, position: usize) -> u64 {
        self.counts[value * self.size + position]
    }

    /// The count every cell would have under a uniform shuffle.
    pub fn expected(&self) -> f64 {
        self.trials as f64 / self.size as f64
    }

    /// Pearson's statistic over all `size * size` cells.
    pub fn chi_squared(&self) -> Result<f64> {
        if self.trials == 0 || self.size == 0 {
            return Err(Error::EmptySample);
        }

        Ok(chi_squared_uniform(self.counts.iter().copied(), self.expected()))
    }

    /// Each value's row is a multinomial over `size` positions, hence
    /// `size * (size - 1)` degrees of freedom when rows are treated as
    /// independent.
    pub fn degrees_of_freedom(&self) -> f64 {
        (self.size * self.size.saturating_sub(1)) as f64
    }

    /// Probability of a statistic at least as large as the observed one if
    /// the shuffle were uniform.
    pub fn p_value(&self) -> Result<f64> {
        chi_squared_p_value(self.chi_squared()?, self.degrees_of_freedom())
    }

    /// Coarse acceptance criterion: the statistic stays below twice
    /// `size^2 - 1`.
    pub fn within_rough_threshold(&self) -> Result<bool> {
        let stat = self.chi_squared()?;
        Ok(stat < 2.0 * (self.size * self.size - 1) as f64)
    }
}

fn check_permutation(perm: &[usize], size: usize) -> Result<()> {
    if perm.len() != size {
        return Err(Error::InvalidParameter(format!(
            "expected an order of {size} elements, got {}",
            perm.len()
        )));
    }

    let mut seen = vec![false; size];
    for &value in perm {
        if value >= size || std::mem::replace(&mut seen[value], true) {
            return Err(Error::InvalidParameter(format!(
                "{perm:?} is not a permutation of 0..{size}"
            )));
        }
    }

    Ok(())
}

fn check_sample(size: usize, trials: u64) -> Result<()> {
    if size == 0 || trials == 0 {
        Err(Error::EmptySample)
    } else {
        Ok(())
    }
}

/// Shuffles the identity `trials` times and tallies value/position pairs.
pub fn position_counts<R, F>(
    rng: &mut R,
    size: usize,
    trials: u64,
    mut shuffle: F,
) -> Result<PositionCounts>
where
    R: Rng,
    F: FnMut(&mut R, &mut [usize]),
{
    check_sample(size, trials)?;

    let mut counts = PositionCounts::new(size);
    let mut data: Vec<usize> = Vec::with_capacity(size);

    for _ in 0..trials {
        data.clear();
        data.extend(0..size);
        shuffle(rng, &mut data);
        counts.record(&data)?;
    }

    Ok(counts)
}

/// Parallel version of [`position_counts`]. Trial `t` uses its own
/// generator seeded from `seed` and `t`, so the result does not depend on
/// the number of worker threads.
#[cfg(feature = "parallel")]
pub fn par_position_counts<F>(seed: u64, size: usize, trials: u64, shuffle: F) -> Result<PositionCounts>
where
    F: Fn(&mut rand_pcg::Pcg64Mcg, &mut [usize]) + Sync,
{
    use rand::SeedableRng;
    use rayon::prelude::*;

    check_sample(size, trials)?;

    (0..trials)
        .into_par_iter()
        .try_fold(
            || (PositionCounts::new(size), Vec::with_capacity(size)),
            |(mut counts, mut data), trial| -> Result<_> {
                let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(
                    seed ^ trial.wrapping_mul(0x9E37_79B9_7F4A_7C15),
                );
                data.clear();
                data.extend(0..size);
                shuffle(&mut rng, &mut data);
                counts.record(&data)?;
                Ok((counts, data))
            },
        )
        .map(|partial| partial.map(|(counts, _)| counts))
        .try_reduce(|| PositionCounts::new(size), |a, b| a.merge(&b))
}

/// Fraction of `trials` shuffles of `[1, 2]` that keep `1` in front.
pub fn front_probability<R, F>(rng: &mut R, trials: u64, mut shuffle: F) -> Result<f64>
where
    R: Rng,
    F: FnMut(&mut R, &mut [i64]),
{
    check_sample(2, trials)?;

    let mut in_front = 0u64;
    for _ in 0..trials {
        let mut data = [1, 2];
        shuffle(rng, &mut data);
        in_front += (data[0] == 1) as u64;
    }

    Ok(in_front as f64 / trials as f64)
}

/// How often each complete output order of the identity `0..size` occurred.
pub fn permutation_histogram<R, F>(
    rng: &mut R,
    size: usize,
    trials: u64,
    mut shuffle: F,
) -> Result<HashMap<Vec<usize>, u64>>
where
    R: Rng,
    F: FnMut(&mut R, &mut [usize]),
{
    check_sample(size, trials)?;

    let mut histogram = HashMap::new();
    for _ in 0..trials {
        let mut data: Vec<usize> = (0..size).collect();
        shuffle(rng, &mut data);
        *histogram.entry(data).or_insert(0) += 1;
    }

    Ok(histogram)
}

/// Pearson's statistic of a permutation histogram against the uniform
/// distribution over all `size!` orders (orders never observed count as
/// zero). Returns the statistic together with its `size! - 1` degrees of
/// freedom. Every key must be a permutation of `0..size`.
pub fn permutation_chi_squared(histogram: &HashMap<Vec<usize>, u64>, size: usize) -> Result<(f64, f64)> {
    let trials: u64 = histogram.values().sum();
    check_sample(size, trials)?;

    let num_perms = (1..=size as u64)
        .try_fold(1u64, |acc, k| acc.checked_mul(k))
        .filter(|&n| n <= 1 << 24)
        .ok_or_else(|| Error::InvalidParameter(format!("{size}! orders are too many to tabulate")))?;

    for perm in histogram.keys() {
        check_permutation(perm, size)?;
    }

    // distinct valid keys cannot outnumber the orders
    let expected = trials as f64 / num_perms as f64;
    let unseen = num_perms - histogram.len() as u64;

    let stat = chi_squared_uniform(histogram.values().copied(), expected) + unseen as f64 * expected;

    Ok((stat, (num_perms - 1) as f64))
}

/// Upper tail of the chi-squared distribution.
pub fn chi_squared_p_value(stat: f64, degrees_of_freedom: f64) -> Result<f64> {
    let distr = ChiSquared::new(degrees_of_freedom)?;
    Ok((1.0 - distr.cdf(stat)).max(0.0))
}

fn chi_squared_uniform(observed: impl Iterator<Item = u64>, expected: f64) -> f64 {
    observed
        .map(|count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Enumerates all `n^n` draw sequences of the naive swap on `0..n` and
/// counts how many of them produce each order. A uniform shuffle would need
/// every count to equal `n^n / n!`, which is impossible for `n >= 3`.
/// Sizes above 8 are rejected as too expensive.
pub fn exact_naive_swap_counts(n: usize) -> Result<BTreeMap<Vec<usize>, u64>> {
    if n > 8 {
        return Err(Error::InvalidParameter(format!(
            "enumerating {n}^{n} draw sequences is too expensive"
        )));
    }

    fn recurse(data: &mut Vec<usize>, i: usize, counts: &mut BTreeMap<Vec<usize>, u64>) {
        let n = data.len();
        if i == n {
            *counts.entry(data.clone()).or_insert(0) += 1;
            return;
        }

        for j in 0..n {
            data.swap(i, j);
            recurse(data, i + 1, counts);
            data.swap(i, j);
        }
    }

    let mut counts = BTreeMap::new();
    recurse(&mut (0..n).collect(), 0, &mut counts);
    Ok(counts)
}
