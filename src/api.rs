use super::*;
use crate::context::with_global;
use crate::error::Error;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// The shuffles this crate provides, from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// [`random_sort::random_sort`]: uniform, but needs `n * H(n)` draws.
    RandomSort,
    /// [`naive_swap::naive_swap`]: linear time, biased.
    NaiveSwap,
    /// [`fisher_yates::fisher_yates`]: linear time, uniform.
    FisherYates,
    /// [`fisher_yates::fisher_yates_modulo`]: Fisher-Yates with modulo range
    /// reduction.
    FisherYatesModulo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::RandomSort,
        Algorithm::NaiveSwap,
        Algorithm::FisherYates,
        Algorithm::FisherYatesModulo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::RandomSort => "random-sort",
            Algorithm::NaiveSwap => "naive-swap",
            Algorithm::FisherYates => "fisher-yates",
            Algorithm::FisherYatesModulo => "fisher-yates-modulo",
        }
    }

    /// Whether every permutation is (up to negligible modulo bias) equally
    /// likely.
    pub fn is_uniform(self) -> bool {
        !matches!(self, Algorithm::NaiveSwap)
    }

    pub fn apply<R: Rng, T>(self, rng: &mut R, data: &mut [T]) {
        match self {
            Algorithm::RandomSort => random_sort::random_sort(rng, data),
            Algorithm::NaiveSwap => naive_swap::naive_swap(rng, data),
            Algorithm::FisherYates => fisher_yates::fisher_yates(rng, data),
            Algorithm::FisherYatesModulo => fisher_yates::fisher_yates_modulo(rng, data),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == normalized)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
    }
}

pub trait ShuffleSequence {
    /// Rearranges the sequence with the given algorithm, drawing randomness
    /// from `rng`. With a deterministically seeded generator the result is
    /// reproducible.
    ///
    /// # Example
    /// ```
    /// use shuffle_trio::prelude::*;
    ///
    /// let mut ctx = ShuffleContext::from_seed(3);
    /// let mut data: Vec<_> = (0..100).collect();
    /// let org = data.clone();
    ///
    /// data.shuffle_with(Algorithm::FisherYates, &mut ctx);
    ///
    /// assert_ne!(data, org); // might fail with probability 1 / 100!
    /// ```
    fn shuffle_with<R: Rng>(&mut self, algorithm: Algorithm, rng: &mut R);
}

impl<T> ShuffleSequence for [T] {
    fn shuffle_with<R: Rng>(&mut self, algorithm: Algorithm, rng: &mut R) {
        algorithm.apply(rng, self)
    }
}

/// Random-sort shuffle driven by the process-wide generator.
pub fn shuffle_random_sort(sequence: &mut [i64]) {
    with_global(|ctx| random_sort::random_sort(ctx, sequence))
}

/// Naive-swap shuffle driven by the process-wide generator.
pub fn shuffle_naive_swap(sequence: &mut [i64]) {
    with_global(|ctx| naive_swap::naive_swap(ctx, sequence))
}

/// Fisher-Yates shuffle driven by the process-wide generator.
pub fn shuffle_fisher_yates(sequence: &mut [i64]) {
    with_global(|ctx| fisher_yates::fisher_yates(ctx, sequence))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::ShuffleContext;

    #[test]
    fn names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
            assert_eq!(algo.to_string(), algo.name());
        }
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!("Fisher_Yates".parse::<Algorithm>().unwrap(), Algorithm::FisherYates);
        assert_eq!(" naive-swap ".parse::<Algorithm>().unwrap(), Algorithm::NaiveSwap);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "bogo-sort".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm(ref name) if name == "bogo-sort"));
        assert!(err.to_string().contains("bogo-sort"));
    }

    #[test]
    fn only_naive_swap_is_biased() {
        let biased: Vec<_> = Algorithm::ALL.into_iter().filter(|a| !a.is_uniform()).collect();
        assert_eq!(biased, vec![Algorithm::NaiveSwap]);
    }

    #[test]
    fn trait_matches_free_functions() {
        for algo in Algorithm::ALL {
            let mut a = ShuffleContext::from_seed(8);
            let mut b = ShuffleContext::from_seed(8);

            let mut x: Vec<i64> = (0..50).collect();
            let mut y = x.clone();

            x.shuffle_with(algo, &mut a);
            algo.apply(&mut b, &mut y);

            assert_eq!(x, y, "{algo}");
        }
    }

    #[test]
    fn global_shuffles_permute() {
        let shuffles: [fn(&mut [i64]); 3] =
            [shuffle_random_sort, shuffle_naive_swap, shuffle_fisher_yates];

        for shuffle in shuffles {
            let mut data = vec![1, 2, 3, 4, 5];
            shuffle(&mut data);
            data.sort();
            assert_eq!(data, vec![1, 2, 3, 4, 5]);

            let mut empty: Vec<i64> = vec![];
            shuffle(&mut empty);
            assert!(empty.is_empty());

            let mut single = vec![42];
            shuffle(&mut single);
            assert_eq!(single, vec![42]);
        }
    }
}
