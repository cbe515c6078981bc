use crate::uniform_index::{self, RangeReduction};
use rand::Rng;

/// Unbiased Fisher-Yates: walks from the back and swaps every position `i`
/// with a partner drawn uniformly from `0..=i`. Inputs with at most one
/// element are left untouched.
pub fn fisher_yates<R: Rng, T>(rng: &mut R, data: &mut [T]) {
    for i in (1..data.len()).rev() {
        let j = uniform_index::gen_index(rng, i + 1);
        data.swap(i, j);
    }
}

/// Fisher-Yates with the partner drawn as `rng.gen::<u64>() % (i + 1)`.
///
/// The modulo reduction favours small partners by at most `(i + 1) / 2^64`
/// per draw, which no test of realistic size can detect. Prefer
/// [`fisher_yates`] unless the draws have to match a modulo-based reference.
pub fn fisher_yates_modulo<R: Rng, T>(rng: &mut R, data: &mut [T]) {
    fisher_yates_with(rng, data, RangeReduction::Modulo)
}

/// Fisher-Yates with an explicit choice of how partners are drawn;
/// [`fisher_yates`] and [`fisher_yates_modulo`] fix the two choices.
pub fn fisher_yates_with<R: Rng, T>(rng: &mut R, data: &mut [T], reduction: RangeReduction) {
    for i in (1..data.len()).rev() {
        let j = reduction.gen_index(rng, i + 1);
        data.swap(i, j);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    crate::statistical_tests::test_shuffle_algorithm!(fisher_yates);
    crate::statistical_tests::test_shuffle_algorithm_deterministic!(fisher_yates);
    crate::statistical_tests::test_shuffle_algorithm_uniform!(fisher_yates);

    mod modulo {
        use super::*;

        crate::statistical_tests::test_shuffle_algorithm!(fisher_yates_modulo);
        crate::statistical_tests::test_shuffle_algorithm_deterministic!(fisher_yates_modulo);
        crate::statistical_tests::test_shuffle_algorithm_uniform!(fisher_yates_modulo);
    }

    #[test]
    fn rejection_matches_default() {
        let mut a = Pcg64Mcg::seed_from_u64(31);
        let mut b = Pcg64Mcg::seed_from_u64(31);

        let mut x: Vec<u32> = (0..200).collect();
        let mut y = x.clone();

        fisher_yates(&mut a, &mut x);
        fisher_yates_with(&mut b, &mut y, RangeReduction::Rejection);

        assert_eq!(x, y);
    }

    #[test]
    fn modulo_matches_explicit_reduction() {
        let mut a = Pcg64Mcg::seed_from_u64(32);
        let mut b = Pcg64Mcg::seed_from_u64(32);

        let mut x: Vec<u32> = (0..200).collect();
        let mut y = x.clone();

        fisher_yates_modulo(&mut a, &mut x);
        fisher_yates_with(&mut b, &mut y, RangeReduction::Modulo);

        assert_eq!(x, y);
    }
}
