use crate::uniform_index;
use rand::Rng;

/// The textbook mistake: every position `i` is swapped with a partner drawn
/// from the whole range `0..n` instead of `i..n`. The `n^n` equally likely
/// draw sequences cannot map evenly onto the `n!` permutations, so some
/// orders come up more often than others.
pub fn naive_swap<R: Rng, T>(rng: &mut R, data: &mut [T]) {
    let n = data.len();

    for i in 0..n {
        let j = uniform_index::gen_index(rng, n);
        data.swap(i, j);
    }
}
