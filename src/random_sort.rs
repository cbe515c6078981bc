use crate::uniform_index;
use rand::Rng;
use std::collections::HashSet;

/// Draws indices from `0..n` until every index has been seen once and
/// rearranges `data` into the order in which the indices first showed up.
///
/// The number of draws follows the coupon-collector distribution with mean
/// `n * H(n)`; besides the slow runtime the result is a uniform permutation.
pub fn random_sort<R: Rng, T>(rng: &mut R, data: &mut [T]) {
    random_sort_draws(rng, data);
}

/// Same as [`random_sort`] but returns the number of indices drawn.
pub fn random_sort_draws<R: Rng, T>(rng: &mut R, data: &mut [T]) -> usize {
    let n = data.len();
    if n == 0 {
        return 0;
    }

    let mut order = Vec::with_capacity(n);
    let mut seen = HashSet::with_capacity(n);
    let mut draws = 0;

    while order.len() < n {
        let idx = uniform_index::gen_index(rng, n);
        draws += 1;

        if seen.insert(idx) {
            order.push(idx);
        }
    }

    apply_gather(data, &order);

    draws
}

/// Rearranges `data` in place such that afterwards `data[k]` holds the
/// element previously stored at `data[order[k]]`. `order` must be a
/// permutation of `0..data.len()`.
fn apply_gather<T>(data: &mut [T], order: &[usize]) {
    debug_assert_eq!(data.len(), order.len());

    let mut placed = vec![false; order.len()];

    for start in 0..order.len() {
        if placed[start] {
            continue;
        }

        let mut cur = start;
        loop {
            placed[cur] = true;
            let next = order[cur];
            if next == start {
                break;
            }
            data.swap(cur, next);
            cur = next;
        }
    }
}
