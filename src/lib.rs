//! Three ways to shuffle a slice, from worst to best:
//!
//! - [`random_sort::random_sort`] draws indices until all have been seen
//!   (coupon collector, `O(n log n)` expected draws),
//! - [`naive_swap::naive_swap`] swaps every position with a partner from the
//!   whole range, which is fast but biased,
//! - [`fisher_yates::fisher_yates`] swaps every position with a partner from
//!   the unprocessed prefix, which is fast and uniform.
//!
//! The shuffles take their generator explicitly. [`context::ShuffleContext`]
//! is a seedable generator for that purpose; the `shuffle_*` free functions
//! use a process-wide context instead.

pub mod api;
pub mod context;
pub mod error;
pub mod fisher_yates;
pub mod naive_swap;
pub mod random_sort;
pub mod statistics;
pub mod timing;
pub mod uniform_index;

pub use api::{shuffle_fisher_yates, shuffle_naive_swap, shuffle_random_sort};
pub use error::{Error, Result};

pub mod prelude {
    pub use super::api::{Algorithm, ShuffleSequence};
    pub use super::context::{SeedSource, ShuffleContext};
    pub use super::fisher_yates::{fisher_yates, fisher_yates_modulo};
    pub use super::naive_swap::naive_swap;
    pub use super::random_sort::random_sort;
    pub use super::uniform_index::RangeReduction;
}
