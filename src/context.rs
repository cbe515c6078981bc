//! Owned random state for the shuffles.
//!
//! Every shuffle takes its generator by `&mut`, so a [`ShuffleContext`] is
//! never shared implicitly. Callers that run shuffles on several threads
//! should give each thread its own context (or lock a shared one).
//!
//! For code that just wants to call `shuffle_fisher_yates(&mut v)` there is
//! one process-wide context as well, see [`with_global`]. It is seeded from
//! the clock on first use; seeding happens exactly once even under concurrent
//! first use, and later accesses are serialized by a mutex.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Where the seed of a [`ShuffleContext`] comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SeedSource {
    /// Derive the seed from the clock at construction time.
    #[default]
    Clock,
    /// Use exactly this seed; two contexts with the same seed produce the
    /// same shuffles.
    Fixed(u64),
}

impl SeedSource {
    /// Turns the source into a concrete seed.
    pub fn resolve(self) -> u64 {
        match self {
            SeedSource::Clock => clock_seed(),
            SeedSource::Fixed(seed) => seed,
        }
    }
}

/// A seeded generator. Seeded once at construction, never reseeded.
///
/// The context implements [`RngCore`], hence it can be handed to any of the
/// shuffles (or anything else expecting an [`rand::Rng`]) directly.
///
/// # Example
/// ```
/// use shuffle_trio::prelude::*;
///
/// let mut ctx = ShuffleContext::from_seed(42);
/// let mut data: Vec<i64> = (1..=5).collect();
/// fisher_yates(&mut ctx, &mut data);
///
/// data.sort();
/// assert_eq!(data, vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct ShuffleContext {
    rng: Pcg64Mcg,
    seed: u64,
}

impl ShuffleContext {
    pub fn new(source: SeedSource) -> Self {
        let seed = source.resolve();
        log::debug!("seeding shuffle context with {seed:#018x} ({source:?})");

        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(SeedSource::Fixed(seed))
    }

    pub fn from_clock() -> Self {
        Self::new(SeedSource::Clock)
    }

    /// The seed this context was created with. Logging it makes a failing
    /// randomized run reproducible via [`ShuffleContext::from_seed`].
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derives an independent context, e.g. to hand one to a worker thread.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.next_u64())
    }
}

impl Default for ShuffleContext {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl RngCore for ShuffleContext {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed material from the clock. Rust's monotonic clock has no epoch, so the
/// nanoseconds elapsed since a process-wide anchor are mixed into the wall
/// clock reading.
fn clock_seed() -> u64 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let anchor = *ANCHOR.get_or_init(Instant::now);

    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    wall ^ (anchor.elapsed().as_nanos() as u64).rotate_left(32)
}

static GLOBAL: OnceLock<Mutex<ShuffleContext>> = OnceLock::new();

/// Runs `f` with exclusive access to the process-wide context, creating and
/// seeding it on first use.
pub fn with_global<O>(f: impl FnOnce(&mut ShuffleContext) -> O) -> O {
    let global = GLOBAL.get_or_init(|| Mutex::new(ShuffleContext::from_clock()));

    // a panic inside `f` cannot leave the generator in an invalid state
    let mut ctx = global.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut ctx)
}

/// The seed of the process-wide context (seeding it if necessary).
pub fn global_seed() -> u64 {
    with_global(|ctx| ctx.seed())
}
