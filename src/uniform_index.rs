use rand::Rng;

/// Below this bound a 32 bit draw is used; the rejection rate of the 32 bit
/// variant grows quickly for bounds close to [`u32::MAX`].
pub const U32_MAX_UPPER_BOUND: u32 = u32::MAX / 16;

/// Generates an index from the exclusive range `0..exclusive_ub` uniformly at
/// random. Equivalent to `rng.gen_range(0..exclusive_ub)`; uses a single
/// widening multiplication and only rejects a draw if it falls into the
/// small biased region.
///
/// # Warning
/// The upper bound must be strictly positive. This is not checked in release
/// builds!
///
/// # Example
/// ```
/// use shuffle_trio::uniform_index::gen_index;
/// use rand::SeedableRng;
///
/// let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(7);
/// for ub in 1..100 {
///     assert!(gen_index(&mut rng, ub) < ub);
/// }
/// ```
pub fn gen_index(rng: &mut impl Rng, exclusive_ub: usize) -> usize {
    if exclusive_ub <= U32_MAX_UPPER_BOUND as usize {
        rejection_u32(rng, exclusive_ub as u32) as usize
    } else {
        rejection_u64(rng, exclusive_ub as u64) as usize
    }
}

/// Maps a raw 64 bit draw into `0..exclusive_ub` with `draw % exclusive_ub`.
///
/// Values below `2^64 mod exclusive_ub` are slightly more likely than the
/// rest; the excess probability per draw is at most `exclusive_ub / 2^64`.
pub fn gen_index_modulo(rng: &mut impl Rng, exclusive_ub: usize) -> usize {
    debug_assert!(exclusive_ub != 0);
    (rng.gen::<u64>() % exclusive_ub as u64) as usize
}

/// How a raw generator output is reduced into an index range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RangeReduction {
    /// Multiply-and-reject; exactly uniform.
    #[default]
    Rejection,
    /// `draw % ub`; negligible bias for 64 bit draws.
    Modulo,
}

impl RangeReduction {
    #[inline]
    pub fn gen_index(self, rng: &mut impl Rng, exclusive_ub: usize) -> usize {
        match self {
            RangeReduction::Rejection => gen_index(rng, exclusive_ub),
            RangeReduction::Modulo => gen_index_modulo(rng, exclusive_ub),
        }
    }
}

macro_rules! impl_rejection {
    ($name : ident, $t : ty) => {
        #[inline]
        fn $name(rng: &mut impl Rng, exclusive_ub: $t) -> $t {
            debug_assert!(exclusive_ub != 0);

            let (mut lo, mut hi) = rng.gen::<$t>().wide_multiply(exclusive_ub);

            if lo >= exclusive_ub {
                return hi;
            }

            let threshold = exclusive_ub.wrapping_neg() % exclusive_ub;

            while lo < threshold {
                (lo, hi) = rng.gen::<$t>().wide_multiply(exclusive_ub);
            }

            hi
        }
    };
}

impl_rejection!(rejection_u32, u32);
impl_rejection!(rejection_u64, u64);

trait WideMul: Sized {
    /// Full-width product split into `(low, high)` halves.
    fn wide_multiply(self, b: Self) -> (Self, Self);
}

macro_rules! impl_wide_mul {
    ( $small : ty , $large : ty ) => {
        impl WideMul for $small {
            fn wide_multiply(self, b: Self) -> (Self, Self) {
                let res = (self as $large) * (b as $large);
                ((res as Self), (res >> Self::BITS) as Self)
            }
        }
    };
}

impl_wide_mul!(u32, u64);
impl_wide_mul!(u64, u128);
