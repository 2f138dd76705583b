//! Integration with `rand` (v0.8) crate.

use super::{RandSource, StdSystemTime, V7Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl<T: RngCore> V7Generator<Adapter<T>, StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use uuid7_migrate::V7Generator;
    ///
    /// // seeded generators reproduce the same UUIDs for the same timestamps
    /// let mut a = V7Generator::with_rand08(StdRng::seed_from_u64(42));
    /// let mut b = V7Generator::with_rand08(StdRng::seed_from_u64(42));
    /// assert_eq!(a.generate_at(1_609_459_200_000), b.generate_at(1_609_459_200_000));
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
