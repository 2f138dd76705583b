//! UUIDv7 generator and related types.

use crate::Uuid;

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`V7Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the minimum system clock interface for [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads the system clock.
///
/// A clock set before the Unix epoch reads as `0`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

/// Builds a UUIDv7 from a timestamp and explicit random fields and returns its canonical string.
///
/// `unix_ts_ms` is truncated to 48 bits, `rand_a` to 12 bits and `rand_b` to 62 bits. This is the
/// pure form of [`V7Generator::generate_at`].
///
/// # Examples
///
/// ```rust
/// use uuid7_migrate::generator::generate;
///
/// assert_eq!(
///     generate(1_700_000_000_000, 0xabc, 0x0123_4567_89ab_cdef),
///     "018bcfe5-6800-7abc-8123-456789abcdef"
/// );
/// ```
pub fn generate(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> String {
    Uuid::from_fields_v7(unix_ts_ms, rand_a, rand_b).to_string()
}

/// Represents a UUIDv7 generator that fills the random fields from an injected [`RandSource`] and
/// reads the current time from an injected [`TimeSource`].
///
/// The generator keeps no state between calls. UUIDs generated at non-decreasing timestamps sort
/// in timestamp order, while UUIDs sharing a millisecond are ordered by their random bits only.
///
/// # Examples
///
/// ```rust
/// use uuid7_migrate::V7Generator;
///
/// let mut g = V7Generator::with_rand08(rand::thread_rng());
/// let uuid = g.generate_at(1_609_459_200_000);
/// assert!(uuid.to_string().starts_with("0176bb3e-7000-7"));
/// println!("{} {}", uuid, g.generate());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    rand_source: R,
    time_source: T,
}

impl<R: RandSource> V7Generator<R> {
    /// Creates a generator object with a random number generator and the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self {
            rand_source,
            time_source: StdSystemTime,
        }
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            rand_source,
            time_source,
        }
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    ///
    /// The clock is read exactly once and the value is passed to [`generate_at`].
    ///
    /// [`generate_at`]: V7Generator::generate_at
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_at(unix_ts_ms)
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed, drawing fresh random bits for
    /// the `rand_a` and `rand_b` fields.
    ///
    /// `unix_ts_ms` values of 2^48 or larger wrap silently.
    pub fn generate_at(&mut self, unix_ts_ms: u64) -> Uuid {
        let rand_a = self.rand_source.next_u32() as u16;
        let rand_b = self.rand_source.next_u64();
        Uuid::from_fields_v7(unix_ts_ms, rand_a, rand_b)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7_migrate::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}
