//! Default generator and entry point functions.

use std::cell::RefCell;

use crate::generator::{RandSource, V7Generator};
use crate::Uuid;

/// The random number generator used by the default generator.
///
/// The default generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
/// emulate the strategy used by [`rand::rngs::ThreadRng`].
///
/// [`ChaCha12Core`]: rand_chacha::ChaCha12Core
/// [`ReseedingRng`]: rand::rngs::adapter::ReseedingRng
#[derive(Debug)]
pub struct DefaultRng(inner::Reseeding);

impl RandSource for DefaultRng {
    fn next_u32(&mut self) -> u32 {
        rand::RngCore::next_u32(&mut self.0)
    }

    fn next_u64(&mut self) -> u64 {
        rand::RngCore::next_u64(&mut self.0)
    }
}

impl Default for DefaultRng {
    fn default() -> Self {
        Self(inner::new_reseeding())
    }
}

/// Creates a standalone generator backed by [`DefaultRng`] and the system clock.
///
/// # Examples
///
/// ```rust
/// let mut g = uuid7_migrate::default_generator();
/// println!("{}", g.generate_at(1_609_459_200_000)); // e.g., "0176bb3e-7000-7c6e-b3a1-95d0e9f1c2aa"
/// ```
pub fn default_generator() -> V7Generator<DefaultRng> {
    V7Generator::new(DefaultRng::default())
}

thread_local! {
    static DEFAULT_GENERATOR: RefCell<inner::ThreadGen> = RefCell::new(Default::default());
}

/// Generates a UUIDv7 object from the current timestamp.
///
/// This function employs a thread-local generator. On Unix, the generator is reseeded when the
/// process ID changes (i.e., upon process forks) so that forked processes do not share random
/// bits.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_migrate::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid7_migrate::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    DEFAULT_GENERATOR.with(|g| g.borrow_mut().get_mut().generate())
}

/// Generates a UUIDv7 object from the `unix_ts_ms` passed using the thread-local generator.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_migrate::uuid7_at(1_609_459_200_000);
/// assert!(uuid.to_string().starts_with("0176bb3e-7000-7"));
/// ```
pub fn uuid7_at(unix_ts_ms: u64) -> Uuid {
    DEFAULT_GENERATOR.with(|g| g.borrow_mut().get_mut().generate_at(unix_ts_ms))
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use super::DefaultRng;
    use crate::generator::V7Generator;

    pub type Reseeding = ReseedingRng<ChaCha12Core, OsRng>;

    pub fn new_reseeding() -> Reseeding {
        let core = ChaCha12Core::from_rng(OsRng)
            .expect("uuid7-migrate: could not initialize default generator");
        ReseedingRng::new(core, 1024 * 64, OsRng)
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct ThreadGen {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<DefaultRng>,
    }

    impl Default for ThreadGen {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: super::default_generator(),
            }
        }
    }

    impl ThreadGen {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, reseeding the
        /// generator on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<DefaultRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("process id changed; reseeding thread-local generator");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
