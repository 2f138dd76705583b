//! UUIDv7 generation and SQL rewriting for migrating legacy identifiers to UUIDv7
//!
//! ```rust
//! use uuid7_migrate::{default_generator, MigrationPlan};
//!
//! let mut plan = MigrationPlan::new(default_generator());
//! plan.register(
//!     "11111111-1111-1111-1111-111111111111".parse()?,
//!     1_609_459_200_000,
//! );
//! for statement in plan.generate_statements() {
//!     // e.g. "UPDATE article SET id = '0176bb3e-7000-7c05-9219-566f82fff672' WHERE id = '11111111-1111-1111-1111-111111111111';"
//!     println!("{}", statement);
//! }
//! # Ok::<(), uuid7_migrate::ParseError>(())
//! ```
//!
//! See [draft-peabody-dispatch-new-uuid-format-03](https://www.ietf.org/archive/id/draft-peabody-dispatch-new-uuid-format-03.html).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds. Larger timestamps are truncated to their low 48 bits.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `rand_a` and 62-bit `rand_b` fields are filled with random bits
//!   drawn from the generator's [`RandSource`](generator::RandSource).
//! - The 2-bit `var` field is set at `10`.
//!
//! There is no counter: identifiers sharing a millisecond are ordered by their
//! random bits only. The random source is not meant for security-sensitive
//! identifiers.
//!
//! # Migration input
//!
//! Records can also be loaded from text in which each line reads
//! `<legacy uuid>,<ISO-8601 timestamp>`; see [`input::read_records`].

mod id;
pub use id::{ParseError, Uuid, TIMESTAMP_MASK};

pub mod generator;
pub use generator::V7Generator;

mod global_gen;
pub use global_gen::{default_generator, uuid7, uuid7_at, DefaultRng};

pub mod migration;
pub use migration::{MigrationPlan, MigrationRecord, StatementTemplate};

pub mod input;
