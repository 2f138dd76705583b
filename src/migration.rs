//! Rewriting of legacy identifiers into UUIDv7 `UPDATE` statements.

use std::io;

use crate::generator::{RandSource, StdSystemTime, TimeSource, V7Generator};
use crate::Uuid;

/// A legacy identifier paired with the timestamp its replacement UUIDv7 is derived from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MigrationRecord {
    /// Identifier the row is currently stored under.
    pub legacy_id: Uuid,

    /// Unix timestamp in milliseconds, usually the row's creation time.
    pub original_ts_ms: u64,
}

impl MigrationRecord {
    /// Creates a record from a legacy identifier and a Unix timestamp in milliseconds.
    pub const fn new(legacy_id: Uuid, original_ts_ms: u64) -> Self {
        Self {
            legacy_id,
            original_ts_ms,
        }
    }
}

/// Table and column names substituted into every generated statement.
///
/// The names are written verbatim; they are neither quoted nor validated.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementTemplate {
    /// Table whose rows are rewritten.
    pub table: String,

    /// Column that receives the new UUIDv7.
    pub set_column: String,

    /// Column matched against the legacy identifier.
    pub key_column: String,
}

impl Default for StatementTemplate {
    /// Rewrites `article.id` in place.
    fn default() -> Self {
        Self {
            table: "article".to_owned(),
            set_column: "id".to_owned(),
            key_column: "id".to_owned(),
        }
    }
}

impl StatementTemplate {
    /// Renders a single `UPDATE` statement.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_migrate::{StatementTemplate, Uuid};
    ///
    /// let new_id = Uuid::from_fields_v7(1_609_459_200_000, 0, 0);
    /// let legacy_id = "11111111-1111-1111-1111-111111111111".parse::<Uuid>()?;
    /// assert_eq!(
    ///     StatementTemplate::default().render(&new_id, &legacy_id),
    ///     "UPDATE article SET id = '0176bb3e-7000-7000-8000-000000000000' \
    ///      WHERE id = '11111111-1111-1111-1111-111111111111';"
    /// );
    /// # Ok::<(), uuid7_migrate::ParseError>(())
    /// ```
    pub fn render(&self, new_id: &Uuid, legacy_id: &Uuid) -> String {
        format!(
            "UPDATE {} SET {} = '{}' WHERE {} = '{}';",
            self.table, self.set_column, new_id, self.key_column, legacy_id
        )
    }
}

/// An ordered collection of [`MigrationRecord`]s and the generator that mints their new
/// identifiers.
///
/// Statements are emitted in registration order. Every pass over the records draws fresh random
/// bits, so generating twice yields different UUIDs for the same legacy identifiers.
///
/// # Examples
///
/// ```rust
/// use uuid7_migrate::{MigrationPlan, V7Generator};
///
/// let mut plan = MigrationPlan::new(V7Generator::with_rand08(rand::thread_rng()));
/// plan.register("11111111-1111-1111-1111-111111111111".parse()?, 1_609_459_200_000);
/// plan.register("22222222-2222-2222-2222-222222222222".parse()?, 1_609_459_260_000);
///
/// let mut out = Vec::new();
/// plan.emit(&mut out)?;
/// assert_eq!(String::from_utf8(out)?.lines().count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct MigrationPlan<R, T = StdSystemTime> {
    generator: V7Generator<R, T>,
    template: StatementTemplate,
    records: Vec<MigrationRecord>,
}

impl<R: RandSource, T: TimeSource> MigrationPlan<R, T> {
    /// Creates an empty plan with the default [`StatementTemplate`].
    pub fn new(generator: V7Generator<R, T>) -> Self {
        Self::with_template(generator, StatementTemplate::default())
    }

    /// Creates an empty plan that renders statements with `template`.
    pub fn with_template(generator: V7Generator<R, T>, template: StatementTemplate) -> Self {
        Self {
            generator,
            template,
            records: Vec::new(),
        }
    }

    /// Returns the template statements are rendered with.
    pub fn template(&self) -> &StatementTemplate {
        &self.template
    }

    /// Appends a record. Duplicates are kept.
    pub fn register(&mut self, legacy_id: Uuid, original_ts_ms: u64) {
        self.records
            .push(MigrationRecord::new(legacy_id, original_ts_ms));
    }

    /// Appends every record from `records`, preserving their order.
    pub fn register_all<I: IntoIterator<Item = MigrationRecord>>(&mut self, records: I) {
        let before = self.records.len();
        self.records.extend(records);
        log::debug!(
            "registered {} records ({} total)",
            self.records.len() - before,
            self.records.len()
        );
    }

    /// Returns the registered records in registration order.
    pub fn records(&self) -> &[MigrationRecord] {
        &self.records
    }

    /// Returns the number of registered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record has been registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator that mints a UUIDv7 for each record as it is advanced and yields the
    /// corresponding `UPDATE` statement.
    pub fn statements(&mut self) -> impl Iterator<Item = String> + '_ {
        let Self {
            generator,
            template,
            records,
        } = self;
        records.iter().map(move |record| {
            let new_id = generator.generate_at(record.original_ts_ms);
            log::trace!("{} -> {}", record.legacy_id, new_id);
            template.render(&new_id, &record.legacy_id)
        })
    }

    /// Collects [`statements`](MigrationPlan::statements) into a `Vec`.
    pub fn generate_statements(&mut self) -> Vec<String> {
        self.statements().collect()
    }

    /// Writes each statement followed by a newline to `out`.
    ///
    /// Stops at the first write error; lines already written stay written.
    pub fn emit<W: io::Write>(&mut self, mut out: W) -> io::Result<()> {
        let total = self.records.len();
        for statement in self.statements() {
            writeln!(out, "{}", statement)?;
        }
        log::debug!("emitted {} statements", total);
        Ok(())
    }
}


#[cfg(feature = "serde")]
#[cfg(test)]
mod serde_tests {
    use super::{MigrationRecord, StatementTemplate};
    use serde_test::{assert_tokens, Configure, Token};

    /// Serializes record with its legacy id as text
    #[test]
    fn serializes_record_with_its_legacy_id_as_text() {
        let record = MigrationRecord::new(
            "11111111-1111-1111-1111-111111111111".parse().unwrap(),
            1_609_459_200_000,
        );
        assert_tokens(
            &record.readable(),
            &[
                Token::Struct {
                    name: "MigrationRecord",
                    len: 2,
                },
                Token::Str("legacy_id"),
                Token::String("11111111-1111-1111-1111-111111111111"),
                Token::Str("original_ts_ms"),
                Token::U64(1_609_459_200_000),
                Token::StructEnd,
            ],
        );
    }

    /// Serializes template field by field
    #[test]
    fn serializes_template_field_by_field() {
        assert_tokens(
            &StatementTemplate::default(),
            &[
                Token::Struct {
                    name: "StatementTemplate",
                    len: 3,
                },
                Token::Str("table"),
                Token::String("article"),
                Token::Str("set_column"),
                Token::String("id"),
                Token::Str("key_column"),
                Token::String("id"),
                Token::StructEnd,
            ],
        );
    }
}
