use std::path::PathBuf;

use clap::Parser;

use uuid7_migrate::StatementTemplate;

/// Prints UUIDv7 samples, or rewrites legacy identifiers into UUIDv7 `UPDATE` statements.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// File of `<legacy uuid>,<ISO-8601 timestamp>` lines, or `-` for stdin. Prints sample
    /// UUIDs when omitted.
    pub input: Option<PathBuf>,

    /// Number of sample UUIDs printed when no input is given.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Table whose rows are rewritten.
    #[arg(long, default_value = "article")]
    pub table: String,

    /// Column that receives the new UUIDv7.
    #[arg(long, default_value = "id")]
    pub set_column: String,

    /// Column matched against the legacy identifier.
    #[arg(long, default_value = "id")]
    pub key_column: String,
}

impl Cli {
    pub fn template(&self) -> StatementTemplate {
        StatementTemplate {
            table: self.table.clone(),
            set_column: self.set_column.clone(),
            key_column: self.key_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    /// Has consistent argument definitions
    #[test]
    fn has_consistent_argument_definitions() {
        Cli::command().debug_assert();
    }

    /// Defaults to ten samples and article id columns
    #[test]
    fn defaults_to_ten_samples_and_article_id_columns() {
        let cli = Cli::parse_from(["uuid7-migrate"]);
        assert!(cli.input.is_none());
        assert_eq!(cli.count, 10);
        assert_eq!(cli.template(), uuid7_migrate::StatementTemplate::default());
    }

    /// Overrides template columns
    #[test]
    fn overrides_template_columns() {
        let cli = Cli::parse_from([
            "uuid7-migrate",
            "--table",
            "post",
            "--key-column",
            "legacy_id",
            "records.csv",
        ]);
        let template = cli.template();
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("records.csv")));
        assert_eq!(template.table, "post");
        assert_eq!(template.set_column, "id");
        assert_eq!(template.key_column, "legacy_id");
    }
}
