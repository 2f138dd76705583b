pub use self::error::{Error, Result};
mod error;

use std::io::{self, LineWriter, Write};
use std::path::Path;

use clap::Parser;
use cli::Cli;
use uuid7_migrate::{default_generator, input, MigrationPlan};

mod cli;
mod logging;

fn main() -> Result<()> {
    let _logger = logging::init()?;

    let stdout = io::stdout();
    if let Err(e) = run(&Cli::parse(), &mut LineWriter::new(stdout.lock())) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Writes samples or statements to `out`, one line at a time so that a failing sink keeps every
/// line completed before the failure.
fn run<W: Write>(args: &Cli, out: &mut LineWriter<W>) -> Result<()> {
    match &args.input {
        None => {
            for uuid in default_generator().take(args.count) {
                writeln!(out, "{}", uuid)?;
            }
        }
        Some(path) => {
            let records = if path == Path::new("-") {
                input::read_records(io::stdin().lock())?
            } else {
                input::read_records_from_path(path)?
            };
            log::info!("rewriting {} records into {}", records.len(), args.table);

            let mut plan = MigrationPlan::with_template(default_generator(), args.template());
            plan.register_all(records);
            plan.emit(&mut *out)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::io::{self, LineWriter, Write};

    use clap::Parser;

    use super::run;
    use crate::{cli::Cli, Error};

    /// Accepts writes until the given number of lines has been written
    struct LineLimitedSink {
        written: Vec<u8>,
        max_lines: usize,
    }

    impl Write for LineLimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let lines = self.written.iter().filter(|&&b| b == b'\n').count();
            if lines >= self.max_lines {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Delivers completed statements before a failing write
    #[test]
    fn delivers_completed_statements_before_a_failing_write() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "11111111-1111-1111-1111-111111111111,2021-01-01T00:00:00Z").unwrap();
        writeln!(file, "a1b2c3d4-e5f6-4789-8abc-def012345678,2023-11-14 22:13:20+00").unwrap();
        writeln!(file, "11111111-1111-1111-1111-111111111111,2021-01-01").unwrap();
        file.flush().unwrap();

        let args = Cli::parse_from([OsStr::new("uuid7-migrate"), file.path().as_os_str()]);
        let mut out = LineWriter::new(LineLimitedSink {
            written: Vec::new(),
            max_lines: 1,
        });

        let err = run(&args, &mut out).unwrap_err();
        assert!(matches!(&err, Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe), "{:?}", err);

        let written = String::from_utf8(out.get_ref().written.clone()).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.starts_with("UPDATE article SET id = '0176bb3e-7000-7"));
        assert!(written.ends_with("WHERE id = '11111111-1111-1111-1111-111111111111';\n"));
    }

    /// Writes requested number of samples
    #[test]
    fn writes_requested_number_of_samples() {
        let args = Cli::parse_from(["uuid7-migrate", "-n", "4"]);
        let mut out = LineWriter::new(Vec::new());
        run(&args, &mut out).unwrap();

        let written = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert_eq!(written.lines().count(), 4);
    }
}
