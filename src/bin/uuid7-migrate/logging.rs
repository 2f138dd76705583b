use flexi_logger::{DeferredNow, Logger, LoggerHandle};
use log::Record;

use crate::Error;

/// Starts logging to stderr, filtered by `RUST_LOG` (default `info`), so that stdout carries only
/// generated output.
pub fn init() -> Result<LoggerHandle, Error> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(cli_format)
        .log_to_stderr()
        .start()?;

    Ok(handle)
}

fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(w, "[{}] {}", record.level(), record.args())
}
