use thiserror::Error;

use uuid7_migrate::input::LoadError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Load::{}", .0)]
    Load(#[from] LoadError),

    #[error("IO::{:?}: {}", .0.kind(), .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),
}
