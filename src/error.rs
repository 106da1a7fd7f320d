//! Application-level errors for the tilewave binary.

use thiserror::Error;
use tilewave_core::WfcError;

/// Errors the tilewave binary can exit with.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad command-line configuration, caught before the run starts.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The safety bound on ticks was hit before the grid collapsed.
    #[error("Tick limit of {0} reached before the grid collapsed")]
    TickLimit(u64),

    /// A solver tick failed.
    #[error("Solver error: {0}")]
    Wfc(#[from] WfcError),
}
