//! Logging setup for the application.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` for the whole process.
///
/// A `RUST_LOG` environment variable wins when set; otherwise `level`
/// (normally the `--log-level` flag) becomes the default filter. Libraries
/// never initialize a logger, so this runs exactly once, from `main`.
pub fn init(level: LevelFilter) {
    let env = Env::default().filter_or("RUST_LOG", level.to_string());
    Builder::from_env(env).init();
}
