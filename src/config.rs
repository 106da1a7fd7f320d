//! Command-line configuration surface for the tilewave binary.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tilewave_core::SweepMode;

/// Default log filter applied when `RUST_LOG` is not set.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-cell collapse lines.
    Trace,
    /// Per-tick detail.
    Debug,
    /// Progress and lifecycle messages.
    #[default]
    Info,
    /// Contradictions and rule advisories only.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The `log` filter this level maps to.
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Which propagation pass the runner uses after each collapse.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepArg {
    /// In-place row-major sweep; later cells see this tick's writes.
    #[default]
    RowMajor,
    /// Snapshot-reading sweep, order-independent within a tick.
    TwoPhase,
}

impl SweepArg {
    /// The core sweep mode this flag selects.
    pub fn mode(self) -> SweepMode {
        match self {
            SweepArg::RowMajor => SweepMode::RowMajor,
            SweepArg::TwoPhase => SweepMode::TwoPhase,
        }
    }
}

/// How collapsed cells are presented.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Repaint the grid in the terminal every tick.
    #[default]
    Terminal,
    /// Run headless.
    None,
}

/// Configuration for the tilewave application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Width of the grid in cells.
    #[arg(long, default_value_t = 10)]
    pub width: usize,

    /// Height of the grid in cells.
    #[arg(long, default_value_t = 10)]
    pub height: usize,

    /// Optional seed for the collapse RNG; omit for a fresh trace every run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between solver ticks (e.g. "25ms", "1s").
    #[arg(long, value_name = "DURATION", default_value = "25ms", value_parser = humantime::parse_duration)]
    pub tick_interval: Duration,

    /// Abort after this many ticks. Defaults to ten passes over the grid.
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Propagation sweep variant.
    #[arg(long, value_enum, default_value_t = SweepArg::RowMajor)]
    pub sweep: SweepArg,

    /// Renderer for collapsed cells.
    #[arg(long, value_enum, default_value_t = RenderMode::Terminal)]
    pub render: RenderMode,

    /// One glyph per tile state, in state order. Defaults to the built-in
    /// track glyphs.
    #[arg(long)]
    pub glyphs: Option<String>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// The tick bound for this run: the explicit flag, or ten full passes
    /// over the grid as a runaway guard.
    pub fn tick_limit(&self) -> u64 {
        self.max_ticks
            .unwrap_or((self.width * self.height * 10) as u64)
    }
}
