//! tilewave: drives the wave function collapse solver from a paced CLI loop
//! and paints the collapsing grid to the terminal, one tick per interval.

mod config;
mod error;
mod logging;
mod render;

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use tilewave_core::{NullRenderer, Renderer, RunnerConfig, StepRunner, WfcError};
use tilewave_rules::tracks;

use crate::config::{AppConfig, RenderMode};
use crate::error::AppError;
use crate::render::{TerminalRenderer, TRACK_GLYPHS};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let config = AppConfig::parse();
    logging::init(config.log_level.filter());
    info!(
        "tilewave starting: {}x{} grid, {:?} sweep",
        config.width, config.height, config.sweep
    );

    let tiles = tracks::tile_set();
    let rules = Arc::new(tracks::rules());
    for (state, direction, neighbor) in rules.reciprocity_violations() {
        warn!(
            "asymmetric rule: '{}' permits '{}' to its {direction}, but not the reverse",
            tiles.name(state).unwrap_or("?"),
            tiles.name(neighbor).unwrap_or("?"),
        );
    }

    let glyphs: Vec<char> = match &config.glyphs {
        Some(glyphs) => glyphs.chars().collect(),
        None => TRACK_GLYPHS.to_vec(),
    };
    let mut renderer: Box<dyn Renderer> = match config.render {
        RenderMode::Terminal => Box::new(TerminalRenderer::new(
            io::stdout(),
            glyphs,
            rules.num_states(),
        )?),
        RenderMode::None => Box::new(NullRenderer),
    };

    let runner_config = RunnerConfig {
        width: config.width,
        height: config.height,
        seed: config.seed,
        sweep: config.sweep.mode(),
    };
    let mut runner =
        StepRunner::new(rules, &runner_config).map_err(|e| AppError::Wfc(WfcError::Grid(e)))?;

    let limit = config.tick_limit();
    let mut last_report = Instant::now();
    loop {
        let report = runner.tick(renderer.as_mut()).map_err(AppError::Wfc)?;

        if last_report.elapsed() >= PROGRESS_INTERVAL {
            let percentage = (report.collapsed_cells as f32 / report.total_cells as f32) * 100.0;
            info!(
                "progress: tick {}, collapsed {}/{} ({percentage:.1}%)",
                report.iteration, report.collapsed_cells, report.total_cells
            );
            last_report = Instant::now();
        }
        if report.contradictions > 0 {
            warn!(
                "tick {} left {} contradicted cell(s); the run cannot recover",
                report.iteration, report.contradictions
            );
        }

        if report.is_complete() {
            info!(
                "grid fully collapsed: {} cells in {} tick(s)",
                report.total_cells, report.iteration
            );
            break;
        }
        if report.iteration >= limit {
            return Err(AppError::TickLimit(limit).into());
        }

        thread::sleep(config.tick_interval);
    }

    Ok(())
}
