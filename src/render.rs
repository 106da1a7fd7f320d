//! Terminal presentation of collapsed cells.

use std::io::Write;

use colored::{Color, Colorize};
use tilewave_core::{Frame, RenderError, Renderer};

use crate::error::AppError;

/// Default glyphs for the built-in track tileset, in state order:
/// blank, up, right, down, left.
pub const TRACK_GLYPHS: [char; 5] = [' ', '┴', '├', '┬', '┤'];

/// Foreground colors cycled over by state index.
const PALETTE: [Color; 5] = [
    Color::White,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
];

/// Repaints the whole grid into `out` each frame: one colored glyph per
/// collapsed cell, a dim dot for cells still open.
///
/// Generic over the sink so tests can render into a `Vec<u8>` while the
/// binary writes to stdout.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    glyphs: Vec<char>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer drawing with the given glyph table.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the table does not supply exactly
    /// one glyph per tile state.
    pub fn new(out: W, glyphs: Vec<char>, num_states: usize) -> Result<Self, AppError> {
        if glyphs.len() != num_states {
            return Err(AppError::Config(format!(
                "expected {num_states} glyphs, one per tile state, got {}",
                glyphs.len()
            )));
        }
        Ok(Self { out, glyphs })
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let io_err = |e: std::io::Error| RenderError(e.to_string());

        let placeholder = "·".dimmed().to_string();
        let mut rows = vec![vec![placeholder; frame.width]; frame.height];
        for cell in frame.cells {
            let glyph = self
                .glyphs
                .get(cell.state.0)
                .ok_or_else(|| RenderError(format!("no glyph for tile state {}", cell.state)))?;
            let color = PALETTE[cell.state.0 % PALETTE.len()];
            rows[cell.row][cell.col] = glyph.to_string().color(color).to_string();
        }

        // Home the cursor and clear before repainting the full grid.
        write!(self.out, "\x1b[2J\x1b[H").map_err(io_err)?;
        for row in rows {
            writeln!(self.out, "{}", row.concat()).map_err(io_err)?;
        }
        self.out.flush().map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewave_core::RenderCell;
    use tilewave_rules::TileState;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn glyph_table_must_match_state_count() {
        let err = TerminalRenderer::new(Vec::new(), vec!['a', 'b'], 5).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(TerminalRenderer::new(Vec::new(), TRACK_GLYPHS.to_vec(), 5).is_ok());
    }

    #[test]
    fn collapsed_cells_paint_their_glyph() {
        plain();
        let mut renderer = TerminalRenderer::new(Vec::new(), TRACK_GLYPHS.to_vec(), 5).unwrap();
        let cells = [RenderCell {
            row: 0,
            col: 1,
            state: TileState(1),
        }];
        let frame = Frame {
            width: 2,
            height: 1,
            cells: &cells,
        };
        renderer.render(&frame).unwrap();

        let painted = String::from_utf8(renderer.out).unwrap();
        assert!(painted.contains('┴'), "missing glyph in {painted:?}");
        assert!(painted.contains('·'), "missing open-cell dot in {painted:?}");
    }

    #[test]
    fn unknown_state_in_a_frame_is_a_render_error() {
        plain();
        let mut renderer = TerminalRenderer::new(Vec::new(), vec![' ', 'x'], 2).unwrap();
        let cells = [RenderCell {
            row: 0,
            col: 0,
            state: TileState(9),
        }];
        let frame = Frame {
            width: 1,
            height: 1,
            cells: &cells,
        };
        let err = renderer.render(&frame).unwrap_err();
        assert!(err.0.contains("no glyph"));
    }
}
