#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Catchball adapters.
//!
//! Backends receive a [`RenderSnapshot`] after every throw and decide how to
//! show it. Two backends ship with the crate: [`TextPlot`] draws the figure
//! as characters and [`JsonLines`] streams snapshots for other tools.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use catchball_core::{EncounterState, Point, RenderSnapshot};
use glam::DVec2;
use thiserror::Error;

/// Lower-left corner of the figure the game is drawn on, in world units.
pub const FIGURE_MIN: DVec2 = DVec2::new(0.0, 0.0);
/// Upper-right corner of the figure the game is drawn on, in world units.
pub const FIGURE_MAX: DVec2 = DVec2::new(1000.0, 1200.0);

const BALL_GLYPH: char = '.';
const TARGET_GLYPH: char = '@';
const EMPTY_GLYPH: char = ' ';

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// A viewport needs at least one column and one row.
    #[error("viewport must span at least one cell (received {columns}x{rows})")]
    EmptyGrid {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
    },
    /// The world rectangle had no area.
    #[error("viewport world bounds must have a positive area")]
    DegenerateBounds,
}

/// Maps world coordinates onto a grid of character cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    min: DVec2,
    max: DVec2,
    columns: usize,
    rows: usize,
}

impl Viewport {
    /// Creates a viewport covering the provided world rectangle.
    pub fn new(
        min: DVec2,
        max: DVec2,
        columns: usize,
        rows: usize,
    ) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }
        if !max.cmpgt(min).all() {
            return Err(RenderingError::DegenerateBounds);
        }

        Ok(Self {
            min,
            max,
            columns,
            rows,
        })
    }

    /// Creates a viewport covering the whole game figure.
    pub fn figure(columns: usize, rows: usize) -> Result<Self, RenderingError> {
        Self::new(FIGURE_MIN, FIGURE_MAX, columns, rows)
    }

    /// Number of character columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of character rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Cell `(column, row)` containing the point, with row zero at the top.
    ///
    /// Points outside the world rectangle have no cell.
    #[must_use]
    pub fn cell_for(&self, point: Point) -> Option<(usize, usize)> {
        let normalized = (DVec2::new(point.x, point.y) - self.min) / (self.max - self.min);
        if !normalized.cmpge(DVec2::ZERO).all() || !normalized.cmple(DVec2::ONE).all() {
            return None;
        }

        let column = ((normalized.x * self.columns as f64) as usize).min(self.columns - 1);
        let row_from_bottom = ((normalized.y * self.rows as f64) as usize).min(self.rows - 1);
        Some((column, self.rows - 1 - row_from_bottom))
    }
}

/// Draws the snapshot into text rows, top row first.
///
/// The target is drawn after the ball so it stays visible when they overlap.
#[must_use]
pub fn rasterize(viewport: &Viewport, snapshot: &RenderSnapshot) -> Vec<String> {
    let mut grid = vec![vec![EMPTY_GLYPH; viewport.columns()]; viewport.rows()];
    let mut plot = |point: Point, glyph: char| {
        if let Some((column, row)) = viewport.cell_for(point) {
            grid[row][column] = glyph;
        }
    };

    for point in snapshot.ball_path.points() {
        plot(*point, BALL_GLYPH);
    }
    plot(snapshot.target_position, TARGET_GLYPH);

    grid.into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

/// Human readable name of an encounter state.
#[must_use]
pub const fn state_label(state: EncounterState) -> &'static str {
    match state {
        EncounterState::Active => "active",
        EncounterState::Hit => "caught",
        EncounterState::Escaped => "escaped",
    }
}

/// Rendering backend capable of presenting Catchball snapshots.
pub trait RenderingBackend {
    /// Presents the outcome of the latest throw.
    fn present(&mut self, snapshot: &RenderSnapshot) -> AnyResult<()>;
}

/// Backend that draws snapshots as framed character plots.
#[derive(Debug)]
pub struct TextPlot<W: Write> {
    viewport: Viewport,
    out: W,
}

impl<W: Write> TextPlot<W> {
    /// Creates a text plot writing to the provided sink.
    #[must_use]
    pub fn new(viewport: Viewport, out: W) -> Self {
        Self { viewport, out }
    }

    /// Consumes the backend, yielding the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextPlot<W> {
    fn present(&mut self, snapshot: &RenderSnapshot) -> AnyResult<()> {
        let border = format!("+{}+", "-".repeat(self.viewport.columns()));
        writeln!(
            self.out,
            "{} ({}) at {:.1}x{:.1}, sprite {}",
            snapshot.creature,
            state_label(snapshot.state),
            snapshot.target_position.x,
            snapshot.target_position.y,
            snapshot.sprite.url
        )
        .context("failed to write plot header")?;
        writeln!(self.out, "{border}").context("failed to write plot border")?;
        for row in rasterize(&self.viewport, snapshot) {
            writeln!(self.out, "|{row}|").context("failed to write plot row")?;
        }
        writeln!(self.out, "{border}").context("failed to write plot border")?;
        self.out.flush().context("failed to flush plot")
    }
}

/// Backend that writes every snapshot as one JSON object per line.
#[derive(Debug)]
pub struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> JsonLines<W> {
    /// Creates a JSON lines backend writing to the provided sink.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the backend, yielding the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for JsonLines<W> {
    fn present(&mut self, snapshot: &RenderSnapshot) -> AnyResult<()> {
        serde_json::to_writer(&mut self.out, snapshot).context("failed to encode snapshot")?;
        writeln!(self.out).context("failed to terminate snapshot line")?;
        self.out.flush().context("failed to flush snapshot")
    }
}
