//! Application state composition.
//!
//! `AppState` owns everything the reducer mutates and the renderer reads:
//!
//! ```text
//! AppState
//! ├── controller: SwapController  (name-swap state machine + clock)
//! ├── router: InputRouter         (device-mode input policy)
//! ├── fit: HeadlineFit            (per-entry shrink factors)
//! ├── layout: LayoutState         (hit-test rectangles, recomputed per frame)
//! ├── hover / inside_row          (pointer edge tracking)
//! └── status: StatusAccumulator   (fps for the debug line)
//! ```
//!
//! One `AppState` per mounted widget; nothing here is global.

use anyhow::Result;
use ratatui::layout::{Position, Rect};

use lineup_core::config::Config;
use lineup_core::controller::SwapController;
use lineup_core::fit::HeadlineFit;
use lineup_core::input::{self, InputRouter};
use lineup_core::roster::Roster;

/// Rectangles the renderer drew last frame, kept for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    /// Terminal size the layout was computed for.
    pub size: (u16, u16),
    /// Band of rows the headline glyphs travel through.
    pub headline: Rect,
    /// Bounding box of the whole tile row.
    pub row: Rect,
    /// One rect per tile.
    pub tiles: Vec<Rect>,
}

impl LayoutState {
    /// Which tile, if any, contains the position.
    pub fn tile_at(&self, x: u16, y: u16) -> Option<usize> {
        let pos = Position::new(x, y);
        self.tiles.iter().position(|rect| rect.contains(pos))
    }

    /// Whether the position is anywhere inside the tile row.
    pub fn in_row(&self, x: u16, y: u16) -> bool {
        self.row.contains(Position::new(x, y))
    }
}

/// Frame-rate accumulator behind the debug status line.
#[derive(Debug)]
pub struct StatusAccumulator {
    fps_ema: f32,
}

impl Default for StatusAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusAccumulator {
    pub fn new() -> Self {
        Self { fps_ema: 60.0 }
    }

    /// Update with the last frame interval (ms).
    pub fn on_frame(&mut self, frame_ms: u16) {
        let fps = if frame_ms > 0 {
            1000.0 / f32::from(frame_ms)
        } else {
            self.fps_ema
        };
        self.fps_ema += 0.1 * (fps - self.fps_ema);
    }

    pub fn fps(&self) -> f32 {
        (self.fps_ema * 10.0).round() / 10.0
    }
}

/// Combined application state for the TUI.
pub struct AppState {
    pub controller: SwapController,
    pub router: InputRouter,
    pub fit: HeadlineFit,
    pub layout: LayoutState,
    /// Tile currently under the pointer.
    pub hover: Option<usize>,
    /// Whether the pointer was inside the tile row last move.
    pub inside_row: bool,
    pub should_quit: bool,
    pub show_debug: bool,
    pub status: StatusAccumulator,
}

impl AppState {
    /// Builds the widget state. The input mode is resolved here, once;
    /// later resizes change fit and layout but never the mode.
    pub fn new(config: &Config, initial_cols: u16) -> Result<Self> {
        let roster = Roster::from_config(&config.roster)?;
        let controller = SwapController::new(&roster, config);
        let mode = input::resolve(
            config.input.mode,
            initial_cols,
            config.input.touch,
            config.input.pointer_min_cols,
        );
        tracing::info!(
            mode = mode.display_name(),
            tiles = roster.tile_count(),
            "widget mounted"
        );
        let entry_count = controller.entries().len();
        Ok(Self {
            controller,
            router: InputRouter::new(mode),
            fit: HeadlineFit::new(entry_count),
            layout: LayoutState::default(),
            hover: None,
            inside_row: false,
            should_quit: false,
            show_debug: false,
            status: StatusAccumulator::new(),
        })
    }
}
