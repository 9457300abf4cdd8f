//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! The reducer stays pure and produces effects; this module executes them.
//! The loop is synchronous: crossterm's `poll` doubles as the frame timer,
//! waking early for input and otherwise sleeping until the next tick is due.
//! Ticks drive the animation clock, so the poll interval drops to frame
//! cadence while anything is moving and relaxes when the widget is settled.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use lineup_core::config::Config;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while animating (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when settled (no animation, no recent input).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop, panic,
/// and quit.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a render occurred (for FPS calculation).
    last_render: Instant,
    /// Last time a terminal event was received (for fast tick during
    /// interaction).
    last_input: Instant,
}

impl Runtime {
    /// Creates the runtime: panic hook, terminal setup, widget state.
    pub fn new(config: &Config) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let size = terminal.size().context("Failed to read terminal size")?;
        let state = match AppState::new(config, size.width) {
            Ok(state) => state,
            Err(e) => {
                // Leave the terminal usable before surfacing the error.
                let _ = terminal::restore_terminal();
                return Err(e);
            }
        };

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            last_tick: now,
            last_render: now,
            last_input: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse_capture()?;

        let result = self.event_loop();

        let _ = terminal::disable_mouse_capture();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Prepend Frame with the current terminal size so layout and
            // hit-testing are fresh before other events are reduced.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                // Track input activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_input = Instant::now();
                }

                // Only Tick triggers a render - this caps the frame rate at
                // tick cadence; input events batch into the next frame.
                let marks_dirty = matches!(&event, UiEvent::Tick { .. });

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                let frame_ms = self.last_render.elapsed().as_millis() as u16;
                self.last_render = Instant::now();

                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                self.state.status.on_frame(frame_ms);
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects terminal events, blocking at most until the next tick is
    /// due, and emits the Tick itself.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast cadence while a transition or tile tween is in flight, or
        // right after input (hover edges come in bursts). Idle otherwise.
        let recent_input = self.last_input.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.controller.is_animating() || recent_input {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until the next tick is due; wake early for input.
        let poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        let since_tick = self.last_tick.elapsed();
        if since_tick >= tick_interval {
            events.push(UiEvent::Tick { dt: since_tick });
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Quit => self.state.should_quit = true,
            }
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
