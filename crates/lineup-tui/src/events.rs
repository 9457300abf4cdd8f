//! UI event types.
//!
//! Everything the reducer can react to arrives as one of these. The runtime
//! is the only producer.

use std::time::Duration;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Animation clock tick. `dt` is the time since the previous tick.
    Tick { dt: Duration },
    /// Emitted once per loop iteration with the current terminal size,
    /// before other events, so layout is fresh when they hit-test.
    Frame { width: u16, height: u16 },
    /// A raw terminal event (key, mouse, resize).
    Terminal(crossterm::event::Event),
}
