//! Full-screen TUI for the lineup roster widget.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::Runtime;

use lineup_core::config::Config;

/// Runs the widget until the user quits.
pub fn run(config: &Config) -> Result<()> {
    // The widget requires a terminal to render and to capture the mouse
    if !stderr().is_terminal() {
        anyhow::bail!("lineup requires a terminal");
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "lineup")?;
    writeln!(
        err,
        "Roster: {} ({} members)",
        config.roster.title,
        config.roster.members.len()
    )?;
    err.flush()?;

    let mut runtime = Runtime::new(config)?;
    runtime.run()?;

    // Print goodbye after the TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
