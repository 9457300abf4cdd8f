//! Device-mode classification and the input router.
//!
//! Classification happens once at startup; resizes change layout and fit but
//! never the mode. One router serves every mode — the mode only changes
//! which events it listens to, not what the handlers do.

use crate::config::ModeSetting;

/// Minimum terminal width in columns for pointer classification in `auto`
/// mode.
pub const POINTER_MIN_COLS: u16 = 90;

/// Resolved input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Hover drives the swap; leaving the row resets.
    Pointer,
    /// Taps toggle; tapping outside the row resets.
    Touch,
    /// Both surfaces at once.
    Hybrid,
}

impl InputMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Touch => "touch",
            InputMode::Hybrid => "hybrid",
        }
    }

    /// Whether this mode reacts to hover movement at all.
    pub fn tracks_hover(&self) -> bool {
        matches!(self, InputMode::Pointer | InputMode::Hybrid)
    }
}

/// Classifies the environment from the viewport width and the declared touch
/// capability: wide and touchless is pointer, narrow is touch, wide with
/// touch is hybrid.
pub fn classify(viewport_cols: u16, touch: bool, pointer_min_cols: u16) -> InputMode {
    match (viewport_cols >= pointer_min_cols, touch) {
        (true, false) => InputMode::Pointer,
        (true, true) => InputMode::Hybrid,
        (false, _) => InputMode::Touch,
    }
}

/// Resolves the configured mode, running classification only for `Auto`.
pub fn resolve(
    setting: ModeSetting,
    viewport_cols: u16,
    touch: bool,
    pointer_min_cols: u16,
) -> InputMode {
    match setting {
        ModeSetting::Auto => classify(viewport_cols, touch, pointer_min_cols),
        ModeSetting::Pointer => InputMode::Pointer,
        ModeSetting::Touch => InputMode::Touch,
        ModeSetting::Hybrid => InputMode::Hybrid,
    }
}

/// Input events after hit-testing, before policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The pointer moved onto a tile.
    EnterTile(usize),
    /// The pointer left a tile (but may still be over the row).
    LeaveTile(usize),
    /// The pointer left the tile row entirely.
    LeaveRow,
    /// A click/tap landed on a tile.
    TapTile(usize),
    /// A click/tap landed outside the tile row. Tile taps never surface
    /// here; they are consumed at the tile.
    TapOutside,
    /// A touch began on a tile (hybrid environments).
    TouchTile(usize),
}

/// What the widget should do in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show(usize),
    Shrink(usize),
    Reset,
}

/// Maps pointer events to actions for the resolved mode.
#[derive(Debug)]
pub struct InputRouter {
    mode: InputMode,
    /// Tile whose next synthesized hover-enter must be swallowed because a
    /// touch already handled it.
    suppress_enter: Option<usize>,
}

impl InputRouter {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            suppress_enter: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Routes one event. `active_tile` is the currently enlarged tile, used
    /// for toggle and outside-tap decisions.
    pub fn route(&mut self, event: PointerEvent, active_tile: Option<usize>) -> Option<Action> {
        match self.mode {
            InputMode::Pointer => Self::route_pointer(event),
            InputMode::Touch => Self::route_touch(event, active_tile),
            InputMode::Hybrid => self.route_hybrid(event, active_tile),
        }
    }

    fn route_pointer(event: PointerEvent) -> Option<Action> {
        match event {
            PointerEvent::EnterTile(tile) => Some(Action::Show(tile)),
            PointerEvent::LeaveTile(tile) => Some(Action::Shrink(tile)),
            PointerEvent::LeaveRow => Some(Action::Reset),
            // No tap surface in pointer mode.
            PointerEvent::TapTile(_) | PointerEvent::TapOutside | PointerEvent::TouchTile(_) => {
                None
            }
        }
    }

    fn route_touch(event: PointerEvent, active_tile: Option<usize>) -> Option<Action> {
        match event {
            PointerEvent::TapTile(tile) | PointerEvent::TouchTile(tile) => {
                Some(Self::toggle(tile, active_tile))
            }
            PointerEvent::TapOutside => active_tile.map(|_| Action::Reset),
            PointerEvent::EnterTile(_) | PointerEvent::LeaveTile(_) | PointerEvent::LeaveRow => {
                None
            }
        }
    }

    fn route_hybrid(&mut self, event: PointerEvent, active_tile: Option<usize>) -> Option<Action> {
        match event {
            PointerEvent::TouchTile(tile) => {
                // The environment will synthesize a hover-enter for the same
                // tile right after the touch; arm the guard so the toggle
                // isn't immediately undone into a double trigger.
                self.suppress_enter = Some(tile);
                Some(Self::toggle(tile, active_tile))
            }
            PointerEvent::EnterTile(tile) => {
                let suppressed = self.suppress_enter.take() == Some(tile);
                if suppressed {
                    None
                } else {
                    Some(Action::Show(tile))
                }
            }
            PointerEvent::LeaveTile(tile) => Some(Action::Shrink(tile)),
            PointerEvent::LeaveRow => {
                self.suppress_enter = None;
                Some(Action::Reset)
            }
            PointerEvent::TapOutside => {
                self.suppress_enter = None;
                active_tile.map(|_| Action::Reset)
            }
            // Plain clicks have no surface of their own in hybrid mode;
            // touches and hover cover both.
            PointerEvent::TapTile(_) => None,
        }
    }

    fn toggle(tile: usize, active_tile: Option<usize>) -> Action {
        if active_tile == Some(tile) {
            Action::Reset
        } else {
            Action::Show(tile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(120, false, POINTER_MIN_COLS), InputMode::Pointer);
        assert_eq!(classify(120, true, POINTER_MIN_COLS), InputMode::Hybrid);
        assert_eq!(classify(60, false, POINTER_MIN_COLS), InputMode::Touch);
        assert_eq!(classify(60, true, POINTER_MIN_COLS), InputMode::Touch);
        assert_eq!(classify(90, false, POINTER_MIN_COLS), InputMode::Pointer);
    }

    #[test]
    fn test_explicit_setting_skips_classification() {
        assert_eq!(
            resolve(ModeSetting::Touch, 200, false, POINTER_MIN_COLS),
            InputMode::Touch
        );
        assert_eq!(
            resolve(ModeSetting::Pointer, 40, true, POINTER_MIN_COLS),
            InputMode::Pointer
        );
        assert_eq!(
            resolve(ModeSetting::Auto, 40, true, POINTER_MIN_COLS),
            InputMode::Touch
        );
    }

    #[test]
    fn test_pointer_hover_mapping() {
        let mut router = InputRouter::new(InputMode::Pointer);
        assert_eq!(
            router.route(PointerEvent::EnterTile(2), None),
            Some(Action::Show(2))
        );
        assert_eq!(
            router.route(PointerEvent::LeaveTile(2), Some(2)),
            Some(Action::Shrink(2))
        );
        assert_eq!(
            router.route(PointerEvent::LeaveRow, Some(2)),
            Some(Action::Reset)
        );
        assert_eq!(router.route(PointerEvent::TapTile(1), None), None);
    }

    #[test]
    fn test_touch_toggle_same_tile_resets() {
        let mut router = InputRouter::new(InputMode::Touch);
        assert_eq!(
            router.route(PointerEvent::TapTile(1), None),
            Some(Action::Show(1))
        );
        assert_eq!(
            router.route(PointerEvent::TapTile(1), Some(1)),
            Some(Action::Reset)
        );
    }

    #[test]
    fn test_touch_other_tile_swaps_directly() {
        let mut router = InputRouter::new(InputMode::Touch);
        assert_eq!(
            router.route(PointerEvent::TapTile(2), Some(1)),
            Some(Action::Show(2))
        );
    }

    #[test]
    fn test_outside_tap_resets_exactly_once() {
        let mut router = InputRouter::new(InputMode::Touch);
        assert_eq!(
            router.route(PointerEvent::TapOutside, Some(1)),
            Some(Action::Reset)
        );
        // After the reset lands there is nothing active; no second reset.
        assert_eq!(router.route(PointerEvent::TapOutside, None), None);
    }

    #[test]
    fn test_touch_ignores_hover() {
        let mut router = InputRouter::new(InputMode::Touch);
        assert_eq!(router.route(PointerEvent::EnterTile(0), None), None);
        assert_eq!(router.route(PointerEvent::LeaveRow, Some(0)), None);
    }

    #[test]
    fn test_hybrid_touch_suppresses_synthesized_enter() {
        let mut router = InputRouter::new(InputMode::Hybrid);
        assert_eq!(
            router.route(PointerEvent::TouchTile(1), None),
            Some(Action::Show(1))
        );
        // The synthesized enter right after the touch is swallowed once.
        assert_eq!(router.route(PointerEvent::EnterTile(1), Some(1)), None);
        // A genuine re-enter later goes through again.
        assert_eq!(
            router.route(PointerEvent::EnterTile(1), Some(1)),
            Some(Action::Show(1))
        );
    }

    #[test]
    fn test_hybrid_suppression_is_per_tile() {
        let mut router = InputRouter::new(InputMode::Hybrid);
        router.route(PointerEvent::TouchTile(1), None);
        // Hovering a different tile is not the synthesized event.
        assert_eq!(
            router.route(PointerEvent::EnterTile(2), Some(1)),
            Some(Action::Show(2))
        );
    }

    #[test]
    fn test_hybrid_keeps_pointer_surface() {
        let mut router = InputRouter::new(InputMode::Hybrid);
        assert_eq!(
            router.route(PointerEvent::EnterTile(0), None),
            Some(Action::Show(0))
        );
        assert_eq!(
            router.route(PointerEvent::LeaveTile(0), Some(0)),
            Some(Action::Shrink(0))
        );
        assert_eq!(
            router.route(PointerEvent::LeaveRow, Some(0)),
            Some(Action::Reset)
        );
    }
}
