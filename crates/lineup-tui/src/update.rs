//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Raw mouse coordinates are hit-tested against the layout and turned into
//! the core `PointerEvent`s; the router decides what they mean for the
//! resolved mode, and the controller applies the result.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use lineup_core::input::{Action, InputMode, PointerEvent};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick { dt } => {
            app.controller.advance(dt);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
    }
}

/// Refreshes fit and layout for the current terminal size. Runs before the
/// other events of the iteration so their hit-tests see fresh rectangles.
fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    if app.layout.size != (width, height) {
        app.fit.refit(app.controller.entries(), width);
    }
    let widths: Vec<f32> = (0..app.controller.tile_count())
        .map(|tile| app.controller.tile_width(tile))
        .collect();
    app.layout = render::compute_layout(width, height, &widths);
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(_, _) => {
            // Force refit on the next Frame; mode classification is not
            // re-run on resize.
            app.layout.size = (0, 0);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![UiEffect::Quit]
        }
        KeyCode::Char('d') => {
            app.show_debug = !app.show_debug;
            vec![]
        }
        // Keyboard surface: digits pick a member directly, 0 resets.
        KeyCode::Char('0') => {
            app.controller.reset_to_default();
            vec![]
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let tile = (c as usize) - ('1' as usize);
            if tile < app.controller.tile_count() {
                app.controller.show_member(tile);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            if app.router.mode().tracks_hover() {
                handle_hover(app, mouse.column, mouse.row);
            }
            vec![]
        }
        MouseEventKind::Down(MouseButton::Left) => {
            handle_press(app, mouse.column, mouse.row);
            vec![]
        }
        _ => vec![],
    }
}

/// Turns pointer motion into enter/leave edges.
fn handle_hover(app: &mut AppState, x: u16, y: u16) {
    let tile = app.layout.tile_at(x, y);
    let inside = app.layout.in_row(x, y);

    if tile != app.hover {
        if let Some(prev) = app.hover {
            dispatch(app, PointerEvent::LeaveTile(prev));
        }
        if let Some(next) = tile {
            dispatch(app, PointerEvent::EnterTile(next));
        }
        app.hover = tile;
    }
    if app.inside_row && !inside {
        dispatch(app, PointerEvent::LeaveRow);
    }
    app.inside_row = inside;
}

fn handle_press(app: &mut AppState, x: u16, y: u16) {
    let event = match app.layout.tile_at(x, y) {
        // In hybrid environments a press on a tile is the touch surface.
        Some(tile) if app.router.mode() == InputMode::Hybrid => PointerEvent::TouchTile(tile),
        Some(tile) => PointerEvent::TapTile(tile),
        None => PointerEvent::TapOutside,
    };
    dispatch(app, event);
}

fn dispatch(app: &mut AppState, event: PointerEvent) {
    let active = app.controller.active_tile();
    if let Some(action) = app.router.route(event, active) {
        apply(app, action);
    }
}

fn apply(app: &mut AppState, action: Action) {
    match action {
        Action::Show(tile) => {
            app.controller.show_member(tile);
        }
        Action::Shrink(tile) => app.controller.shrink_tile(tile),
        Action::Reset => {
            app.controller.reset_to_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use lineup_core::config::{Config, ModeSetting};

    fn test_config(mode: ModeSetting) -> Config {
        let mut config = Config::default();
        config.input.mode = mode;
        config.roster.members = vec![
            "Ana".to_string(),
            "Bruno".to_string(),
            "Cleo".to_string(),
        ];
        config
    }

    fn app(mode: ModeSetting) -> AppState {
        let mut app = AppState::new(&test_config(mode), 120).unwrap();
        // One Frame so layout rectangles exist for hit-testing.
        update(&mut app, UiEvent::Frame { width: 120, height: 40 });
        app
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::empty(),
        }))
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::empty())))
    }

    fn tile_center(app: &AppState, tile: usize) -> (u16, u16) {
        let rect = app.layout.tiles[tile];
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    fn settle(app: &mut AppState) {
        update(app, UiEvent::Tick { dt: Duration::from_secs(5) });
        assert!(!app.controller.is_transitioning());
    }

    #[test]
    fn test_hover_starts_a_swap() {
        let mut app = app(ModeSetting::Pointer);
        let (x, y) = tile_center(&app, 0);
        update(&mut app, mouse(MouseEventKind::Moved, x, y));
        assert_eq!(app.controller.active_tile(), Some(0));
        assert!(app.controller.is_transitioning());
    }

    #[test]
    fn test_leaving_the_row_resets() {
        let mut app = app(ModeSetting::Pointer);
        let (x, y) = tile_center(&app, 1);
        update(&mut app, mouse(MouseEventKind::Moved, x, y));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 2);

        // Move far above the row.
        update(&mut app, mouse(MouseEventKind::Moved, x, 0));
        assert!(app.controller.is_transitioning());
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 0);
        assert_eq!(app.controller.active_tile(), None);
    }

    #[test]
    fn test_touch_mode_ignores_hover() {
        let mut app = app(ModeSetting::Touch);
        let (x, y) = tile_center(&app, 0);
        update(&mut app, mouse(MouseEventKind::Moved, x, y));
        assert_eq!(app.controller.active_tile(), None);
        assert!(!app.controller.is_transitioning());
    }

    #[test]
    fn test_tap_toggles_in_touch_mode() {
        let mut app = app(ModeSetting::Touch);
        let (x, y) = tile_center(&app, 2);
        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 3);

        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 0);
    }

    #[test]
    fn test_outside_tap_resets_in_touch_mode() {
        let mut app = app(ModeSetting::Touch);
        let (x, y) = tile_center(&app, 0);
        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 1);

        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(ModeSetting::Pointer);
        assert_eq!(update(&mut app, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);
        assert_eq!(update(&mut app, key(KeyCode::Esc)), vec![UiEffect::Quit]);
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut app, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_digit_selects_member() {
        let mut app = app(ModeSetting::Pointer);
        update(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.controller.active_tile(), Some(1));
        settle(&mut app);
        update(&mut app, key(KeyCode::Char('0')));
        settle(&mut app);
        assert_eq!(app.controller.active_entry(), 0);
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        let mut app = app(ModeSetting::Pointer);
        update(&mut app, key(KeyCode::Char('9')));
        assert_eq!(app.controller.active_tile(), None);
    }

    #[test]
    fn test_resize_forces_relayout_and_refit() {
        let mut app = app(ModeSetting::Pointer);
        update(&mut app, UiEvent::Terminal(Event::Resize(60, 20)));
        assert_eq!(app.layout.size, (0, 0));
        update(&mut app, UiEvent::Frame { width: 60, height: 20 });
        assert_eq!(app.layout.size, (60, 20));
    }

    #[test]
    fn test_hover_edge_only_fires_once() {
        let mut app = app(ModeSetting::Pointer);
        let (x, y) = tile_center(&app, 0);
        update(&mut app, mouse(MouseEventKind::Moved, x, y));
        settle(&mut app);
        // Wiggling inside the same tile must not retrigger the swap.
        update(&mut app, mouse(MouseEventKind::Moved, x + 1, y));
        assert!(!app.controller.is_transitioning());
    }
}
