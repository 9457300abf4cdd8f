//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference and draw to a
//! ratatui Frame; they never mutate state or return effects. Layout
//! computation also lives here so the reducer and the renderer agree on the
//! same rectangles.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use lineup_core::fit::LETTER_SPACING;
use lineup_core::roster::{NameEntry, tile_entry};

use crate::state::{AppState, LayoutState};

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Rows the headline glyphs travel through. Odd so there is a center row.
const HEADLINE_ROWS: u16 = 5;

/// Blank rows between the headline band and the tile row.
const ROW_GAP: u16 = 1;

/// Columns between adjacent tiles.
const TILE_GAP: u16 = 2;

/// Tiles never render shorter than this.
const MIN_TILE_HEIGHT: u16 = 3;

/// Glyphs dimmer than this are not drawn at all.
const MIN_VISIBLE_OPACITY: f32 = 0.02;

const HEADLINE_RGB: (u8, u8, u8) = (235, 235, 235);
const BACKDROP_RGB: (u8, u8, u8) = (0, 0, 0);
const ACCENT_RGB: (u8, u8, u8) = (255, 199, 119);
const FRAME_RGB: (u8, u8, u8) = (110, 110, 110);

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    render_headline(app, frame);
    render_tiles(app, frame);
    render_status(app, frame, area);
}

/// Computes the layout for the given terminal size and current tile widths.
///
/// Called from the reducer on every `Frame` event; the returned rectangles
/// are also what mouse hit-testing runs against, so hover tracks the tiles
/// even mid-resize.
pub fn compute_layout(width: u16, height: u16, tile_widths: &[f32]) -> LayoutState {
    let row_height = tile_widths
        .iter()
        .map(|w| tile_height(*w))
        .max()
        .unwrap_or(MIN_TILE_HEIGHT);

    let content_height = HEADLINE_ROWS + ROW_GAP + row_height;
    let usable = height.saturating_sub(STATUS_HEIGHT);
    let top = usable.saturating_sub(content_height) / 2;

    let headline = Rect::new(0, top, width, HEADLINE_ROWS.min(usable));

    let widths: Vec<u16> = tile_widths
        .iter()
        .map(|w| (w.round() as u16).max(2))
        .collect();
    let total: u16 = widths.iter().sum::<u16>()
        + TILE_GAP * widths.len().saturating_sub(1) as u16;
    let row_y = (top + HEADLINE_ROWS + ROW_GAP).min(usable);
    let start_x = width.saturating_sub(total) / 2;

    let mut tiles = Vec::with_capacity(widths.len());
    let mut x = start_x;
    for w in &widths {
        let h = tile_height(f32::from(*w));
        // Bottom-aligned on the row baseline, like a shelf.
        let y = row_y + row_height.saturating_sub(h);
        tiles.push(Rect::new(x, y, *w, h));
        x = x.saturating_add(*w + TILE_GAP);
    }

    LayoutState {
        size: (width, height),
        headline,
        row: Rect::new(start_x, row_y, total, row_height),
        tiles,
    }
}

/// Tile height for a width: terminal cells are roughly twice as tall as
/// wide, so a 2:1 box reads square.
fn tile_height(width: f32) -> u16 {
    ((width / 2.0).round() as u16).max(MIN_TILE_HEIGHT)
}

fn render_headline(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let band = app.layout.headline;
    if band.height == 0 || band.width == 0 {
        return;
    }
    let center_y = i32::from(band.y) + i32::from(band.height / 2);
    let half_rows = f32::from(band.height / 2).max(1.0);

    for entry in app.controller.entries() {
        let advance_gap = scaled_gap(app.fit.scale(entry.index));
        let total = entry_render_width(entry, advance_gap);
        let mut x = i32::from(band.x) + i32::from(band.width.saturating_sub(total)) / 2;

        for glyph in 0..entry.glyph_count() {
            let width = entry.glyph_width(glyph);
            let pose = app.controller.glyph_pose(entry.index, glyph);
            if pose.opacity > MIN_VISIBLE_OPACITY {
                let row_offset = (pose.offset_percent / 100.0 * half_rows).round() as i32;
                let y = center_y + row_offset;
                // Layout can briefly lag the terminal during a resize; clip
                // against the live frame area, not just the band.
                if row_offset.abs() <= half_rows as i32
                    && y >= i32::from(band.y)
                    && y < i32::from(band.y + band.height)
                    && y < i32::from(area.height)
                    && x >= 0
                    && x + i32::from(width) <= i32::from(area.width)
                {
                    let style = Style::default()
                        .fg(blend(HEADLINE_RGB, BACKDROP_RGB, pose.opacity))
                        .add_modifier(Modifier::BOLD);
                    frame
                        .buffer_mut()
                        .set_string(x as u16, y as u16, &entry.glyphs[glyph], style);
                }
            }
            x += i32::from(width + advance_gap);
        }
    }
}

fn render_tiles(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    for (tile, rect) in app.layout.tiles.iter().enumerate() {
        // Clip against the live frame area; layout can lag one resize.
        let rect = &rect.intersection(area);
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let active = app.controller.active_tile() == Some(tile);
        let frame_color = if active {
            rgb(ACCENT_RGB)
        } else {
            rgb(FRAME_RGB)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(frame_color));
        frame.render_widget(block, *rect);

        // Initials, centered in the tile interior.
        let entry = &app.controller.entries()[tile_entry(tile)];
        let label = initials(&entry.name);
        let inner_width = rect.width - 2;
        let label_width = label.chars().count() as u16;
        if label_width <= inner_width {
            let x = rect.x + 1 + (inner_width - label_width) / 2;
            let y = rect.y + rect.height / 2;
            let style = Style::default().fg(frame_color).add_modifier(Modifier::BOLD);
            frame.buffer_mut().set_string(x, y, &label, style);
        }
    }
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let status_area = Rect::new(
        area.x,
        area.y + area.height - STATUS_HEIGHT,
        area.width,
        STATUS_HEIGHT,
    );

    let shown = &app.controller.entries()[app.controller.active_entry()].name;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.router.mode().display_name()),
            Style::default().fg(rgb(ACCENT_RGB)),
        ),
        Span::raw("· "),
        Span::raw(shown.clone()),
    ];
    if app.show_debug {
        spans.push(Span::styled(
            format!("  ·  {:.1} fps", app.status.fps()),
            Style::default().fg(rgb(FRAME_RGB)),
        ));
    }
    spans.push(Span::styled(
        "  ·  q quits",
        Style::default().fg(rgb(FRAME_RGB)),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), status_area);
}

/// Letter gap after applying the fit scale; condenses as the scale drops.
fn scaled_gap(scale: f32) -> u16 {
    (f32::from(LETTER_SPACING) * scale).round() as u16
}

fn entry_render_width(entry: &NameEntry, gap: u16) -> u16 {
    let glyphs: u16 = (0..entry.glyph_count()).map(|g| entry.glyph_width(g)).sum();
    glyphs + gap * entry.glyph_count().saturating_sub(1) as u16
}

/// First letter of up to two words, uppercased.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear blend of `fg` toward `bg`; `t` = 1 keeps the foreground.
fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(b) + (f32::from(a) - f32::from(b)) * t) as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((200, 100, 50), (0, 0, 0), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend((200, 100, 50), (0, 0, 0), 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_blend_midpoint() {
        assert_eq!(blend((100, 100, 100), (0, 0, 0), 0.5), Color::Rgb(50, 50, 50));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("Jean van der Berg"), "JV");
    }

    #[test]
    fn test_compute_layout_centers_row() {
        let layout = compute_layout(100, 30, &[8.0, 8.0, 8.0]);
        assert_eq!(layout.size, (100, 30));
        assert_eq!(layout.tiles.len(), 3);
        // 3 tiles of 8 plus 2 gaps of 2.
        assert_eq!(layout.row.width, 28);
        assert_eq!(layout.row.x, 36);
        // Headline band sits above the row.
        assert!(layout.headline.y < layout.row.y);
        assert_eq!(layout.headline.height, HEADLINE_ROWS);
    }

    #[test]
    fn test_compute_layout_grows_with_tile() {
        let resting = compute_layout(100, 30, &[8.0, 8.0]);
        let enlarged = compute_layout(100, 30, &[16.0, 8.0]);
        assert!(enlarged.tiles[0].width > resting.tiles[0].width);
        assert!(enlarged.tiles[0].height > resting.tiles[0].height);
        // The smaller tile stays on the shared baseline.
        let baseline = |r: &Rect| r.y + r.height;
        assert_eq!(
            baseline(&enlarged.tiles[0]),
            baseline(&enlarged.tiles[1])
        );
    }

    #[test]
    fn test_compute_layout_survives_tiny_terminal() {
        let layout = compute_layout(10, 4, &[8.0, 8.0, 8.0, 8.0]);
        assert_eq!(layout.tiles.len(), 4);
        // Nothing panics; rects are clamped, not meaningful.
        assert!(layout.headline.height <= 4);
    }
}
