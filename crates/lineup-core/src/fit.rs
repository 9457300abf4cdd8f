//! Responsive headline fit.
//!
//! On startup and on every resize, each entry's natural rendered width is
//! compared against 95% of the viewport; entries that would overflow get a
//! uniform shrink factor, everything else snaps back to 1.0. Applied
//! instantly, never animated. Natural width is always computed from
//! unscaled metrics, so a previously applied scale can never leak into the
//! next measurement.

use crate::roster::NameEntry;

/// Fraction of the viewport a headline may occupy.
pub const FIT_FRACTION: f32 = 0.95;

/// Columns between adjacent glyphs at scale 1.0.
pub const LETTER_SPACING: u16 = 1;

/// Natural (unscaled) rendered width of an entry in columns: glyph display
/// widths plus the letter spacing between them.
pub fn natural_width(entry: &NameEntry, spacing: u16) -> f32 {
    let glyphs: f32 = (0..entry.glyph_count())
        .map(|g| f32::from(entry.glyph_width(g)))
        .sum();
    let gaps = entry.glyph_count().saturating_sub(1) as f32;
    glyphs + gaps * f32::from(spacing)
}

/// The shrink factor for one heading: `FIT_FRACTION * viewport / natural`
/// when the natural width overflows, exactly 1.0 otherwise.
pub fn fit_scale(natural: f32, viewport: f32) -> f32 {
    let limit = viewport * FIT_FRACTION;
    if natural > limit { limit / natural } else { 1.0 }
}

/// Per-entry scale factors, recomputed as a whole on every resize.
#[derive(Debug, Clone)]
pub struct HeadlineFit {
    scales: Vec<f32>,
}

impl HeadlineFit {
    pub fn new(entry_count: usize) -> Self {
        Self {
            scales: vec![1.0; entry_count],
        }
    }

    /// Re-measures every entry against the viewport width.
    pub fn refit(&mut self, entries: &[NameEntry], viewport_cols: u16) {
        let viewport = f32::from(viewport_cols);
        for (slot, entry) in self.scales.iter_mut().zip(entries) {
            *slot = fit_scale(natural_width(entry, LETTER_SPACING), viewport);
        }
    }

    pub fn scale(&self, entry: usize) -> f32 {
        self.scales.get(entry).copied().unwrap_or(1.0)
    }
}
