//! Tween math for the name swap.
//!
//! The pieces here are deliberately small: an easing curve, a pose (vertical
//! offset + opacity), a delayed tween over poses or widths, the
//! center-outward stagger, and a `Transition` grouping the tracks of one name
//! swap into a time-aligned whole. Nothing in this module owns a clock;
//! callers sample with an elapsed `Duration`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interpolation curves.
///
/// `OutQuart` is the house curve; `OutBack` briefly exceeds 1.0 on its way
/// to settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Fast start, long deceleration: `1 - (1-t)^4`.
    #[default]
    OutQuart,
    /// Smooth S-curve.
    InOutCubic,
    /// Slight overshoot, then settle. Output can exceed 1.0.
    OutBack,
}

impl Easing {
    /// Applies the curve to a progress value. Input is clamped to 0..=1;
    /// `OutBack` output can leave that range.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutQuart => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv
            }
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Easing::OutBack => {
                let c1 = 1.701_58;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::OutQuart => "out-quart",
            Easing::InOutCubic => "in-out-cubic",
            Easing::OutBack => "out-back",
        }
    }
}

/// Visual state of one glyph: vertical travel in percent of glyph height
/// (positive is below center) and opacity in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset_percent: f32,
    pub opacity: f32,
}

impl Pose {
    /// Fully shown: centered and opaque.
    pub const CENTERED: Pose = Pose {
        offset_percent: 0.0,
        opacity: 1.0,
    };

    /// Fully hidden at the given offset.
    pub fn hidden(offset_percent: f32) -> Pose {
        Pose {
            offset_percent,
            opacity: 0.0,
        }
    }

    fn lerp(from: Pose, to: Pose, t: f32) -> Pose {
        Pose {
            offset_percent: from.offset_percent + (to.offset_percent - from.offset_percent) * t,
            opacity: from.opacity + (to.opacity - from.opacity) * t,
        }
    }

    /// True once the glyph is effectively invisible.
    pub fn is_hidden(&self) -> bool {
        self.opacity <= f32::EPSILON
    }
}

/// A delayed tween between two poses.
#[derive(Debug, Clone)]
pub struct PoseTween {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub from: Pose,
    pub to: Pose,
}

impl PoseTween {
    /// Samples the tween: holds `from` before the delay, holds `to` after
    /// the window, eases in between.
    pub fn sample(&self, elapsed: Duration) -> Pose {
        match progress(elapsed, self.delay, self.duration) {
            Progress::Before => self.from,
            Progress::After => self.to,
            Progress::At(t) => Pose::lerp(self.from, self.to, self.easing.apply(t)),
        }
    }

    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }
}

/// A delayed tween between two tile widths (columns, fractional while in
/// flight).
#[derive(Debug, Clone)]
pub struct WidthTween {
    pub duration: Duration,
    pub easing: Easing,
    pub from: f32,
    pub to: f32,
}

impl WidthTween {
    pub fn sample(&self, elapsed: Duration) -> f32 {
        match progress(elapsed, Duration::ZERO, self.duration) {
            Progress::Before => self.from,
            Progress::After => self.to,
            Progress::At(t) => self.from + (self.to - self.from) * self.easing.apply(t),
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

enum Progress {
    Before,
    At(f32),
    After,
}

fn progress(elapsed: Duration, delay: Duration, duration: Duration) -> Progress {
    if elapsed < delay {
        return Progress::Before;
    }
    let into = elapsed - delay;
    if into >= duration {
        return Progress::After;
    }
    // duration > into >= 0 here, so the division is sound
    Progress::At(into.as_secs_f32() / duration.as_secs_f32())
}

/// Per-glyph start delays, ordered outward from the horizontal center.
///
/// The glyph nearest the middle starts first; delays grow with distance from
/// the center index. This ordering is invariant; only the interval is
/// tunable.
pub fn stagger_delays(len: usize, interval: Duration) -> Vec<Duration> {
    if len == 0 {
        return Vec::new();
    }
    let center = (len - 1) as f32 / 2.0;
    (0..len)
        .map(|i| interval.mul_f32((i as f32 - center).abs()))
        .collect()
}

/// All tracks of one name swap: the exiting glyph set, the entering glyph
/// set, and the tile resizes, on one shared clock.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Entry whose glyphs are leaving.
    pub exit_entry: usize,
    /// Entry whose glyphs are arriving.
    pub enter_entry: usize,
    /// One track per glyph of `exit_entry`.
    pub exit: Vec<PoseTween>,
    /// One track per glyph of `enter_entry`.
    pub enter: Vec<PoseTween>,
    /// Tile resizes, keyed by tile index.
    pub tiles: Vec<(usize, WidthTween)>,
    total: Duration,
}

impl Transition {
    pub fn new(
        exit_entry: usize,
        enter_entry: usize,
        exit: Vec<PoseTween>,
        enter: Vec<PoseTween>,
        tiles: Vec<(usize, WidthTween)>,
    ) -> Self {
        let total = exit
            .iter()
            .chain(enter.iter())
            .map(PoseTween::end)
            .chain(tiles.iter().map(|(_, t)| t.duration))
            .max()
            .unwrap_or(Duration::ZERO);
        Self {
            exit_entry,
            enter_entry,
            exit,
            enter,
            tiles,
            total,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total
    }

    /// Samples a glyph of either animated entry; `None` for bystanders.
    pub fn glyph_pose(&self, entry: usize, glyph: usize, elapsed: Duration) -> Option<Pose> {
        let tracks = if entry == self.exit_entry {
            &self.exit
        } else if entry == self.enter_entry {
            &self.enter
        } else {
            return None;
        };
        tracks.get(glyph).map(|t| t.sample(elapsed))
    }

    /// Samples a tile's width; `None` when this transition doesn't move it.
    pub fn tile_width(&self, tile: usize, elapsed: Duration) -> Option<f32> {
        self.tiles
            .iter()
            .find(|(i, _)| *i == tile)
            .map(|(_, t)| t.sample(elapsed))
    }
}
