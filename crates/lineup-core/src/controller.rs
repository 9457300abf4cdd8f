//! The name-swap state machine.
//!
//! One `SwapController` instance owns the display state for one mounted
//! widget: which entry is shown, which tile is enlarged, and the single
//! in-flight transition. All mutations happen through `show_member`,
//! `reset_to_default`, `shrink_tile`, and `advance`; the renderer only
//! samples poses and widths.
//!
//! A transition request while another is in flight is rejected, not queued.
//! Requesting the already-active target is a silent no-op.

use std::time::Duration;

use crate::config::{Config, MotionConfig, TileConfig};
use crate::motion::{Pose, PoseTween, Transition, WidthTween, stagger_delays};
use crate::roster::{NameEntry, Roster, tile_entry};

/// Widths closer than this are treated as already there.
const WIDTH_EPSILON: f32 = 0.01;

#[derive(Debug)]
enum Phase {
    Settled,
    Transitioning {
        transition: Transition,
        clock: Duration,
    },
}

/// Owns the display state and the animation clock for one widget instance.
#[derive(Debug)]
pub struct SwapController {
    entries: Vec<NameEntry>,
    motion: MotionConfig,
    tiles: TileConfig,
    /// Resting pose per entry, updated when a transition settles.
    settled_poses: Vec<Pose>,
    /// Resting width per tile, updated when any tween settles.
    settled_widths: Vec<f32>,
    /// Independent single-tile tweens (un-hover shrink), with their clocks.
    tile_tweens: Vec<Option<(WidthTween, Duration)>>,
    phase: Phase,
    active_entry: usize,
    active_tile: Option<usize>,
}

impl SwapController {
    pub fn new(roster: &Roster, config: &Config) -> Self {
        let entries = roster.entries();
        let enter_offset = config.motion.enter_offset_percent;
        let settled_poses = entries
            .iter()
            .map(|entry| {
                if entry.is_default() {
                    Pose::CENTERED
                } else {
                    Pose::hidden(enter_offset)
                }
            })
            .collect();
        let tile_count = roster.tile_count();
        Self {
            entries,
            motion: config.motion.clone(),
            tiles: config.tiles.clone(),
            settled_poses,
            settled_widths: vec![f32::from(config.tiles.base_width); tile_count],
            tile_tweens: vec![None; tile_count],
            phase: Phase::Settled,
            active_entry: 0,
            active_tile: None,
        }
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn tile_count(&self) -> usize {
        self.tile_tweens.len()
    }

    pub fn active_entry(&self) -> usize {
        self.active_entry
    }

    pub fn active_tile(&self) -> Option<usize> {
        self.active_tile
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// True while anything moves: a name swap or a lone tile tween.
    pub fn is_animating(&self) -> bool {
        self.is_transitioning() || self.tile_tweens.iter().any(Option::is_some)
    }

    /// The in-flight transition, if any.
    pub fn transition(&self) -> Option<&Transition> {
        match &self.phase {
            Phase::Transitioning { transition, .. } => Some(transition),
            Phase::Settled => None,
        }
    }

    /// Starts swapping to the member behind `tile`.
    ///
    /// Returns false without side effects when the member is already shown,
    /// a transition is in flight, or the tile is out of range.
    pub fn show_member(&mut self, tile: usize) -> bool {
        if tile >= self.tile_count() {
            tracing::warn!(tile, "show_member for a tile that does not exist");
            return false;
        }
        let target = tile_entry(tile);
        if self.is_transitioning() || self.active_entry == target {
            return false;
        }

        // Current glyphs leave upward; the target arrives from below.
        let exit = self.glyph_tracks(
            self.active_entry,
            Pose::CENTERED,
            Pose::hidden(-self.motion.exit_offset_percent),
            Duration::ZERO,
            self.motion.exit_duration(),
        );
        let enter = self.glyph_tracks(
            target,
            Pose::hidden(self.motion.enter_offset_percent),
            Pose::CENTERED,
            self.enter_start(),
            self.motion.enter_duration(),
        );

        let mut tiles = Vec::new();
        for t in 0..self.tile_count() {
            let (to, duration) = if t == tile {
                (
                    f32::from(self.tiles.enlarged_width),
                    self.tiles.grow_duration(),
                )
            } else {
                (
                    f32::from(self.tiles.base_width),
                    self.tiles.swap_shrink_duration(),
                )
            };
            if let Some(tween) = self.tile_track(t, to, duration) {
                tiles.push((t, tween));
            }
        }

        tracing::debug!(prev = self.active_entry, next = target, "name swap started");
        self.phase = Phase::Transitioning {
            transition: Transition::new(self.active_entry, target, exit, enter, tiles),
            clock: Duration::ZERO,
        };
        self.active_entry = target;
        self.active_tile = Some(tile);
        true
    }

    /// Starts the mirrored transition back to the title.
    ///
    /// Returns false without side effects at the title or while a transition
    /// is in flight.
    pub fn reset_to_default(&mut self) -> bool {
        if self.is_transitioning() || self.active_entry == 0 {
            return false;
        }

        // Mirrored directions: current glyphs drop away, the title comes
        // down from above.
        let exit = self.glyph_tracks(
            self.active_entry,
            Pose::CENTERED,
            Pose::hidden(self.motion.exit_offset_percent),
            Duration::ZERO,
            self.motion.exit_duration(),
        );
        let enter = self.glyph_tracks(
            0,
            Pose::hidden(-self.motion.enter_offset_percent),
            Pose::CENTERED,
            self.enter_start(),
            self.motion.enter_duration(),
        );

        let base = f32::from(self.tiles.base_width);
        let mut tiles = Vec::new();
        for t in 0..self.tile_count() {
            if let Some(tween) = self.tile_track(t, base, self.tiles.shrink_duration()) {
                tiles.push((t, tween));
            }
        }

        tracing::debug!(prev = self.active_entry, "reset to title started");
        self.phase = Phase::Transitioning {
            transition: Transition::new(self.active_entry, 0, exit, enter, tiles),
            clock: Duration::ZERO,
        };
        self.active_entry = 0;
        self.active_tile = None;
        true
    }

    /// Shrinks one tile back to base width without touching the name state
    /// (pointer un-hover). Ignored while a transition already drives the
    /// tile.
    pub fn shrink_tile(&mut self, tile: usize) {
        if tile >= self.tile_count() {
            return;
        }
        if let Phase::Transitioning { transition, .. } = &self.phase
            && transition.tiles.iter().any(|(t, _)| *t == tile)
        {
            return;
        }
        let base = f32::from(self.tiles.base_width);
        if let Some(tween) = self.tile_track(tile, base, self.tiles.shrink_duration()) {
            self.tile_tweens[tile] = Some((tween, Duration::ZERO));
        }
    }

    /// Advances the animation clock. Settles finished tweens and releases
    /// the transition lock on completion.
    pub fn advance(&mut self, dt: Duration) {
        for tile in 0..self.tile_tweens.len() {
            let settled = match &mut self.tile_tweens[tile] {
                Some((tween, clock)) => {
                    *clock += dt;
                    tween.is_finished(*clock).then_some(tween.to)
                }
                None => None,
            };
            if let Some(width) = settled {
                self.settled_widths[tile] = width;
                self.tile_tweens[tile] = None;
            }
        }

        let finished = match &mut self.phase {
            Phase::Transitioning { transition, clock } => {
                *clock += dt;
                transition.is_finished(*clock)
            }
            Phase::Settled => false,
        };
        if finished
            && let Phase::Transitioning { transition, .. } =
                std::mem::replace(&mut self.phase, Phase::Settled)
        {
            self.settle(&transition);
        }
    }

    /// Current pose of one glyph, transition-aware.
    pub fn glyph_pose(&self, entry: usize, glyph: usize) -> Pose {
        if let Phase::Transitioning { transition, clock } = &self.phase
            && let Some(pose) = transition.glyph_pose(entry, glyph, *clock)
        {
            return pose;
        }
        self.settled_poses[entry]
    }

    /// Current width of one tile, transition- and tween-aware.
    pub fn tile_width(&self, tile: usize) -> f32 {
        if let Phase::Transitioning { transition, clock } = &self.phase
            && let Some(width) = transition.tile_width(tile, *clock)
        {
            return width;
        }
        if let Some((tween, clock)) = &self.tile_tweens[tile] {
            return tween.sample(*clock);
        }
        self.settled_widths[tile]
    }

    fn enter_start(&self) -> Duration {
        self.motion
            .exit_duration()
            .mul_f32(1.0 - self.motion.overlap_fraction)
    }

    fn glyph_tracks(
        &self,
        entry: usize,
        from: Pose,
        to: Pose,
        base_delay: Duration,
        duration: Duration,
    ) -> Vec<PoseTween> {
        let count = self.entries[entry].glyph_count();
        stagger_delays(count, self.motion.stagger_interval())
            .into_iter()
            .map(|delay| PoseTween {
                delay: base_delay + delay,
                duration,
                easing: self.motion.easing,
                from,
                to,
            })
            .collect()
    }

    /// Supersedes any lone tween on `tile` (freezing its sampled width as
    /// the new resting point) and builds a tween toward `to` if the tile is
    /// not already there.
    fn tile_track(&mut self, tile: usize, to: f32, duration: Duration) -> Option<WidthTween> {
        let current = match self.tile_tweens[tile].take() {
            Some((tween, clock)) => tween.sample(clock),
            None => self.settled_widths[tile],
        };
        self.settled_widths[tile] = current;
        if (current - to).abs() <= WIDTH_EPSILON {
            self.settled_widths[tile] = to;
            return None;
        }
        Some(WidthTween {
            duration,
            easing: self.motion.easing,
            from: current,
            to,
        })
    }

    fn settle(&mut self, transition: &Transition) {
        if let Some(track) = transition.exit.first() {
            self.settled_poses[transition.exit_entry] = track.to;
        }
        if let Some(track) = transition.enter.first() {
            self.settled_poses[transition.enter_entry] = track.to;
        }
        for (tile, tween) in &transition.tiles {
            self.settled_widths[*tile] = tween.to;
        }
        tracing::debug!(shown = transition.enter_entry, "name swap settled");
    }
}
