//! Roster model and glyph decomposition.
//!
//! The roster is fixed at startup: entry 0 is the title (shown while no tile
//! is active) and entry i+1 belongs to tile i. Each entry's name is split
//! into grapheme clusters once so the animation can address glyphs
//! individually.

use anyhow::{Result, bail};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::RosterConfig;

/// Validated roster contents.
#[derive(Debug, Clone)]
pub struct Roster {
    pub title: String,
    pub members: Vec<String>,
}

impl Roster {
    /// Builds a roster from config, failing fast with a diagnostic that names
    /// what is missing instead of erroring later inside the animation.
    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        if config.title.trim().is_empty() {
            bail!("roster.title is empty; set [roster] title in config or pass --title");
        }
        if config.members.is_empty() {
            bail!("roster has no members; set [roster] members in config or pass --names");
        }
        if let Some(pos) = config.members.iter().position(|m| m.trim().is_empty()) {
            bail!("roster member #{} is empty", pos + 1);
        }
        Ok(Self {
            title: config.title.clone(),
            members: config.members.clone(),
        })
    }

    /// Number of name entries: the title plus one per member.
    pub fn entry_count(&self) -> usize {
        self.members.len() + 1
    }

    /// Number of tiles in the row.
    pub fn tile_count(&self) -> usize {
        self.members.len()
    }

    /// Splits every name into its entry, title first.
    pub fn entries(&self) -> Vec<NameEntry> {
        std::iter::once(self.title.as_str())
            .chain(self.members.iter().map(String::as_str))
            .enumerate()
            .map(|(index, name)| NameEntry::new(index, name))
            .collect()
    }
}

/// The entry a tile maps to. Tile i always shows entry i+1; entry 0 has no
/// tile.
pub const fn tile_entry(tile: usize) -> usize {
    tile + 1
}

/// One name, decomposed into individually addressable glyphs.
#[derive(Debug, Clone)]
pub struct NameEntry {
    pub index: usize,
    pub name: String,
    /// Grapheme clusters in reading order.
    pub glyphs: Vec<String>,
}

impl NameEntry {
    fn new(index: usize, name: &str) -> Self {
        let glyphs = name.graphemes(true).map(str::to_string).collect();
        Self {
            index,
            name: name.to_string(),
            glyphs,
        }
    }

    /// True for the entry shown while no tile is active.
    pub fn is_default(&self) -> bool {
        self.index == 0
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Terminal display width of one glyph (wide glyphs take two columns).
    pub fn glyph_width(&self, glyph: usize) -> u16 {
        self.glyphs.get(glyph).map_or(0, |g| g.width() as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(title: &str, members: &[&str]) -> RosterConfig {
        RosterConfig {
            title: title.to_string(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    #[test]
    fn test_entries_title_first() {
        let roster = Roster::from_config(&config("Us", &["Ana", "Bo"])).unwrap();
        let entries = roster.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_default());
        assert_eq!(entries[1].name, "Ana");
        assert_eq!(entries[2].name, "Bo");
    }

    #[test]
    fn test_tile_entry_correspondence() {
        assert_eq!(tile_entry(0), 1);
        assert_eq!(tile_entry(3), 4);
    }

    #[test]
    fn test_glyphs_are_grapheme_clusters() {
        let roster = Roster::from_config(&config("T", &["José"])).unwrap();
        let entries = roster.entries();
        assert_eq!(entries[1].glyph_count(), 4);
        assert_eq!(entries[1].glyphs[3], "é");
    }

    #[test]
    fn test_wide_glyph_width() {
        let roster = Roster::from_config(&config("T", &["中文"])).unwrap();
        let entries = roster.entries();
        assert_eq!(entries[1].glyph_width(0), 2);
    }

    #[test]
    fn test_empty_members_names_the_fix() {
        let err = Roster::from_config(&config("T", &[]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("--names"));
    }

    #[test]
    fn test_blank_member_is_rejected() {
        let err = Roster::from_config(&config("T", &["Ana", "  "]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("#2"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(Roster::from_config(&config("  ", &["Ana"])).is_err());
    }
}
