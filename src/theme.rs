//! Color palettes for the viewer.
//!
//! Switching palettes is purely cosmetic; the simulation keeps running.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Available palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// White particles on near-black.
    #[default]
    Mono,
    Blue,
    Purple,
    Cyan,
    Red,
}

/// Resolved colors for one palette, linear-ish RGB in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Vec3,
    pub particle: Vec3,
    pub line: Vec3,
}

impl Theme {
    /// All palettes in selector order.
    pub const ALL: [Theme; 5] = [Theme::Mono, Theme::Blue, Theme::Purple, Theme::Cyan, Theme::Red];

    /// Palette for the selector slot `index` (0-based), if any.
    pub fn from_index(index: usize) -> Option<Theme> {
        Self::ALL.get(index).copied()
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Mono => "mono",
            Theme::Blue => "blue",
            Theme::Purple => "purple",
            Theme::Cyan => "cyan",
            Theme::Red => "red",
        }
    }

    /// Resolve the palette colors.
    pub fn palette(self) -> Palette {
        let (bg, particle, line) = match self {
            Theme::Mono => (0x0a0a0a, 0xffffff, 0x444444),
            Theme::Blue => (0x0a0f1a, 0x60a5fa, 0x1e3a8a),
            Theme::Purple => (0x0f0a1a, 0xa78bfa, 0x4c1d95),
            Theme::Cyan => (0x0a1a1a, 0x22d3ee, 0x164e63),
            Theme::Red => (0x1a0a0a, 0xf87171, 0x7f1d1d),
        };
        Palette {
            background: hex_rgb(bg),
            particle: hex_rgb(particle),
            line: hex_rgb(line),
        }
    }
}

fn hex_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
