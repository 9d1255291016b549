//! Hex color parsing and REAPER's packed color encoding.
//!
//! REAPER stores colors in its `.ReaperTheme` files as decimal integers
//! packed little-endian: `R + G*256 + B*65536`. Alpha-blended entries are
//! written as negative (sign-extended 32-bit) values; those are masked back
//! to unsigned before decoding.

use anyhow::{bail, Context, Result};

/// A plain 8-bit-per-channel RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse a `#RRGGBB` (or bare `RRGGBB`) hex string.
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid hex color: {:?}", hex);
    }
    let r = u8::from_str_radix(&digits[0..2], 16)?;
    let g = u8::from_str_radix(&digits[2..4], 16)?;
    let b = u8::from_str_radix(&digits[4..6], 16)?;
    Ok(Rgb { r, g, b })
}

/// Convert a hex color to REAPER's packed decimal format.
pub fn hex_to_reaper(hex: &str) -> Result<i32> {
    let Rgb { r, g, b } = parse_hex(hex)?;
    Ok(r as i32 + (g as i32) * 256 + (b as i32) * 65536)
}

/// Convert a REAPER packed decimal back to a `#rrggbb` hex string.
///
/// Negative values (alpha-blended entries) are masked to unsigned 32-bit
/// first; only the low 24 bits carry color.
pub fn reaper_to_hex(value: i32) -> String {
    let v = value as u32;
    let r = v & 0xff;
    let g = (v >> 8) & 0xff;
    let b = (v >> 16) & 0xff;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Named color palette: symbolic name to hex triple.
///
/// Every mapping-table key must resolve here; a missing key is a build
/// error, reported by name.
pub struct Palette {
    entries: Vec<(&'static str, &'static str)>,
}

impl Palette {
    pub fn new(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a color's hex string by name.
    pub fn hex(&self, name: &str) -> Result<&'static str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| *hex)
            .with_context(|| format!("palette has no color named {:?}", name))
    }

    /// Look up a color and convert it to REAPER's packed format.
    pub fn reaper_value(&self, name: &str) -> Result<i32> {
        hex_to_reaper(self.hex(name)?)
    }
}

/// The DarkMinimal palette (lightened backgrounds, warm blue accent).
pub fn dark_minimal_palette() -> Palette {
    Palette::new(vec![
        // Backgrounds
        ("bg_deep", "#1a1a1a"),
        ("bg_surface", "#242424"),
        ("bg_elevated", "#333333"),
        ("bg_button", "#2a2a2a"),
        ("bg_transport", "#1e1e1e"),
        // Accents
        ("accent_blue", "#3b82fa"),
        ("danger_red", "#e53333"),
        ("mute_orange", "#ff9900"),
        // Text
        ("text_primary", "#e0e0e0"),
        ("text_muted", "#808080"),
        ("text_dim", "#666666"),
        // Grid
        ("grid_major", "#444444"),
        ("grid_minor", "#333333"),
        // VU meter zones
        ("meter_red", "#e53333"),
        ("meter_yellow", "#ffcc00"),
        ("meter_green", "#33d459"),
    ])
}
