//! `.ReaperTheme` color table patcher.
//!
//! The color table is line-oriented `key=integer` text. Each mapping below
//! rewrites one key to a palette color converted to REAPER's packed format.
//! Lines that match no mapping are left byte-for-byte untouched, so the
//! patch is idempotent.

use anyhow::{Context, Result};
use regex::Regex;

use crate::color::Palette;
use crate::config::BuildPaths;

/// One theme variable rewritten to a palette color.
pub struct ColorMapping {
    pub theme_var: &'static str,
    pub palette_key: &'static str,
}

macro_rules! mapping {
    ($var:literal => $key:literal) => {
        ColorMapping { theme_var: $var, palette_key: $key }
    };
}

/// Theme variable -> palette color assignments for DarkMinimal.
pub const COLOR_MAPPINGS: &[ColorMapping] = &[
    // Main UI backgrounds
    mapping!("col_main_bg2" => "bg_deep"),
    mapping!("col_tracklistbg" => "bg_deep"),
    mapping!("col_mixerbg" => "bg_deep"),
    mapping!("col_arrangebg" => "bg_surface"),
    // Transport
    mapping!("col_trans_bg" => "bg_transport"),
    mapping!("col_trans_fg" => "text_muted"),
    mapping!("col_transport_editbk" => "bg_deep"),
    // Track backgrounds (alternating)
    mapping!("col_tr1_bg" => "bg_surface"),
    mapping!("col_tr2_bg" => "bg_elevated"),
    // Selected track
    mapping!("col_seltrack" => "accent_blue"),
    mapping!("col_seltrack2" => "accent_blue"),
    // TCP text
    mapping!("col_tcp_text" => "text_primary"),
    mapping!("col_tcp_textsel" => "text_primary"),
    // MCP text
    mapping!("col_mcp_text" => "text_primary"),
    mapping!("col_mcp_textsel" => "text_primary"),
    // Toolbar
    mapping!("col_toolbar_text" => "text_muted"),
    mapping!("col_toolbar_text_on" => "text_primary"),
    mapping!("toolbararmed_color" => "danger_red"),
    // VU meters
    mapping!("col_vuclip" => "meter_red"),
    mapping!("col_vutop" => "meter_red"),
    mapping!("col_vumid" => "meter_yellow"),
    mapping!("col_vubot" => "meter_green"),
    // Timeline
    mapping!("col_tl_bg" => "bg_deep"),
    mapping!("col_tl_fg" => "text_muted"),
    mapping!("col_tl_fg2" => "text_dim"),
    // Cursor
    mapping!("col_cursor" => "accent_blue"),
    mapping!("col_cursor2" => "accent_blue"),
    mapping!("playcursor_color" => "accent_blue"),
    // Grid
    mapping!("col_gridlines" => "grid_major"),
    mapping!("col_gridlines2" => "grid_minor"),
    mapping!("col_gridlines3" => "grid_minor"),
    // Docker / tabs
    mapping!("docker_bg" => "bg_deep"),
    mapping!("docker_shadow" => "bg_deep"),
    mapping!("docker_selface" => "accent_blue"),
    mapping!("docker_unselface" => "bg_elevated"),
    mapping!("docker_text" => "text_muted"),
    mapping!("docker_text_sel" => "text_primary"),
    mapping!("windowtab_bg" => "bg_deep"),
    // Region / marker lanes
    mapping!("region_lane_bg" => "bg_deep"),
    mapping!("marker_lane_bg" => "bg_deep"),
    mapping!("ts_lane_bg" => "bg_deep"),
    // MIDI editor
    mapping!("midi_rulerbg" => "bg_surface"),
    mapping!("midi_trackbg1" => "bg_surface"),
    mapping!("midi_trackbg2" => "bg_elevated"),
    mapping!("midi_trackbg_outer1" => "bg_deep"),
    mapping!("midi_trackbg_outer2" => "bg_surface"),
    mapping!("midi_leftbg" => "bg_elevated"),
];

/// Apply palette mappings to the color table text.
///
/// Returns the patched text and the number of substitutions made. A mapping
/// whose palette key is missing is a build error; a mapping whose theme
/// variable does not occur in the file simply contributes zero.
pub fn apply_palette(
    content: &str,
    mappings: &[ColorMapping],
    palette: &Palette,
) -> Result<(String, usize)> {
    let mut content = content.to_string();
    let mut changes = 0;

    for mapping in mappings {
        let value = palette
            .reaper_value(mapping.palette_key)
            .with_context(|| format!("mapping for {}", mapping.theme_var))?;

        let pattern = format!(r"(?m)^({})=(-?\d+)", regex::escape(mapping.theme_var));
        let re = Regex::new(&pattern)?;

        let count = re.find_iter(&content).count();
        if count > 0 {
            content = re
                .replace_all(&content, format!("${{1}}={}", value))
                .into_owned();
            changes += count;
        }
    }

    Ok((content, changes))
}

/// Shrink the transport font from -13 to -10 (F3 -> F6 in the packed
/// font record). Returns the patched text and the substitution count.
pub fn shrink_transport_font(content: &str) -> (String, usize) {
    let re = Regex::new(r"(?m)^(trans_font=)F3FFFFFF").unwrap();
    let count = re.find_iter(content).count();
    let patched = re.replace_all(content, "${1}F6FFFFFF").into_owned();
    (patched, count)
}

/// Pipeline step: patch the `.ReaperTheme` color table in place.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let theme_path = paths.theme_file();
    let content = std::fs::read_to_string(&theme_path)
        .with_context(|| format!("missing theme file: {}", theme_path.display()))?;

    let palette = crate::color::dark_minimal_palette();
    let (content, font_changes) = shrink_transport_font(&content);
    let (content, color_changes) = apply_palette(&content, COLOR_MAPPINGS, &palette)?;

    std::fs::write(&theme_path, content)
        .with_context(|| format!("writing {}", theme_path.display()))?;

    println!("Applied {} color changes ({} font tweaks)", color_changes, font_changes);
    println!("  Palette: {} colors defined", palette.len());
    println!("  Mappings: {} theme variables", COLOR_MAPPINGS.len());
    Ok(())
}
