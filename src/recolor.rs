//! Green/teal to warm-blue icon recoloring.
//!
//! Stock REAPER accents its icons in green; DarkMinimal moves those to a
//! warm blue by rotating hue while keeping saturation and value. The icon
//! sets were drawn by different authors and use slightly different greens,
//! so each pass carries its own named hue band instead of one merged rule.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use crate::config::{dpi_dir, BuildPaths, DPI_DIRS};

/// Convert an 8-bit RGB triple to HSV, all channels normalized to [0, 1].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if maxc == minc {
        return (0.0, 0.0, v);
    }

    let s = (maxc - minc) / maxc;
    let rc = (maxc - r) / (maxc - minc);
    let gc = (maxc - g) / (maxc - minc);
    let bc = (maxc - b) / (maxc - minc);

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Convert normalized HSV back to an 8-bit RGB triple.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let c = (v * 255.0) as u8;
        return (c, c, c);
    }

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (i as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// One named hue-rotation rule.
///
/// A pixel is rewritten only when it is opaque enough, its hue falls inside
/// `[hue_min, hue_max]` and its saturation reaches `min_saturation`; the
/// rewrite replaces hue with `target_hue` and keeps saturation and value.
/// Hues are degrees on the 0-360 wheel.
#[derive(Debug, Clone, Copy)]
pub struct HueShiftRule {
    pub name: &'static str,
    pub hue_min: f32,
    pub hue_max: f32,
    pub target_hue: f32,
    pub min_saturation: f32,
    pub alpha_threshold: u8,
}

/// Green band used for the broad build-dir sweep.
pub const GREEN_TO_BLUE: HueShiftRule = HueShiftRule {
    name: "green-to-blue",
    hue_min: 80.0,
    hue_max: 160.0,
    target_hue: 205.0,
    min_saturation: 0.2,
    alpha_threshold: 10,
};

/// Wide green/teal/cyan band for the envelope and item button set, which
/// uses desaturated teals the narrow band misses.
pub const GREEN_TEAL_WIDE: HueShiftRule = HueShiftRule {
    name: "green-teal-wide",
    hue_min: 80.0,
    hue_max: 200.0,
    target_hue: 205.0,
    min_saturation: 0.15,
    alpha_threshold: 10,
};

/// FX icon band: same hues as the sweep but a higher saturation cutoff so
/// the antialiased gray edges stay put.
pub const FX_GREEN: HueShiftRule = HueShiftRule {
    name: "fx-green",
    hue_min: 80.0,
    hue_max: 160.0,
    target_hue: 205.0,
    min_saturation: 0.3,
    alpha_threshold: 10,
};

/// Mixer I/O icon band, green through teal.
pub const IO_GREEN_TEAL: HueShiftRule = HueShiftRule {
    name: "io-green-teal",
    hue_min: 80.0,
    hue_max: 180.0,
    target_hue: 205.0,
    min_saturation: 0.3,
    alpha_threshold: 10,
};

impl HueShiftRule {
    /// Apply the rule to one pixel. Returns `None` when it passes through.
    pub fn shift_pixel(&self, px: Rgba<u8>) -> Option<Rgba<u8>> {
        let [r, g, b, a] = px.0;
        if a < self.alpha_threshold {
            return None;
        }

        let (h, s, v) = rgb_to_hsv(r, g, b);
        let hue = h * 360.0;
        if hue < self.hue_min || hue > self.hue_max || s < self.min_saturation {
            return None;
        }

        let (nr, ng, nb) = hsv_to_rgb(self.target_hue / 360.0, s, v);
        Some(Rgba([nr, ng, nb, a]))
    }
}

/// Recolor an image in place, visiting every pixel exactly once.
/// Returns whether anything changed.
pub fn recolor_image(img: &mut RgbaImage, rule: &HueShiftRule) -> bool {
    let mut modified = false;
    for px in img.pixels_mut() {
        if let Some(shifted) = rule.shift_pixel(*px) {
            if shifted != *px {
                *px = shifted;
                modified = true;
            }
        }
    }
    modified
}

/// Recolor one file in place. Unmodified files are not rewritten.
pub fn recolor_file(path: &Path, rule: &HueShiftRule) -> Result<bool> {
    let mut img = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();

    if recolor_image(&mut img, rule) {
        img.save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Envelope, general UI and item button icons that need the wide teal band.
pub const GREEN_ICON_NAMES: &[&str] = &[
    // Envelope control panel
    "envcp_arm_on.png",
    "envcp_fader.png",
    "envcp_faderbg.png",
    "envcp_knob_stack.png",
    "envcp_parammod_on.png",
    "envcp_learn_on.png",
    "envcp_bypass_off.png",
    "envcp_bypass_on.png",
    // General UI on states
    "gen_midi_on.png",
    "gen_pause_on.png",
    "gen_play_on.png",
    "gen_repeat_on.png",
    // Table expand/collapse
    "table_expand_on.png",
    "table_collapse_on.png",
    // Item button on states
    "item_env_on.png",
    "item_fx_on.png",
    "item_fx_on_hidpi.png",
    "item_group_sel.png",
    "item_group_sel_hidpi.png",
    "item_note_on.png",
    "item_note_on_hidpi.png",
    "item_pooled_on.png",
    "item_pooled_on_hidpi.png",
    "item_props_on_hidpi.png",
    "item_timebase_beat_on.png",
    "item_timebase_beat_on_hidpi.png",
    "item_timebase_time_on.png",
    "item_timebase_time_on_hidpi.png",
];

/// Track FX button icons.
pub const FX_ICON_NAMES: &[&str] = &[
    "track_fx_norm.png",
    "track_fx_norm_ol.png",
    "track_fx_in_norm.png",
    "track_fxon_h.png",
    "track_fxon_h_ol.png",
    "track_fxon_v.png",
    "track_fxon_v_ol.png",
];

/// Mixer and track I/O button icons.
pub const IO_ICON_NAMES: &[&str] = &[
    "mcp_io.png",
    "mcp_io_dis.png",
    "mcp_io_dis_ol.png",
    "mcp_io_ol.png",
    "mcp_io_r.png",
    "mcp_io_r_dis.png",
    "mcp_io_s.png",
    "mcp_io_s_dis.png",
    "mcp_io_s_ol.png",
    "mcp_io_s_r.png",
    "mcp_io_s_r_dis.png",
    "track_io.png",
    "track_io_dis.png",
    "track_io_s.png",
    "track_io_s_dis.png",
];

/// Wildcard name patterns for the broad build-dir sweep.
pub const SWEEP_PATTERNS: &[&str] = &[
    "*fx*.png",
    "*expand*.png",
    "*collapse*.png",
    "*arrow*.png",
    "gen_*.png",
    "mcp_*.png",
    "tcp_*.png",
    "item_*.png",
    "track_*.png",
    "table_*.png",
];

/// Compile a `*`-wildcard file name pattern into an anchored regex.
fn wildcard_to_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern).replace(r"\*", ".*");
    Regex::new(&format!("^{}$", escaped)).with_context(|| format!("pattern {:?}", pattern))
}

/// Recolor a fixed list of icon names across the base and DPI directories.
///
/// Missing files are simply skipped; a file that fails to decode is
/// reported and does not abort the rest of the pass.
pub fn recolor_named(base_dir: &Path, names: &[&str], rule: &HueShiftRule) -> usize {
    let mut recolored = 0;

    for name in names {
        for (dpi, _) in DPI_DIRS {
            let path = dpi_dir(base_dir, dpi).join(name);
            if !path.exists() {
                continue;
            }
            match recolor_file(&path, rule) {
                Ok(true) => {
                    if dpi.is_empty() {
                        println!("  {}", name);
                    }
                    recolored += 1;
                }
                Ok(false) => {}
                Err(e) => eprintln!("  error processing {}: {:#}", path.display(), e),
            }
        }
    }

    recolored
}

/// Collect files under the base and DPI directories whose names match any
/// sweep pattern, skipping the custom transport sprites.
fn collect_matching(base_dir: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>> {
    let regexes = patterns
        .iter()
        .map(|p| wildcard_to_regex(p))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for (dpi, _) in DPI_DIRS {
        let dir = dpi_dir(base_dir, dpi);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // Transport sprites are composed fresh by this build; leave them.
            if name.contains("transport_") {
                continue;
            }
            if regexes.iter().any(|re| re.is_match(name)) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Sweep the build tree, recoloring every matching icon.
pub fn recolor_matching(base_dir: &Path, patterns: &[&str], rule: &HueShiftRule) -> Result<usize> {
    let files = collect_matching(base_dir, patterns)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Recoloring [{bar:30}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut recolored = 0;
    for path in files {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
        match recolor_file(&path, rule) {
            Ok(true) => {
                pb.set_message(name.to_string());
                recolored += 1;
            }
            Ok(false) => {}
            Err(e) => pb.set_message(format!("error: {:#}", e)),
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{} recolored", recolored));

    Ok(recolored)
}

/// Pipeline step: run all recolor passes over the build directory.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let build_dir = paths.build_dir();
    if !build_dir.is_dir() {
        anyhow::bail!("missing build directory: {}", build_dir.display());
    }

    let swept = recolor_matching(&build_dir, SWEEP_PATTERNS, &GREEN_TO_BLUE)?;

    println!("Envelope/item icons ({}):", GREEN_TEAL_WIDE.name);
    let wide = recolor_named(&build_dir, GREEN_ICON_NAMES, &GREEN_TEAL_WIDE);

    println!("FX icons ({}):", FX_GREEN.name);
    let fx = recolor_named(&build_dir, FX_ICON_NAMES, &FX_GREEN);

    println!("I/O icons ({}):", IO_GREEN_TEAL.name);
    let io = recolor_named(&build_dir, IO_ICON_NAMES, &IO_GREEN_TEAL);

    println!("Recolored {} icons total", swept + wide + fx + io);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hsv_round_values() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0.0, 1.0, 1.0));
        let (h, s, v) = rgb_to_hsv(0, 255, 0);
        assert!((h - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!((s, v), (1.0, 1.0));
        assert_eq!(rgb_to_hsv(128, 128, 128).1, 0.0);
    }

    #[test]
    fn test_transparent_pixels_pass_through() {
        // Alpha below threshold is never touched, whatever the color.
        for rgb in [[0, 255, 0], [0, 200, 180], [127, 255, 127]] {
            let px = Rgba([rgb[0], rgb[1], rgb[2], 9]);
            assert!(GREEN_TO_BLUE.shift_pixel(px).is_none());
            assert!(GREEN_TEAL_WIDE.shift_pixel(px).is_none());
        }
    }

    #[test]
    fn test_out_of_band_hue_passes_through() {
        // Saturated red (0°) and violet (270°ish) are outside every band.
        assert!(GREEN_TO_BLUE.shift_pixel(Rgba([255, 0, 0, 255])).is_none());
        assert!(GREEN_TO_BLUE.shift_pixel(Rgba([180, 0, 255, 255])).is_none());
        // Cyan at ~180° is outside the narrow band but inside the wide one.
        let cyan = Rgba([0, 255, 255, 255]);
        assert!(GREEN_TO_BLUE.shift_pixel(cyan).is_none());
        assert!(GREEN_TEAL_WIDE.shift_pixel(cyan).is_some());
    }

    #[test]
    fn test_low_saturation_passes_through() {
        // Greenish gray: hue in band but saturation ~0.14.
        let px = Rgba([120, 140, 120, 255]);
        assert!(GREEN_TO_BLUE.shift_pixel(px).is_none());
        assert!(FX_GREEN.shift_pixel(px).is_none());
    }

    #[test]
    fn test_green_shifts_to_warm_blue() {
        // Pure green: s=1, v=1, hue 120° -> 205° with s,v preserved.
        let out = GREEN_TO_BLUE.shift_pixel(Rgba([0, 255, 0, 255])).unwrap();
        let (h, s, v) = rgb_to_hsv(out.0[0], out.0[1], out.0[2]);
        assert!((h * 360.0 - 205.0).abs() < 1.0);
        assert!(s > 0.99 && v > 0.99);
        assert_eq!(out.0[3], 255);
    }

    #[test]
    fn test_recolor_image_dimensions_and_selectivity() {
        let mut img = RgbaImage::new(4, 2);
        for x in 0..4 {
            img.put_pixel(x, 0, Rgba([0, 255, 0, 255])); // green row
            img.put_pixel(x, 1, Rgba([255, 0, 0, 255])); // red row
        }

        assert!(recolor_image(&mut img, &GREEN_TO_BLUE));
        assert_eq!(img.dimensions(), (4, 2));
        for x in 0..4 {
            assert_ne!(*img.get_pixel(x, 0), Rgba([0, 255, 0, 255]));
            assert_eq!(*img.get_pixel(x, 1), Rgba([255, 0, 0, 255]));
        }

        // Second pass is a no-op: hue already at the blue target.
        assert!(!recolor_image(&mut img, &GREEN_TO_BLUE));
    }

    #[test]
    fn test_wildcard_patterns() {
        let re = wildcard_to_regex("*fx*.png").unwrap();
        assert!(re.is_match("track_fxon_h.png"));
        assert!(!re.is_match("track_io.png"));

        let re = wildcard_to_regex("gen_*.png").unwrap();
        assert!(re.is_match("gen_play_on.png"));
        assert!(!re.is_match("xgen_play_on.png"));
    }

    #[test]
    fn test_batch_skips_broken_files_and_transport() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        std::fs::create_dir(base.join("150")).unwrap();

        let mut green = RgbaImage::new(2, 2);
        for px in green.pixels_mut() {
            *px = Rgba([0, 255, 0, 255]);
        }
        green.save(base.join("gen_play_on.png")).unwrap();
        green.save(base.join("150").join("gen_play_on.png")).unwrap();
        green.save(base.join("transport_play.png")).unwrap();

        // Matching name but not a PNG at all.
        std::fs::write(base.join("gen_broken.png"), b"not a png").unwrap();

        let n = recolor_matching(base, SWEEP_PATTERNS, &GREEN_TO_BLUE).unwrap();
        assert_eq!(n, 2);

        // Transport sprite untouched.
        let img = image::open(base.join("transport_play.png")).unwrap().to_rgba8();
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
    }
}
