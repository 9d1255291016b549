//! Sprite sheet composition at multiple DPI scales.
//!
//! REAPER renders interactive controls from a single image holding the
//! normal/hover/active states as adjacent horizontal frames. Each sheet is
//! built from a single-state source icon: fit into the frame box, brightened
//! per state, concatenated with a fixed gap. The same composition repeats at
//! 1x/1.5x/2x into the parallel DPI trees.
//!
//! Gap convention: gaps sit BETWEEN frames only, so a 3-frame sheet of
//! 48px frames with a 4px gap is (48+4)*3 - 4 = 152px wide.

use std::path::Path;

use anyhow::{Context, Result};
use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::config::{dpi_dir, BuildPaths, DPI_DIRS};

/// Frame box plus inter-frame gap, in 1x pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub width: u32,
    pub height: u32,
    pub gap: u32,
}

impl FrameSpec {
    /// Scale for a DPI variant, truncating to whole pixels.
    pub fn scaled(&self, scale: f32) -> FrameSpec {
        FrameSpec {
            width: (self.width as f32 * scale) as u32,
            height: (self.height as f32 * scale) as u32,
            gap: (self.gap as f32 * scale) as u32,
        }
    }

    /// Sheet width for `frames` adjacent states (no trailing gap).
    pub fn sheet_width(&self, frames: u32) -> u32 {
        frames * self.width + frames.saturating_sub(1) * self.gap
    }
}

/// Transport buttons: wide 48x42 frames with a 4px gap.
pub const TRANSPORT_FRAME: FrameSpec = FrameSpec { width: 48, height: 42, gap: 4 };

/// Track buttons (mute/solo/recarm): 20x20 frames, no gap.
pub const TRACK_FRAME: FrameSpec = FrameSpec { width: 20, height: 20, gap: 0 };

/// Fit a source image into a frame box: aspect-preserving Lanczos resize,
/// centered over transparent padding.
pub fn fit_frame(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let scale_w = width as f32 / src.width() as f32;
    let scale_h = height as f32 / src.height() as f32;
    let scale = scale_w.min(scale_h);

    let new_w = ((src.width() as f32 * scale) as u32).max(1);
    let new_h = ((src.height() as f32 * scale) as u32).max(1);
    let resized = imageops::resize(src, new_w, new_h, FilterType::Lanczos3);

    let mut frame = RgbaImage::new(width, height);
    let x = (width - new_w) / 2;
    let y = (height - new_h) / 2;
    imageops::overlay(&mut frame, &resized, x as i64, y as i64);
    frame
}

/// Multiplicative brightness adjustment. RGB channels scale and clamp;
/// alpha is preserved. A factor of 1.0 returns an exact copy.
pub fn brighten(frame: &RgbaImage, factor: f32) -> RgbaImage {
    if factor == 1.0 {
        return frame.clone();
    }

    let mut out = frame.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        let scale = |c: u8| ((c as f32 * factor).min(255.0)) as u8;
        *px = Rgba([scale(r), scale(g), scale(b), a]);
    }
    out
}

/// Concatenate one brightness variant per factor into a horizontal sheet.
pub fn compose_sheet(frame: &RgbaImage, factors: &[f32], gap: u32) -> RgbaImage {
    let spec = FrameSpec { width: frame.width(), height: frame.height(), gap };
    let mut sheet = RgbaImage::new(spec.sheet_width(factors.len() as u32), frame.height());

    for (i, factor) in factors.iter().enumerate() {
        let variant = brighten(frame, *factor);
        let x = i as u32 * (frame.width() + gap);
        imageops::overlay(&mut sheet, &variant, x as i64, 0);
    }
    sheet
}

/// Compose a sheet from `source` at every DPI scale and write it under
/// `name` into the base dir and the `150`/`200` trees.
pub fn write_dpi_variants(
    source: &RgbaImage,
    spec: FrameSpec,
    factors: &[f32],
    base_dir: &Path,
    name: &str,
) -> Result<()> {
    for (dpi, scale) in DPI_DIRS {
        let scaled = spec.scaled(*scale);
        let frame = fit_frame(source, scaled.width, scaled.height);
        let sheet = compose_sheet(&frame, factors, scaled.gap);

        let out_dir = dpi_dir(base_dir, dpi);
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;
        let out_path = out_dir.join(name);
        sheet
            .save(&out_path)
            .with_context(|| format!("writing {}", out_path.display()))?;
    }
    Ok(())
}

/// One source icon composed into one or more destination sheets.
///
/// Brightness triples are (normal, hover, active). Off-state buttons pop on
/// hover only; on-state buttons also step up when pressed; the `_ol`
/// overlay variants run uniformly brighter.
pub struct SpritePlan {
    pub source: &'static str,
    pub dests: &'static [&'static str],
    pub brightness: [f32; 3],
}

macro_rules! plan {
    ($src:literal => [$($dest:literal),+ $(,)?], $b:expr) => {
        SpritePlan { source: $src, dests: &[$($dest),+], brightness: $b }
    };
}

const OFF: [f32; 3] = [1.0, 1.15, 1.0];
const ON: [f32; 3] = [1.0, 1.1, 1.2];
const OVERLAY: [f32; 3] = [1.1, 1.2, 1.3];

/// Transport button sheets.
pub const TRANSPORT_PLAN: &[SpritePlan] = &[
    // Play
    plan!("play_off.png" => ["transport_play.png", "transport_play_sync.png"], OFF),
    plan!("play_on.png" => ["transport_play_on.png", "transport_play_sync_on.png"], ON),
    plan!("play_off.png" => ["transport_play_ol.png", "transport_play_sync_ol.png"], OVERLAY),
    // Stop
    plan!("stop_off.png" => ["transport_stop.png"], OFF),
    // Pause
    plan!("pause_off.png" => ["transport_pause.png"], OFF),
    plan!("pause_on.png" => ["transport_pause_on.png"], ON),
    // Record
    plan!("record_off.png" => [
        "transport_record.png",
        "transport_record_item.png",
        "transport_record_loop.png",
    ], OFF),
    plan!("record_on.png" => [
        "transport_record_on.png",
        "transport_record_item_on.png",
        "transport_record_loop_on.png",
    ], ON),
    plan!("record_off.png" => [
        "transport_record_ol.png",
        "transport_record_item_ol.png",
        "transport_record_loop_ol.png",
    ], OVERLAY),
    // Navigation
    plan!("rewind_off.png" => ["transport_previous.png"], OFF),
    plan!("forward_off.png" => ["transport_next.png"], OFF),
    plan!("prev_off.png" => ["transport_home.png"], OFF),
    plan!("next_off.png" => ["transport_end.png"], OFF),
    // Repeat/loop
    plan!("loop_off.png" => ["transport_repeat_off.png"], OFF),
    plan!("loop_on.png" => ["transport_repeat_on.png"], ON),
    plan!("loop_off.png" => ["transport_repeat_ol.png"], OVERLAY),
];

/// Track button sheets, including the generic mute/solo aliases.
pub const TRACK_PLAN: &[SpritePlan] = &[
    plan!("track_mute.png" => ["track_mute_off.png", "track_mute_off_ol.png", "gen_mute_off.png"], OFF),
    plan!("track_mute_on.png" => ["track_mute_on.png", "gen_mute_on.png"], ON),
    plan!("track_solo_off.png" => ["track_solo_off.png", "track_solo_off_ol.png", "gen_solo_off.png"], OFF),
    plan!("track_solo_on.png" => ["track_solo_on.png", "gen_solo_on.png"], ON),
    plan!("track_recarm_off.png" => [
        "track_recarm_off.png",
        "track_recarm_off_ol.png",
        "track_recarm_norec.png",
        "track_recarm_norec_ol.png",
    ], OFF),
    plan!("track_recarm_on.png" => ["track_recarm_on.png", "track_recarm_on_ol.png"], ON),
];

/// Run a sprite plan: load each source once, compose every destination at
/// every DPI. Missing sources warn and skip.
pub fn run_plan(
    plan: &[SpritePlan],
    spec: FrameSpec,
    assets_dir: &Path,
    build_dir: &Path,
) -> Result<usize> {
    let mut written = 0;

    for entry in plan {
        let src_path = assets_dir.join(entry.source);
        if !src_path.exists() {
            println!("  warning: missing {}", entry.source);
            continue;
        }

        let source = image::open(&src_path)
            .with_context(|| format!("decoding {}", src_path.display()))?
            .to_rgba8();

        for dest in entry.dests {
            write_dpi_variants(&source, spec, &entry.brightness, build_dir, dest)?;
            written += 1;
        }
        println!("  {} -> {}", entry.source, entry.dests.join(", "));
    }

    Ok(written)
}

/// Pipeline step: transport button sheets.
pub fn run_transport(paths: &BuildPaths) -> Result<()> {
    let spec = TRANSPORT_FRAME;
    println!(
        "Frame size: {}x{}, gap: {} (sheet {}x{})",
        spec.width,
        spec.height,
        spec.gap,
        spec.sheet_width(3),
        spec.height
    );

    let n = run_plan(TRANSPORT_PLAN, spec, &paths.transport_assets(), &paths.build_dir())?;
    println!("Wrote {} transport sheets per DPI", n);
    Ok(())
}

/// Pipeline step: track button sheets.
pub fn run_track(paths: &BuildPaths) -> Result<()> {
    let spec = TRACK_FRAME;
    println!("Frame size: {}x{} (sheet {}x{})", spec.width, spec.height, spec.sheet_width(3), spec.height);

    let n = run_plan(TRACK_PLAN, spec, &paths.track_assets(), &paths.build_dir())?;
    println!("Wrote {} track button sheets per DPI", n);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn solid(w: u32, h: u32, px: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(w, h, px)
    }

    #[test]
    fn test_sheet_width_has_no_trailing_gap() {
        let spec = FrameSpec { width: 48, height: 42, gap: 4 };
        assert_eq!(spec.sheet_width(3), 152);
        assert_eq!(spec.sheet_width(2), 100);
        assert_eq!(TRACK_FRAME.sheet_width(3), 60);
    }

    #[test]
    fn test_frame_spec_scaling_truncates() {
        let spec = TRANSPORT_FRAME.scaled(1.5);
        assert_eq!(spec, FrameSpec { width: 72, height: 63, gap: 6 });
        let spec = TRACK_FRAME.scaled(1.5);
        assert_eq!(spec, FrameSpec { width: 30, height: 30, gap: 0 });
    }

    #[test]
    fn test_fit_frame_centers_and_pads() {
        // 10x20 source into a 40x20 frame: scaled to 10x20, centered at x=15.
        let src = solid(10, 20, Rgba([200, 0, 0, 255]));
        let frame = fit_frame(&src, 40, 20);
        assert_eq!(frame.dimensions(), (40, 20));
        assert_eq!(*frame.get_pixel(0, 10), Rgba([0, 0, 0, 0]));
        assert_eq!(*frame.get_pixel(20, 10), Rgba([200, 0, 0, 255]));
        assert_eq!(*frame.get_pixel(39, 10), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_brighten_scales_and_clamps() {
        let frame = solid(2, 2, Rgba([100, 200, 0, 128]));
        let out = brighten(&frame, 1.5);
        assert_eq!(*out.get_pixel(0, 0), Rgba([150, 255, 0, 128]));

        // Factor 1.0 is byte-identical.
        let same = brighten(&frame, 1.0);
        assert_eq!(same, frame);
    }

    #[test]
    fn test_compose_sheet_layout() {
        let frame = solid(48, 42, Rgba([100, 100, 100, 255]));
        let sheet = compose_sheet(&frame, &[1.0, 1.15, 1.0], 4);
        assert_eq!(sheet.dimensions(), (152, 42));

        // Frame cells hold pixels, gaps stay transparent.
        assert_eq!(*sheet.get_pixel(0, 0), Rgba([100, 100, 100, 255]));
        assert_eq!(*sheet.get_pixel(49, 0), Rgba([0, 0, 0, 0])); // first gap
        assert_eq!(*sheet.get_pixel(52, 0), Rgba([114, 114, 114, 255])); // hover frame
        assert_eq!(*sheet.get_pixel(151, 41), Rgba([100, 100, 100, 255]));

        // Hover frame brighter than normal frame.
        assert!(sheet.get_pixel(52, 0).0[0] > sheet.get_pixel(0, 0).0[0]);
    }

    #[test]
    fn test_write_dpi_variants_creates_parallel_trees() {
        let dir = TempDir::new().unwrap();
        let source = solid(48, 42, Rgba([10, 250, 10, 255]));

        write_dpi_variants(&source, TRANSPORT_FRAME, &OFF, dir.path(), "transport_play.png")
            .unwrap();

        let base = image::open(dir.path().join("transport_play.png")).unwrap();
        assert_eq!((base.width(), base.height()), (152, 42));

        let x150 = image::open(dir.path().join("150/transport_play.png")).unwrap();
        assert_eq!((x150.width(), x150.height()), (72 * 3 + 6 * 2, 63));

        let x200 = image::open(dir.path().join("200/transport_play.png")).unwrap();
        assert_eq!((x200.width(), x200.height()), (96 * 3 + 8 * 2, 84));
    }

    #[test]
    fn test_run_plan_warns_on_missing_source() {
        let assets = TempDir::new().unwrap();
        let build = TempDir::new().unwrap();

        // Only one of the plan's sources exists.
        solid(24, 24, Rgba([0, 0, 250, 255]))
            .save(assets.path().join("stop_off.png"))
            .unwrap();

        let n = run_plan(TRANSPORT_PLAN, TRANSPORT_FRAME, assets.path(), build.path()).unwrap();
        assert_eq!(n, 1);
        assert!(build.path().join("transport_stop.png").exists());
        assert!(!build.path().join("transport_play.png").exists());
    }
}
