//! Curated icon staging from an alternate theme source.
//!
//! The FX and monitor button faces come from the LCS flat theme rather than
//! the stock one. This step copies that fixed list into the build tree,
//! DPI variants included. Transport names never come through here; the
//! sprite composer owns those.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{dpi_dir, BuildPaths, DPI_DIRS};

/// FX and monitor icon files staged from the alternate theme.
pub const FX_FILES: &[&str] = &[
    // TCP FX text
    "track_fx_norm.png",
    "track_fx_dis.png",
    "track_fx_empty.png",
    "track_fx_in_norm.png",
    "track_fx_in_empty.png",
    // TCP FX text overlays
    "track_fx_norm_ol.png",
    "track_fx_dis_ol.png",
    "track_fx_empty_ol.png",
    // TCP power, horizontal
    "track_fxon_h.png",
    "track_fxoff_h.png",
    "track_fxempty_h.png",
    "track_fxon_h_ol.png",
    "track_fxoff_h_ol.png",
    "track_fxempty_h_ol.png",
    // TCP power, vertical
    "track_fxon_v.png",
    "track_fxoff_v.png",
    "track_fxempty_v.png",
    "track_fxon_v_ol.png",
    "track_fxoff_v_ol.png",
    "track_fxempty_v_ol.png",
    // MCP FX text
    "mcp_fx_norm.png",
    "mcp_fx_dis.png",
    "mcp_fx_empty.png",
    "mcp_fx_in_norm.png",
    "mcp_fx_in_empty.png",
    // Monitor FX power and text backgrounds
    "monitor_fx_byp_on.png",
    "monitor_fx_byp_off.png",
    "monitor_fx_byp_byp.png",
    "monitor_fx_on.png",
    "monitor_fx_off.png",
    "monitor_fx_byp.png",
];

/// Copy the icon list from `source_dir` into `build_dir`, carrying any
/// `150`/`200` variants that exist. Missing files warn and are skipped.
/// Returns (copied, missing).
pub fn stage_icons(source_dir: &Path, build_dir: &Path, files: &[&str]) -> Result<(usize, usize)> {
    let mut copied = 0;
    let mut missing = 0;

    for name in files {
        if name.contains("transport_") {
            continue;
        }

        if !source_dir.join(name).exists() {
            println!("  warning: {} not found in icon source", name);
            missing += 1;
            continue;
        }

        for (dpi, _) in DPI_DIRS {
            let src = dpi_dir(source_dir, dpi).join(name);
            if !src.exists() {
                continue;
            }
            let dst_dir = dpi_dir(build_dir, dpi);
            std::fs::create_dir_all(&dst_dir)
                .with_context(|| format!("creating {}", dst_dir.display()))?;
            std::fs::copy(&src, dst_dir.join(name))
                .with_context(|| format!("copying {}", src.display()))?;
        }

        println!("  {}", name);
        copied += 1;
    }

    Ok((copied, missing))
}

/// Pipeline step: stage the curated FX icons. The alternate theme source is
/// optional; without it the step reports and moves on.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let source_dir = paths.icon_source();
    if !source_dir.is_dir() {
        println!("  warning: icon source not found: {}", source_dir.display());
        return Ok(());
    }

    let (copied, missing) = stage_icons(&source_dir, &paths.build_dir(), FX_FILES)?;
    println!("Staged {} FX icons ({} missing)", copied, missing);
    Ok(())
}
