//! Project layout and build-time configuration.
//!
//! All path constants live here so each pipeline step takes an explicit
//! `BuildPaths` instead of reaching for globals. The only user-supplied
//! configuration is the optional `deploy.ron` list of REAPER installs.

use std::path::{Path, PathBuf};

/// Theme name used for the packaged zip and the unpacked asset root.
pub const THEME_NAME: &str = "DarkMinimal";

/// DPI variant directories and their scale factors.
///
/// The empty string is the build-dir root (1x); "150" and "200" are the
/// parallel trees REAPER reads for 1.5x and 2x displays.
pub const DPI_DIRS: &[(&str, f32)] = &[("", 1.0), ("150", 1.5), ("200", 2.0)];

/// Resolve a DPI folder name against a base directory.
pub fn dpi_dir(base: &Path, folder: &str) -> PathBuf {
    if folder.is_empty() {
        base.to_path_buf()
    } else {
        base.join(folder)
    }
}

/// All filesystem locations the pipeline reads and writes.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    root: PathBuf,
}

impl BuildPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Single-state transport icon sources (play_off.png, play_on.png, ...).
    pub fn transport_assets(&self) -> PathBuf {
        self.root.join("assets").join("transport")
    }

    /// Single-state track button sources (mute, solo, recarm).
    pub fn track_assets(&self) -> PathBuf {
        self.root.join("assets").join("track_controls")
    }

    /// The logo icon repainted with the theme gradient.
    pub fn logo_file(&self) -> PathBuf {
        self.root.join("assets").join("reaper-logo-icon.png")
    }

    /// Alternate theme source the curated FX icons are staged from.
    pub fn icon_source(&self) -> PathBuf {
        self.root.join("theme_source").join("LCS_Flat_unpacked")
    }

    /// The unpacked asset tree the zip is built from.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build").join(format!("{}_unpacked", THEME_NAME))
    }

    /// The color table packaged at the archive root.
    pub fn theme_file(&self) -> PathBuf {
        self.root.join("build").join(format!("{}.ReaperTheme", THEME_NAME))
    }

    /// Transport layout config inside the unpacked tree.
    pub fn rtconfig_file(&self) -> PathBuf {
        self.build_dir().join("rtconfig.txt")
    }

    /// The packaged theme archive.
    pub fn output_zip(&self) -> PathBuf {
        self.root.join(format!("{}.ReaperThemeZip", THEME_NAME))
    }

    /// Optional user deployment config.
    pub fn deploy_config(&self) -> PathBuf {
        self.root.join("deploy.ron")
    }
}
