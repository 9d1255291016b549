//! Full build driver.
//!
//! Runs every step in a fixed order and halts on the first failure. Each
//! step is also exposed as its own subcommand; this module only sequences
//! them.

use anyhow::{Context, Result};

use crate::config::BuildPaths;
use crate::{deploy, icons, logo, package, recolor, rtconfig, sprite, theme};

type Step = (&'static str, fn(&BuildPaths) -> Result<()>);

/// The fixed build sequence.
const STEPS: &[Step] = &[
    ("Updating rtconfig.txt layout", rtconfig::run),
    ("Applying palette to color table", theme::run),
    ("Composing transport sprites", sprite::run_transport),
    ("Composing track button sprites", sprite::run_track),
    ("Staging FX icons", icons::run),
    ("Recoloring green icons", recolor::run),
    ("Repainting logo", logo::run),
    ("Packaging theme zip", package::run),
    ("Deploying", deploy::run),
];

/// Run the whole pipeline: first failing step stops the rest.
pub fn run_full_build(paths: &BuildPaths) -> Result<()> {
    println!("==================================================");
    println!("DarkMinimal Theme - Full Build");
    println!("==================================================");

    let total = STEPS.len();
    for (i, (description, step)) in STEPS.iter().enumerate() {
        println!();
        println!("--------------------------------------------------");
        println!("[{}/{}] {}", i + 1, total, description);
        println!("--------------------------------------------------");
        step(paths).with_context(|| format!("step failed: {}", description))?;
    }

    println!();
    println!("==================================================");
    println!("Build complete! Reload the theme in REAPER.");
    println!("==================================================");
    Ok(())
}
