//! Build pipeline for the DarkMinimal REAPER color theme
//!
//! Usage:
//!   darkmin build               # Full build: patch, compose, recolor, package, deploy
//!   darkmin colors              # Apply the palette to the .ReaperTheme color table
//!   darkmin transport-sprites   # Compose transport sheets at all DPI scales
//!   darkmin package             # Zip the build tree into a .ReaperThemeZip
//!
//! Every step reads and writes under --root (default: current directory).

mod color;
mod config;
mod deploy;
mod icons;
mod logo;
mod package;
mod pipeline;
mod recolor;
mod rtconfig;
mod sprite;
mod theme;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::BuildPaths;

#[derive(Parser)]
#[command(name = "darkmin")]
#[command(about = "Build automation for the DarkMinimal REAPER theme")]
struct Cli {
    /// Project root holding assets/, build/ and the optional deploy.ron
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full build sequence and deploy
    Build,
    /// Rewrite transport geometry in rtconfig.txt
    Rtconfig,
    /// Apply the palette to the .ReaperTheme color table
    Colors,
    /// Compose transport button sprites at all DPI scales
    TransportSprites,
    /// Compose track button sprites at all DPI scales
    TrackSprites,
    /// Stage curated FX icons from the alternate theme source
    Icons,
    /// Hue-shift green/teal icons to warm blue
    Recolor,
    /// Repaint the logo icon with the theme gradient
    Logo,
    /// Package the build tree into a .ReaperThemeZip
    Package,
    /// Copy the packaged theme into configured REAPER installs
    Deploy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = BuildPaths::new(&cli.root);

    match cli.command {
        Commands::Build => pipeline::run_full_build(&paths),
        Commands::Rtconfig => rtconfig::run(&paths),
        Commands::Colors => theme::run(&paths),
        Commands::TransportSprites => sprite::run_transport(&paths),
        Commands::TrackSprites => sprite::run_track(&paths),
        Commands::Icons => icons::run(&paths),
        Commands::Recolor => recolor::run(&paths),
        Commands::Logo => logo::run(&paths),
        Commands::Package => package::run(&paths),
        Commands::Deploy => deploy::run(&paths),
    }
}
