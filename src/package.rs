//! Theme archive packaging.
//!
//! A `.ReaperThemeZip` is a plain zip: the `.ReaperTheme` color table at the
//! archive root, and the unpacked asset tree under a directory named after
//! it. Member order is sorted so identical inputs produce an identical
//! member list (timestamps are not made reproducible).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::BuildPaths;

/// Package `build_dir` and `theme_file` into `output_zip`.
/// Returns the number of archive members written.
pub fn package_theme(build_dir: &Path, theme_file: &Path, output_zip: &Path) -> Result<usize> {
    if !theme_file.is_file() {
        bail!("missing theme file: {}", theme_file.display());
    }
    if !build_dir.is_dir() {
        bail!("missing build directory: {}", build_dir.display());
    }
    let root_name = build_dir
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("bad build directory name: {}", build_dir.display()))?;

    if output_zip.exists() {
        std::fs::remove_file(output_zip)
            .with_context(|| format!("removing old {}", output_zip.display()))?;
    }

    let file = File::create(output_zip)
        .with_context(|| format!("creating {}", output_zip.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut members = 0;

    // Color table at the archive root.
    let theme_name = theme_file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("bad theme file name: {}", theme_file.display()))?;
    zip.start_file(theme_name, options)?;
    zip.write_all(&std::fs::read(theme_file)?)?;
    members += 1;

    // Asset tree, sorted for a deterministic member list.
    let mut paths: Vec<_> = WalkDir::new(build_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    paths.sort();

    for path in paths {
        let rel = path
            .strip_prefix(build_dir)
            .expect("walked path is under build_dir");
        let arc_name = format!(
            "{}/{}",
            root_name,
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        );
        zip.start_file(arc_name, options)?;
        zip.write_all(&std::fs::read(&path)?)?;
        members += 1;
    }

    zip.finish()?;
    Ok(members)
}

/// Pipeline step: package the theme archive.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let output_zip = paths.output_zip();
    let members = package_theme(&paths.build_dir(), &paths.theme_file(), &output_zip)?;
    println!("Created: {} ({} members)", output_zip.display(), members);
    Ok(())
}
