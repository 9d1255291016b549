//! Theme deployment to local REAPER installs.
//!
//! The destination list comes from an optional `deploy.ron` next to the
//! project root. No config means no deployment, not a failure: the packaged
//! zip still sits in the project root. A listed directory that does not
//! exist is skipped with a warning.
//!
//! ```ron
//! DeployConfig(
//!     destinations: [
//!         "/home/user/.config/REAPER/ColorThemes",
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::BuildPaths;

/// User-supplied list of REAPER `ColorThemes` directories.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    pub destinations: Vec<PathBuf>,
}

/// Load `deploy.ron` if present. `Ok(None)` means deployment is disabled;
/// a config that exists but does not parse is an error.
pub fn load_config(path: &Path) -> Result<Option<DeployConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: DeployConfig =
        ron::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(config))
}

/// Copy the packaged zip into every destination that exists, overwriting
/// any previous deploy. Missing destinations warn and are skipped.
/// Returns the number of copies made.
pub fn deploy(zip_path: &Path, destinations: &[PathBuf]) -> Result<usize> {
    if !zip_path.is_file() {
        bail!("missing theme zip: {} (run package first)", zip_path.display());
    }
    let zip_name = zip_path
        .file_name()
        .with_context(|| format!("bad zip path: {}", zip_path.display()))?;

    let mut deployed = 0;
    for dest_dir in destinations {
        if !dest_dir.is_dir() {
            println!("  warning: deploy directory not found: {}", dest_dir.display());
            continue;
        }
        let dest = dest_dir.join(zip_name);
        std::fs::copy(zip_path, &dest)
            .with_context(|| format!("copying to {}", dest.display()))?;
        println!("  deployed to: {}", dest.display());
        deployed += 1;
    }

    Ok(deployed)
}

/// Pipeline step: deploy according to `deploy.ron`, if present.
pub fn run(paths: &BuildPaths) -> Result<()> {
    let Some(config) = load_config(&paths.deploy_config())? else {
        println!("No deploy.ron found; skipping deployment");
        return Ok(());
    };

    let n = deploy(&paths.output_zip(), &config.destinations)?;
    println!("Deployed to {} of {} destinations", n, config.destinations.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_disables_deployment() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("deploy.ron")).unwrap().is_none());
    }

    #[test]
    fn test_config_parses_destinations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deploy.ron");
        std::fs::write(&path, r#"DeployConfig(destinations: ["/a/b", "/c"])"#).unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.destinations, vec![PathBuf::from("/a/b"), PathBuf::from("/c")]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deploy.ron");
        std::fs::write(&path, "not ron at all (").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_deploy_copies_and_skips_missing() {
        let dir = TempDir::new().unwrap();
        let zip = dir.path().join("Theme.ReaperThemeZip");
        std::fs::write(&zip, b"zipbytes").unwrap();

        let existing = dir.path().join("themes");
        std::fs::create_dir(&existing).unwrap();
        // Pre-existing deploy gets overwritten.
        std::fs::write(existing.join("Theme.ReaperThemeZip"), b"old").unwrap();
        let missing = dir.path().join("nope");

        let n = deploy(&zip, &[existing.clone(), missing]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(
            std::fs::read(existing.join("Theme.ReaperThemeZip")).unwrap(),
            b"zipbytes"
        );
    }

    #[test]
    fn test_deploy_without_zip_fails() {
        let dir = TempDir::new().unwrap();
        let err = deploy(&dir.path().join("missing.zip"), &[]).unwrap_err();
        assert!(err.to_string().contains("missing.zip"));
    }
}
