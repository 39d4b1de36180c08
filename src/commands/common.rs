use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dirs::{cache_dir, config_dir};
use serde::Deserialize;

/// Engine releases that ship the broken hangouts manifest.
pub const AFFECTED_VERSIONS: [&str; 2] = ["6.6.0", "6.6.1"];

/// Default locations of the shipped resources directory, most specific
/// first.
pub const RESOURCE_DIR_CANDIDATES: [&str; 3] = [
    "/usr/share/qt6/resources",
    "/usr/lib/qt6/resources",
    "/usr/lib/x86_64-linux-gnu/qt6/resources",
];

/// Default locations of the engine shared library.
pub const LIBRARY_CANDIDATES: [&str; 2] = [
    "/usr/lib/libQt6WebEngineCore.so.6",
    "/usr/lib/x86_64-linux-gnu/libQt6WebEngineCore.so.6",
];

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub library: Option<PathBuf>,
    pub resource_dirs: Option<Vec<PathBuf>>,
    pub scratch_dir: Option<PathBuf>,
    /// Forces the quirk on or off instead of the version check.
    pub disable_extension: Option<bool>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let Some(path) = config_dir().map(|dir| dir.join("respak/config.yml")) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn candidate_resource_dirs(&self) -> Vec<PathBuf> {
        match &self.resource_dirs {
            Some(dirs) if !dirs.is_empty() => dirs.clone(),
            _ => RESOURCE_DIR_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }

    pub fn scratch_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.scratch_dir {
            return Ok(dir.clone());
        }
        let base = cache_dir().context("could not determine the cache directory")?;
        Ok(base.join("respak/resources"))
    }

    pub fn library(&self) -> Result<PathBuf> {
        if let Some(library) = &self.library {
            return Ok(library.clone());
        }
        for candidate in LIBRARY_CANDIDATES {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
        bail!("no engine library found; set `library` in the config file");
    }
}
