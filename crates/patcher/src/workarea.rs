use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::patcher;

/// File inside the resources directory that carries the extension.
pub const PAK_FILENAME: &str = "qtwebengine_resources.pak";

/// Outcome of the best-effort patch workflow. Failures surface here as
/// `Skipped`, never as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied(PathBuf),
    Skipped(String),
}

pub struct WorkareaManager {
    scratch_dir: PathBuf,
    candidates: Vec<PathBuf>,
}

impl WorkareaManager {
    pub fn new(scratch_dir: PathBuf, candidates: Vec<PathBuf>) -> Self {
        Self {
            scratch_dir,
            candidates,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Copies the shipped resources into the scratch directory and
    /// patches the pak archive there. When the quirk is not needed,
    /// only a stale scratch copy is cleaned up.
    pub fn apply(&self, quirk_needed: bool) -> PatchOutcome {
        if !quirk_needed {
            self.remove_scratch_copy();
            return PatchOutcome::Skipped("patch not needed".to_string());
        }
        match self.copy_and_patch() {
            Ok(path) => {
                log::info!("patched resources prepared at {}", path.display());
                PatchOutcome::Applied(path)
            }
            Err(err) => {
                log::warn!("leaving resources unpatched: {err:#}");
                self.remove_scratch_copy();
                PatchOutcome::Skipped(format!("{err:#}"))
            }
        }
    }

    fn copy_and_patch(&self) -> Result<PathBuf> {
        let source = self.find_resources_dir()?;

        // Always start from the pristine shipped copy.
        self.remove_scratch_copy();
        copy_dir(&source, &self.scratch_dir).with_context(|| {
            format!(
                "copying {} to {}",
                source.display(),
                self.scratch_dir.display()
            )
        })?;

        let pak_path = self.scratch_dir.join(PAK_FILENAME);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&pak_path)
            .with_context(|| format!("opening {}", pak_path.display()))?;
        patcher::patch(&mut file)?;
        Ok(self.scratch_dir.clone())
    }

    fn find_resources_dir(&self) -> Result<PathBuf> {
        for candidate in &self.candidates {
            if candidate.is_dir() {
                return Ok(candidate.clone());
            }
        }
        bail!("no resources directory found among {:?}", self.candidates);
    }

    fn remove_scratch_copy(&self) {
        if self.scratch_dir.exists() {
            if let Err(err) = fs::remove_dir_all(&self.scratch_dir) {
                log::warn!("failed to remove {}: {err}", self.scratch_dir.display());
            }
        }
    }
}

fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
