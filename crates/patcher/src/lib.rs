use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

// Bounded byte-level I/O and the shared error type
pub mod errors;
pub mod reader;

// ELF section lookup and version extraction
pub mod elf;
pub mod versions;

// Pak archive parsing and patching
pub mod pak;
pub mod patcher;

// Scratch-directory orchestration
pub mod workarea;


pub use self::{
    errors::ParseError,
    pak::PakParser,
    versions::{scan_library, scan_versions, Versions},
    workarea::{PatchOutcome, WorkareaManager},
};

/// Patches a pak archive in place.
pub fn patch_pak_file(path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    patcher::patch(&mut file)?;
    Ok(())
}
