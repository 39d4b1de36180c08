use std::fs::File;
use std::path::Path;
use std::str;

use lazy_static::lazy_static;
use memmap2::{Mmap, MmapOptions};
use regex::bytes::Regex;

use crate::elf::{self, SectionHeader};
use crate::errors::{ParseError, Result};
use crate::reader::ByteReader;

lazy_static! {
    static ref VERSION_PATTERN: Regex =
        Regex::new(r"QtWebEngine/([0-9.]+) Chrome/([0-9.]+)").unwrap();
}

/// Engine and bundled Chromium versions embedded in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versions {
    pub webengine: String,
    pub chromium: String,
}

/// Leftmost match of the version pattern in `data`.
pub fn scan_versions(data: &[u8]) -> Result<Versions> {
    let caps = VERSION_PATTERN
        .captures(data)
        .ok_or(ParseError::PatternNotFound)?;
    Ok(Versions {
        webengine: decode(&caps[1])?,
        chromium: decode(&caps[2])?,
    })
}

fn decode(raw: &[u8]) -> Result<String> {
    str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| ParseError::InvalidVersionText)
}

/// Scans a shared library for the embedded version pair. Only the
/// .rodata section is mapped; these libraries are routinely hundreds of
/// megabytes.
pub fn scan_library(path: &Path) -> Result<Versions> {
    let file = File::open(path)?;
    let mut reader = ByteReader::new(&file);
    let rodata = elf::find_section(&mut reader, ".rodata")?;
    match map_section(&file, &rodata) {
        Ok(mapping) => scan_versions(&mapping),
        Err(err) => {
            log::debug!("mapping .rodata failed ({err}), falling back to a bounded read");
            scan_versions(&read_section(&file, &rodata)?)
        }
    }
}

pub(crate) fn map_section(file: &File, section: &SectionHeader) -> std::io::Result<Mmap> {
    // Read-only mapping of exactly the section's byte range; memmap2
    // rounds the offset down to the allocation granularity itself.
    unsafe {
        MmapOptions::new()
            .offset(section.sh_offset)
            .len(section.sh_size as usize)
            .map(file)
    }
}

pub(crate) fn read_section(file: &File, section: &SectionHeader) -> Result<Vec<u8>> {
    let mut reader = ByteReader::new(file);
    reader.seek_to(section.sh_offset)?;
    reader.read_bytes(section.sh_size as usize)
}
