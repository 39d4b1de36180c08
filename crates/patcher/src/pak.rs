use std::io::{Read, Seek};

use crate::errors::{ParseError, Result};
use crate::reader::ByteReader;

/// The only archive version this parser understands.
pub const SUPPORTED_VERSION: u32 = 5;

/// Comment Chromium embeds at the top of the bundled hangouts extension
/// manifest.
pub const MANIFEST_MARKER: &[u8] = b"// Extension ID: nkeimhogjdpnpccoofpliimaahmaaome";

/// Resource ids the manifest shipped under in known engine releases,
/// probed before falling back to a full scan of the index.
pub const CANDIDATE_IDS: [u16; 4] = [
    36197, // QtWebEngine 6.6
    34897, // QtWebEngine 6.5
    32707, // QtWebEngine 6.4
    27537, // QtWebEngine 6.3
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PakHeader {
    pub encoding: u32,       // Text encoding of the resources
    pub resource_count: u16, // Number of real entries in the index
    pub alias_count: u16,    // Number of alias records (not consumed here)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PakEntry {
    pub id: u16,     // Resource id
    pub offset: u32, // File offset of the resource bytes
    pub size: u32,   // Derived from the next entry's offset
}

/// Parses a pak archive far enough to locate the extension manifest.
#[derive(Debug)]
pub struct PakParser {
    pub manifest_entry: PakEntry,
    manifest: Vec<u8>,
    /// Entries content-sniffed before the manifest was found.
    pub entries_probed: usize,
}

impl PakParser {
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
        let entries = parse_index(reader)?;
        Self::find_manifest(reader, &entries)
    }

    fn find_manifest<R: Read + Seek>(
        reader: &mut ByteReader<R>,
        entries: &[PakEntry],
    ) -> Result<Self> {
        let mut probed = 0;

        // Fast path: ids the manifest is known to ship under.
        for id in CANDIDATE_IDS {
            if let Some(entry) = entries.iter().find(|entry| entry.id == id) {
                probed += 1;
                let data = read_entry(reader, entry)?;
                if is_extension_manifest(&data) {
                    log::debug!("manifest found at hinted id {id}");
                    return Ok(Self {
                        manifest_entry: *entry,
                        manifest: data,
                        entries_probed: probed,
                    });
                }
            }
        }

        // Slow path: sniff the remaining entries in table order.
        for entry in entries.iter().filter(|entry| !CANDIDATE_IDS.contains(&entry.id)) {
            probed += 1;
            let data = read_entry(reader, entry)?;
            if is_extension_manifest(&data) {
                log::debug!(
                    "manifest found at id {} after sniffing {probed} entries",
                    entry.id
                );
                return Ok(Self {
                    manifest_entry: *entry,
                    manifest: data,
                    entries_probed: probed,
                });
            }
        }
        Err(ParseError::ManifestNotFound)
    }

    /// Absolute file offset at which `target` occurs inside the
    /// manifest.
    pub fn find_patch_offset(&self, target: &[u8]) -> Result<u64> {
        let index =
            find_subsequence(&self.manifest, target).ok_or(ParseError::TargetNotFound)?;
        Ok(u64::from(self.manifest_entry.offset) + index as u64)
    }

    pub fn manifest(&self) -> &[u8] {
        &self.manifest
    }
}

/// Parses the version tag, header and entry index; validates the
/// sentinel and derives entry sizes. The sentinel is dropped from the
/// result.
pub fn parse_index<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Vec<PakEntry>> {
    let version = reader.read_u32()?;
    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedPakVersion(version));
    }
    let header = PakHeader {
        encoding: reader.read_u32()?,
        resource_count: reader.read_u16()?,
        alias_count: reader.read_u16()?,
    };

    let count = header.resource_count as usize;
    let mut raw = Vec::with_capacity(count + 1);
    for _ in 0..count + 1 {
        raw.push((reader.read_u16()?, reader.read_u32()?));
    }

    match raw.last() {
        Some(&(0, _)) => {}
        _ => return Err(ParseError::MissingSentinel),
    }

    let mut entries = Vec::with_capacity(count);
    for (index, pair) in raw.windows(2).enumerate() {
        let (id, offset) = pair[0];
        let (_, next_offset) = pair[1];
        if id == 0 {
            return Err(ParseError::UnexpectedSentinel(index));
        }
        let size = next_offset.checked_sub(offset).ok_or(ParseError::BadEntrySize {
            id,
            offset,
            next_offset,
        })?;
        entries.push(PakEntry { id, offset, size });
    }
    Ok(entries)
}

fn read_entry<R: Read + Seek>(reader: &mut ByteReader<R>, entry: &PakEntry) -> Result<Vec<u8>> {
    reader.seek_to(u64::from(entry.offset))?;
    reader.read_bytes(entry.size as usize)
}

/// Content predicate shared by the hinted probe and the full scan.
pub fn is_extension_manifest(data: &[u8]) -> bool {
    data.starts_with(b"{")
        && data.trim_ascii_end().ends_with(b"}")
        && find_subsequence(data, MANIFEST_MARKER).is_some()
}

pub(crate) fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
