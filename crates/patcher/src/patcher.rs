use std::io::{Read, Seek, SeekFrom, Write};

use crate::errors::Result;
use crate::pak::PakParser;
use crate::reader::ByteReader;

/// Connectable-URL pattern inside the manifest that grants the
/// extension access to real pages.
pub const TARGET_URL: &[u8] = b"https://*.google.com/*";

/// Points the extension at a reserved, unresolvable host instead.
pub const REPLACEMENT_URL: &[u8] = b"https://resp.invalid/*";

// Resource offsets must not shift, so the replacement has to occupy
// exactly the target's bytes.
const _: () = assert!(TARGET_URL.len() == REPLACEMENT_URL.len());

/// Rewrites the manifest's connectable-URL pattern in place. The file
/// is written exactly once, after all parsing succeeded; any earlier
/// failure leaves it byte-for-byte untouched.
pub fn patch<F: Read + Write + Seek>(file: &mut F) -> Result<()> {
    patch_with(file, TARGET_URL, REPLACEMENT_URL)
}

pub fn patch_with<F: Read + Write + Seek>(
    file: &mut F,
    target: &[u8],
    replacement: &[u8],
) -> Result<()> {
    assert_eq!(
        target.len(),
        replacement.len(),
        "replacement would shift resource offsets"
    );

    let parser = PakParser::parse(&mut ByteReader::new(&mut *file))?;
    let offset = parser.find_patch_offset(target)?;

    file.seek(SeekFrom::Start(offset))?;
    file.write_all(replacement)?;
    log::debug!("patched {} bytes at offset {offset:#x}", replacement.len());
    Ok(())
}
