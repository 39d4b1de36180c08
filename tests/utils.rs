#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use respak_patcher::pak::{MANIFEST_MARKER, SUPPORTED_VERSION};

/// Test environment with a synthetic resources directory and a scratch
/// target, both under a private temp directory.
pub struct TestEnv {
    pub temp_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!("respak_test_{name}"));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).expect("Failed to remove existing test directory");
        }
        let resources_dir = temp_dir.join("resources");
        let scratch_dir = temp_dir.join("scratch");
        fs::create_dir_all(&resources_dir).expect("Failed to create test directory");

        Self {
            temp_dir,
            resources_dir,
            scratch_dir,
        }
    }

    /// Writes a synthetic pak with the hangouts manifest plus a sibling
    /// file into the resources directory; returns the pak path.
    pub fn write_resources(&self) -> PathBuf {
        let manifest = sample_manifest();
        let pak = build_pak(&[(1, b"stub resource"), (34897, &manifest)]);
        let pak_path = self.resources_dir.join("qtwebengine_resources.pak");
        fs::write(&pak_path, pak).expect("Failed to write pak file");
        fs::write(self.resources_dir.join("icudtl.dat"), b"icu stub")
            .expect("Failed to write sibling file");
        pak_path
    }

    pub fn cleanup(self) {
        fs::remove_dir_all(&self.temp_dir).expect("Failed to remove test directory");
    }
}

pub fn sample_manifest() -> Vec<u8> {
    let mut manifest = Vec::new();
    manifest.extend_from_slice(b"{\n");
    manifest.extend_from_slice(MANIFEST_MARKER);
    manifest.extend_from_slice(
        b"\n\"externally_connectable\": {\"matches\": [\"https://*.google.com/*\"]},\n\"name\": \"Hangouts\"\n}\n",
    );
    manifest
}

pub fn build_pak(entries: &[(u16, &[u8])]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&SUPPORTED_VERSION.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());

    let mut offset = 12 + 6 * (entries.len() as u32 + 1);
    for (id, data) in entries {
        bytes.extend_from_slice(&id.to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
        offset += data.len() as u32;
    }
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&offset.to_le_bytes());

    for (_, data) in entries {
        bytes.extend_from_slice(data);
    }
    bytes
}

/// Minimal 64-bit little-endian ELF carrying the given sections, with a
/// trailing .shstrtab and the section header table at the end.
pub fn build_elf64(sections: &[(&str, &[u8])]) -> Vec<u8> {
    let mut names = vec![0u8];
    let mut name_offsets = Vec::new();
    for (name, _) in sections {
        name_offsets.push(names.len() as u32);
        names.extend_from_slice(name.as_bytes());
        names.push(0);
    }
    let shstrtab_name = names.len() as u32;
    names.extend_from_slice(b".shstrtab");
    names.push(0);

    let section_count = sections.len() as u16 + 2;
    let mut data_offset = 64u64;
    let mut placed = Vec::new();
    let mut payload = Vec::new();
    for (_, data) in sections {
        placed.push((data_offset, data.len() as u64));
        payload.extend_from_slice(data);
        data_offset += data.len() as u64;
    }
    let names_offset = data_offset;
    let shoff = names_offset + names.len() as u64;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[0x7f, 0x45, 0x4c, 0x46]);
    bytes.extend_from_slice(&[2, 1, 1, 0, 0]);
    bytes.extend_from_slice(&[0u8; 7]);
    bytes.extend_from_slice(&3u16.to_le_bytes());
    bytes.extend_from_slice(&62u16.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&shoff.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&64u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&64u16.to_le_bytes());
    bytes.extend_from_slice(&section_count.to_le_bytes());
    bytes.extend_from_slice(&(section_count - 1).to_le_bytes());

    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&names);

    bytes.extend_from_slice(&[0u8; 64]);
    for (i, (offset, size)) in placed.iter().enumerate() {
        push_shdr64(&mut bytes, name_offsets[i], 1, *offset, *size);
    }
    push_shdr64(&mut bytes, shstrtab_name, 3, names_offset, names.len() as u64);

    bytes
}

fn push_shdr64(bytes: &mut Vec<u8>, name: u32, sh_type: u32, offset: u64, size: u64) {
    bytes.extend_from_slice(&name.to_le_bytes());
    bytes.extend_from_slice(&sh_type.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
    bytes.extend_from_slice(&offset.to_le_bytes());
    bytes.extend_from_slice(&size.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&1u64.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes());
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
