use std::io::{Read, Seek};

use crate::errors::{ParseError, Result};
use crate::reader::ByteReader;

pub const ELF_MAGIC: [u8; 4] = [0x7f, 0x45, 0x4c, 0x46]; // "\x7FELF"

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    Bits32,
    Bits64,
}

impl Bitness {
    fn from_class(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Bits32),
            2 => Ok(Self::Bits64),
            other => Err(ParseError::UnsupportedClass(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    fn from_data(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Little),
            2 => Ok(Self::Big),
            other => Err(ParseError::UnsupportedData(other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ElfIdentification {
    pub bitness: Bitness,       // EI_CLASS
    pub endianness: Endianness, // EI_DATA
    pub version: u8,            // EI_VERSION, always 1
    pub os_abi: u8,             // EI_OSABI
    pub abi_version: u8,        // EI_ABIVERSION
}

/// File header with 32-bit address/offset fields widened to u64 so one
/// struct covers both layouts.
#[derive(Debug, Clone)]
pub struct ElfFileHeader {
    pub e_type: u16,      // Object file type
    pub e_machine: u16,   // Machine architecture
    pub e_version: u32,   // Object file version
    pub e_entry: u64,     // Entry point address
    pub e_phoff: u64,     // Program header offset
    pub e_shoff: u64,     // Section header offset
    pub e_flags: u32,     // Processor-specific flags
    pub e_ehsize: u16,    // ELF header size
    pub e_phentsize: u16, // Size of program header entry
    pub e_phnum: u16,     // Number of program header entries
    pub e_shentsize: u16, // Size of section header entry
    pub e_shnum: u16,     // Number of section header entries
    pub e_shstrndx: u16,  // Section name string table index
}

#[derive(Debug, Clone)]
pub struct SectionHeader {
    pub sh_name: u32,      // Section name (string table offset)
    pub sh_type: u32,      // Section type
    pub sh_flags: u64,     // Section flags
    pub sh_addr: u64,      // Section virtual addr at execution
    pub sh_offset: u64,    // Section file offset
    pub sh_size: u64,      // Section size in bytes
    pub sh_link: u32,      // Link to another section
    pub sh_info: u32,      // Additional section info
    pub sh_addralign: u64, // Section alignment
    pub sh_entsize: u64,   // Entry size if section holds table
}

pub fn parse_identification<R: Read + Seek>(
    reader: &mut ByteReader<R>,
) -> Result<ElfIdentification> {
    let ident = reader.read_bytes(16)?;
    if ident[0..4] != ELF_MAGIC {
        return Err(ParseError::BadMagic);
    }
    let bitness = Bitness::from_class(ident[4])?;
    let endianness = Endianness::from_data(ident[5])?;
    let version = ident[6];
    if version != 1 {
        return Err(ParseError::UnsupportedElfVersion(version));
    }
    Ok(ElfIdentification {
        bitness,
        endianness,
        version,
        os_abi: ident[7],
        abi_version: ident[8],
    })
}

pub fn parse_file_header<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    bitness: Bitness,
) -> Result<ElfFileHeader> {
    let e_type = reader.read_u16()?;
    let e_machine = reader.read_u16()?;
    let e_version = reader.read_u32()?;
    let (e_entry, e_phoff, e_shoff) = match bitness {
        Bitness::Bits32 => (
            u64::from(reader.read_u32()?),
            u64::from(reader.read_u32()?),
            u64::from(reader.read_u32()?),
        ),
        Bitness::Bits64 => (reader.read_u64()?, reader.read_u64()?, reader.read_u64()?),
    };
    Ok(ElfFileHeader {
        e_type,
        e_machine,
        e_version,
        e_entry,
        e_phoff,
        e_shoff,
        e_flags: reader.read_u32()?,
        e_ehsize: reader.read_u16()?,
        e_phentsize: reader.read_u16()?,
        e_phnum: reader.read_u16()?,
        e_shentsize: reader.read_u16()?,
        e_shnum: reader.read_u16()?,
        e_shstrndx: reader.read_u16()?,
    })
}

pub fn parse_section_header<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    bitness: Bitness,
) -> Result<SectionHeader> {
    let sh_name = reader.read_u32()?;
    let sh_type = reader.read_u32()?;
    let (sh_flags, sh_addr, sh_offset, sh_size) = match bitness {
        Bitness::Bits32 => (
            u64::from(reader.read_u32()?),
            u64::from(reader.read_u32()?),
            u64::from(reader.read_u32()?),
            u64::from(reader.read_u32()?),
        ),
        Bitness::Bits64 => (
            reader.read_u64()?,
            reader.read_u64()?,
            reader.read_u64()?,
            reader.read_u64()?,
        ),
    };
    let sh_link = reader.read_u32()?;
    let sh_info = reader.read_u32()?;
    let (sh_addralign, sh_entsize) = match bitness {
        Bitness::Bits32 => (u64::from(reader.read_u32()?), u64::from(reader.read_u32()?)),
        Bitness::Bits64 => (reader.read_u64()?, reader.read_u64()?),
    };
    Ok(SectionHeader {
        sh_name,
        sh_type,
        sh_flags,
        sh_addr,
        sh_offset,
        sh_size,
        sh_link,
        sh_info,
        sh_addralign,
        sh_entsize,
    })
}

/// Looks up a section header by name. Returns the first header whose
/// resolved name matches; the remaining table is not scanned.
pub fn find_section<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    name: &str,
) -> Result<SectionHeader> {
    reader.seek_to(0)?;
    let ident = parse_identification(reader)?;
    if ident.endianness != Endianness::Little {
        return Err(ParseError::BigEndian);
    }
    let header = parse_file_header(reader, ident.bitness)?;

    // The designated string-table section resolves every other
    // section's name.
    let strtab_pos =
        header.e_shoff + u64::from(header.e_shstrndx) * u64::from(header.e_shentsize);
    reader.seek_to(strtab_pos)?;
    let strtab = parse_section_header(reader, ident.bitness)?;
    reader.seek_to(strtab.sh_offset)?;
    let names = reader.read_bytes(strtab.sh_size as usize)?;

    for i in 0..header.e_shnum {
        reader.seek_to(header.e_shoff + u64::from(i) * u64::from(header.e_shentsize))?;
        let section = parse_section_header(reader, ident.bitness)?;
        if resolve_name(&names, section.sh_name)? == name.as_bytes() {
            return Ok(section);
        }
    }
    Err(ParseError::SectionNotFound(name.to_string()))
}

/// NUL-terminated name lookup into the string table blob.
fn resolve_name(table: &[u8], offset: u32) -> Result<&[u8]> {
    let start = offset as usize;
    if start >= table.len() {
        return Err(ParseError::BadNameOffset {
            offset,
            len: table.len(),
        });
    }
    let rest = &table[start..];
    let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
    Ok(&rest[..end])
}
