use thiserror::Error;

/// The only error type raised by the readers, parsers and the patcher.
/// Callers treat any variant as "feature unavailable", never as fatal.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of file at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: u64, needed: usize },

    // ELF structure
    #[error("bad ELF magic")]
    BadMagic,
    #[error("unsupported ELF class {0}")]
    UnsupportedClass(u8),
    #[error("unsupported ELF data encoding {0}")]
    UnsupportedData(u8),
    #[error("unsupported ELF version {0}")]
    UnsupportedElfVersion(u8),
    #[error("big-endian binaries are not supported")]
    BigEndian,
    #[error("section '{0}' not found")]
    SectionNotFound(String),
    #[error("section name offset {offset} past end of string table ({len} bytes)")]
    BadNameOffset { offset: u32, len: usize },

    // Version scanning
    #[error("version pattern not found")]
    PatternNotFound,
    #[error("version match is not valid UTF-8")]
    InvalidVersionText,

    // Pak structure
    #[error("unsupported pak version {0}")]
    UnsupportedPakVersion(u32),
    #[error("unexpected sentinel entry at index {0}")]
    UnexpectedSentinel(usize),
    #[error("missing sentinel entry at end of index")]
    MissingSentinel,
    #[error("resource {id} ends before it starts (offset {offset}, next offset {next_offset})")]
    BadEntrySize { id: u16, offset: u32, next_offset: u32 },
    #[error("extension manifest not found in pak")]
    ManifestNotFound,
    #[error("target string not found in manifest")]
    TargetNotFound,
}

pub type Result<T> = std::result::Result<T, ParseError>;
