use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::errors::{ParseError, Result};

/// Bounded reads and seeks over a byte source. A read past EOF never
/// returns partial data; every failure surfaces as a `ParseError`.
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read + Seek> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn seek_to(&mut self, pos: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_array(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_array(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_array(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_array(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_array(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_array(&mut self, buf: &mut [u8]) -> Result<()> {
        let offset = self.inner.stream_position()?;
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            ErrorKind::UnexpectedEof => ParseError::UnexpectedEof {
                offset,
                needed: buf.len(),
            },
            _ => ParseError::Io(err),
        })
    }
}
