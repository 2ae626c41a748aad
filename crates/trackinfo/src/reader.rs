//! `DataReader`: big-endian primitive reader over a borrowed byte slice.
//!
//! Mirrors the classic `DataInput` primitives the wire format was designed
//! around: fixed-width big-endian integers, one-byte booleans and
//! `u16`-length-prefixed modified UTF-8 strings.

use alloc::string::String;

use crate::error::ReadError;
use crate::mutf8;

/// Cursor over an in-memory record.
#[derive(Debug, Clone)]
pub struct DataReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> DataReader<'a> {
    /// Start reading at the beginning of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Consume exactly `n` bytes.
    fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let eof = ReadError::UnexpectedEof {
            needed: n,
            remaining: self.remaining(),
        };
        let end = self.pos.checked_add(n).ok_or(eof)?;
        let buf: &'a [u8] = self.buf;
        let bytes = buf.get(self.pos..end).ok_or(eof)?;
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read one unsigned byte.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if the buffer is exhausted.
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let [b] = self.take_array::<1>()?;
        Ok(b)
    }

    /// Read a boolean byte; any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if the buffer is exhausted.
    pub fn read_bool(&mut self) -> Result<bool, ReadError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read a `u16`-length-prefixed modified UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if the prefix or body is cut short,
    /// or [`ReadError::InvalidModifiedUtf8`] if the body is malformed.
    pub fn read_utf(&mut self) -> Result<String, ReadError> {
        let len = usize::from(self.read_u16()?);
        let start = self.pos;
        let body = self.take(len)?;
        mutf8::decode(body, start)
    }

    /// Read a presence boolean followed by a string when it is `true`.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`read_bool`](Self::read_bool) or
    /// [`read_utf`](Self::read_utf).
    pub fn read_optional_utf(&mut self) -> Result<Option<String>, ReadError> {
        if self.read_bool()? {
            self.read_utf().map(Some)
        } else {
            Ok(None)
        }
    }
}
