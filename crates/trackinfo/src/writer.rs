//! `DataWriter`: big-endian primitive writer backed by a growable buffer.
//!
//! Supports reserving a region and patching it once the rest of the record
//! is known, which is how the header's payload length gets filled in.

use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::config::MAX_UTF_LEN;
use crate::error::WriteError;
use crate::mutf8;

/// Growable output buffer for one record.
#[derive(Debug, Clone, Default)]
pub struct DataWriter {
    buf: Vec<u8>,
}

impl DataWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one unsigned byte.
    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Append a boolean as `1` or `0`.
    pub fn write_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    /// Append a big-endian `i32`.
    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a big-endian `i64`.
    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a `u16`-length-prefixed modified UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::StringTooLong`] if the encoded body exceeds
    /// 65535 bytes; nothing is written in that case.
    pub fn write_utf(&mut self, s: &str) -> Result<(), WriteError> {
        let len = mutf8::encoded_len(s);
        if len > MAX_UTF_LEN {
            return Err(WriteError::StringTooLong { len });
        }
        let prefix = u16::try_from(len).map_err(|_| WriteError::StringTooLong { len })?;
        self.buf.extend_from_slice(&prefix.to_be_bytes());
        mutf8::encode_into(s, &mut self.buf);
        Ok(())
    }

    /// Append a presence boolean, then the string when present.
    ///
    /// # Errors
    ///
    /// Propagates [`WriteError::StringTooLong`] from [`write_utf`](Self::write_utf).
    pub fn write_optional_utf(&mut self, s: Option<&str>) -> Result<(), WriteError> {
        self.write_bool(s.is_some());
        match s {
            Some(s) => self.write_utf(s),
            None => Ok(()),
        }
    }

    /// Overwrite four already-written bytes at `offset` with a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::PatchOutOfRange`] (and changes nothing) if the
    /// range was never written.
    pub fn patch_i32(&mut self, offset: usize, v: i32) -> Result<(), WriteError> {
        let slot = offset
            .checked_add(4)
            .and_then(|end| self.buf.get_mut(offset..end))
            .ok_or(WriteError::PatchOutOfRange { offset })?;
        slot.copy_from_slice(&v.to_be_bytes());
        Ok(())
    }

    /// View the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish and return the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Finish and return the bytes as a standard, padded base64 token.
    #[must_use]
    pub fn into_base64(self) -> String {
        STANDARD.encode(&self.buf)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use crate::reader::DataReader;
    use alloc::vec;

    #[test]
    fn writes_big_endian_integers() {
        let mut w = DataWriter::new();
        w.write_i32(0x0102_0304);
        w.write_i64(-2);
        assert_eq!(
            w.as_bytes(),
            &[1, 2, 3, 4, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
    }

    #[test]
    fn bool_is_single_byte() {
        let mut w = DataWriter::new();
        w.write_bool(true);
        w.write_bool(false);
        assert_eq!(w.into_bytes(), vec![1, 0]);
    }

    #[test]
    fn string_prefix_counts_encoded_bytes() {
        let mut w = DataWriter::new();
        w.write_utf("é\0").unwrap();
        assert_eq!(w.as_bytes(), &[0x00, 0x04, 0xC3, 0xA9, 0xC0, 0x80]);
    }

    #[test]
    fn empty_string_is_zero_length_prefix() {
        let mut w = DataWriter::new();
        w.write_utf("").unwrap();
        assert_eq!(w.as_bytes(), &[0x00, 0x00]);
    }

    #[test]
    fn oversized_string_is_rejected_without_writing() {
        let long = "a".repeat(MAX_UTF_LEN + 1);
        let mut w = DataWriter::new();
        assert_eq!(
            w.write_utf(&long),
            Err(WriteError::StringTooLong { len: MAX_UTF_LEN + 1 })
        );
        assert!(w.is_empty());
    }

    #[test]
    fn longest_string_fits() {
        let long = "a".repeat(MAX_UTF_LEN);
        let mut w = DataWriter::new();
        w.write_utf(&long).unwrap();
        assert_eq!(w.len(), MAX_UTF_LEN + 2);
    }

    #[test]
    fn patch_overwrites_reserved_region() {
        let mut w = DataWriter::new();
        w.write_i32(0);
        w.write_u8(2);
        w.patch_i32(0, 0x4000_0001).unwrap();
        assert_eq!(w.as_bytes(), &[0x40, 0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn patch_outside_written_range_is_refused() {
        let mut w = DataWriter::new();
        w.write_u8(0);
        assert_eq!(w.patch_i32(0, 7), Err(WriteError::PatchOutOfRange { offset: 0 }));
        assert_eq!(
            w.patch_i32(usize::MAX, 7),
            Err(WriteError::PatchOutOfRange { offset: usize::MAX })
        );
        assert_eq!(w.as_bytes(), &[0]);
    }

    #[test]
    fn optional_string_is_readable_back() {
        let mut w = DataWriter::new();
        w.write_optional_utf(Some("https://example.com/a.ogg")).unwrap();
        w.write_optional_utf(None).unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert_eq!(
            r.read_optional_utf().unwrap().as_deref(),
            Some("https://example.com/a.ogg")
        );
        assert_eq!(r.read_optional_utf().unwrap(), None);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn base64_output_is_standard_padded() {
        let mut w = DataWriter::new();
        w.write_u8(0xFB);
        w.write_u8(0xFF);
        assert_eq!(w.into_base64(), "+/8=");
    }
}
