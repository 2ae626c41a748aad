//! Record header: a 32-bit word packing flags and payload length, optionally
//! followed by a version byte.
//!
//! ```text
//! [0..4] headerWord  i32 be = payload_len | (flags << 30)
//! [4]    version     u8     present only when flags & 1
//! ```
//!
//! `payload_len` counts every byte after the header word, version byte
//! included.

use crate::config::{
    FLAGS_SHIFT, HEADER_WORD_LEN, IMPLICIT_VERSION, PAYLOAD_LEN_MASK, VERSIONED_FLAG,
};
use crate::error::{ReadError, WriteError};
use crate::reader::DataReader;
use crate::writer::DataWriter;

/// Decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// `headerWord >> 30`, sign-propagating.
    pub flags: i32,
    /// Explicit version byte, or 1 when the versioned flag is clear.
    pub version: u8,
    /// Declared byte count following the header word.
    pub payload_len: usize,
}

impl Header {
    /// Read the header word and, if flagged, the version byte.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEof`] if the buffer is too short.
    pub fn read(r: &mut DataReader<'_>) -> Result<Self, ReadError> {
        let word = r.read_i32()?;
        let flags = word.wrapping_shr(FLAGS_SHIFT);
        let version = if flags & 1 != 0 {
            r.read_u8()?
        } else {
            IMPLICIT_VERSION
        };
        // Masked to 30 bits, so never negative.
        let payload_len = usize::try_from(word & PAYLOAD_LEN_MASK).unwrap_or(0);
        tracing::trace!(flags, version, payload_len, "read track info header");
        Ok(Self {
            flags,
            version,
            payload_len,
        })
    }

    /// Whether an explicit version byte followed the header word.
    #[must_use]
    pub fn has_version_byte(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// Reserve the header word and write the version byte.
///
/// Must be the first thing written to `w`; [`finish`] patches offset 0.
pub(crate) fn begin(w: &mut DataWriter, version: u8) {
    w.write_i32(0);
    w.write_u8(version);
}

/// Patch the reserved header word with the final payload length and the
/// versioned flag.
///
/// # Errors
///
/// Returns [`WriteError::PayloadTooLarge`] if the payload exceeds 30 bits, or
/// [`WriteError::PatchOutOfRange`] if [`begin`] was never called.
pub(crate) fn finish(w: &mut DataWriter) -> Result<(), WriteError> {
    let len = w.len().saturating_sub(HEADER_WORD_LEN);
    let payload = i32::try_from(len)
        .ok()
        .filter(|&n| n & !PAYLOAD_LEN_MASK == 0)
        .ok_or(WriteError::PayloadTooLarge { len })?;
    w.patch_i32(0, payload | VERSIONED_FLAG)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn versioned_header_reads_version_byte() {
        let buf = [0x40, 0x00, 0x00, 0x05, 0x02, 0, 0, 0, 0];
        let mut r = DataReader::new(&buf);
        let h = Header::read(&mut r).unwrap();
        assert_eq!(h.flags, 1);
        assert_eq!(h.version, 2);
        assert_eq!(h.payload_len, 5);
        assert!(h.has_version_byte());
        assert_eq!(r.position(), 5);
    }

    #[test]
    fn unversioned_header_implies_version_one() {
        let buf = [0x00, 0x00, 0x01, 0x00, 0xAB];
        let mut r = DataReader::new(&buf);
        let h = Header::read(&mut r).unwrap();
        assert_eq!(h.flags, 0);
        assert_eq!(h.version, 1);
        assert_eq!(h.payload_len, 256);
        assert!(!h.has_version_byte());
        // The next byte belongs to the payload.
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn flags_shift_propagates_sign() {
        // Bit 31 and bit 30 set: arithmetic shift yields -1, low bit still 1.
        let buf = [0xC0, 0x00, 0x00, 0x00, 0x07];
        let h = Header::read(&mut DataReader::new(&buf)).unwrap();
        assert_eq!(h.flags, -1);
        assert!(h.has_version_byte());
        assert_eq!(h.version, 7);

        // Bit 31 alone: -2, no version byte.
        let buf = [0x80, 0x00, 0x00, 0x03];
        let h = Header::read(&mut DataReader::new(&buf)).unwrap();
        assert_eq!(h.flags, -2);
        assert_eq!(h.version, 1);
        assert_eq!(h.payload_len, 3);
    }

    #[test]
    fn truncated_header_is_eof() {
        let buf = [0x40, 0x00];
        assert!(Header::read(&mut DataReader::new(&buf)).is_err());
        let buf = [0x40, 0x00, 0x00, 0x00];
        assert_eq!(
            Header::read(&mut DataReader::new(&buf)),
            Err(ReadError::UnexpectedEof { needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn begin_finish_sets_flag_and_length() {
        let mut w = DataWriter::new();
        begin(&mut w, 2);
        w.write_i64(0);
        finish(&mut w).unwrap();
        assert_eq!(w.as_bytes().get(0..5), Some(&[0x40, 0x00, 0x00, 0x09, 0x02][..]));
    }

    #[test]
    fn finish_without_begin_is_refused() {
        let mut w = DataWriter::new();
        assert_eq!(finish(&mut w), Err(WriteError::PatchOutOfRange { offset: 0 }));
    }
}
