//! Error types for the track info codec.
//!
//! The codec itself classifies exactly one failure, an unsupported version.
//! Everything else comes from the primitive reader/writer or the transport
//! layer and is wrapped unchanged.

use core::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Primitive I/O errors
// ---------------------------------------------------------------------------

/// Failure while reading primitives from a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The buffer ended before the requested value.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// A string body is not valid modified UTF-8.
    #[error("invalid modified UTF-8 at byte offset {offset}")]
    InvalidModifiedUtf8 {
        /// Absolute offset of the offending byte.
        offset: usize,
    },
}

/// Failure while writing primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The encoded string does not fit in a `u16` length prefix.
    #[error("string too long: {len} encoded bytes exceeds 65535")]
    StringTooLong {
        /// Encoded length in bytes.
        len: usize,
    },
    /// A patch targeted bytes that were never written.
    #[error("cannot patch 4 bytes at offset {offset}: range not written")]
    PatchOutOfRange {
        /// Requested start offset.
        offset: usize,
    },
    /// The record is too large for the 30-bit header length field.
    #[error("payload of {len} bytes does not fit the 30-bit header length")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Codec error
// ---------------------------------------------------------------------------

/// Versions with a registered handler, rendered as `1, 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedVersions(pub &'static [u8]);

impl fmt::Display for SupportedVersions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for version in self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{version}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error returned by [`crate::decode`] and [`crate::encode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No decoder or encoder is registered for the requested version.
    #[error("unsupported track info version {requested} (supported: {supported})")]
    UnsupportedVersion {
        /// Version named by the caller or the version byte.
        requested: u8,
        /// Every version the consulted table knows.
        supported: SupportedVersions,
    },
    /// Reading a primitive failed.
    #[error(transparent)]
    Read(#[from] ReadError),
    /// Writing a primitive failed.
    #[error(transparent)]
    Write(#[from] WriteError),
    /// The textual token is not valid base64.
    #[error("invalid base64 track token: {0}")]
    Base64(base64::DecodeError),
}

// Not a `#[from]` so the variant carries no `source()`: `base64::DecodeError`
// only implements `Error` with its `std` feature.
impl From<base64::DecodeError> for CodecError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Base64(e)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn supported_versions_are_comma_separated() {
        assert_eq!(SupportedVersions(&[1, 2]).to_string(), "1, 2");
        assert_eq!(SupportedVersions(&[2]).to_string(), "2");
        assert_eq!(SupportedVersions(&[]).to_string(), "");
    }

    #[test]
    fn unsupported_version_message_names_request_and_supported() {
        let e = CodecError::UnsupportedVersion {
            requested: 99,
            supported: SupportedVersions(&[1, 2]),
        };
        let msg = e.to_string();
        assert!(msg.contains("99"), "{msg}");
        assert!(msg.contains("1, 2"), "{msg}");
    }

    #[test]
    fn read_error_is_wrapped_transparently() {
        let inner = ReadError::UnexpectedEof { needed: 8, remaining: 3 };
        let e = CodecError::from(inner);
        assert_eq!(e.to_string(), inner.to_string());
    }
}
