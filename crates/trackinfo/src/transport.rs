//! Input forms accepted by the decoder: raw bytes or a base64 token.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::CodecError;

/// An encoded record, either as bytes or as its base64 text token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackData<'a> {
    /// Raw record bytes.
    Bytes(&'a [u8]),
    /// Standard, padded base64 of the record bytes.
    Encoded(&'a str),
}

impl<'a> TrackData<'a> {
    /// Resolve to raw bytes, decoding base64 when needed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Base64`] if an encoded token is not valid base64.
    pub fn to_bytes(self) -> Result<Cow<'a, [u8]>, CodecError> {
        match self {
            Self::Bytes(b) => Ok(Cow::Borrowed(b)),
            Self::Encoded(s) => Ok(Cow::Owned(STANDARD.decode(s.trim())?)),
        }
    }
}

impl<'a> From<&'a [u8]> for TrackData<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for TrackData<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a> From<&'a Vec<u8>> for TrackData<'a> {
    fn from(b: &'a Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl<'a> From<&'a str> for TrackData<'a> {
    fn from(s: &'a str) -> Self {
        Self::Encoded(s)
    }
}

impl<'a> From<&'a String> for TrackData<'a> {
    fn from(s: &'a String) -> Self {
        Self::Encoded(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn bytes_pass_through_borrowed() {
        let raw = vec![1u8, 2, 3];
        let data = TrackData::from(&raw);
        assert!(matches!(data.to_bytes().unwrap(), Cow::Borrowed(&[1, 2, 3])));
    }

    #[test]
    fn token_is_base64_decoded() {
        let data = TrackData::from("AQID");
        assert_eq!(data.to_bytes().unwrap().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let token = String::from(" AQID\n");
        assert_eq!(TrackData::from(&token).to_bytes().unwrap().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn invalid_token_is_base64_error() {
        let err = TrackData::from("not base64!").to_bytes().unwrap_err();
        assert!(matches!(err, CodecError::Base64(_)));
    }
}
