//! Versioned binary codec for audio track info records.
//!
//! A record is what a playback backend hands its clients to identify one
//! audio item: title, author, identifier, source, position and a few
//! source-specific extras. It travels as a big-endian byte record, usually
//! wrapped in base64.
//!
//! # Modules
//!
//! - [`header`]: flags/length word and optional version byte
//! - [`version`]: version dispatch and per-version field layouts
//! - `source`: per-source extension fields (probe info, Spotify info)
//! - [`track`]: `TrackInfo` and the encoder's `PartialTrack`
//! - [`reader`] / [`writer`]: big-endian primitive I/O
//! - [`mutf8`]: modified UTF-8 string bodies
//! - [`config`]: wire constants and placeholders
//!
//! # Example
//!
//! ```
//! use trackinfo::{decode, encode_latest, PartialTrack};
//!
//! let token = encode_latest(
//!     &PartialTrack::new()
//!         .with_title("Intro")
//!         .with_source("http")
//!         .with_probe_info("mp3"),
//! )?;
//! let info = decode(token.as_str())?;
//! assert_eq!(info.title, "Intro");
//! assert_eq!(info.version, 2);
//! # Ok::<(), trackinfo::CodecError>(())
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod header;
pub mod mutf8;
pub mod reader;
mod source;
pub mod track;
pub mod transport;
pub mod version;
pub mod writer;

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{HEADER_WORD_LEN, LATEST_VERSION};
use crate::reader::DataReader;
use crate::writer::DataWriter;

// Top-level re-exports for convenience
pub use error::{CodecError, ReadError, SupportedVersions, WriteError};
pub use header::Header;
pub use track::{PartialTrack, ProbeInfo, SpotifyInfo, TrackInfo};
pub use transport::TrackData;
pub use version::{DECODE_VERSIONS, ENCODE_VERSIONS};

/// Decode one record from raw bytes or a base64 token.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedVersion`] if the version byte names a
/// version without a decoder, [`CodecError::Base64`] for a malformed token,
/// or [`CodecError::Read`] if the record is truncated or a string is not
/// valid modified UTF-8.
pub fn decode<'a>(data: impl Into<TrackData<'a>>) -> Result<TrackInfo, CodecError> {
    let bytes = data.into().to_bytes()?;
    let mut r = DataReader::new(&bytes);
    let header = Header::read(&mut r)?;

    let actual = bytes.len().saturating_sub(HEADER_WORD_LEN);
    if header.payload_len != actual {
        tracing::warn!(
            declared = header.payload_len,
            actual,
            "track info payload length does not match header"
        );
    }

    let decoder = version::decoder_for(header.version)?;
    let info = decoder.decode(header, &mut r)?;
    tracing::debug!(
        version = info.version,
        source = info.source.as_str(),
        bytes = bytes.len(),
        "decoded track info"
    );
    Ok(info)
}

/// Decode a batch of records, stopping at the first failure.
///
/// # Errors
///
/// Returns the first error [`decode`] reports.
pub fn decode_all<'a, I, D>(items: I) -> Result<Vec<TrackInfo>, CodecError>
where
    I: IntoIterator<Item = D>,
    D: Into<TrackData<'a>>,
{
    items.into_iter().map(decode).collect()
}

/// Read only the header of a record.
///
/// Lets callers look at the version or skip a record by its payload length
/// without decoding the fields.
///
/// # Errors
///
/// Returns [`CodecError::Base64`] for a malformed token or
/// [`CodecError::Read`] if the header itself is truncated.
pub fn peek_header<'a>(data: impl Into<TrackData<'a>>) -> Result<Header, CodecError> {
    let bytes = data.into().to_bytes()?;
    Ok(Header::read(&mut DataReader::new(&bytes))?)
}

/// Run the header and field codecs for `version` into a fresh writer.
fn write_record(track: &PartialTrack, version: u8) -> Result<DataWriter, CodecError> {
    let encoder = version::encoder_for(version)?;
    let mut w = DataWriter::new();
    header::begin(&mut w, version);
    encoder.encode(track, &mut w)?;
    header::finish(&mut w)?;
    tracing::debug!(
        version,
        source = track.source.as_deref().unwrap_or_default(),
        bytes = w.len(),
        "encoded track info"
    );
    Ok(w)
}

/// Encode `track` with the given schema version into raw bytes.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedVersion`] unless `version` has an encoder
/// (only [`LATEST_VERSION`]), or [`CodecError::Write`] if a string exceeds
/// 65535 encoded bytes.
pub fn encode_to_bytes(track: &PartialTrack, version: u8) -> Result<Vec<u8>, CodecError> {
    write_record(track, version).map(DataWriter::into_bytes)
}

/// Encode `track` with the given schema version into a base64 token.
///
/// # Errors
///
/// Same as [`encode_to_bytes`].
pub fn encode(track: &PartialTrack, version: u8) -> Result<String, CodecError> {
    write_record(track, version).map(DataWriter::into_base64)
}

/// Encode `track` with [`LATEST_VERSION`] into a base64 token.
///
/// # Errors
///
/// Returns [`CodecError::Write`] if a string exceeds 65535 encoded bytes.
pub fn encode_latest(track: &PartialTrack) -> Result<String, CodecError> {
    encode(track, LATEST_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Records and errors cross threads freely; dispatch tables are shared statics.
    const _: fn() = || {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrackInfo>();
        assert_send_sync::<PartialTrack>();
        assert_send_sync::<ProbeInfo>();
        assert_send_sync::<SpotifyInfo>();
        assert_send_sync::<Header>();
        assert_send_sync::<TrackData<'static>>();
        assert_send_sync::<CodecError>();
        assert_send_sync::<ReadError>();
        assert_send_sync::<WriteError>();
        assert_send_sync::<SupportedVersions>();
        assert_send_sync::<DataReader<'static>>();
        assert_send_sync::<DataWriter>();
    };
}
