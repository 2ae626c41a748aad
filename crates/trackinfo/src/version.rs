//! Version dispatch and the per-version field layouts.
//!
//! Version 1 (decode only):
//! ```text
//! title, author, length i64, identifier, is_stream bool, source,
//! [source extension], position i64
//! ```
//!
//! Version 2:
//! ```text
//! title, author, length i64, identifier, is_stream bool,
//! has_uri bool, [uri], source, [source extension], position i64
//! ```
//!
//! Only the latest version has an encoder.

use alloc::string::String;

use crate::config::{
    NO_AUTHOR, NO_IDENTIFIER, NO_SOURCE, NO_TITLE, POSITION_LEN, SOURCE_SPOTIFY,
};
use crate::error::{CodecError, ReadError, SupportedVersions, WriteError};
use crate::header::Header;
use crate::reader::DataReader;
use crate::source::{self, SourceExtension};
use crate::track::{PartialTrack, TrackInfo};
use crate::writer::DataWriter;

/// Versions [`crate::decode`] accepts.
pub const DECODE_VERSIONS: &[u8] = &[1, 2];

/// Versions [`crate::encode`] can produce.
pub const ENCODE_VERSIONS: &[u8] = &[2];

pub(crate) trait VersionDecoder {
    /// Read the payload that follows `header`.
    fn decode(&self, header: Header, r: &mut DataReader<'_>) -> Result<TrackInfo, ReadError>;
}

pub(crate) trait VersionEncoder {
    /// Write the payload fields (header excluded).
    fn encode(&self, track: &PartialTrack, w: &mut DataWriter) -> Result<(), WriteError>;
}

type DecoderEntry = (u8, &'static (dyn VersionDecoder + Sync));
type EncoderEntry = (u8, &'static (dyn VersionEncoder + Sync));

static DECODERS: &[DecoderEntry] = &[(1, &V1), (2, &V2)];

static ENCODERS: &[EncoderEntry] = &[(2, &V2)];

/// Look up the decoder for `version`.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedVersion`] listing [`DECODE_VERSIONS`].
pub(crate) fn decoder_for(version: u8) -> Result<&'static (dyn VersionDecoder + Sync), CodecError> {
    DECODERS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|&(_, d)| d)
        .ok_or(CodecError::UnsupportedVersion {
            requested: version,
            supported: SupportedVersions(DECODE_VERSIONS),
        })
}

/// Look up the encoder for `version`.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedVersion`] listing [`ENCODE_VERSIONS`].
pub(crate) fn encoder_for(version: u8) -> Result<&'static (dyn VersionEncoder + Sync), CodecError> {
    ENCODERS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|&(_, e)| e)
        .ok_or(CodecError::UnsupportedVersion {
            requested: version,
            supported: SupportedVersions(ENCODE_VERSIONS),
        })
}

// ---------------------------------------------------------------------------
// Shared field groups
// ---------------------------------------------------------------------------

/// Fields every version starts with, in wire order.
struct Leading {
    title: String,
    author: String,
    length: i64,
    identifier: String,
    is_stream: bool,
}

impl Leading {
    fn read(r: &mut DataReader<'_>) -> Result<Self, ReadError> {
        Ok(Self {
            title: r.read_utf()?,
            author: r.read_utf()?,
            length: r.read_i64()?,
            identifier: r.read_utf()?,
            is_stream: r.read_bool()?,
        })
    }

    /// Read the source extension and trailing position, then assemble.
    fn finish(
        self,
        header: Header,
        uri: Option<String>,
        source: String,
        r: &mut DataReader<'_>,
    ) -> Result<TrackInfo, ReadError> {
        let extension = match source::reader_for(&source) {
            // Written without its extension (e.g. a re-encoded Spotify record).
            // Assumes the record ends at the position field: trailing bytes
            // after it would be misread as extension fields.
            Some(_) if r.remaining() <= POSITION_LEN => {
                tracing::debug!(source = source.as_str(), "source extension fields absent");
                None
            }
            Some(ext) => Some(ext.read(r)?),
            None => None,
        };
        let position = r.read_i64()?;

        let (probe_info, spotify_info) = match extension {
            Some(SourceExtension::Probe(p)) => (Some(p), None),
            Some(SourceExtension::Spotify(s)) => (None, Some(s)),
            None => (None, None),
        };

        Ok(TrackInfo {
            flags: header.flags,
            version: header.version,
            source,
            identifier: self.identifier,
            author: self.author,
            length: self.length,
            is_stream: self.is_stream,
            title: self.title,
            uri,
            position,
            probe_info,
            spotify_info,
        })
    }
}

// ---------------------------------------------------------------------------
// Version 1
// ---------------------------------------------------------------------------

struct V1;

impl VersionDecoder for V1 {
    fn decode(&self, header: Header, r: &mut DataReader<'_>) -> Result<TrackInfo, ReadError> {
        let leading = Leading::read(r)?;
        let source = r.read_utf()?;
        leading.finish(header, None, source, r)
    }
}

// ---------------------------------------------------------------------------
// Version 2
// ---------------------------------------------------------------------------

struct V2;

impl VersionDecoder for V2 {
    fn decode(&self, header: Header, r: &mut DataReader<'_>) -> Result<TrackInfo, ReadError> {
        let leading = Leading::read(r)?;
        let uri = r.read_optional_utf()?;
        let source = r.read_utf()?;
        leading.finish(header, uri, source, r)
    }
}

impl VersionEncoder for V2 {
    fn encode(&self, track: &PartialTrack, w: &mut DataWriter) -> Result<(), WriteError> {
        let source = track.source.as_deref().unwrap_or(NO_SOURCE);

        w.write_utf(track.title.as_deref().unwrap_or(NO_TITLE))?;
        w.write_utf(track.author.as_deref().unwrap_or(NO_AUTHOR))?;
        w.write_i64(track.length.unwrap_or(0));
        w.write_utf(track.identifier.as_deref().unwrap_or(NO_IDENTIFIER))?;
        w.write_bool(track.is_stream.unwrap_or(false));
        w.write_optional_utf(track.uri.as_deref())?;
        w.write_utf(source)?;

        match source::writer_for(source) {
            Some(ext) => ext.write(track, w)?,
            None if source == SOURCE_SPOTIFY && track.spotify_info.is_some() => {
                tracing::debug!("no spotify extension writer; isrc/thumbnail not encoded");
            }
            None => {}
        }

        w.write_i64(track.position.unwrap_or(0));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn header(version: u8) -> Header {
        Header {
            flags: 1,
            version,
            payload_len: 0,
        }
    }

    /// Hand-built version 1 payload (no header).
    fn v1_payload(source: &str, ext: impl FnOnce(&mut DataWriter)) -> DataWriter {
        let mut w = DataWriter::new();
        w.write_utf("Title").unwrap();
        w.write_utf("Author").unwrap();
        w.write_i64(180_000);
        w.write_utf("abc123").unwrap();
        w.write_bool(false);
        w.write_utf(source).unwrap();
        ext(&mut w);
        w.write_i64(4_200);
        w
    }

    #[test]
    fn tables_match_published_version_lists() {
        let decode: alloc::vec::Vec<u8> = DECODERS.iter().map(|(v, _)| *v).collect();
        let encode: alloc::vec::Vec<u8> = ENCODERS.iter().map(|(v, _)| *v).collect();
        assert_eq!(decode, DECODE_VERSIONS);
        assert_eq!(encode, ENCODE_VERSIONS);
    }

    #[test]
    fn version_zero_is_never_registered() {
        assert!(decoder_for(0).is_err());
        assert!(encoder_for(0).is_err());
    }

    #[test]
    fn unknown_decode_version_lists_supported() {
        let Err(err) = decoder_for(99) else {
            panic!("99 must be unsupported");
        };
        assert_eq!(
            err,
            CodecError::UnsupportedVersion {
                requested: 99,
                supported: SupportedVersions(&[1, 2]),
            }
        );
    }

    #[test]
    fn version_one_cannot_be_encoded() {
        let Err(err) = encoder_for(1) else {
            panic!("1 must be unsupported");
        };
        assert_eq!(
            err,
            CodecError::UnsupportedVersion {
                requested: 1,
                supported: SupportedVersions(&[2]),
            }
        );
    }

    #[test]
    fn v1_decodes_without_uri() {
        let bytes = v1_payload("youtube", |_| {}).into_bytes();
        let mut r = DataReader::new(&bytes);
        let info = decoder_for(1).unwrap().decode(header(1), &mut r).unwrap();
        assert_eq!(info.title, "Title");
        assert_eq!(info.author, "Author");
        assert_eq!(info.length, 180_000);
        assert_eq!(info.identifier, "abc123");
        assert!(!info.is_stream);
        assert_eq!(info.source, "youtube");
        assert_eq!(info.uri, None);
        assert_eq!(info.position, 4_200);
        assert_eq!(info.version, 1);
        assert_eq!(info.probe_info, None);
        assert_eq!(info.spotify_info, None);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn v1_reads_probe_extension_before_position() {
        let bytes = v1_payload("local", |w| w.write_utf("flac").unwrap()).into_bytes();
        let info = decoder_for(1)
            .unwrap()
            .decode(header(1), &mut DataReader::new(&bytes))
            .unwrap();
        assert_eq!(info.probe_info.unwrap().name, "flac");
        assert_eq!(info.position, 4_200);
    }

    #[test]
    fn extension_is_skipped_when_only_position_remains() {
        let bytes = v1_payload("spotify", |_| {}).into_bytes();
        let info = decoder_for(1)
            .unwrap()
            .decode(header(1), &mut DataReader::new(&bytes))
            .unwrap();
        assert_eq!(info.spotify_info, None);
        assert_eq!(info.position, 4_200);
    }

    #[test]
    fn v2_encoder_writes_placeholders_in_order() {
        let mut w = DataWriter::new();
        encoder_for(2)
            .unwrap()
            .encode(&PartialTrack::default(), &mut w)
            .unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert_eq!(r.read_utf().unwrap(), NO_TITLE);
        assert_eq!(r.read_utf().unwrap(), NO_AUTHOR);
        assert_eq!(r.read_i64().unwrap(), 0);
        assert_eq!(r.read_utf().unwrap(), NO_IDENTIFIER);
        assert!(!r.read_bool().unwrap());
        assert!(!r.read_bool().unwrap());
        assert_eq!(r.read_utf().unwrap(), NO_SOURCE);
        assert_eq!(r.read_i64().unwrap(), 0);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn v2_encoder_output_decodes_with_v2_decoder() {
        let track = PartialTrack::new()
            .with_title("Song")
            .with_author("Band")
            .with_length(1_000)
            .with_identifier("https://cdn.example/song.ogg")
            .with_stream(true)
            .with_uri("https://cdn.example/song.ogg")
            .with_source("http")
            .with_probe_info("ogg|bitrate=128")
            .with_position(250);
        let mut w = DataWriter::new();
        encoder_for(2).unwrap().encode(&track, &mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        let info = decoder_for(2).unwrap().decode(header(2), &mut r).unwrap();
        assert_eq!(info.uri.as_deref(), Some("https://cdn.example/song.ogg"));
        assert!(info.is_stream);
        assert_eq!(info.probe_info.unwrap().parameters.as_deref(), Some("bitrate=128"));
        assert_eq!(info.position, 250);
        assert_eq!(r.remaining(), 0);
    }
}
