//! Source extensions: per-source fields sitting between the fixed fields and
//! the trailing position.
//!
//! | source    | decode        | encode     |
//! |-----------|---------------|------------|
//! | `http`    | probe info    | probe info |
//! | `local`   | probe info    | probe info |
//! | `spotify` | Spotify info  | (none)     |
//!
//! The tables are asymmetric: a re-encoded Spotify record loses its ISRC and
//! thumbnail, and other decoders expect that wire shape.

use crate::config::{NO_PROBE_INFO, SOURCE_HTTP, SOURCE_LOCAL, SOURCE_SPOTIFY};
use crate::error::{ReadError, WriteError};
use crate::reader::DataReader;
use crate::track::{PartialTrack, ProbeInfo, SpotifyInfo};
use crate::writer::DataWriter;

/// Decoded extension fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceExtension {
    Probe(ProbeInfo),
    Spotify(SpotifyInfo),
}

/// Consumes exactly the extension's own fields.
pub(crate) trait ExtensionReader {
    fn read(&self, r: &mut DataReader<'_>) -> Result<SourceExtension, ReadError>;
}

/// Produces exactly the extension's own fields.
pub(crate) trait ExtensionWriter {
    fn write(&self, track: &PartialTrack, w: &mut DataWriter) -> Result<(), WriteError>;
}

struct ProbeCodec;

impl ExtensionReader for ProbeCodec {
    fn read(&self, r: &mut DataReader<'_>) -> Result<SourceExtension, ReadError> {
        let raw = r.read_utf()?;
        Ok(SourceExtension::Probe(ProbeInfo::parse(&raw)))
    }
}

impl ExtensionWriter for ProbeCodec {
    fn write(&self, track: &PartialTrack, w: &mut DataWriter) -> Result<(), WriteError> {
        let raw = track
            .probe_info
            .as_ref()
            .map_or(NO_PROBE_INFO, |p| p.raw.as_str());
        w.write_utf(raw)
    }
}

struct SpotifyReader;

impl ExtensionReader for SpotifyReader {
    fn read(&self, r: &mut DataReader<'_>) -> Result<SourceExtension, ReadError> {
        let isrc = r.read_optional_utf()?;
        let thumbnail = r.read_optional_utf()?;
        Ok(SourceExtension::Spotify(SpotifyInfo { isrc, thumbnail }))
    }
}

type ReaderEntry = (&'static str, &'static (dyn ExtensionReader + Sync));
type WriterEntry = (&'static str, &'static (dyn ExtensionWriter + Sync));

static READERS: &[ReaderEntry] = &[
    (SOURCE_HTTP, &ProbeCodec),
    (SOURCE_LOCAL, &ProbeCodec),
    (SOURCE_SPOTIFY, &SpotifyReader),
];

static WRITERS: &[WriterEntry] = &[(SOURCE_HTTP, &ProbeCodec), (SOURCE_LOCAL, &ProbeCodec)];

/// Decode-side extension registered for `source`, if any.
pub(crate) fn reader_for(source: &str) -> Option<&'static (dyn ExtensionReader + Sync)> {
    READERS
        .iter()
        .find(|(tag, _)| *tag == source)
        .map(|&(_, reader)| reader)
}

/// Encode-side extension registered for `source`, if any.
pub(crate) fn writer_for(source: &str) -> Option<&'static (dyn ExtensionWriter + Sync)> {
    WRITERS
        .iter()
        .find(|(tag, _)| *tag == source)
        .map(|&(_, writer)| writer)
}
