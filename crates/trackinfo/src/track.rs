//! Track info records: the decoded form and the partial form accepted by
//! the encoder.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PROBE_SEPARATOR;

/// How an HTTP or local source identified the media container.
///
/// `raw` is what travels on the wire; `name` and `parameters` are derived
/// from it by splitting at the first `|`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProbeInfo {
    /// Probe string exactly as stored, e.g. `ogg|bitrate=128`.
    pub raw: String,
    /// Container name before the separator (or the whole string).
    pub name: String,
    /// Everything after the separator, if there was one.
    pub parameters: Option<String>,
}

impl ProbeInfo {
    /// Build from a raw probe string, splitting at the first separator.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (name, parameters) = match raw.split_once(PROBE_SEPARATOR) {
            Some((name, params)) => (name, Some(String::from(params))),
            None => (raw, None),
        };
        Self {
            raw: String::from(raw),
            name: String::from(name),
            parameters,
        }
    }
}

/// Extra fields recorded for Spotify-resolved tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpotifyInfo {
    /// International Standard Recording Code.
    pub isrc: Option<String>,
    /// Cover art URL.
    pub thumbnail: Option<String>,
}

/// A fully decoded track info record.
///
/// Built in one piece by [`crate::decode`]. At most one of `probe_info` and
/// `spotify_info` is set, and which one is decided by `source` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrackInfo {
    /// Top two header bits, `headerWord >> 30`.
    pub flags: i32,
    /// Schema version the record was decoded with.
    pub version: u8,
    /// Origin tag such as `http`, `local` or `spotify`.
    pub source: String,
    /// Opaque id assigned by the source.
    pub identifier: String,
    /// Artist or uploader.
    pub author: String,
    /// Duration in milliseconds.
    pub length: i64,
    /// Live or otherwise unbounded.
    pub is_stream: bool,
    /// Display title.
    pub title: String,
    /// Track URI. Never present for version 1 records.
    pub uri: Option<String>,
    /// Playback offset in milliseconds.
    pub position: i64,
    /// Present for probe-style sources.
    pub probe_info: Option<ProbeInfo>,
    /// Present for the Spotify source.
    pub spotify_info: Option<SpotifyInfo>,
}

impl TrackInfo {
    /// Whether the header announced an explicit version byte.
    #[must_use]
    pub fn has_version_byte(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// Encoder input. Every field is optional; missing ones are written as
/// placeholders (strings) or zero/false (numbers, flags).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[allow(missing_docs)] // fields mirror `TrackInfo`
pub struct PartialTrack {
    pub title: Option<String>,
    pub author: Option<String>,
    pub length: Option<i64>,
    pub identifier: Option<String>,
    pub is_stream: Option<bool>,
    pub uri: Option<String>,
    pub source: Option<String>,
    pub position: Option<i64>,
    /// Only `raw` is written; edits to `name`/`parameters` are not.
    pub probe_info: Option<ProbeInfo>,
    /// Carried for completeness; no writer is registered for Spotify.
    pub spotify_info: Option<SpotifyInfo>,
}

impl PartialTrack {
    /// Start an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the duration in milliseconds.
    #[must_use]
    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Mark the track as a stream (or not).
    #[must_use]
    pub fn with_stream(mut self, is_stream: bool) -> Self {
        self.is_stream = Some(is_stream);
        self
    }

    /// Set the URI.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the source tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the playback position in milliseconds.
    #[must_use]
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach probe info parsed from `raw`.
    #[must_use]
    pub fn with_probe_info(mut self, raw: &str) -> Self {
        self.probe_info = Some(ProbeInfo::parse(raw));
        self
    }

    /// Attach Spotify info.
    #[must_use]
    pub fn with_spotify_info(mut self, info: SpotifyInfo) -> Self {
        self.spotify_info = Some(info);
        self
    }
}

impl From<TrackInfo> for PartialTrack {
    fn from(t: TrackInfo) -> Self {
        Self {
            title: Some(t.title),
            author: Some(t.author),
            length: Some(t.length),
            identifier: Some(t.identifier),
            is_stream: Some(t.is_stream),
            uri: t.uri,
            source: Some(t.source),
            position: Some(t.position),
            probe_info: t.probe_info,
            spotify_info: t.spotify_info,
        }
    }
}
