//! Wire constants for the track info format.
//!
//! Everything the codec needs to agree on with other implementations lives
//! here rather than being hardcoded at the use site.

/// Newest schema version. The only version with a registered encoder.
pub const LATEST_VERSION: u8 = 2;

/// Header bit 30: an explicit version byte follows the header word.
pub const VERSIONED_FLAG: i32 = 0x4000_0000;

/// Mask selecting the 30-bit payload length from the header word.
pub const PAYLOAD_LEN_MASK: i32 = 0x3FFF_FFFF;

/// Right-shift applied to the header word to recover the flags.
pub const FLAGS_SHIFT: u32 = 30;

/// Size of the header word in bytes.
pub const HEADER_WORD_LEN: usize = 4;

/// Size of the trailing position field in bytes.
pub const POSITION_LEN: usize = 8;

/// Version assumed when the versioned flag is clear.
pub const IMPLICIT_VERSION: u8 = 1;

/// Longest string (in encoded bytes) the `u16` length prefix can describe.
pub const MAX_UTF_LEN: usize = 0xFFFF;

/// Separator between the probe name and its parameters.
pub const PROBE_SEPARATOR: char = '|';

// ── Placeholders written for missing fields ─────────────────────────────────

/// Written when the title is absent.
pub const NO_TITLE: &str = "<no title provided>";

/// Written when the author is absent.
pub const NO_AUTHOR: &str = "<no author provided>";

/// Written when the identifier is absent.
pub const NO_IDENTIFIER: &str = "<no identifier provided>";

/// Written when the source is absent.
pub const NO_SOURCE: &str = "<no source provided>";

/// Written when a probe-style source has no probe info.
pub const NO_PROBE_INFO: &str = "<no probe info provided>";

// ── Source tags with extensions ─────────────────────────────────────────────

/// HTTP stream source.
pub const SOURCE_HTTP: &str = "http";

/// Local file source.
pub const SOURCE_LOCAL: &str = "local";

/// Spotify-resolved source.
pub const SOURCE_SPOTIFY: &str = "spotify";
