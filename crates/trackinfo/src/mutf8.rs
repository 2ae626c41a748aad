//! Modified UTF-8, the string body encoding used on the wire.
//!
//! Differs from standard UTF-8 in two ways:
//! - U+0000 is written as the two-byte sequence `C0 80`, never a bare zero
//! - characters above U+FFFF are written as a UTF-16 surrogate pair, each
//!   surrogate encoded as its own three-byte sequence
//!
//! Decoding accepts a bare zero byte (older writers emit it) but rejects
//! unpaired surrogates, which a Rust `String` cannot hold.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ReadError;

/// Number of bytes `s` occupies once encoded.
#[must_use]
pub fn encoded_len(s: &str) -> usize {
    s.encode_utf16()
        .map(|unit| match unit {
            0x0001..=0x007F => 1_usize,
            0x0000 | 0x0080..=0x07FF => 2,
            _ => 3,
        })
        .fold(0_usize, usize::saturating_add)
}

/// Append the modified UTF-8 encoding of `s` to `out`.
#[allow(clippy::arithmetic_side_effects)] // shifts by constants below the bit width
#[allow(clippy::cast_possible_truncation)] // each byte is masked before the cast
pub fn encode_into(s: &str, out: &mut Vec<u8>) {
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
}

/// Decode a modified UTF-8 body.
///
/// `base` is the absolute offset of `bytes` within the enclosing buffer and
/// is only used to report where decoding failed.
///
/// # Errors
///
/// Returns [`ReadError::InvalidModifiedUtf8`] on a malformed lead or
/// continuation byte, a truncated sequence, or an unpaired surrogate.
#[allow(clippy::arithmetic_side_effects)] // shifts by constants; offsets bounded by bytes.len()
pub fn decode(bytes: &[u8], base: usize) -> Result<String, ReadError> {
    let invalid = |at: usize| ReadError::InvalidModifiedUtf8 {
        offset: base.saturating_add(at),
    };
    let cont = |at: usize| -> Result<u16, ReadError> {
        match bytes.get(at) {
            Some(&b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
            _ => Err(invalid(at)),
        }
    };

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut starts: Vec<usize> = Vec::with_capacity(bytes.len());
    let mut i = 0_usize;
    while let Some(&lead) = bytes.get(i) {
        starts.push(i);
        match lead {
            0x00..=0x7F => {
                units.push(u16::from(lead));
                i += 1;
            }
            0xC0..=0xDF => {
                let b1 = cont(i + 1)?;
                units.push((u16::from(lead & 0x1F) << 6) | b1);
                i += 2;
            }
            0xE0..=0xEF => {
                let b1 = cont(i + 1)?;
                let b2 = cont(i + 2)?;
                units.push((u16::from(lead & 0x0F) << 12) | (b1 << 6) | b2);
                i += 3;
            }
            _ => return Err(invalid(i)),
        }
    }

    let mut out = String::with_capacity(units.len());
    let mut consumed = 0_usize;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                out.push(c);
                consumed += c.len_utf16();
            }
            Err(_) => {
                let at = starts.get(consumed).copied().unwrap_or(0);
                return Err(invalid(at));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use alloc::vec;

    fn enc(s: &str) -> Vec<u8> {
        let mut out = Vec::new();
        encode_into(s, &mut out);
        out
    }

    #[test]
    fn ascii_is_one_byte_per_char() {
        assert_eq!(enc("ogg"), b"ogg".to_vec());
        assert_eq!(encoded_len("ogg"), 3);
    }

    #[test]
    fn nul_is_two_bytes() {
        assert_eq!(enc("\0"), vec![0xC0, 0x80]);
        assert_eq!(encoded_len("\0"), 2);
    }

    #[test]
    fn two_and_three_byte_ranges_match_standard_utf8() {
        assert_eq!(enc("é"), "é".as_bytes().to_vec());
        assert_eq!(enc("日本"), "日本".as_bytes().to_vec());
    }

    #[test]
    fn supplementary_chars_use_surrogate_pairs() {
        // U+1F3B5 MUSICAL NOTE -> D83C DFB5
        let bytes = enc("🎵");
        assert_eq!(bytes, vec![0xED, 0xA0, 0xBC, 0xED, 0xBE, 0xB5]);
        assert_eq!(encoded_len("🎵"), 6);
        assert_eq!(decode(&bytes, 0).unwrap(), "🎵");
    }

    #[test]
    fn decode_accepts_bare_zero_byte() {
        assert_eq!(decode(&[b'a', 0x00, b'b'], 0).unwrap(), "a\0b");
    }

    #[test]
    fn decode_round_trips_mixed_text() {
        let s = "Daft Punk – Harder, Better 🎧 \0 end";
        assert_eq!(decode(&enc(s), 0).unwrap(), s);
    }

    #[test]
    fn decode_rejects_stray_continuation_byte() {
        assert_eq!(
            decode(&[b'a', 0x80], 10),
            Err(ReadError::InvalidModifiedUtf8 { offset: 11 })
        );
    }

    #[test]
    fn decode_rejects_truncated_sequence() {
        assert_eq!(
            decode(&[0xE6, 0x97], 0),
            Err(ReadError::InvalidModifiedUtf8 { offset: 2 })
        );
    }

    #[test]
    fn decode_rejects_four_byte_lead() {
        assert!(decode(&[0xF0, 0x9F, 0x8E, 0xB5], 0).is_err());
    }

    #[test]
    fn decode_rejects_unpaired_surrogate() {
        // lone high surrogate D83C
        assert_eq!(
            decode(&[b'x', 0xED, 0xA0, 0xBC], 4),
            Err(ReadError::InvalidModifiedUtf8 { offset: 5 })
        );
    }
}
