//! Hexadecimal encoding and decoding of byte buffers.
//!
//! Every byte maps to exactly two hex digits, most-significant nibble first.
//! Encoding is total; decoding validates its input and reports malformed
//! strings through [`InvalidFormat`] instead of returning a truncated or empty
//! buffer.
//!
//! # Examples
//!
//! ```
//! # use hexwalk::hex::{decode, encode, LetterCase};
//! let text = encode([0xBA, 0xAD, 0xF0, 0x0D], LetterCase::Upper);
//! assert_eq!(text, "BAADF00D");
//! assert_eq!(decode(&text).unwrap(), vec![0xBA, 0xAD, 0xF0, 0x0D]);
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";
const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Letter case used for the digits `A`-`F` when encoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LetterCase {
    /// `0-9A-F`
    #[default]
    Upper,

    /// `0-9a-f`
    Lower,
}

impl LetterCase {
    /// Pick the case from an `uppercase` flag.
    #[must_use]
    pub const fn from_uppercase(uppercase: bool) -> Self {
        if uppercase { Self::Upper } else { Self::Lower }
    }

    const fn digits(self) -> &'static [u8; 16] {
        match self {
            Self::Upper => UPPER_DIGITS,
            Self::Lower => LOWER_DIGITS,
        }
    }
}

/// A hex string that could not be decoded.
///
/// Both variants describe the same failure kind, a malformed input; they only
/// differ in what was wrong with it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum InvalidFormat {
    /// The input holds an odd number of characters, so the last byte is incomplete.
    #[error("invalid hex format: odd length {0}")]
    OddLength(usize),

    /// A character outside `0-9`, `a-f` and `A-F` was found.
    #[error("invalid hex format: unexpected character {character:?} at position {position}")]
    InvalidDigit {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        position: usize,
    },
}

/// Encode a byte buffer as a hex string.
///
/// An empty buffer encodes to an empty string.
#[must_use]
pub fn encode(data: impl AsRef<[u8]>, case: LetterCase) -> String {
    let data = data.as_ref();
    let digits = case.digits();

    let mut encoded = String::with_capacity(data.len() * 2);
    for &byte in data {
        encoded.push(char::from(digits[usize::from(byte >> 4)]));
        encoded.push(char::from(digits[usize::from(byte & 0x0f)]));
    }

    encoded
}

/// Encode with uppercase letters (`BAADF00D`).
#[must_use]
pub fn encode_upper(data: impl AsRef<[u8]>) -> String {
    encode(data, LetterCase::Upper)
}

/// Encode with lowercase letters (`baadf00d`).
#[must_use]
pub fn encode_lower(data: impl AsRef<[u8]>) -> String {
    encode(data, LetterCase::Lower)
}

/// Decode a hex string into bytes.
///
/// Letters are accepted in either case. The length is checked before any
/// digit, so `"ZZZ"` reports [`InvalidFormat::OddLength`].
///
/// # Errors
///
/// Returns [`InvalidFormat`] if the input has an odd length or contains a
/// character that is not a hex digit. No partially decoded output is returned.
pub fn decode(text: &str) -> Result<Vec<u8>, InvalidFormat> {
    let raw = text.as_bytes();
    if !raw.len().is_multiple_of(2) {
        return Err(InvalidFormat::OddLength(raw.len()));
    }

    let mut bytes = Vec::with_capacity(raw.len() / 2);
    for (index, pair) in raw.chunks_exact(2).enumerate() {
        let position = index * 2;
        let high = nibble(text, pair[0], position)?;
        let low = nibble(text, pair[1], position + 1)?;
        bytes.push((high << 4) | low);
    }

    Ok(bytes)
}

/// Value of a single hex digit, or the error describing the character found at `position`.
fn nibble(text: &str, digit: u8, position: usize) -> Result<u8, InvalidFormat> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(InvalidFormat::InvalidDigit {
            character: char_at(text, position),
            position,
        }),
    }
}

/// The character covering byte offset `position`, falling back to U+FFFD.
///
/// A multi-byte character may start before `position`, so walk back to the
/// nearest char boundary first.
fn char_at(text: &str, position: usize) -> char {
    let start = (0..=position)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);

    text[start..]
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Owned byte buffer that parses from and formats as hex.
///
/// `Display` uses uppercase digits; `{:x}` and `{:X}` pick the case explicitly.
///
/// ```
/// # use hexwalk::hex::HexBytes;
/// let bytes: HexBytes = "baadf00d".parse().unwrap();
/// assert_eq!(bytes.to_string(), "BAADF00D");
/// assert_eq!(format!("{bytes:x}"), "baadf00d");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the raw bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl FromStr for HexBytes {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(Self)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<HexBytes> for Vec<u8> {
    fn from(bytes: HexBytes) -> Self {
        bytes.0
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::UpperHex for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.0, LetterCase::Upper))
    }
}

impl fmt::LowerHex for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.0, LetterCase::Lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAADF00D: [u8; 4] = [0xBA, 0xAD, 0xF0, 0x0D];

    #[test]
    fn test_encode_known_value() {
        assert_eq!(encode(BAADF00D, LetterCase::Upper), "BAADF00D");
        assert_eq!(encode(BAADF00D, LetterCase::Lower), "baadf00d");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(b"", LetterCase::Upper), "");
        assert_eq!(encode(b"", LetterCase::Lower), "");
    }

    #[test]
    fn test_encode_zero_pads_each_byte() {
        assert_eq!(encode([0x0Au8], LetterCase::Upper), "0A");
        assert_eq!(encode([0x0Au8], LetterCase::Lower), "0a");
        assert_eq!(encode([0x00u8, 0x01, 0xFF], LetterCase::Upper), "0001FF");
    }

    #[test]
    fn test_encode_helpers() {
        assert_eq!(encode_upper(BAADF00D), "BAADF00D");
        assert_eq!(encode_lower(BAADF00D), "baadf00d");
        assert_eq!(encode_upper(b"hi"), "6869");
    }

    #[test]
    fn test_letter_case_from_flag() {
        assert_eq!(LetterCase::from_uppercase(true), LetterCase::Upper);
        assert_eq!(LetterCase::from_uppercase(false), LetterCase::Lower);
        assert_eq!(LetterCase::default(), LetterCase::Upper);
    }

    #[test]
    fn test_decode_known_value() {
        assert_eq!(decode("BAADF00D").unwrap(), BAADF00D.to_vec());
        assert_eq!(decode("baadf00d").unwrap(), BAADF00D.to_vec());
        assert_eq!(decode("BaAdF00d").unwrap(), BAADF00D.to_vec());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_odd_length() {
        assert_eq!(decode("ABC"), Err(InvalidFormat::OddLength(3)));
        assert_eq!(decode("0"), Err(InvalidFormat::OddLength(1)));
    }

    #[test]
    fn test_decode_odd_length_checked_before_digits() {
        assert_eq!(decode("ZZZ"), Err(InvalidFormat::OddLength(3)));
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert_eq!(
            decode("ZZ"),
            Err(InvalidFormat::InvalidDigit {
                character: 'Z',
                position: 0
            })
        );
        assert_eq!(
            decode("00g1"),
            Err(InvalidFormat::InvalidDigit {
                character: 'g',
                position: 2
            })
        );
        assert_eq!(
            decode("0 "),
            Err(InvalidFormat::InvalidDigit {
                character: ' ',
                position: 1
            })
        );
    }

    #[test]
    fn test_decode_rejects_prefix_and_sign() {
        assert!(decode("0x0A").is_err());
        assert!(decode("-1").is_err());
        assert!(decode("+1").is_err());
    }

    #[test]
    fn test_decode_non_ascii_reports_whole_char() {
        // 'é' is two bytes, so the length is even and the digit check fails.
        assert_eq!(
            decode("é"),
            Err(InvalidFormat::InvalidDigit {
                character: 'é',
                position: 0
            })
        );
        assert_eq!(
            decode("00é0"),
            Err(InvalidFormat::InvalidDigit {
                character: 'é',
                position: 2
            })
        );
    }

    #[test]
    fn test_decode_error_is_not_empty_success() {
        // A failed decode must stay distinguishable from decoding "".
        assert_ne!(decode("ZZ"), decode(""));
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let all: Vec<u8> = (0..=u8::MAX).collect();

        for case in [LetterCase::Upper, LetterCase::Lower] {
            assert_eq!(decode(&encode(&all, case)).unwrap(), all);
        }
    }

    #[test]
    fn test_reencode_normalizes_case() {
        let mixed = "dEaDbEeF";
        let bytes = decode(mixed).unwrap();

        assert_eq!(encode(&bytes, LetterCase::Upper), "DEADBEEF");
        assert_eq!(encode(&bytes, LetterCase::Lower), "deadbeef");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InvalidFormat::OddLength(3).to_string(),
            "invalid hex format: odd length 3"
        );
        assert_eq!(
            InvalidFormat::InvalidDigit {
                character: 'Z',
                position: 0
            }
            .to_string(),
            "invalid hex format: unexpected character 'Z' at position 0"
        );
    }

    #[test]
    fn test_hex_bytes_parse_and_format() {
        let bytes: HexBytes = "baadf00d".parse().unwrap();

        assert_eq!(bytes.as_bytes(), &BAADF00D);
        assert_eq!(bytes.to_string(), "BAADF00D");
        assert_eq!(format!("{bytes:X}"), "BAADF00D");
        assert_eq!(format!("{bytes:x}"), "baadf00d");
        assert_eq!(Vec::from(bytes), BAADF00D.to_vec());
    }

    #[test]
    fn test_hex_bytes_parse_error() {
        let result = "ABC".parse::<HexBytes>();
        assert_eq!(result, Err(InvalidFormat::OddLength(3)));
    }

    #[test]
    fn test_hex_bytes_from_vec() {
        let bytes = HexBytes::from(vec![0x01, 0x02]);
        assert_eq!(bytes.to_string(), "0102");
        assert_eq!(bytes.into_inner(), vec![0x01, 0x02]);
        assert_eq!(HexBytes::default().to_string(), "");
    }
}
