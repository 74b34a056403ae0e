//! Byte codecs used by ObjectId.
//!
//! Hex, base64, UTF-8, and legacy one-char-per-byte strings, plus the
//! big-endian read/write used for the timestamp field.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::Rng;

use crate::error::ObjectIdError;
use crate::OBJECT_ID_LEN;

/// Renders bytes as lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes the leading well-formed hex pairs of `input`.
///
/// A trailing odd character is dropped before scanning. Decoding stops at
/// the first pair that contains a non-hex character, so the result may be
/// shorter than `input.len() / 2`. Callers check the length themselves.
pub fn from_hex(input: &str) -> Vec<u8> {
    let raw = input.as_bytes();
    let even = &raw[..raw.len() - raw.len() % 2];

    let valid = even
        .chunks_exact(2)
        .take_while(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        .count();

    let mut out = vec![0u8; valid];
    match hex::decode_to_slice(&even[..valid * 2], &mut out) {
        Ok(()) => out,
        Err(_) => Vec::new(),
    }
}

/// Encodes bytes as standard, padded base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard, padded base64.
pub fn from_base64(input: &str) -> Result<Vec<u8>, ObjectIdError> {
    Ok(STANDARD.decode(input)?)
}

/// Legacy binary string: each byte becomes the char with that code point.
pub fn to_iso88591(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Inverse of [`to_iso88591`]. Code points above 0xFF keep only their low 8 bits.
pub fn from_iso88591(input: &str) -> Vec<u8> {
    input.chars().map(|c| (u32::from(c) & 0xff) as u8).collect()
}

/// Decodes UTF-8, substituting U+FFFD for invalid sequences.
pub fn to_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Encodes a string as UTF-8 bytes.
pub fn from_utf8(input: &str) -> Vec<u8> {
    input.as_bytes().to_vec()
}

/// Returns true iff both slices have the same length and contents.
pub fn equals(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).all(|(x, y)| x == y)
}

/// Reads the big-endian u32 stored in bytes 0..4.
pub fn read_u32_be(buf: &[u8; OBJECT_ID_LEN]) -> u32 {
    u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Writes `value` big-endian into bytes 0..4.
pub fn write_u32_be(buf: &mut [u8; OBJECT_ID_LEN], value: u32) {
    buf[..4].copy_from_slice(&value.to_be_bytes());
}

/// Fills a fixed-size array from the thread-local RNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::rng().fill(&mut bytes);
    bytes
}
