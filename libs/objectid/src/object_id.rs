//! The ObjectId value type.
//!
//! Layout of the 12 bytes:
//!
//! ```text
//! 0..4   big-endian Unix timestamp (seconds)
//! 4..9   instance tag, fixed for the process
//! 9..12  big-endian 24-bit counter
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bytes;
use crate::error::ObjectIdError;
use crate::generator::{GeneratorContext, InstanceTag, INSTANCE_TAG_LEN};
use crate::{HEX_LEN, OBJECT_ID_LEN};

/// Anything that can render itself as an ObjectId hex string.
///
/// This is the adapter seam for id values owned by other libraries. The
/// returned string is decoded leniently; it must yield exactly 12 bytes to
/// be accepted by [`ObjectId::from_id_like`].
pub trait ObjectIdLike {
    /// Returns the 24-character hex form.
    fn to_hex_string(&self) -> String;
}

/// Text encodings accepted by [`ObjectId::to_string_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// 24 lowercase hex characters.
    #[default]
    Hex,
    /// Standard padded base64 of the 12 bytes.
    Base64,
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

/// Input shapes accepted by ObjectId construction.
#[derive(Clone, Copy)]
pub enum ObjectIdInput<'a> {
    /// A foreign id value; its hex form is decoded.
    IdLike(&'a dyn ObjectIdLike),
    /// Generate a fresh id, optionally with a custom timestamp in seconds.
    Generate(Option<u32>),
    /// Raw bytes; must be exactly 12.
    Bytes(&'a [u8]),
    /// A 12-character legacy byte string or 24 hex characters.
    Str(&'a str),
}

/// Extended JSON wrapper: `{ "$oid": "<24 hex chars>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedJson {
    #[serde(rename = "$oid")]
    pub oid: String,
}

impl ObjectIdLike for ExtendedJson {
    fn to_hex_string(&self) -> String {
        self.oid.clone()
    }
}

/// A 12-byte, globally unique identifier.
#[derive(Clone)]
pub struct ObjectId {
    bytes: [u8; OBJECT_ID_LEN],
    cache_hex: bool,
    hex: OnceLock<String>,
}

impl ObjectId {
    /// Type tag used by BSON-aware consumers.
    pub const BSON_TYPE: &'static str = "ObjectId";

    // =========================================================================
    // Construction
    // =========================================================================

    /// Generates a new ObjectId from the global context.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(GeneratorContext::global())
    }

    /// Generates a new ObjectId from `ctx`.
    #[must_use]
    pub fn new_in(ctx: &GeneratorContext) -> Self {
        Self::with_cache(ctx.generate(None), ctx.cache_hex_string())
    }

    /// Generates a new ObjectId with a custom timestamp in seconds.
    ///
    /// The instance tag and counter are filled in as usual.
    #[must_use]
    pub fn from_time(time: u32) -> Self {
        let ctx = GeneratorContext::global();
        Self::with_cache(ctx.generate(Some(time)), ctx.cache_hex_string())
    }

    /// Same as [`ObjectId::new`].
    #[must_use]
    pub fn create_pk() -> Self {
        Self::new()
    }

    /// Creates an ObjectId whose timestamp is `time` and whose other bytes
    /// are zero. Useful as a bound when sorting or range-querying by time.
    #[must_use]
    pub fn create_from_time(time: u32) -> Self {
        let mut buf = [0u8; OBJECT_ID_LEN];
        bytes::write_u32_be(&mut buf, time);
        Self::from_bytes(buf)
    }

    /// Creates an ObjectId from exactly 24 hex characters.
    pub fn create_from_hex_string(hex: &str) -> Result<Self, ObjectIdError> {
        let len = hex.chars().count();
        if len != HEX_LEN {
            return Err(ObjectIdError::InvalidStringLength { len });
        }
        let decoded = bytes::from_hex(hex);
        if decoded.len() != OBJECT_ID_LEN {
            return Err(ObjectIdError::InvalidHex(hex.to_string()));
        }
        Self::from_slice(&decoded)
    }

    /// Creates an ObjectId from its base64 encoding.
    pub fn from_base64(input: &str) -> Result<Self, ObjectIdError> {
        let decoded = bytes::from_base64(input)?;
        Self::from_slice(&decoded)
    }

    /// Creates an ObjectId from 12 raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self::with_cache(bytes, GeneratorContext::global().cache_hex_string())
    }

    /// Creates an ObjectId from a byte slice, copying it.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ObjectIdError> {
        Self::create(ObjectIdInput::Bytes(bytes))
    }

    /// Creates an ObjectId from a 12-character legacy string or 24 hex
    /// characters.
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        Self::create(ObjectIdInput::Str(s))
    }

    /// Creates an ObjectId from a foreign id value.
    pub fn from_id_like(like: &dyn ObjectIdLike) -> Result<Self, ObjectIdError> {
        Self::create(ObjectIdInput::IdLike(like))
    }

    /// Creates an ObjectId from extended JSON.
    pub fn from_extended_json(doc: &ExtendedJson) -> Result<Self, ObjectIdError> {
        Self::parse_str(&doc.oid)
    }

    /// Creates an ObjectId from any accepted input using the global context.
    pub fn create(input: ObjectIdInput<'_>) -> Result<Self, ObjectIdError> {
        Self::create_in(GeneratorContext::global(), input)
    }

    /// Creates an ObjectId from any accepted input.
    ///
    /// Every constructor funnels through here; validation does too.
    pub fn create_in(
        ctx: &GeneratorContext,
        input: ObjectIdInput<'_>,
    ) -> Result<Self, ObjectIdError> {
        let bytes = match input {
            ObjectIdInput::IdLike(like) => {
                let decoded = bytes::from_hex(&like.to_hex_string());
                to_array(&decoded).ok_or(ObjectIdError::InvalidIdLike {
                    actual: decoded.len(),
                })?
            }
            ObjectIdInput::Generate(time) => ctx.generate(time),
            ObjectIdInput::Bytes(buf) => to_array(buf).ok_or(ObjectIdError::InvalidLength {
                expected: OBJECT_ID_LEN,
                actual: buf.len(),
            })?,
            ObjectIdInput::Str(s) => decode_str(s)?,
        };

        Ok(Self::with_cache(bytes, ctx.cache_hex_string()))
    }

    fn with_cache(bytes: [u8; OBJECT_ID_LEN], cache_hex: bool) -> Self {
        let hex = if cache_hex {
            OnceLock::from(bytes::to_hex(&bytes))
        } else {
            OnceLock::new()
        };
        Self {
            bytes,
            cache_hex,
            hex,
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Returns true if `input` would construct an ObjectId.
    ///
    /// An absent input is rejected even though construction would generate
    /// a fresh id from it.
    pub fn is_valid(input: ObjectIdInput<'_>) -> bool {
        if matches!(input, ObjectIdInput::Generate(None)) {
            return false;
        }
        Self::create(input).is_ok()
    }

    /// Returns true if `s` is a 24-character hex string or a 12-byte
    /// legacy string.
    pub fn is_valid_str(s: &str) -> bool {
        Self::is_valid(ObjectIdInput::Str(s))
    }

    /// Returns true if `bytes` is exactly 12 bytes long.
    pub fn is_valid_bytes(bytes: &[u8]) -> bool {
        Self::is_valid(ObjectIdInput::Bytes(bytes))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the 12 raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.bytes
    }

    /// Returns a copy of the 12 raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.bytes
    }

    /// Replaces the 12 bytes, refreshing the cached hex form.
    pub fn set_id(&mut self, bytes: [u8; OBJECT_ID_LEN]) {
        *self = Self::with_cache(bytes, self.cache_hex);
    }

    /// Seconds since the Unix epoch stored in bytes 0..4.
    #[must_use]
    pub fn timestamp_secs(&self) -> u32 {
        bytes::read_u32_be(&self.bytes)
    }

    /// Generation time, accurate to the second.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(i64::from(self.timestamp_secs()), 0).unwrap_or_default()
    }

    /// The instance tag stored in bytes 4..9.
    #[must_use]
    pub fn instance_tag(&self) -> InstanceTag {
        let mut tag = [0u8; INSTANCE_TAG_LEN];
        tag.copy_from_slice(&self.bytes[4..9]);
        InstanceTag::from_bytes(tag)
    }

    /// The 24-bit counter stored in bytes 9..12.
    #[must_use]
    pub fn counter(&self) -> u32 {
        (u32::from(self.bytes[9]) << 16) | (u32::from(self.bytes[10]) << 8) | u32::from(self.bytes[11])
    }

    // =========================================================================
    // Text forms
    // =========================================================================

    /// Returns the 24-character lowercase hex form.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.cache_hex {
            return self.hex.get_or_init(|| bytes::to_hex(&self.bytes)).clone();
        }
        bytes::to_hex(&self.bytes)
    }

    /// Renders the id in the given encoding.
    #[must_use]
    pub fn to_string_with(&self, encoding: Encoding) -> String {
        match encoding {
            Encoding::Hex => self.to_hex_string(),
            Encoding::Base64 => bytes::to_base64(&self.bytes),
        }
    }

    /// JSON form: the hex string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_hex_string()
    }

    /// Extended JSON form: `{ "$oid": "<hex>" }`.
    #[must_use]
    pub fn to_extended_json(&self) -> ExtendedJson {
        ExtendedJson {
            oid: self.to_hex_string(),
        }
    }

    /// Diagnostic form, e.g. `ObjectId("507f1f77bcf86cd799439011")`.
    #[must_use]
    pub fn inspect(&self) -> String {
        format!("ObjectId(\"{}\")", self.to_hex_string())
    }
}

fn to_array(buf: &[u8]) -> Option<[u8; OBJECT_ID_LEN]> {
    <[u8; OBJECT_ID_LEN]>::try_from(buf).ok()
}

/// Decodes the string shapes: 12 characters as UTF-8 bytes, or 24 hex chars.
fn decode_str(s: &str) -> Result<[u8; OBJECT_ID_LEN], ObjectIdError> {
    let len = s.chars().count();

    if len == OBJECT_ID_LEN {
        let encoded = bytes::from_utf8(s);
        return to_array(&encoded).ok_or(ObjectIdError::InvalidLegacyString {
            byte_len: encoded.len(),
        });
    }

    if len == HEX_LEN {
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ObjectIdError::InvalidHex(s.to_string()));
        }
        let decoded = bytes::from_hex(s);
        return to_array(&decoded).ok_or_else(|| ObjectIdError::InvalidHex(s.to_string()));
    }

    Err(ObjectIdError::InvalidStringLength { len })
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectIdLike for ObjectId {
    fn to_hex_string(&self) -> String {
        ObjectId::to_hex_string(self)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<[u8; OBJECT_ID_LEN]> for ObjectId {
    fn from(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for ObjectId {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for ObjectId {}

impl Hash for ObjectId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for ObjectId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ObjectId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Extended(ExtendedJson),
        }

        let hex = match Repr::deserialize(deserializer)? {
            Repr::Hex(hex) => hex,
            Repr::Extended(doc) => doc.oid,
        };
        Self::create_from_hex_string(&hex).map_err(serde::de::Error::custom)
    }
}
