//! # objectid
//!
//! Compact 12-byte identifiers that are unique without coordination.
//!
//! ## Layout
//!
//! ```text
//! | timestamp (4) | instance tag (5) | counter (3) |
//! ```
//!
//! - The timestamp is the big-endian Unix time in seconds at generation.
//! - The instance tag is 5 random bytes drawn once per process.
//! - The counter is a 24-bit big-endian value. It starts at a random offset
//!   and advances by one on every generation, wrapping at 2^24.
//!
//! Two ids from one process within the same second differ by counter.
//! Ids from different processes differ by instance tag with high
//! probability. Nothing stronger is guaranteed: there is no collision
//! detection, and the random sources are not cryptographically secure.
//!
//! ## Encodings
//!
//! - Canonical text: 24 lowercase hex characters, e.g.
//!   `507f1f77bcf86cd799439011`
//! - Extended JSON: `{ "$oid": "507f1f77bcf86cd799439011" }`
//! - Base64 of the 12 bytes
//! - Raw 12 bytes
//!
//! ## Example
//!
//! ```
//! use objectid::ObjectId;
//!
//! let id = ObjectId::new();
//! let parsed: ObjectId = id.to_hex_string().parse().unwrap();
//! assert_eq!(id, parsed);
//! assert!(ObjectId::is_valid_str("507f1f77bcf86cd799439011"));
//! ```

pub mod bytes;
mod config;
mod equality;
mod error;
pub mod format;
mod generator;
mod object_id;

pub use config::{GeneratorConfig, ENV_CACHE_HEX_STRING, ENV_COUNTER_SEED, ENV_INSTANCE_TAG};
pub use equality::Comparand;
pub use error::ObjectIdError;
pub use generator::{GeneratorContext, InstanceTag, COUNTER_MODULUS, INSTANCE_TAG_LEN};
pub use object_id::{Encoding, ExtendedJson, ObjectId, ObjectIdInput, ObjectIdLike};

/// Length of an ObjectId in bytes.
pub const OBJECT_ID_LEN: usize = 12;

/// Length of the canonical hex form.
pub const HEX_LEN: usize = 24;
