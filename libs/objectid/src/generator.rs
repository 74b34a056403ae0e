//! ObjectId generation state and algorithm.
//!
//! A [`GeneratorContext`] owns the per-process state every generated id
//! draws from: the 5-byte instance tag and the 24-bit counter. The counter
//! is advanced with an atomic add and the tag is set through a once-cell,
//! so a context can be shared freely across threads.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use rand::Rng;

use crate::bytes;
use crate::config::GeneratorConfig;
use crate::error::ObjectIdError;
use crate::OBJECT_ID_LEN;

/// Length of the instance tag in bytes.
pub const INSTANCE_TAG_LEN: usize = 5;

/// The counter wraps at 2^24.
pub const COUNTER_MODULUS: u32 = 1 << 24;

const COUNTER_MASK: u32 = COUNTER_MODULUS - 1;

static GLOBAL: OnceLock<GeneratorContext> = OnceLock::new();

// =============================================================================
// Instance Tag
// =============================================================================

/// Five random bytes identifying one process, embedded in bytes 4..9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceTag([u8; INSTANCE_TAG_LEN]);

impl InstanceTag {
    /// Creates a tag from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; INSTANCE_TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh random tag.
    #[must_use]
    pub fn random() -> Self {
        Self(bytes::random_bytes())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; INSTANCE_TAG_LEN] {
        &self.0
    }
}

impl std::fmt::Display for InstanceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&bytes::to_hex(&self.0))
    }
}

impl std::str::FromStr for InstanceTag {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != INSTANCE_TAG_LEN * 2 {
            return Err(ObjectIdError::InvalidLength {
                expected: INSTANCE_TAG_LEN,
                actual: s.len() / 2,
            });
        }
        let mut tag = [0u8; INSTANCE_TAG_LEN];
        hex::decode_to_slice(s, &mut tag).map_err(|_| ObjectIdError::InvalidHex(s.to_string()))?;
        Ok(Self(tag))
    }
}

impl serde::Serialize for InstanceTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for InstanceTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Generator Context
// =============================================================================

/// Process-wide generation state.
///
/// Most callers use [`GeneratorContext::global`]. Separate contexts are
/// useful in tests and tools that need a fixed tag or counter seed.
#[derive(Debug)]
pub struct GeneratorContext {
    counter: AtomicU32,
    instance_tag: OnceLock<InstanceTag>,
    cache_hex_string: AtomicBool,
}

impl GeneratorContext {
    /// Creates a context from configuration.
    ///
    /// Without a configured seed the counter starts at a random value in
    /// `[0, 2^24)`. Without a configured tag, one is drawn on first use.
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config
            .counter_seed
            .unwrap_or_else(|| rand::rng().random_range(0..COUNTER_MODULUS))
            & COUNTER_MASK;

        let instance_tag = match config.instance_tag {
            Some(tag) => OnceLock::from(tag),
            None => OnceLock::new(),
        };

        Self {
            counter: AtomicU32::new(seed),
            instance_tag,
            cache_hex_string: AtomicBool::new(config.cache_hex_string),
        }
    }

    /// Returns the process-wide context, creating it from the environment
    /// on first call.
    pub fn global() -> &'static GeneratorContext {
        GLOBAL.get_or_init(|| GeneratorContext::new(GeneratorConfig::from_env()))
    }

    /// Whether new ObjectIds memoize their hex form.
    pub fn cache_hex_string(&self) -> bool {
        self.cache_hex_string.load(Ordering::Relaxed)
    }

    /// Turns hex caching on or off for ObjectIds created afterwards.
    pub fn set_cache_hex_string(&self, enabled: bool) {
        self.cache_hex_string.store(enabled, Ordering::Relaxed);
    }

    /// Returns the instance tag, drawing it on first call.
    ///
    /// Concurrent first calls all observe the same tag.
    pub fn instance_tag(&self) -> InstanceTag {
        *self.instance_tag.get_or_init(|| {
            let tag = InstanceTag::random();
            tracing::debug!(instance_tag = %tag, "initialized ObjectId instance tag");
            tag
        })
    }

    /// Advances the counter and returns the new value in `[0, 2^24)`.
    pub fn next_counter(&self) -> u32 {
        // 2^32 is a multiple of 2^24, so wrapping u32 addition stays
        // consistent with the masked 24-bit value.
        let prev = self.counter.fetch_add(1, Ordering::Relaxed);
        let next = prev.wrapping_add(1) & COUNTER_MASK;
        if next == 0 {
            tracing::trace!("ObjectId counter wrapped");
        }
        next
    }

    /// Builds the 12 bytes of a new ObjectId.
    ///
    /// `time` overrides the timestamp in seconds; otherwise the current
    /// wall-clock second is used.
    pub fn generate(&self, time: Option<u32>) -> [u8; OBJECT_ID_LEN] {
        let time = time.unwrap_or_else(now_secs);
        let inc = self.next_counter();
        let tag = self.instance_tag();

        let mut buf = [0u8; OBJECT_ID_LEN];

        // 4-byte timestamp
        bytes::write_u32_be(&mut buf, time);

        // 5-byte instance tag
        buf[4..9].copy_from_slice(tag.as_bytes());

        // 3-byte counter
        buf[9] = ((inc >> 16) & 0xff) as u8;
        buf[10] = ((inc >> 8) & 0xff) as u8;
        buf[11] = (inc & 0xff) as u8;

        buf
    }
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Current Unix time in whole seconds, truncated to the 32-bit field.
fn now_secs() -> u32 {
    Utc::now().timestamp() as u32
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn fixed_context(seed: u32) -> GeneratorContext {
        GeneratorContext::new(GeneratorConfig {
            cache_hex_string: false,
            instance_tag: Some(InstanceTag::from_bytes([1, 2, 3, 4, 5])),
            counter_seed: Some(seed),
        })
    }

    #[test]
    fn test_generate_layout() {
        let ctx = fixed_context(0x0a0b0b);
        let buf = ctx.generate(Some(0x6553_f100));

        assert_eq!(&buf[0..4], &[0x65, 0x53, 0xf1, 0x00]);
        assert_eq!(&buf[4..9], &[1, 2, 3, 4, 5]);
        assert_eq!(&buf[9..12], &[0x0a, 0x0b, 0x0c]);
    }

    #[test]
    fn test_counter_wraps_at_24_bits() {
        let ctx = fixed_context(COUNTER_MODULUS - 2);
        assert_eq!(ctx.next_counter(), COUNTER_MODULUS - 1);
        assert_eq!(ctx.next_counter(), 0);
        assert_eq!(ctx.next_counter(), 1);
    }

    #[test]
    fn test_counter_seed_is_reduced() {
        let ctx = fixed_context(COUNTER_MODULUS + 5);
        assert_eq!(ctx.next_counter(), 6);
    }

    #[test]
    fn test_counter_wrap_bytes() {
        let ctx = fixed_context(COUNTER_MODULUS - 1);
        let buf = ctx.generate(Some(0));
        assert_eq!(&buf[9..12], &[0, 0, 0]);
    }

    #[test]
    fn test_random_seed_in_range() {
        for _ in 0..32 {
            let ctx = GeneratorContext::default();
            assert!(ctx.next_counter() < COUNTER_MODULUS);
        }
    }

    #[test]
    fn test_instance_tag_is_stable() {
        let ctx = GeneratorContext::default();
        let first = ctx.instance_tag();
        for _ in 0..10 {
            assert_eq!(ctx.instance_tag(), first);
        }
        let a = ctx.generate(None);
        let b = ctx.generate(None);
        assert_eq!(&a[4..9], first.as_bytes());
        assert_eq!(&b[4..9], first.as_bytes());
    }

    #[test]
    fn test_instance_tag_single_init_across_threads() {
        let ctx = Arc::new(GeneratorContext::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                std::thread::spawn(move || ctx.instance_tag())
            })
            .collect();

        let tags: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_global_is_shared() {
        let a = GeneratorContext::global() as *const GeneratorContext;
        let b = GeneratorContext::global() as *const GeneratorContext;
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_flag_toggle() {
        let ctx = fixed_context(0);
        assert!(!ctx.cache_hex_string());
        ctx.set_cache_hex_string(true);
        assert!(ctx.cache_hex_string());
    }

    #[test]
    fn test_instance_tag_parse() {
        let tag: InstanceTag = "0a0B0c0d0e".parse().unwrap();
        assert_eq!(tag.as_bytes(), &[0x0a, 0x0b, 0x0c, 0x0d, 0x0e]);
        assert_eq!(tag.to_string(), "0a0b0c0d0e");

        assert!(matches!(
            "0a0b".parse::<InstanceTag>(),
            Err(ObjectIdError::InvalidLength { .. })
        ));
        assert!(matches!(
            "zz0b0c0d0e".parse::<InstanceTag>(),
            Err(ObjectIdError::InvalidHex(_))
        ));
    }
}
