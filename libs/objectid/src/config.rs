//! Generator configuration.

use serde::Deserialize;

use crate::generator::InstanceTag;

/// Env var that turns on hex string caching (`1`, `true`, or `yes`).
pub const ENV_CACHE_HEX_STRING: &str = "OBJECTID_CACHE_HEX_STRING";

/// Env var holding a fixed instance tag as 10 hex characters.
pub const ENV_INSTANCE_TAG: &str = "OBJECTID_INSTANCE_TAG";

/// Env var holding the initial counter value (decimal).
pub const ENV_COUNTER_SEED: &str = "OBJECTID_COUNTER_SEED";

/// Configuration for a [`GeneratorContext`](crate::GeneratorContext).
///
/// Every field is optional; the default config gives a random instance tag,
/// a random counter seed, and no hex caching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Memoize the hex form of each ObjectId.
    pub cache_hex_string: bool,

    /// Use this instance tag instead of drawing one at first generation.
    pub instance_tag: Option<InstanceTag>,

    /// Initial counter value, reduced modulo 2^24.
    pub counter_seed: Option<u32>,
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_hex_string = lookup(ENV_CACHE_HEX_STRING)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let instance_tag = lookup(ENV_INSTANCE_TAG).and_then(|v| match v.parse() {
            Ok(tag) => Some(tag),
            Err(e) => {
                tracing::warn!(var = ENV_INSTANCE_TAG, value = %v, error = %e, "ignoring malformed instance tag");
                None
            }
        });

        let counter_seed = lookup(ENV_COUNTER_SEED).and_then(|v| match v.trim().parse() {
            Ok(seed) => Some(seed),
            Err(e) => {
                tracing::warn!(var = ENV_COUNTER_SEED, value = %v, error = %e, "ignoring malformed counter seed");
                None
            }
        });

        Self {
            cache_hex_string,
            instance_tag,
            counter_seed,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
