//! Cache implementations
//!
//! Provides the in-memory response cache behind `CachePort`:
//! - `MokaCache`: bounded in-memory cache with TTL-based eviction

mod moka_cache;

pub use moka_cache::{MokaCache, MokaCacheConfig};

/// Generate a cache key from components using blake3 hash
///
/// This ensures consistent key generation across the application
/// and handles variable-length inputs efficiently.
#[must_use]
pub fn generate_cache_key(prefix: &str, components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for component in components {
        hasher.update(component.as_bytes());
        hasher.update(b"|"); // Separator to avoid collisions
    }
    let hash = hasher.finalize();
    format!("{}:{}", prefix, hash.to_hex())
}

/// Generate a cache key for a policy request
///
/// Includes city, model, temperature, and the user prompt so cache hits
/// only occur for semantically equivalent requests.
#[must_use]
pub fn policy_cache_key(city: &str, model: &str, temperature: f32, user_prompt: &str) -> String {
    // Quantize temperature to avoid floating point comparison issues
    let temp_str = format!("{temperature:.2}");
    generate_cache_key("policy", &[city, model, &temp_str, user_prompt])
}
