//! Cached policy adapter - decorator that adds caching to any `PolicyPort`
//!
//! Identical requests within the TTL window reuse the previous outcome
//! instead of re-querying the weather providers and the paid completion
//! endpoint. Rejections are cached too; the topic guard is deterministic,
//! so a rejected prompt stays rejected for the lifetime of the entry.

use std::{sync::Arc, time::Duration};

use application::{
    error::ApplicationError,
    ports::{CachePort, CachePortExt, PolicyPort, ttl},
};
use async_trait::async_trait;
use domain::{PolicyOutcome, PolicyParams};
use tracing::{debug, info, instrument, warn};

use crate::cache::policy_cache_key;

/// Caching decorator for policy generation
pub struct CachedPolicyAdapter<P: PolicyPort, C: CachePort> {
    /// The underlying policy implementation
    inner: P,
    /// Cache for storing outcomes
    cache: Arc<C>,
    /// Whether caching is enabled
    enabled: bool,
    /// Time-to-live for cached outcomes
    ttl: Duration,
}

impl<P: PolicyPort + std::fmt::Debug, C: CachePort> std::fmt::Debug for CachedPolicyAdapter<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedPolicyAdapter")
            .field("inner", &self.inner)
            .field("enabled", &self.enabled)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<P: PolicyPort, C: CachePort> CachedPolicyAdapter<P, C> {
    /// Create a new cached policy adapter
    pub const fn new(inner: P, cache: Arc<C>) -> Self {
        Self {
            inner,
            cache,
            enabled: true,
            ttl: ttl::POLICY_RESPONSE,
        }
    }

    /// Override the entry time-to-live
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Disable caching (useful for debugging)
    #[must_use]
    pub const fn with_caching_disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Enable caching
    #[must_use]
    pub const fn with_caching_enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Get the underlying policy implementation
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Check cache for an outcome
    async fn get_cached(&self, cache_key: &str) -> Option<PolicyOutcome> {
        if !self.enabled {
            return None;
        }

        match self.cache.get::<PolicyOutcome>(cache_key).await {
            Ok(Some(cached)) => {
                debug!(key = %cache_key, "Cache hit for policy");
                Some(cached)
            },
            Ok(None) => {
                debug!(key = %cache_key, "Cache miss for policy");
                None
            },
            Err(e) => {
                // Log but don't fail - cache errors shouldn't break generation
                warn!(error = %e, key = %cache_key, "Cache read error");
                None
            },
        }
    }

    /// Store an outcome in cache
    async fn cache_outcome(&self, cache_key: &str, outcome: &PolicyOutcome) {
        if !self.enabled {
            return;
        }

        if let Err(e) = self.cache.set(cache_key, outcome, self.ttl).await {
            // Log but don't fail - cache errors shouldn't break generation
            warn!(error = %e, key = %cache_key, "Cache write error");
        } else {
            debug!(key = %cache_key, ttl_secs = self.ttl.as_secs(), "Cached policy outcome");
        }
    }
}

#[async_trait]
impl<P: PolicyPort, C: CachePort> PolicyPort for CachedPolicyAdapter<P, C> {
    #[instrument(
        skip(self, params),
        fields(city = %params.city, cached = tracing::field::Empty)
    )]
    async fn generate(&self, params: &PolicyParams) -> Result<PolicyOutcome, ApplicationError> {
        let cache_key = policy_cache_key(
            params.city.as_str(),
            &params.model,
            params.temperature,
            &params.user_prompt,
        );

        if let Some(cached) = self.get_cached(&cache_key).await {
            tracing::Span::current().record("cached", true);
            info!("Returning cached policy outcome");
            return Ok(cached);
        }

        tracing::Span::current().record("cached", false);

        let outcome = self.inner.generate(params).await?;
        self.cache_outcome(&cache_key, &outcome).await;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use domain::{CityName, PolicyResult, WeatherBundle};

    use super::*;
    use crate::cache::MokaCache;

    /// Mock policy port that counts calls
    #[derive(Debug, Default)]
    struct CountingPolicy {
        call_count: AtomicU32,
        reject: bool,
        fail: bool,
    }

    impl CountingPolicy {
        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PolicyPort for CountingPolicy {
        async fn generate(&self, params: &PolicyParams) -> Result<PolicyOutcome, ApplicationError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApplicationError::ExternalService("model offline".into()));
            }
            if self.reject {
                return Ok(PolicyOutcome::Rejected {
                    message: "out of scope".to_string(),
                });
            }
            Ok(PolicyOutcome::Generated(PolicyResult {
                city: params.city.to_string(),
                weather: WeatherBundle::new(params.city.as_str()),
                policy_text: format!("Policy for {}", params.city),
            }))
        }
    }

    fn params(city: &str, prompt: &str) -> PolicyParams {
        PolicyParams::new(
            CityName::new(city).expect("valid city"),
            prompt,
            domain::DEFAULT_MODEL,
            domain::DEFAULT_TEMPERATURE,
        )
        .expect("valid params")
    }

    #[tokio::test]
    async fn caches_identical_requests() {
        let adapter = CachedPolicyAdapter::new(CountingPolicy::default(), Arc::new(MokaCache::new()));
        let request = params("Lahore", "Heat adaptation measures");

        let first = adapter.generate(&request).await.unwrap();
        let second = adapter.generate(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(adapter.inner().calls(), 1);
    }

    #[tokio::test]
    async fn different_parameters_are_cached_separately() {
        let adapter = CachedPolicyAdapter::new(CountingPolicy::default(), Arc::new(MokaCache::new()));

        adapter
            .generate(&params("Lahore", "Heat adaptation"))
            .await
            .unwrap();
        adapter
            .generate(&params("Berlin", "Heat adaptation"))
            .await
            .unwrap();
        adapter
            .generate(&params("Lahore", "Flood defences"))
            .await
            .unwrap();

        assert_eq!(adapter.inner().calls(), 3);
    }

    #[tokio::test]
    async fn caching_can_be_disabled() {
        let adapter = CachedPolicyAdapter::new(CountingPolicy::default(), Arc::new(MokaCache::new()))
            .with_caching_disabled();
        let request = params("Lahore", "Heat adaptation measures");

        adapter.generate(&request).await.unwrap();
        adapter.generate(&request).await.unwrap();

        assert_eq!(adapter.inner().calls(), 2);
    }

    #[tokio::test]
    async fn rejections_are_cached_like_results() {
        let adapter =
            CachedPolicyAdapter::new(CountingPolicy::rejecting(), Arc::new(MokaCache::new()));
        let request = params("Lahore", "Tell me a joke");

        let first = adapter.generate(&request).await.unwrap();
        let second = adapter.generate(&request).await.unwrap();

        assert!(first.is_rejected());
        assert_eq!(first, second);
        assert_eq!(adapter.inner().calls(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let adapter =
            CachedPolicyAdapter::new(CountingPolicy::failing(), Arc::new(MokaCache::new()));
        let request = params("Lahore", "Heat adaptation measures");

        assert!(adapter.generate(&request).await.is_err());
        assert!(adapter.generate(&request).await.is_err());

        assert_eq!(adapter.inner().calls(), 2);
    }

    #[tokio::test]
    async fn cached_outcome_round_trips_unchanged() {
        let adapter = CachedPolicyAdapter::new(CountingPolicy::default(), Arc::new(MokaCache::new()));
        let request = params("Lahore", "Heat adaptation measures");

        let first = adapter.generate(&request).await.unwrap();
        let second = adapter.generate(&request).await.unwrap();

        let result = second.result().expect("generated");
        assert_eq!(result.city, "Lahore");
        assert_eq!(result.policy_text, "Policy for Lahore");
        assert_eq!(first, second);
    }
}
