//! Current-conditions provider port (provider B)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ApplicationError;

/// Port for the current-conditions provider
///
/// The provider is queried by raw city name (no geocoding dependency) and
/// its payload is passed through opaquely.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CurrentConditionsPort: Send + Sync {
    /// Fetch current conditions for a city by name
    async fn current_conditions(&self, city: &str) -> Result<Value, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn CurrentConditionsPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CurrentConditionsPort>();
    }
}
