//! Policy generation port
//!
//! The whole composition pipeline behind one seam, so the response cache
//! can decorate it without the HTTP layer knowing.

use async_trait::async_trait;
use domain::{PolicyOutcome, PolicyParams};

use crate::error::ApplicationError;

/// Port for the policy generation pipeline
#[async_trait]
pub trait PolicyPort: Send + Sync {
    /// Generate a policy suggestion (or a topic-guard rejection) for the
    /// given parameters
    async fn generate(&self, params: &PolicyParams) -> Result<PolicyOutcome, ApplicationError>;
}
