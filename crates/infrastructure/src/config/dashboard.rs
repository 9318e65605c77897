//! Dashboard page configuration.

use serde::{Deserialize, Serialize};

use super::ChatAppConfig;
use crate::templates::DashboardData;

/// Configuration for the server-rendered dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// API base URL the page targets; `None` means same origin
    #[serde(default)]
    pub backend_url: Option<String>,

    /// City preloaded into the input
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Models offered in the select
    #[serde(default = "default_models")]
    pub models: Vec<String>,
}

fn default_city() -> String {
    "Lahore".to_string()
}

fn default_models() -> Vec<String> {
    vec!["gpt-4o-mini".to_string(), "gpt-5-nano".to_string()]
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            default_city: default_city(),
            models: default_models(),
        }
    }
}

impl DashboardConfig {
    /// Build the template data for the page shell
    ///
    /// The initial model and temperature come from the chat section so the
    /// page and the `/policy` defaults stay in sync.
    #[must_use]
    pub fn to_dashboard_data(&self, chat: &ChatAppConfig) -> DashboardData {
        DashboardData {
            backend_url: self.backend_url.clone().unwrap_or_default(),
            default_city: self.default_city.clone(),
            models: self.models.clone(),
            default_model: chat.default_model.clone(),
            default_temperature: chat.default_temperature,
            ..Default::default()
        }
    }
}
