//! Template engine module for the policy prompt and the dashboard page
//!
//! Uses Tera for:
//! - The chat-completion user message (prompt + weather data + report
//!   structure)
//! - The report-structure text included into that message
//! - The server-rendered dashboard page shell
//!
//! # Template Locations
//!
//! Templates can be loaded from:
//! - Embedded templates (compile-time)
//! - File system (runtime, configurable via `templates_dir`)
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::TemplateEngine;
//!
//! let engine = TemplateEngine::new()?;
//! let message = engine.render_policy_prompt(
//!     "Suggest climate-friendly policy for this city.",
//!     "Lahore",
//!     r#"{"city":"Lahore"}"#,
//! )?;
//! ```

use std::path::Path;
use std::sync::Arc;

use application::{error::ApplicationError, ports::PromptTemplatePort};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Invalid template context
    #[error("Invalid context: {0}")]
    Context(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Create a new empty template context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }

    /// Insert all values from another context
    pub fn extend(&mut self, other: Self) {
        self.inner.extend(other.inner);
    }

    /// Get the inner Tera context
    #[must_use]
    pub fn into_inner(self) -> Context {
        self.inner
    }
}

/// Dashboard page template data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    /// Page and header title
    pub title: String,
    /// API base URL the page targets; empty string means same origin
    pub backend_url: String,
    /// City preloaded into the input
    pub default_city: String,
    /// Prompt preloaded into the textarea
    pub default_prompt: String,
    /// Models offered in the select
    pub models: Vec<String>,
    /// Model selected initially
    pub default_model: String,
    /// Temperature the slider starts at
    pub default_temperature: f32,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            title: "AI Climate Policy Maker".to_string(),
            backend_url: String::new(),
            default_city: "Lahore".to_string(),
            default_prompt: domain::DEFAULT_PROMPT.to_string(),
            models: vec!["gpt-4o-mini".to_string(), "gpt-5-nano".to_string()],
            default_model: domain::DEFAULT_MODEL.to_string(),
            default_temperature: domain::DEFAULT_TEMPERATURE,
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Path to custom templates directory (optional)
    #[serde(default)]
    pub templates_dir: Option<String>,

    /// Whether to use embedded templates as fallback
    #[serde(default = "default_true")]
    pub use_embedded_fallback: bool,

    /// Whether to auto-escape HTML by default
    #[serde(default = "default_true")]
    pub auto_escape: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            use_embedded_fallback: true,
            auto_escape: true,
        }
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    /// User-message layout for the chat completion. The spacing around the
    /// placeholders is part of the wire contract with the model.
    pub const POLICY_PROMPT: &str = "{{ user_prompt }}\n\nHere is weather data for {{ city }}: {{ weather_data }} \n\nPlease provide a detailed climate policy response according to this template \n\n {{ policy_template }}";

    /// Report structure handed to the model inside the prompt. The
    /// recommendations section asks for `- ` bullets so the PDF renderer
    /// can pick them up as list items.
    pub const POLICY_REPORT_TEMPLATE: &str = r#"Climate Policy Report

Executive Summary
Open with two or three sentences on the city's current climate situation
and the direction of the proposed policy.

Weather Context
Reference the supplied forecast data: expected temperature range,
precipitation outlook and notable short-term risks.

Policy Recommendations
List four to six concrete, actionable recommendations. Start each
recommendation on its own line with "- " and keep it to one or two
sentences.

Implementation Notes
Close with responsible agencies, a rough timeline and funding
considerations.
"#;

    pub const DASHBOARD_PAGE: &str = include_str!("dashboard.html");
}

/// Override files recognized inside `templates_dir`, mapped to the
/// engine-internal template names
const TEMPLATE_FILES: [(&str, &str); 3] = [
    ("policy_prompt.txt", "policy/prompt.txt"),
    ("policy_template.txt", "policy/report_template.txt"),
    ("dashboard.html", "dashboard/index.html"),
];

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    config: TemplateConfig,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a new template engine with default configuration
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a new template engine with custom configuration
    pub fn with_config(config: TemplateConfig) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        // Set auto-escape based on config
        tera.autoescape_on(if config.auto_escape {
            vec![".html", ".htm", ".xml"]
        } else {
            vec![]
        });

        // Load embedded templates
        tera.add_raw_template("policy/prompt.txt", embedded::POLICY_PROMPT)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template("policy/report_template.txt", embedded::POLICY_REPORT_TEMPLATE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template("dashboard/index.html", embedded::DASHBOARD_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        // Load overrides from the templates directory if present
        if let Some(ref dir) = config.templates_dir {
            Self::load_overrides(&mut tera, dir, config.use_embedded_fallback)?;
        }

        Ok(Self {
            tera: Arc::new(tera),
            config,
        })
    }

    /// Replace embedded templates with files found in `dir`
    fn load_overrides(
        tera: &mut Tera,
        dir: &str,
        use_embedded_fallback: bool,
    ) -> Result<(), TemplateError> {
        for (file, name) in TEMPLATE_FILES {
            let path = Path::new(dir).join(file);
            if !path.exists() {
                continue;
            }

            let result = std::fs::read_to_string(&path)
                .map_err(|e| TemplateError::Compile(format!("{}: {e}", path.display())))
                .and_then(|content| {
                    tera.add_raw_template(name, &content)
                        .map_err(|e| TemplateError::Compile(e.to_string()))
                });

            match result {
                Ok(()) => debug!(template = %name, path = %path.display(), "Loaded template override"),
                Err(e) => {
                    if !use_embedded_fallback {
                        return Err(e);
                    }
                    debug!(error = %e, template = %name, "Template override failed to load, using embedded");
                },
            }
        }
        info!(dir = %dir, "Template directory processed");
        Ok(())
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render the chat-completion user message from the caller's prompt,
    /// the city, and the serialized weather bundle
    pub fn render_policy_prompt(
        &self,
        user_prompt: &str,
        city: &str,
        weather_json: &str,
    ) -> Result<String, TemplateError> {
        // The report structure is static text; rendering it applies any
        // file override before it is embedded into the message.
        let report_template = self.render("policy/report_template.txt", &TemplateContext::new())?;

        let mut ctx = TemplateContext::new();
        ctx.insert("user_prompt", &user_prompt);
        ctx.insert("city", &city);
        ctx.insert("weather_data", &weather_json);
        ctx.insert("policy_template", &report_template);

        self.render("policy/prompt.txt", &ctx)
    }

    /// Render the dashboard page shell
    pub fn render_dashboard(&self, data: &DashboardData) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new();
        ctx.insert("title", &data.title);
        ctx.insert("backend_url", &data.backend_url);
        ctx.insert("default_city", &data.default_city);
        ctx.insert("default_prompt", &data.default_prompt);
        ctx.insert("models", &data.models);
        ctx.insert("default_model", &data.default_model);
        // f32 widens to a noisy f64 through the serde path; the Display
        // form keeps the slider attribute at "0.4"
        ctx.insert("default_temperature", &data.default_temperature.to_string());

        self.render("dashboard/index.html", &ctx)
    }

    /// Check if a template exists
    #[must_use]
    pub fn template_exists(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// List all available template names
    #[must_use]
    pub fn list_templates(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}

impl PromptTemplatePort for TemplateEngine {
    fn render_policy_prompt(
        &self,
        user_prompt: &str,
        city: &str,
        weather_json: &str,
    ) -> Result<String, ApplicationError> {
        Self::render_policy_prompt(self, user_prompt, city, weather_json)
            .map_err(|e| ApplicationError::Internal(format!("Template error: {e}")))
    }
}
