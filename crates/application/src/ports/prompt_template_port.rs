//! Prompt template port
//!
//! Rendering of the policy prompt from the template files loaded at
//! process start. Implemented by the Tera engine in infrastructure.

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for rendering the policy prompt
#[cfg_attr(test, automock)]
pub trait PromptTemplatePort: Send + Sync {
    /// Render the user message for the chat completion: the caller's
    /// prompt, the city, the serialized weather data, and the static
    /// report-structure template.
    fn render_policy_prompt(
        &self,
        user_prompt: &str,
        city: &str,
        weather_json: &str,
    ) -> Result<String, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PromptTemplatePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PromptTemplatePort>();
    }
}
