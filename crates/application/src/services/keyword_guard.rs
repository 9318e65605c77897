//! Keyword-based topic guard
//!
//! Scans prompts case-insensitively for a fixed set of climate-related
//! keywords using the Aho-Corasick algorithm. This is a cost-control
//! guard, not a security mechanism: matching is literal substring
//! matching and trivially bypassable.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use tracing::debug;

use crate::ports::TopicGuardPort;

/// Keywords that mark a prompt as in scope
pub const CLIMATE_KEYWORDS: [&str; 14] = [
    "climate",
    "weather",
    "environment",
    "sustainability",
    "policy",
    "green",
    "energy",
    "emission",
    "carbon",
    "pollution",
    "temperature",
    "precipitation",
    "flood",
    "drought",
];

/// Pre-compiled Aho-Corasick automaton for the fixed keyword set
static KEYWORD_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with valid static patterns
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(CLIMATE_KEYWORDS)
        .expect("Failed to build keyword matcher")
});

/// Topic guard that accepts prompts containing at least one climate keyword
#[derive(Debug, Clone)]
pub struct KeywordTopicGuard {
    /// When disabled, every prompt is considered in scope
    enabled: bool,
}

impl KeywordTopicGuard {
    /// Create a guard with the fixed keyword set
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: true }
    }

    /// Disable the guard (every prompt passes)
    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl Default for KeywordTopicGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicGuardPort for KeywordTopicGuard {
    fn in_scope(&self, prompt: &str) -> bool {
        if !self.enabled {
            return true;
        }
        let matched = KEYWORD_MATCHER.is_match(prompt);
        if !matched {
            debug!(prompt_len = prompt.len(), "Prompt contains no climate keyword");
        }
        matched
    }
}
