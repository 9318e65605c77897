//! Topic guard port
//!
//! Capability: "is this prompt in scope for this system?" The default
//! implementation is keyword matching; the seam exists so it can be
//! swapped for a real classifier without touching the composer.

#[cfg(test)]
use mockall::automock;

/// Port for prompt scope checks
#[cfg_attr(test, automock)]
pub trait TopicGuardPort: Send + Sync {
    /// Whether the prompt is in scope for policy generation
    fn in_scope(&self, prompt: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn TopicGuardPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TopicGuardPort>();
    }
}
