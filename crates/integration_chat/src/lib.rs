//! Hosted chat-completion integration
//!
//! Client for an OpenAI-compatible chat-completion service. The policy
//! pipeline sends one completion request per generation and reads the
//! first choice.

pub mod client;
mod models;

pub use client::{ChatClient, ChatConfig, ChatError};
pub use models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Completion, TokenUsage,
};
