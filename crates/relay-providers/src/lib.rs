//! # relay-providers
//!
//! Completion API providers. The relay talks to any OpenAI-compatible
//! chat-completions endpoint (Groq by default).

mod openai;

pub use openai::OpenAiProvider;
