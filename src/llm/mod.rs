pub mod provider;
pub mod openai;
pub mod gemini;
pub mod router;
pub mod types;
pub mod catalog;
pub mod json;
#[cfg(test)]
pub mod mock;

pub use provider::LLMProvider;
pub use router::{create_collaborators, create_provider, Collaborators};
pub use types::LLMResponse;
