// Content Generator: pack inputs + market estimate -> negotiation document.
// All LLM calls go through llm_client; failures fall back to template.rs.

pub mod generator;
pub mod prompts;
pub mod template;

pub use generator::generate_negotiation_content;
