// CV Generation Pipeline
// Prompt Builder → Generation Client (llm_client) → Response Normalizer.
// All LLM calls go through llm_client, no direct provider HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
pub mod schema;
pub mod validation;
