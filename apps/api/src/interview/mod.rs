// Interview flow: session aggregate, prompt builder, in-memory store and the
// orchestration that ties them to the model. All LLM calls go through llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod service;
pub mod store;
