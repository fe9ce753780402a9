// Content generation: prompt composition, the single upstream call, and
// parsing of the reply into typed content.
// All LLM calls go through llm_client.

pub mod gateway;
pub mod handlers;
pub mod prompts;
