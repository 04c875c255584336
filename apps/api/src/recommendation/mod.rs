// Recommendation: renders the catalog and the user's interest into one prompt
// and relays the model's answer. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompt;
pub mod prompts;
