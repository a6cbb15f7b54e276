// Style analysis: turns an employee's sample texts into a persisted style
// profile (measured metrics + qualitative characterization).
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod analyzer;
pub mod defaults;
pub mod handlers;
pub mod prompts;
pub mod store;
