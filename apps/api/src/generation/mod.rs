// Post generation: style-profile-driven prompt building, the LLM call that
// drafts the post, and the statistics shown during review.
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod stats;
