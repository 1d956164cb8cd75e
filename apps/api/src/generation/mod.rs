// Statement generation: serialize a curriculum aggregate, submit it with a
// job description to the generation backend, persist the result as a new
// Statement. All LLM calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
