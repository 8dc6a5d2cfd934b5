// Assistant: answers free-text questions through a waterfall of stages.
// remote chat-completion API → local LLM CLI → rule-based canned replies.

pub mod config;
pub mod fallback;
pub mod handlers;
pub mod local;
pub mod remote;
pub mod resolver;
pub mod stage;
