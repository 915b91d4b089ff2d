pub mod config_store;
pub mod credentials;
pub mod defaults;
pub mod gemini;
pub mod runtime_engine;
pub mod secrets;
