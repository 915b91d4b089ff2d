pub mod breathing;
pub mod config;
pub mod context;
pub mod intake;
pub mod mood;
pub mod sentiment;
pub mod templates;
pub mod types;

// Keep the public surface small and intentional.
pub use breathing::*;
pub use config::*;
pub use context::*;
pub use intake::*;
pub use mood::*;
pub use sentiment::*;
pub use templates::*;
pub use types::*;
