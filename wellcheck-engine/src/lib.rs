pub mod breathing;
pub mod classifier;
pub mod controller;
pub mod recording;
pub mod session;
pub mod traits;
