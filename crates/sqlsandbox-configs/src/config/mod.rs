//! Configuration model, defaults, and TOML loader.

pub mod defaults;
mod loader;
mod types;

pub use types::*;
