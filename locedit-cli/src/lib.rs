//! CLI library for testing purposes

pub mod check;
pub mod config;
pub mod edit;
pub mod groups;
pub mod view;

pub use config::load_config;
pub use locedit::{Provider, ProviderConfig};
