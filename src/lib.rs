pub mod config;
pub mod error;
pub mod modules;
pub mod services;

pub use error::{CleanupError, CleanupResult};
