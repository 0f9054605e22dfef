//! Application layer: the env file manager
//!
//! This layer orchestrates the domain rewrite rules and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod manager;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use manager::EnvKeyManager;
