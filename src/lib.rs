//! Manage keys in `.env` files.
//!
//! ```no_run
//! use envkey::{EnvKeyManager, KeyOutcome};
//!
//! let manager = EnvKeyManager::new(".env")?;
//! assert_eq!(manager.set_key("APP_DEBUG", "true")?, KeyOutcome::Appended);
//! manager.disable_key("APP_DEBUG")?;
//! manager.enable_key("APP_DEBUG")?;
//! # Ok::<(), envkey::ApplicationError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, EnvKeyManager};
pub use config::Settings;
pub use domain::{DomainError, EnvEntry, KeyOutcome, KeyState, LineEnding};
