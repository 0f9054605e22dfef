//! Domain layer: keys, entries and the rewrite rules
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod error;
pub mod key;
pub mod rewrite;

pub use error::DomainError;
pub use key::{KeyName, LineEnding, COMMENT_MARKER};
pub use rewrite::{EnvEntry, KeyOutcome, KeyState, Rewrite};
