//! Env file manager
//!
//! Sets, enables and disables keys in a single `.env` file.
//!
//! Every call re-reads the file and, if the content changes, rewrites it in
//! full. No state is kept between calls, so edits made by other tools in the
//! meantime are always seen. Writes are plain overwrites (no temp file, no
//! locking): the last writer wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::rewrite::{self, Rewrite};
use crate::domain::{EnvEntry, KeyName, KeyOutcome, KeyState};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Manages keys in one env file.
pub struct EnvKeyManager {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    settings: Settings,
}

impl std::fmt::Debug for EnvKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvKeyManager")
            .field("path", &self.path)
            .field("settings", &self.settings)
            .finish()
    }
}

impl EnvKeyManager {
    /// Create a manager for an existing env file with default settings.
    ///
    /// # Errors
    /// [`ApplicationError::EnvFileNotFound`] if nothing exists at `path`,
    /// [`ApplicationError::NotAFile`] if `path` is a directory.
    pub fn new(path: impl AsRef<Path>) -> ApplicationResult<Self> {
        Self::with_settings(path, Settings::default())
    }

    /// Create a manager with explicit settings.
    pub fn with_settings(path: impl AsRef<Path>, settings: Settings) -> ApplicationResult<Self> {
        Self::with_deps(Arc::new(RealFileSystem), path, settings)
    }

    /// Create a manager with a custom filesystem (for testing).
    pub fn with_deps(
        fs: Arc<dyn FileSystem>,
        path: impl AsRef<Path>,
        settings: Settings,
    ) -> ApplicationResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !fs.exists(&path) {
            return Err(ApplicationError::EnvFileNotFound(path));
        }
        if !fs.is_file(&path) {
            return Err(ApplicationError::NotAFile(path));
        }
        debug!("managing env file: {}", path.display());

        Ok(Self { fs, path, settings })
    }

    /// Path of the managed env file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set `key` to `value`, appending the entry if it is missing.
    ///
    /// Returns [`KeyOutcome::Updated`] or [`KeyOutcome::Appended`] when the
    /// file was written, [`KeyOutcome::Unchanged`] when the assignment already
    /// exists.
    #[instrument(level = "debug", skip(self, value))]
    pub fn set_key(&self, key: &str, value: &str) -> ApplicationResult<KeyOutcome> {
        let key = KeyName::new(key)?;
        let content = self.read()?;
        let rewrite = rewrite::set_key(&content, &key, value, self.settings.line_ending)?;
        self.apply(rewrite)
    }

    /// Comment out the active entry of `key`.
    ///
    /// Returns [`KeyOutcome::Unchanged`] if a disabled entry already exists and
    /// [`KeyOutcome::NotFound`] if there is no active entry.
    #[instrument(level = "debug", skip(self))]
    pub fn disable_key(&self, key: &str) -> ApplicationResult<KeyOutcome> {
        let key = KeyName::new(key)?;
        let content = self.read()?;
        self.apply(rewrite::disable_key(&content, &key))
    }

    /// Uncomment the disabled entry of `key`.
    ///
    /// Returns [`KeyOutcome::Unchanged`] if the key is already active and
    /// [`KeyOutcome::NotFound`] if it is not present at all.
    #[instrument(level = "debug", skip(self))]
    pub fn enable_key(&self, key: &str) -> ApplicationResult<KeyOutcome> {
        let key = KeyName::new(key)?;
        let content = self.read()?;
        self.apply(rewrite::enable_key(&content, &key))
    }

    /// Value of the active entry of `key`, if any.
    pub fn get_key(&self, key: &str) -> ApplicationResult<Option<String>> {
        let key = KeyName::new(key)?;
        let content = self.read()?;
        Ok(rewrite::get_value(&content, &key))
    }

    /// Whether `key` is enabled, disabled or absent.
    pub fn key_state(&self, key: &str) -> ApplicationResult<KeyState> {
        let key = KeyName::new(key)?;
        let content = self.read()?;
        Ok(rewrite::key_state(&content, &key))
    }

    /// All enabled and disabled entries in file order.
    pub fn entries(&self) -> ApplicationResult<Vec<EnvEntry>> {
        let content = self.read()?;
        Ok(rewrite::entries(&content))
    }

    fn read(&self) -> ApplicationResult<String> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read env file", &self.path)?;
        trace!("read {} bytes from {}", content.len(), self.path.display());
        Ok(content)
    }

    fn apply(&self, rewrite: Rewrite) -> ApplicationResult<KeyOutcome> {
        debug!("outcome: {:?}", rewrite.outcome);
        if let Some(content) = rewrite.content {
            self.fs
                .write(&self.path, &content)
                .with_path_context("write env file", &self.path)?;
        }
        Ok(rewrite.outcome)
    }
}
