//! The configuration manager: file-name policy, discovery, and load/save.
//!
//! A [`ConfigManager`] holds at most one active configuration. It starts out
//! unconfigured; [`configure`](ConfigManager::configure) or a successful
//! [`load_configuration`](ConfigManager::load_configuration) installs one, and
//! later loads replace it wholesale. Saving never changes which configuration
//! is active.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::builder::Treefig;
use crate::error::TreefigError;
use crate::file;
use crate::format::Format;
use crate::settings::{Exclusions, Settings};

/// Owns the active configuration of type `C` and the rules for finding,
/// loading, and saving it.
#[derive(Debug)]
pub struct ConfigManager<C: Settings> {
    file_name: Option<String>,
    excluded: Exclusions,
    format: Format,
    strict: bool,
    working_dir: Option<PathBuf>,
    active: Option<C>,
}

impl<C: Settings> Default for ConfigManager<C> {
    fn default() -> Self {
        Treefig::builder().build()
    }
}

impl<C: Settings> ConfigManager<C> {
    pub(crate) fn new(
        file_name: Option<String>,
        excluded: Exclusions,
        format: Format,
        strict: bool,
        working_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            file_name,
            excluded,
            format,
            strict,
            working_dir,
            active: None,
        }
    }

    pub fn set_file_name(&mut self, name: &str) {
        self.file_name = Some(name.to_string());
    }

    /// The configured file name.
    ///
    /// Fails with [`TreefigError::FileNameNotConfigured`] if unset or empty,
    /// and with [`TreefigError::InvalidFileName`] if it is a path.
    pub fn file_name(&self) -> Result<&str, TreefigError> {
        let name = self
            .file_name
            .as_deref()
            .ok_or(TreefigError::FileNameNotConfigured)?;
        file::validate_file_name(name)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The absolute directory the upward search starts from.
    pub fn working_dir(&self) -> Result<PathBuf, TreefigError> {
        file::working_dir(self.working_dir.as_deref())
    }

    /// Add field names to the exclusion set. Empty names are ignored and
    /// repeated names have no further effect.
    pub fn mark_excluded<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names);
    }

    pub fn excluded_fields(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter()
    }

    /// Top-level field names of `config` that a save would write.
    pub fn serializable_fields(&self, config: &C) -> Result<Vec<String>, TreefigError> {
        let names = self
            .format
            .field_names(config)
            .map_err(TreefigError::SerializeError)?;
        Ok(self.excluded.retain_persisted(names))
    }

    /// Render `config` exactly as a save would write it.
    pub fn to_document(&self, config: &C) -> Result<String, TreefigError> {
        self.format
            .encode(config, &self.excluded)
            .map_err(TreefigError::SerializeError)
    }

    pub fn configuration(&self) -> Option<&C> {
        self.active.as_ref()
    }

    pub fn configuration_mut(&mut self) -> Option<&mut C> {
        self.active.as_mut()
    }

    /// Drop the active configuration, returning it. The next
    /// [`configure`](Self::configure) reads from disk again.
    pub fn reset(&mut self) -> Option<C> {
        self.active.take()
    }

    /// Walk up from the working directory to the nearest config file.
    pub fn find_config_path(&self) -> Result<Option<PathBuf>, TreefigError> {
        let file_name = self.file_name()?;
        let working_dir = self.working_dir()?;
        Ok(file::find_in_ancestors(&working_dir, file_name))
    }

    /// Ensure a configuration is active and return it.
    pub fn configure(&mut self) -> Result<&mut C, TreefigError> {
        self.configure_with(|_| {})
    }

    /// Ensure a configuration is active, then pass it to `setup`.
    ///
    /// The first call loads the nearest config file, or installs
    /// `C::default()` if there is none. Later calls skip the disk and only
    /// run `setup`.
    pub fn configure_with<F>(&mut self, setup: F) -> Result<&mut C, TreefigError>
    where
        F: FnOnce(&mut C),
    {
        if self.active.is_none() && !self.load_configuration(None)? {
            debug!("no config file found, starting from defaults");
            self.active = Some(C::default());
        }

        let config = self.active.get_or_insert_with(C::default);
        setup(&mut *config);
        Ok(config)
    }

    /// Write the active configuration to disk and return the absolute path.
    ///
    /// The target is `path` if given, else the nearest existing config file,
    /// else the working directory. A target that does not end in the file
    /// name is treated as a directory. Existing files are overwritten; missing
    /// parent directories are an error.
    pub fn save_configuration(&self, path: Option<&Path>) -> Result<PathBuf, TreefigError> {
        let file_name = self.file_name()?;
        let config = self
            .active
            .as_ref()
            .ok_or(TreefigError::NoActiveConfiguration)?;
        let working_dir = self.working_dir()?;

        let location = match path {
            Some(p) => p.to_path_buf(),
            None => file::find_in_ancestors(&working_dir, file_name)
                .unwrap_or_else(|| working_dir.clone()),
        };
        let target = file::resolve_target(&location, &working_dir, file_name);

        let content = self.to_document(config)?;
        file::write(&target, &content)?;
        debug!(path = %target.display(), "configuration saved");
        Ok(target)
    }

    /// Load the configuration from `path`, or from the nearest config file.
    ///
    /// Returns `Ok(false)` and leaves the active configuration untouched when
    /// there is no file to read. Parse failures and other I/O errors are
    /// returned as errors.
    pub fn load_configuration(&mut self, path: Option<&Path>) -> Result<bool, TreefigError> {
        let file_name = self.file_name()?.to_string();
        let working_dir = self.working_dir()?;

        let location = match path {
            Some(p) => p.to_path_buf(),
            None => match file::find_in_ancestors(&working_dir, &file_name) {
                Some(found) => found,
                None => return Ok(false),
            },
        };
        let target = file::resolve_target(&location, &working_dir, &file_name);

        let Some(content) = file::read_if_exists(&target)? else {
            debug!(path = %target.display(), "config file not found");
            return Ok(false);
        };

        let config = self.format.decode(&content, &target, self.strict)?;
        debug!(path = %target.display(), "configuration loaded");
        self.active = Some(config);
        Ok(true)
    }
}
