use std::marker::PhantomData;
use std::path::PathBuf;

use crate::format::Format;
use crate::manager::ConfigManager;
use crate::settings::{Exclusions, Settings};

/// Entry point for building a treefig configuration manager.
pub struct Treefig;

impl Treefig {
    pub fn builder<C: Settings>() -> TreefigBuilder<C> {
        TreefigBuilder::new()
    }
}

/// Builder for a [`ConfigManager`].
///
/// Nothing is validated or read from disk here. A missing or malformed file
/// name surfaces on the first operation that needs it.
pub struct TreefigBuilder<C: Settings> {
    file_name: Option<String>,
    excluded: Vec<String>,
    format: Format,
    strict: bool,
    working_dir: Option<PathBuf>,
    _phantom: PhantomData<C>,
}

impl<C: Settings> TreefigBuilder<C> {
    fn new() -> Self {
        Self {
            file_name: None,
            excluded: Vec::new(),
            format: Format::default(),
            strict: false,
            working_dir: None,
            _phantom: PhantomData,
        }
    }

    /// Set the config file name, e.g. `".myapp"`. Must be a bare name, not a path.
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Exclude additional fields from persistence, on top of
    /// [`Settings::TRANSIENT_FIELDS`].
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the on-disk format (default: [`Format::Toml`]).
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in a loaded file produce errors, so a
    /// field removed from the struct breaks every file that still has it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Start the upward search here instead of the process current directory.
    /// Relative explicit paths passed to load/save are anchored here too.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> ConfigManager<C> {
        let mut excluded = Exclusions::for_type::<C>();
        excluded.extend(self.excluded);
        ConfigManager::new(
            self.file_name,
            excluded,
            self.format,
            self.strict,
            self.working_dir,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreefigError;
    use crate::fixtures::test::{PlainConfig, TestConfig};
    use std::path::Path;

    #[test]
    fn defaults() {
        let manager = Treefig::builder::<TestConfig>().build();
        assert_eq!(manager.format(), Format::Toml);
        assert!(!manager.is_strict());
        assert!(manager.configuration().is_none());
        assert!(matches!(
            manager.file_name(),
            Err(TreefigError::FileNameNotConfigured)
        ));
    }

    #[test]
    fn file_name_is_stored() {
        let manager = Treefig::builder::<TestConfig>().file_name(".myapp").build();
        assert_eq!(manager.file_name().unwrap(), ".myapp");
    }

    #[test]
    fn transient_fields_seed_exclusions() {
        let manager = Treefig::builder::<TestConfig>().build();
        let excluded: Vec<&str> = manager.excluded_fields().collect();
        assert_eq!(excluded, vec!["session_token"]);
    }

    #[test]
    fn exclude_adds_to_transient_fields() {
        let manager = Treefig::builder::<TestConfig>()
            .exclude(["retries", "session_token"])
            .build();
        let excluded: Vec<&str> = manager.excluded_fields().collect();
        assert_eq!(excluded, vec!["retries", "session_token"]);
    }

    #[test]
    fn exclude_on_plain_config() {
        let manager = Treefig::builder::<PlainConfig>().exclude(["port"]).build();
        assert_eq!(manager.excluded_fields().count(), 1);
    }

    #[test]
    fn format_and_strict_can_be_set() {
        let manager = Treefig::builder::<TestConfig>()
            .format(Format::Json)
            .strict(true)
            .build();
        assert_eq!(manager.format(), Format::Json);
        assert!(manager.is_strict());
    }

    #[test]
    fn working_dir_override() {
        let manager = Treefig::builder::<TestConfig>()
            .working_dir("/srv/app")
            .build();
        assert_eq!(manager.working_dir().unwrap(), Path::new("/srv/app"));
    }
}
