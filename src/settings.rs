//! The host-facing schema trait and the exclusion set applied on save.
//!
//! A host describes its configuration as a plain serde struct. Fields that must
//! never reach disk (session tokens, derived state, runtime handles) are named
//! once on the type through [`Settings::TRANSIENT_FIELDS`], and may be extended
//! at runtime with [`ConfigManager::mark_excluded`](crate::ConfigManager::mark_excluded).
//!
//! The exclusion set is kept outside the serialized record, so it can never
//! end up in the file itself.

use std::collections::BTreeSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A configuration record managed by [`ConfigManager`](crate::ConfigManager).
///
/// `Default` provides the fresh, all-unset instance installed when no config
/// file is found. Fields that are excluded from persistence should be
/// `Option<T>` or carry `#[serde(default)]`, since they will be missing from
/// the file on the next load. Removing a field is safe for existing files
/// unless the manager is built with `.strict(true)`, which rejects the
/// leftover key.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Default)]
/// struct AppConfig {
///     api_url: Option<String>,
///     session_token: Option<String>,
/// }
///
/// impl Settings for AppConfig {
///     const TRANSIENT_FIELDS: &'static [&'static str] = &["session_token"];
/// }
/// ```
pub trait Settings: Serialize + DeserializeOwned + Default {
    /// Serde field names that are never written to disk.
    const TRANSIENT_FIELDS: &'static [&'static str] = &[];
}

/// Set of top-level field names omitted from serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    names: BTreeSet<String>,
}

impl Exclusions {
    /// Seed the set from the type-level declaration of `C`.
    pub fn for_type<C: Settings>() -> Self {
        let mut exclusions = Self::default();
        exclusions.extend(C::TRANSIENT_FIELDS.iter().copied());
        exclusions
    }

    /// Union `names` into the set. Empty names are ignored, duplicates collapse.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !name.is_empty() {
                self.names.insert(name);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Filter a list of field names down to the ones that get persisted.
    pub fn retain_persisted<I, S>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty() && !self.contains(name))
            .collect()
    }
}
