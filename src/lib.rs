//! Find, load, and save a single configuration file by walking up the
//! directory tree. Define a struct, name your dotfile, and go.
//!
//! ```ignore
//! let mut manager = Treefig::builder::<AppConfig>()
//!     .file_name(".myapp")
//!     .build();
//!
//! manager.configure_with(|config| {
//!     config.api_url.get_or_insert_with(|| "https://example.com".into());
//! })?;
//!
//! manager.save_configuration(None)?;
//! ```
//!
//! `configure_with` looks for `.myapp` in the current directory, then its
//! parent, and so on up to the filesystem root. The nearest file wins. If none
//! exists you get `AppConfig::default()`. Either way, the callback gets a
//! chance to fill in values before you use them.
//!
//! # Design: struct as schema
//!
//! Your config type is a plain serde struct implementing [`Settings`]. There
//! is no key registry and no reflection:
//!
//! - **Field names** are the keys in the file (serde renames apply).
//! - **`Default`** is the fresh configuration used when no file is found.
//! - **[`Settings::TRANSIENT_FIELDS`]** names fields that are never written
//!   (session tokens, caches, anything derived at runtime). Add more at build
//!   time with [`exclude()`](TreefigBuilder::exclude) or later with
//!   [`mark_excluded()`](ConfigManager::mark_excluded).
//!
//! Excluded fields are simply absent from the file, so on the next load they
//! come back as whatever serde fills in for a missing field. Make them
//! `Option<T>` or give them `#[serde(default)]`.
//!
//! # One manager, one active configuration
//!
//! A [`ConfigManager`] is an ordinary value owned by the host. It holds at
//! most one active configuration:
//!
//! ```text
//! Unconfigured ──configure / load(found)──▶ Active
//! Active ──load(found)──▶ Active      (replaced wholesale, no merge)
//! Active ──save──▶ Active             (writes only)
//! any ──load(not found)──▶ unchanged  (returns false)
//! Active ──reset──▶ Unconfigured
//! ```
//!
//! [`configure()`](ConfigManager::configure) touches the disk only on the
//! first call. Later calls just run the setup callback again.
//!
//! # Where files are read and written
//!
//! Both [`load_configuration()`](ConfigManager::load_configuration) and
//! [`save_configuration()`](ConfigManager::save_configuration) accept an
//! optional path. Resolution order:
//!
//! 1. The explicit path, if given.
//! 2. The nearest file found by walking up from the working directory.
//! 3. The working directory itself (save only; load returns `false`).
//!
//! A path whose last component is not the file name is treated as a
//! directory and the file name is appended. Relative paths are anchored at
//! the working directory, which defaults to the process current directory
//! and can be pinned with [`working_dir()`](TreefigBuilder::working_dir).
//!
//! Saving overwrites the target file and does not create missing parent
//! directories.
//!
//! # Formats and strict mode
//!
//! Files are TOML by default; [`Format::Json`] is available for hosts that
//! prefer it. Keys your struct does not know are ignored by default, so
//! dropping a field never breaks existing files. Turn on
//! [`.strict(true)`](TreefigBuilder::strict) to fail instead, with the key
//! name, file path, and line number.
//!
//! # Diagnostics
//!
//! treefig emits [`tracing`](https://docs.rs/tracing) events: `debug` when a
//! configuration is loaded or saved (with the path), `trace` for each
//! directory probed during the upward search. Install whatever subscriber
//! your application already uses to see them.
//!
//! # Error handling
//!
//! All fallible operations return [`TreefigError`]. A missing file is never
//! an error: loads report it as `Ok(false)`. Malformed content, I/O failures,
//! and a missing file name are always surfaced; unknown keys are surfaced in
//! strict mode.

pub mod error;

mod builder;
mod file;
mod format;
mod manager;
mod settings;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Treefig, TreefigBuilder};
pub use error::{FormatError, TreefigError};
pub use format::Format;
pub use manager::ConfigManager;
pub use settings::{Exclusions, Settings};
