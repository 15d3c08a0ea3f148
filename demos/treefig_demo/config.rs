//! Configuration struct for the treefig demo application.
//!
//! Persisted fields land in `.treefig-demo` as TOML. `last_seen_dir` is
//! recomputed on every run, so it is declared transient and never written.

use serde::{Deserialize, Serialize};
use treefig::Settings;

/// Root configuration for the demo application.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DemoConfig {
    /// Name shown in the greeting.
    pub name: Option<String>,

    /// How many times `greet` has run.
    #[serde(default)]
    pub runs: u64,

    /// Server settings (nested table).
    pub server: Option<ServerConfig>,

    /// Directory the demo was started from. Runtime only.
    pub last_seen_dir: Option<String>,
}

/// Lives under the `[server]` section of the file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Settings for DemoConfig {
    const TRANSIENT_FIELDS: &'static [&'static str] = &["last_seen_dir"];
}
