use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreefigError {
    #[error("Config file name not configured; call .file_name() on the builder")]
    FileNameNotConfigured,

    #[error("Invalid config file name '{0}': expected a bare file name, not a path")]
    InvalidFileName(String),

    #[error("No active configuration; call configure() or load_configuration() first")]
    NoActiveConfiguration,

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    UnknownKeys(Vec<TreefigError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: FormatError,
    },

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[source] FormatError),

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Low-level encode/decode failure from one of the supported formats.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("top-level value must be a table, got {0}")]
    NotATable(&'static str),
}
