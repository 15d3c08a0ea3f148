//! Encoding and decoding of the persisted document.
//!
//! Both formats go through an intermediate map (`toml::Table` or a JSON
//! object) so that excluded fields can be dropped by name before the text is
//! produced. A host type whose top level does not serialize to a map is
//! rejected with [`FormatError::NotATable`].

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FormatError, TreefigError};
use crate::settings::Exclusions;
use crate::validate;

/// On-disk representation of the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// TOML document (default).
    #[default]
    Toml,
    /// Pretty-printed JSON object.
    Json,
}

impl Format {
    /// Top-level field names `config` serializes to, before exclusions.
    ///
    /// TOML has no null, so `None` fields are not emitted and not listed here.
    pub fn field_names<C: Serialize>(self, config: &C) -> Result<Vec<String>, FormatError> {
        let names = match self {
            Format::Toml => to_toml_table(config)?.keys().cloned().collect(),
            Format::Json => to_json_object(config)?.keys().cloned().collect(),
        };
        Ok(names)
    }

    /// Serialize `config`, omitting every field named in `exclusions`.
    pub fn encode<C: Serialize>(
        self,
        config: &C,
        exclusions: &Exclusions,
    ) -> Result<String, FormatError> {
        match self {
            Format::Toml => {
                let mut table = to_toml_table(config)?;
                for name in exclusions.iter() {
                    table.remove(name);
                }
                Ok(toml::to_string(&table)?)
            }
            Format::Json => {
                let mut object = to_json_object(config)?;
                for name in exclusions.iter() {
                    object.remove(name);
                }
                let mut text = serde_json::to_string_pretty(&object)?;
                text.push('\n');
                Ok(text)
            }
        }
    }

    /// Deserialize `content` read from `path`.
    ///
    /// In strict mode, keys the target type does not consume are collected and
    /// reported as [`TreefigError::UnknownKeys`].
    pub fn decode<C: DeserializeOwned>(
        self,
        content: &str,
        path: &Path,
        strict: bool,
    ) -> Result<C, TreefigError> {
        let parse_error = |source: FormatError| TreefigError::ParseError {
            path: path.to_path_buf(),
            source,
        };

        if !strict {
            return match self {
                Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.into())),
                Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.into())),
            };
        }

        let mut unknown_keys: Vec<Vec<String>> = Vec::new();
        let config: C = match self {
            Format::Toml => {
                let deserializer = toml::Deserializer::new(content);
                serde_ignored::deserialize(deserializer, |ignored| {
                    unknown_keys.push(validate::key_segments(&ignored));
                })
                .map_err(|e| parse_error(e.into()))?
            }
            Format::Json => {
                let mut deserializer = serde_json::Deserializer::from_str(content);
                let config = serde_ignored::deserialize(&mut deserializer, |ignored| {
                    unknown_keys.push(validate::key_segments(&ignored));
                })
                .map_err(|e| parse_error(e.into()))?;
                deserializer.end().map_err(|e| parse_error(e.into()))?;
                config
            }
        };

        validate::reject_unknown_keys(unknown_keys, content, path, self)?;
        Ok(config)
    }
}

fn to_toml_table<C: Serialize>(config: &C) -> Result<toml::Table, FormatError> {
    match toml::Value::try_from(config)? {
        toml::Value::Table(table) => Ok(table),
        other => Err(FormatError::NotATable(other.type_str())),
    }
}

fn to_json_object<C: Serialize>(
    config: &C,
) -> Result<serde_json::Map<String, serde_json::Value>, FormatError> {
    match serde_json::to_value(config)? {
        serde_json::Value::Object(object) => Ok(object),
        other => Err(FormatError::NotATable(json_type_name(&other))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{ListConfig, TestConfig, TestDbConfig};
    use crate::settings::Settings;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("/test/.testmod")
    }

    fn transient() -> Exclusions {
        Exclusions::for_type::<TestConfig>()
    }

    fn full_config() -> TestConfig {
        TestConfig {
            session_token: Some("secret".into()),
            retries: 3,
            database: Some(TestDbConfig {
                url: Some("pg://localhost".into()),
                pool_size: 10,
            }),
            ..TestConfig::hello()
        }
    }

    #[test]
    fn toml_encode_drops_excluded_fields() {
        let text = Format::Toml.encode(&full_config(), &transient()).unwrap();
        assert!(text.contains("value_a = \"Hello A\""));
        assert!(text.contains("retries = 3"));
        assert!(text.contains("[database]"));
        assert!(!text.contains("session_token"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn toml_encode_skips_none_fields() {
        let config = TestConfig {
            value_a: Some("only a".into()),
            ..Default::default()
        };
        let text = Format::Toml.encode(&config, &transient()).unwrap();
        assert!(text.contains("value_a"));
        assert!(!text.contains("value_b"));
    }

    #[test]
    fn json_encode_drops_excluded_fields() {
        let text = Format::Json.encode(&full_config(), &transient()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["value_b"], "Hello B");
        assert_eq!(value["database"]["pool_size"], 10);
        assert!(value.get("session_token").is_none());
    }

    #[test]
    fn encode_rejects_non_table_top_level() {
        let config = ListConfig(vec![1, 2, 3]);
        let exclusions = Exclusions::for_type::<ListConfig>();
        let toml_err = Format::Toml.encode(&config, &exclusions).unwrap_err();
        assert!(matches!(toml_err, FormatError::NotATable("array")));
        let json_err = Format::Json.encode(&config, &exclusions).unwrap_err();
        assert!(matches!(json_err, FormatError::NotATable("array")));
    }

    #[test]
    fn field_names_lists_set_fields() {
        let names = Format::Toml.field_names(&TestConfig::hello()).unwrap();
        assert!(names.contains(&"value_a".to_string()));
        assert!(names.contains(&"retries".to_string()));
        assert!(!names.contains(&"database".to_string()));
    }

    #[test]
    fn json_field_names_include_nulls() {
        let names = Format::Json.field_names(&TestConfig::default()).unwrap();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn decode_toml_strict() {
        let content = "value_a = \"x\"\nretries = 2\n\n[database]\npool_size = 4\n";
        let config: TestConfig = Format::Toml.decode(content, &path(), true).unwrap();
        assert_eq!(config.value_a.as_deref(), Some("x"));
        assert_eq!(config.retries, 2);
        assert_eq!(config.database.unwrap().pool_size, 4);
    }

    #[test]
    fn decode_empty_toml_yields_defaults() {
        let config: TestConfig = Format::Toml.decode("", &path(), true).unwrap();
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn decode_malformed_toml_is_parse_error() {
        let result: Result<TestConfig, _> = Format::Toml.decode("value_a = ", &path(), true);
        match result {
            Err(TreefigError::ParseError { path: p, .. }) => assert_eq!(p, path()),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn decode_wrong_type_is_parse_error() {
        let result: Result<TestConfig, _> =
            Format::Toml.decode("retries = \"many\"\n", &path(), false);
        assert!(matches!(result, Err(TreefigError::ParseError { .. })));
    }

    #[test]
    fn decode_strict_rejects_unknown_key() {
        let result: Result<TestConfig, _> =
            Format::Toml.decode("value_a = \"x\"\ntypo = 1\n", &path(), true);
        assert!(matches!(result, Err(TreefigError::UnknownKeys(_))));
    }

    #[test]
    fn decode_lenient_allows_unknown_key() {
        let config: TestConfig = Format::Toml
            .decode("value_a = \"x\"\ntypo = 1\n", &path(), false)
            .unwrap();
        assert_eq!(config.value_a.as_deref(), Some("x"));
    }

    #[test]
    fn decode_json_strict_rejects_unknown_key() {
        let content = "{\n  \"value_a\": \"x\",\n  \"typo\": 1\n}\n";
        let result: Result<TestConfig, _> = Format::Json.decode(content, &path(), true);
        assert!(matches!(result, Err(TreefigError::UnknownKeys(_))));
    }

    #[test]
    fn decode_json_trailing_garbage_is_parse_error() {
        let result: Result<TestConfig, _> =
            Format::Json.decode("{\"value_a\": \"x\"} extra", &path(), true);
        assert!(matches!(result, Err(TreefigError::ParseError { .. })));
    }

    #[test]
    fn json_round_trip_through_encode_decode() {
        let text = Format::Json.encode(&full_config(), &transient()).unwrap();
        let back: TestConfig = Format::Json.decode(&text, &path(), true).unwrap();
        assert_eq!(back.database, full_config().database);
        assert_eq!(back.session_token, None);
        assert!(TestConfig::TRANSIENT_FIELDS.contains(&"session_token"));
    }
}
