#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::settings::Settings;

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct TestConfig {
        pub value_a: Option<String>,
        pub value_b: Option<String>,

        /// Runtime-only; never persisted.
        pub session_token: Option<String>,

        #[serde(default)]
        pub retries: u32,

        pub database: Option<TestDbConfig>,
    }

    impl Settings for TestConfig {
        const TRANSIENT_FIELDS: &'static [&'static str] = &["session_token"];
    }

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct TestDbConfig {
        pub url: Option<String>,

        #[serde(default)]
        pub pool_size: usize,
    }

    impl TestConfig {
        pub fn hello() -> Self {
            TestConfig {
                value_a: Some("Hello A".into()),
                value_b: Some("Hello B".into()),
                ..Default::default()
            }
        }
    }

    // -- No transient fields declared ------------------------------------------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct PlainConfig {
        pub host: Option<String>,

        #[serde(default)]
        pub port: u16,
    }

    impl Settings for PlainConfig {}

    // -- Serializes to an array, which no format accepts at the top level ------

    #[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
    pub struct ListConfig(pub Vec<u32>);

    impl Settings for ListConfig {}

    #[test]
    fn hello_fixture_sets_both_values() {
        let config = TestConfig::hello();
        assert_eq!(config.value_a.as_deref(), Some("Hello A"));
        assert_eq!(config.value_b.as_deref(), Some("Hello B"));
        assert_eq!(config.session_token, None);
    }
}
