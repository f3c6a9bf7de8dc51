// Configuration type definitions

use serde::Deserialize;

use crate::cache::{CacheMode, DEFAULT_CACHE_LENGTH};
use crate::controller::DEFAULT_MAX_VISIBLE_ITEMS;
use crate::lookup::DEFAULT_REQUEST_DELAY_MS;
use crate::source::MatchMode;

/// Widget behavior section
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub min_chars: usize,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Rows visible at once; 0 means the list never scrolls.
    #[serde(default = "default_max_visible_items")]
    pub max_visible_items: usize,
    #[serde(default = "default_select_on_tab")]
    pub select_on_tab: bool,
    #[serde(default = "default_cache_length")]
    pub cache_length: usize,
    #[serde(default)]
    pub cache_mode: CacheMode,
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_max_visible_items() -> usize {
    DEFAULT_MAX_VISIBLE_ITEMS
}

fn default_select_on_tab() -> bool {
    true
}

fn default_cache_length() -> usize {
    DEFAULT_CACHE_LENGTH
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            min_chars: 0,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            select_on_tab: true,
            cache_length: DEFAULT_CACHE_LENGTH,
            cache_mode: CacheMode::Shared,
        }
    }
}

impl WidgetConfig {
    /// Visible-row cap in the form the widget options take.
    pub fn visible_limit(&self) -> Option<usize> {
        if self.max_visible_items == 0 {
            None
        } else {
            Some(self.max_visible_items)
        }
    }
}

/// Dataset mapping section
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Dotted path to the display text inside each record.
    #[serde(default = "default_field")]
    pub field: String,
    /// Dotted path to the machine value; defaults to the display text.
    #[serde(default)]
    pub value_field: Option<String>,
    #[serde(rename = "match", default)]
    pub match_mode: MatchMode,
}

fn default_field() -> String {
    "text".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            field: "text".to_string(),
            value_field: None,
            match_mode: MatchMode::Contains,
        }
    }
}

/// Remote endpoint section
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: Option<String>,
    /// Query parameter the typed text is sent under.
    #[serde(default = "default_query_var")]
    pub query_var: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_query_var() -> String {
    "q".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: None,
            query_var: "q".to_string(),
            limit: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Feature: config-system, Property 1: Valid match mode parsing
    // For any valid match value ("contains", "prefix", or "fuzzy") in a TOML
    // config file, parsing should extract that mode without errors.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_match_mode_parsing(mode in prop::sample::select(vec!["contains", "prefix", "fuzzy"])) {
            let toml_content = format!(r#"
[source]
match = "{}"
"#, mode);

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse valid match mode: {}", mode);

            let config = config.unwrap();
            let expected = match mode {
                "contains" => MatchMode::Contains,
                "prefix" => MatchMode::Prefix,
                "fuzzy" => MatchMode::Fuzzy,
                _ => unreachable!(),
            };
            prop_assert_eq!(config.source.match_mode, expected);
        }
    }

    // Feature: config-system, Property 2: Missing fields use defaults
    // For any TOML config file with missing optional fields, parsing should
    // complete and fill every missing field with its default.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            include_widget_section in prop::bool::ANY,
            include_delay_field in prop::bool::ANY
        ) {
            let toml_content = if !include_widget_section {
                String::new()
            } else if !include_delay_field {
                "[widget]\n".to_string()
            } else {
                r#"
[widget]
request_delay_ms = 300
"#.to_string()
            };

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse config with missing fields");

            let config = config.unwrap();
            if !include_widget_section || !include_delay_field {
                prop_assert_eq!(config.widget.request_delay_ms, 150);
            } else {
                prop_assert_eq!(config.widget.request_delay_ms, 300);
            }
        }
    }

    #[test]
    fn test_widget_config_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.min_chars, 0);
        assert_eq!(config.request_delay_ms, 150);
        assert_eq!(config.max_visible_items, 10);
        assert!(config.select_on_tab);
        assert_eq!(config.cache_length, 20);
        assert_eq!(config.cache_mode, CacheMode::Shared);
    }

    #[test]
    fn test_source_config_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config.field, "text");
        assert_eq!(config.value_field, None);
        assert_eq!(config.match_mode, MatchMode::Contains);
    }

    #[test]
    fn test_remote_config_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.url, None);
        assert_eq!(config.query_var, "q");
        assert_eq!(config.limit, None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[widget]
min_chars = 2
request_delay_ms = 250
max_visible_items = 5
select_on_tab = false
cache_length = 40
cache_mode = "private"

[source]
field = "name"
value_field = "id"
match = "prefix"

[remote]
url = "https://example.test/search"
query_var = "term"
limit = 25
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.widget.min_chars, 2);
        assert_eq!(config.widget.request_delay_ms, 250);
        assert_eq!(config.widget.max_visible_items, 5);
        assert!(!config.widget.select_on_tab);
        assert_eq!(config.widget.cache_length, 40);
        assert_eq!(config.widget.cache_mode, CacheMode::Private);
        assert_eq!(config.source.field, "name");
        assert_eq!(config.source.value_field.as_deref(), Some("id"));
        assert_eq!(config.source.match_mode, MatchMode::Prefix);
        assert_eq!(
            config.remote.url.as_deref(),
            Some("https://example.test/search")
        );
        assert_eq!(config.remote.query_var, "term");
        assert_eq!(config.remote.limit, Some(25));
    }

    #[test]
    fn test_visible_limit_zero_means_unlimited() {
        let toml = r#"
[widget]
max_visible_items = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.widget.visible_limit(), None);
        assert_eq!(WidgetConfig::default().visible_limit(), Some(10));
    }

    #[test]
    fn test_invalid_match_mode_fails_to_parse() {
        let toml = r#"
[source]
match = "regex"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.widget.request_delay_ms, 150);
        assert_eq!(config.source.field, "text");
        assert_eq!(config.remote.query_var, "q");
    }
}
