//! Page-level configuration.
//!
//! Defaults are compiled in; a page can override them with
//! `data-enhance-*` attributes on `<body>`. Values that fail to parse or fall
//! outside their bounds are ignored in favor of the default.

use crate::logging::LogLevel;

const DEFAULT_THEME_STORAGE_KEY: &str = "theme";
const DEFAULT_HEADER_OFFSET_PX: u32 = 80;
const DEFAULT_BACK_TO_TOP_THRESHOLD_PX: u32 = 300;
const DEFAULT_NAVBAR_THRESHOLD_PX: u32 = 100;
const DEFAULT_PROJECTS_ENDPOINT: &str = "/api/projects/";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const HEADER_OFFSET_PX_BOUNDS: (u32, u32) = (0, 1_000);
const SCROLL_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 10_000);

/// Dataset keys, i.e. the camel-cased form of `data-enhance-*`.
pub const THEME_KEY_ATTR: &str = "enhanceThemeKey";
pub const HEADER_OFFSET_ATTR: &str = "enhanceHeaderOffset";
pub const BACK_TO_TOP_ATTR: &str = "enhanceBackToTopThreshold";
pub const NAVBAR_ATTR: &str = "enhanceNavbarThreshold";
pub const PROJECTS_ENDPOINT_ATTR: &str = "enhanceProjectsEndpoint";
pub const LOG_LEVEL_ATTR: &str = "enhanceLogLevel";

#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    pub theme_storage_key: String,
    pub header_offset_px: u32,
    pub back_to_top_threshold_px: u32,
    pub navbar_threshold_px: u32,
    pub projects_endpoint: String,
    pub log_level: LogLevel,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            back_to_top_threshold_px: DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            navbar_threshold_px: DEFAULT_NAVBAR_THRESHOLD_PX,
            projects_endpoint: DEFAULT_PROJECTS_ENDPOINT.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl UiConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let theme_storage_key = parse_non_empty_string(lookup(THEME_KEY_ATTR))
            .unwrap_or_else(|| DEFAULT_THEME_STORAGE_KEY.to_string());
        let header_offset_px = parse_u32_with_bounds(
            lookup(HEADER_OFFSET_ATTR),
            DEFAULT_HEADER_OFFSET_PX,
            HEADER_OFFSET_PX_BOUNDS,
        );
        let back_to_top_threshold_px = parse_u32_with_bounds(
            lookup(BACK_TO_TOP_ATTR),
            DEFAULT_BACK_TO_TOP_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let navbar_threshold_px = parse_u32_with_bounds(
            lookup(NAVBAR_ATTR),
            DEFAULT_NAVBAR_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let projects_endpoint = parse_non_empty_string(lookup(PROJECTS_ENDPOINT_ATTR))
            .unwrap_or_else(|| DEFAULT_PROJECTS_ENDPOINT.to_string());
        let log_level = parse_non_empty_string(lookup(LOG_LEVEL_ATTR))
            .and_then(|value| LogLevel::from_str(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            theme_storage_key,
            header_offset_px,
            back_to_top_threshold_px,
            navbar_threshold_px,
            projects_endpoint,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
