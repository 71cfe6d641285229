//! Runtime configuration of the frontend.
//!
//! Defaults are baked in at compile time (`SHIP_API_BASE_URL`,
//! `SHIP_APP_SLUG`, `SHIP_LOG_LEVEL`); the app slug and the log level can be
//! overridden per page load with `?app=<slug>` and `?log=<level>`.

use web_sys::UrlSearchParams;

use crate::services::logging::LogLevel;

pub const DEFAULT_API_BASE_URL: &str = match option_env!("SHIP_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

pub const DEFAULT_APP_SLUG: &str = match option_env!("SHIP_APP_SLUG") {
    Some(slug) => slug,
    None => "app-slug-123",
};

pub const DEFAULT_MAXIMUM_NUMBER_OF_CERTIFICATES: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    pub api_base_url: String,
    pub app_slug: String,
    pub maximum_number_of_certificates: usize,
    pub log_level: LogLevel,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_slug: DEFAULT_APP_SLUG.to_string(),
            maximum_number_of_certificates: DEFAULT_MAXIMUM_NUMBER_OF_CERTIFICATES,
            log_level: option_env!("SHIP_LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Decoded values of the query parameters the frontend understands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOverrides {
    pub app: Option<String>,
    pub log: Option<String>,
}

impl QueryOverrides {
    /// Read `app` and `log` out of a `?key=value&...` search string
    pub fn from_search(search: &str) -> Self {
        match UrlSearchParams::new_with_str(search) {
            Ok(params) => Self {
                app: params.get("app"),
                log: params.get("log"),
            },
            Err(_) => Self::default(),
        }
    }
}

impl FrontendConfig {
    /// Defaults with the query string of the current page applied
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default();

        Self::default().with_overrides(QueryOverrides::from_search(&search))
    }

    /// Blank slugs and unknown levels are ignored
    pub fn with_overrides(mut self, overrides: QueryOverrides) -> Self {
        if let Some(slug) = overrides
            .app
            .map(|slug| slug.trim().to_string())
            .filter(|slug| !slug.is_empty())
        {
            self.app_slug = slug;
        }
        if let Some(level) = overrides.log.and_then(|level| level.parse().ok()) {
            self.log_level = level;
        }
        self
    }
}
