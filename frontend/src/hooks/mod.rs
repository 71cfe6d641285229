pub mod use_settings;
pub mod use_thumbnail_urls;
