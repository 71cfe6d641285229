use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A built version of an app, as listed by the distribution service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    pub id: u64,
    pub app_slug: String,
    pub version: String,
    /// `"ios"` or `"android"`
    pub platform: String,
    pub build_number: u32,
    pub build_slug: String,
    pub last_update: DateTime<Utc>,
    pub description: String,
    pub whats_new: String,
    pub minimum_os: String,
    pub minimum_sdk: String,
    pub package_name: String,
    pub certificate_expires: DateTime<Utc>,
    pub bundle_id: String,
    /// Artifact size in bytes
    pub size: u64,
    pub supported_device_types: Vec<String>,
    pub distribution_type: String,
    pub icon_url: String,
    pub app_name: String,
    pub promotional_text: String,
    pub keywords: String,
    pub review_notes: String,
    pub support_url: String,
    pub marketing_url: String,
    pub scheme: String,
    pub configuration: String,
    #[serde(rename = "publicInstallPageURL", default, skip_serializing_if = "Option::is_none")]
    pub public_install_page_url: Option<String>,
}

impl AppVersion {
    /// Short heading such as "Standup Timer 1.0.3 (32)"
    pub fn display_title(&self) -> String {
        format!("{} {} ({})", self.app_name, self.version, self.build_number)
    }

    pub fn is_ios(&self) -> bool {
        self.platform == "ios"
    }
}
