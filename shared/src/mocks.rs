//! Fixtures used by the tests of this workspace.

use chrono::{DateTime, TimeZone, Utc};

use crate::app_version::AppVersion;
use crate::files::{Certificate, KeystoreFile, ProvProfile, ServiceAccountJsonFile};
use crate::settings::{AndroidSettings, IosSettings, ProjectType, Settings};

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .unwrap_or_default()
}

fn app_version(id: u64, build_number: u32, version: &str, certificate_expires: DateTime<Utc>) -> AppVersion {
    AppVersion {
        id,
        app_slug: format!("app-slug-{}", id),
        version: version.to_string(),
        platform: "ios".to_string(),
        build_number,
        build_slug: "13245ads".to_string(),
        last_update: utc(2018, 9, 22, 12, 42, 31),
        description: "Some semi-long description".to_string(),
        whats_new: "Some longer whats-new".to_string(),
        minimum_os: "10.2".to_string(),
        minimum_sdk: "dunno".to_string(),
        package_name: "com.package.name".to_string(),
        certificate_expires,
        bundle_id: "bundle-id".to_string(),
        size: 4_567_034,
        supported_device_types: vec!["iphone".to_string(), "ipad".to_string()],
        distribution_type: "development".to_string(),
        icon_url: "http://placekitten.com/160/160".to_string(),
        app_name: "Standup Timer".to_string(),
        promotional_text: "Promotional Text".to_string(),
        keywords: "Keywords".to_string(),
        review_notes: "Review Notes".to_string(),
        support_url: "https://bitrise.io/support".to_string(),
        marketing_url: "https://bitrise.io/marketing".to_string(),
        scheme: "piramid".to_string(),
        configuration: "canary".to_string(),
        public_install_page_url: Some("https://bitrise.io/app/8b334705d8e78276".to_string()),
    }
}

pub fn mock_app_version() -> AppVersion {
    app_version(123, 32, "1.0.3", utc(2018, 9, 22, 12, 42, 31))
}

pub fn mock_app_version_without_public_page() -> AppVersion {
    AppVersion {
        public_install_page_url: None,
        ..mock_app_version()
    }
}

/// Settings of an iOS project with two profiles selected and both platform
/// sections present
pub fn mock_settings() -> Settings {
    Settings {
        ios_workflow: "ios-deploy".to_string(),
        android_workflow: "android-deploy".to_string(),
        project_type: ProjectType::Ios,
        ios_settings: Some(IosSettings {
            apple_developer_account_email: "developer@example.com".to_string(),
            app_sku: "2018061707296".to_string(),
            app_specific_password: "iosapp-specific-password".to_string(),
            selected_app_store_provisioning_profiles: vec![
                "prov-profile-slug-1".to_string(),
                "prov-profile-slug-3".to_string(),
            ],
            selected_code_signing_identity: "certificate-slug-1".to_string(),
            include_bit_code: false,
        }),
        android_settings: Some(AndroidSettings {
            track: "alpha".to_string(),
            selected_keystore_file: "keystore-slug-1".to_string(),
            selected_service_account: "service-account-slug-1".to_string(),
        }),
        prov_profiles: Some(
            (1..=4)
                .map(|n| ProvProfile {
                    name: format!("Profile {}.mobileprovision", n),
                    slug: format!("prov-profile-slug-{}", n),
                })
                .collect(),
        ),
        certificates: Some(
            (1..=2)
                .map(|n| Certificate {
                    name: format!("Distribution certificate {}.p12", n),
                    slug: format!("certificate-slug-{}", n),
                })
                .collect(),
        ),
        keystore_files: Some(
            (1..=2)
                .map(|n| KeystoreFile {
                    name: format!("release-{}.keystore", n),
                    slug: format!("keystore-slug-{}", n),
                })
                .collect(),
        ),
        service_account_json_files: Some(
            (1..=2)
                .map(|n| ServiceAccountJsonFile {
                    name: format!("service-account-{}.json", n),
                    slug: format!("service-account-slug-{}", n),
                })
                .collect(),
        ),
    }
}
