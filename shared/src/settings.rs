use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SettingsError;
use crate::files::{Certificate, KeystoreFile, ProvProfile, ServiceAccountJsonFile};

/// Build settings of an app as delivered by the settings service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Workflow triggered for iOS deployments
    pub ios_workflow: String,
    /// Workflow triggered for Android deployments
    pub android_workflow: String,
    /// Which platform section of the settings applies to the app
    pub project_type: ProjectType,
    pub ios_settings: Option<IosSettings>,
    pub android_settings: Option<AndroidSettings>,
    /// Uploaded provisioning profiles available for selection
    pub prov_profiles: Option<Vec<ProvProfile>>,
    /// Uploaded code signing certificates available for selection
    pub certificates: Option<Vec<Certificate>>,
    pub keystore_files: Option<Vec<KeystoreFile>>,
    pub service_account_json_files: Option<Vec<ServiceAccountJsonFile>>,
}

/// iOS specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IosSettings {
    pub apple_developer_account_email: String,
    pub app_sku: String,
    pub app_specific_password: String,
    /// Slugs of the selected provisioning profiles, in selection order
    pub selected_app_store_provisioning_profiles: Vec<String>,
    /// Slug of the selected certificate
    pub selected_code_signing_identity: String,
    pub include_bit_code: bool,
}

/// Android specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AndroidSettings {
    /// Play Store release track
    pub track: String,
    /// Slug of the selected keystore file
    pub selected_keystore_file: String,
    /// Slug of the selected service account JSON file
    pub selected_service_account: String,
}

/// Project type discriminator, `"ios" | "android"` or anything else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    Ios,
    Android,
    #[default]
    Other,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Ios => "ios",
            ProjectType::Android => "android",
            ProjectType::Other => "other",
        }
    }
}

impl From<String> for ProjectType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ios" => ProjectType::Ios,
            "android" => ProjectType::Android,
            _ => ProjectType::Other,
        }
    }
}

impl From<ProjectType> for String {
    fn from(value: ProjectType) -> Self {
        value.as_str().to_string()
    }
}

/// Target platform of a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    /// Name of the workflow input for this platform
    pub fn workflow_field_name(&self) -> &'static str {
        match self {
            Platform::Ios => "iosWorkflow",
            Platform::Android => "androidWorkflow",
        }
    }
}

/// Platform section of the settings a field lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSection {
    IosSettings,
    AndroidSettings,
}

impl SettingsSection {
    pub fn name(&self) -> &'static str {
        match self {
            SettingsSection::IosSettings => "iosSettings",
            SettingsSection::AndroidSettings => "androidSettings",
        }
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsSection {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iosSettings" => Ok(SettingsSection::IosSettings),
            "androidSettings" => Ok(SettingsSection::AndroidSettings),
            other => Err(SettingsError::UnknownSection(other.to_string())),
        }
    }
}

/// Scalar settings fields that can be edited directly from the form.
///
/// The provisioning profile selection is a set and is edited through
/// toggling instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    AppleDeveloperAccountEmail,
    AppSku,
    AppSpecificPassword,
    SelectedCodeSigningIdentity,
    IncludeBitCode,
    Track,
    SelectedKeystoreFile,
    SelectedServiceAccount,
}

impl SettingsField {
    pub const ALL: [SettingsField; 8] = [
        SettingsField::AppleDeveloperAccountEmail,
        SettingsField::AppSku,
        SettingsField::AppSpecificPassword,
        SettingsField::SelectedCodeSigningIdentity,
        SettingsField::IncludeBitCode,
        SettingsField::Track,
        SettingsField::SelectedKeystoreFile,
        SettingsField::SelectedServiceAccount,
    ];

    /// Wire and form input name of the field
    pub fn name(&self) -> &'static str {
        match self {
            SettingsField::AppleDeveloperAccountEmail => "appleDeveloperAccountEmail",
            SettingsField::AppSku => "appSku",
            SettingsField::AppSpecificPassword => "appSpecificPassword",
            SettingsField::SelectedCodeSigningIdentity => "selectedCodeSigningIdentity",
            SettingsField::IncludeBitCode => "includeBitCode",
            SettingsField::Track => "track",
            SettingsField::SelectedKeystoreFile => "selectedKeystoreFile",
            SettingsField::SelectedServiceAccount => "selectedServiceAccount",
        }
    }

    pub fn section(&self) -> SettingsSection {
        match self {
            SettingsField::AppleDeveloperAccountEmail
            | SettingsField::AppSku
            | SettingsField::AppSpecificPassword
            | SettingsField::SelectedCodeSigningIdentity
            | SettingsField::IncludeBitCode => SettingsSection::IosSettings,
            SettingsField::Track
            | SettingsField::SelectedKeystoreFile
            | SettingsField::SelectedServiceAccount => SettingsSection::AndroidSettings,
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| SettingsError::UnknownField(s.to_string()))
    }
}

/// New value for a settings field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl FieldValue {
    fn into_text(self, field: SettingsField) -> Result<String, SettingsError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Flag(_) => Err(SettingsError::ValueTypeMismatch {
                field,
                expected: "text",
            }),
        }
    }

    fn into_flag(self, field: SettingsField) -> Result<bool, SettingsError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            FieldValue::Text(_) => Err(SettingsError::ValueTypeMismatch {
                field,
                expected: "boolean",
            }),
        }
    }
}

impl IosSettings {
    /// Assign a scalar field. Fails without touching `self` when the field
    /// is not an iOS field or the value has the wrong type.
    pub fn set_field(&mut self, field: SettingsField, value: FieldValue) -> Result<(), SettingsError> {
        match field {
            SettingsField::AppleDeveloperAccountEmail => {
                self.apple_developer_account_email = value.into_text(field)?
            }
            SettingsField::AppSku => self.app_sku = value.into_text(field)?,
            SettingsField::AppSpecificPassword => self.app_specific_password = value.into_text(field)?,
            SettingsField::SelectedCodeSigningIdentity => {
                self.selected_code_signing_identity = value.into_text(field)?
            }
            SettingsField::IncludeBitCode => self.include_bit_code = value.into_flag(field)?,
            other => {
                return Err(SettingsError::FieldNotInSection {
                    section: SettingsSection::IosSettings,
                    field: other,
                })
            }
        }
        Ok(())
    }

    pub fn is_prov_profile_selected(&self, slug: &str) -> bool {
        self.selected_app_store_provisioning_profiles
            .iter()
            .any(|selected| selected == slug)
    }

    /// Append `slug` to the selected profiles unless it is already there
    pub fn select_prov_profile(&mut self, slug: &str) {
        if !self.is_prov_profile_selected(slug) {
            self.selected_app_store_provisioning_profiles.push(slug.to_string());
        }
    }

    /// Remove `slug` from the selected profiles if present, append it otherwise.
    /// Remaining entries keep their order.
    pub fn toggle_prov_profile(&mut self, slug: &str) {
        let profiles = &mut self.selected_app_store_provisioning_profiles;
        match profiles.iter().position(|selected| selected == slug) {
            Some(index) => {
                profiles.remove(index);
            }
            None => profiles.push(slug.to_string()),
        }
    }
}

impl AndroidSettings {
    /// Assign a scalar field. Fails without touching `self` when the field
    /// is not an Android field or the value has the wrong type.
    pub fn set_field(&mut self, field: SettingsField, value: FieldValue) -> Result<(), SettingsError> {
        match field {
            SettingsField::Track => self.track = value.into_text(field)?,
            SettingsField::SelectedKeystoreFile => self.selected_keystore_file = value.into_text(field)?,
            SettingsField::SelectedServiceAccount => {
                self.selected_service_account = value.into_text(field)?
            }
            other => {
                return Err(SettingsError::FieldNotInSection {
                    section: SettingsSection::AndroidSettings,
                    field: other,
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_wire_names() {
        let parsed: Vec<ProjectType> = serde_json::from_str(r#"["ios", "android", "other", "xamarin"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![ProjectType::Ios, ProjectType::Android, ProjectType::Other, ProjectType::Other]
        );
        assert_eq!(serde_json::to_string(&ProjectType::Android).unwrap(), r#""android""#);
    }

    #[test]
    fn test_settings_use_camel_case_and_tolerate_missing_sections() {
        let json = r#"{
            "iosWorkflow": "deploy",
            "androidWorkflow": "",
            "projectType": "ios",
            "iosSettings": {
                "appSku": "sku",
                "selectedAppStoreProvisioningProfiles": ["a", "b"],
                "includeBitCode": true
            }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.ios_workflow, "deploy");
        assert_eq!(settings.project_type, ProjectType::Ios);
        let ios = settings.ios_settings.unwrap();
        assert_eq!(ios.app_sku, "sku");
        assert_eq!(ios.selected_app_store_provisioning_profiles, vec!["a", "b"]);
        assert!(ios.include_bit_code);
        assert_eq!(ios.apple_developer_account_email, "");
        assert!(settings.android_settings.is_none());
        assert!(settings.prov_profiles.is_none());
    }

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for field in SettingsField::ALL {
            assert_eq!(field.name().parse::<SettingsField>().unwrap(), field);
        }
        assert_eq!(
            "bogus".parse::<SettingsField>(),
            Err(SettingsError::UnknownField("bogus".to_string()))
        );
        assert_eq!("androidSettings".parse::<SettingsSection>().unwrap(), SettingsSection::AndroidSettings);
        assert!("playSettings".parse::<SettingsSection>().is_err());
    }

    #[test]
    fn test_field_sections() {
        assert_eq!(SettingsField::AppSku.section(), SettingsSection::IosSettings);
        assert_eq!(SettingsField::IncludeBitCode.section(), SettingsSection::IosSettings);
        assert_eq!(SettingsField::Track.section(), SettingsSection::AndroidSettings);
        assert_eq!(SettingsField::SelectedServiceAccount.section(), SettingsSection::AndroidSettings);
    }

    #[test]
    fn test_ios_set_field_rejects_wrong_section_and_type() {
        let mut ios = IosSettings::default();

        ios.set_field(SettingsField::AppSku, "sku-1".into()).unwrap();
        ios.set_field(SettingsField::IncludeBitCode, true.into()).unwrap();
        assert_eq!(ios.app_sku, "sku-1");
        assert!(ios.include_bit_code);

        let before = ios.clone();
        assert!(matches!(
            ios.set_field(SettingsField::Track, "beta".into()),
            Err(SettingsError::FieldNotInSection { .. })
        ));
        assert!(matches!(
            ios.set_field(SettingsField::IncludeBitCode, "yes".into()),
            Err(SettingsError::ValueTypeMismatch { expected: "boolean", .. })
        ));
        assert_eq!(ios, before);
    }

    #[test]
    fn test_android_set_field() {
        let mut android = AndroidSettings::default();
        android.set_field(SettingsField::Track, "beta".into()).unwrap();
        assert_eq!(android.track, "beta");
        assert!(android.set_field(SettingsField::AppSku, "x".into()).is_err());
        assert!(android.set_field(SettingsField::Track, false.into()).is_err());
    }

    #[test]
    fn test_toggle_prov_profile_keeps_order() {
        let mut ios = IosSettings {
            selected_app_store_provisioning_profiles: vec!["a".into(), "b".into(), "c".into()],
            ..IosSettings::default()
        };

        ios.toggle_prov_profile("b");
        assert_eq!(ios.selected_app_store_provisioning_profiles, vec!["a", "c"]);

        ios.toggle_prov_profile("d");
        assert_eq!(ios.selected_app_store_provisioning_profiles, vec!["a", "c", "d"]);
        assert!(ios.is_prov_profile_selected("d"));
        assert!(!ios.is_prov_profile_selected("b"));
    }

    #[test]
    fn test_select_prov_profile_is_idempotent() {
        let mut ios = IosSettings {
            selected_app_store_provisioning_profiles: vec!["a".into(), "b".into()],
            ..IosSettings::default()
        };

        ios.select_prov_profile("a");
        assert_eq!(ios.selected_app_store_provisioning_profiles, vec!["a", "b"]);

        ios.select_prov_profile("c");
        ios.select_prov_profile("c");
        assert_eq!(ios.selected_app_store_provisioning_profiles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_error_messages() {
        let err = SettingsError::FieldNotInSection {
            section: SettingsSection::AndroidSettings,
            field: SettingsField::AppSku,
        };
        assert_eq!(err.to_string(), "field `appSku` does not belong to section `androidSettings`");
    }
}
