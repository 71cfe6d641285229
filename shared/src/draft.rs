//! Working copy of the build settings being edited.
//!
//! A [`SettingsDraft`] is initialized from the settings delivered by the
//! settings service, mutated by form callbacks, and compared against the
//! saved copy after every mutation to keep `has_modifications` current.
//! Saving hands the merged settings back to the caller; the flag only clears
//! once the persisted settings are loaded again.

use crate::error::SettingsError;
use crate::files::SelectableFile;
use crate::settings::{
    AndroidSettings, FieldValue, IosSettings, Platform, ProjectType, Settings, SettingsField,
    SettingsSection,
};

/// The part of the settings tracked for modifications
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftValues {
    pub ios_settings: IosSettings,
    pub android_settings: AndroidSettings,
    pub ios_workflow: String,
    pub android_workflow: String,
}

impl DraftValues {
    /// Derive the editable values for the project type of `settings`.
    ///
    /// Only the section matching the project type is populated, the other
    /// one stays at its defaults. Projects of any other type get defaults
    /// for both. Workflow names are always taken over.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut values = DraftValues {
            ios_workflow: settings.ios_workflow.clone(),
            android_workflow: settings.android_workflow.clone(),
            ..DraftValues::default()
        };

        match settings.project_type {
            ProjectType::Ios => {
                values.ios_settings = settings.ios_settings.clone().unwrap_or_default();
            }
            ProjectType::Android => {
                values.android_settings = settings.android_settings.clone().unwrap_or_default();
            }
            ProjectType::Other => {}
        }

        values
    }
}

/// Whether `draft` differs from `saved` in any tracked field
pub fn has_modifications(saved: &DraftValues, draft: &DraftValues) -> bool {
    saved != draft
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDraft {
    source: Option<Settings>,
    saved: DraftValues,
    draft: DraftValues,
    has_modifications: bool,
}

impl SettingsDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut draft = Self::new();
        draft.load(settings);
        draft
    }

    /// Replace both the saved and the working copy with freshly delivered settings
    pub fn load(&mut self, settings: &Settings) {
        let values = DraftValues::from_settings(settings);
        self.saved = values.clone();
        self.draft = values;
        self.source = Some(settings.clone());
        self.refresh();
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Settings most recently delivered from outside
    pub fn source(&self) -> Option<&Settings> {
        self.source.as_ref()
    }

    pub fn values(&self) -> &DraftValues {
        &self.draft
    }

    pub fn ios_settings(&self) -> &IosSettings {
        &self.draft.ios_settings
    }

    pub fn android_settings(&self) -> &AndroidSettings {
        &self.draft.android_settings
    }

    pub fn ios_workflow(&self) -> &str {
        &self.draft.ios_workflow
    }

    pub fn android_workflow(&self) -> &str {
        &self.draft.android_workflow
    }

    pub fn has_modifications(&self) -> bool {
        self.has_modifications
    }

    /// The iOS section was populated from delivered data
    pub fn has_ios_settings(&self) -> bool {
        self.source.as_ref().is_some_and(|settings| {
            settings.project_type == ProjectType::Ios && settings.ios_settings.is_some()
        })
    }

    /// The Android section was populated from delivered data
    pub fn has_android_settings(&self) -> bool {
        self.source.as_ref().is_some_and(|settings| {
            settings.project_type == ProjectType::Android && settings.android_settings.is_some()
        })
    }

    /// Set `field` of `section` to `value`.
    ///
    /// The draft is left unchanged when the field does not belong to the
    /// section or the value has the wrong type.
    pub fn on_settings_property_change(
        &mut self,
        section: SettingsSection,
        field: SettingsField,
        value: impl Into<FieldValue>,
    ) -> Result<(), SettingsError> {
        if field.section() != section {
            return Err(SettingsError::FieldNotInSection { section, field });
        }

        let value = value.into();
        match section {
            SettingsSection::IosSettings => self.draft.ios_settings.set_field(field, value)?,
            SettingsSection::AndroidSettings => self.draft.android_settings.set_field(field, value)?,
        }

        self.refresh();
        Ok(())
    }

    /// Record `file` as selected in the field its kind maps to
    pub fn on_selected_file_change(&mut self, file: &SelectableFile) {
        match file {
            SelectableFile::ProvProfile(profile) => {
                self.draft.ios_settings.select_prov_profile(&profile.slug);
            }
            SelectableFile::Certificate(certificate) => {
                self.draft.ios_settings.selected_code_signing_identity = certificate.slug.clone();
            }
            SelectableFile::KeystoreFile(keystore) => {
                self.draft.android_settings.selected_keystore_file = keystore.slug.clone();
            }
            SelectableFile::ServiceAccountJsonFile(service_account) => {
                self.draft.android_settings.selected_service_account = service_account.slug.clone();
            }
        }

        self.refresh();
    }

    pub fn toggle_prov_profile(&mut self, slug: &str) {
        self.draft.ios_settings.toggle_prov_profile(slug);
        self.refresh();
    }

    pub fn on_workflow_change(&mut self, platform: Platform, workflow: impl Into<String>) {
        let workflow = workflow.into();
        match platform {
            Platform::Ios => self.draft.ios_workflow = workflow,
            Platform::Android => self.draft.android_workflow = workflow,
        }

        self.refresh();
    }

    /// Throw away every change made since the last load
    pub fn on_cancel(&mut self) {
        self.draft = self.saved.clone();
        self.refresh();
    }

    /// Settings to persist: the delivered settings with the edited values
    /// merged in. Sections that were not populated from data are passed
    /// through untouched.
    ///
    /// Returns `None` until settings have been loaded. The modification flag
    /// is kept until the persisted settings come back through [`Self::load`].
    pub fn on_save(&self) -> Option<Settings> {
        let mut settings = self.source.clone()?;

        settings.ios_workflow = self.draft.ios_workflow.clone();
        settings.android_workflow = self.draft.android_workflow.clone();
        if self.has_ios_settings() {
            settings.ios_settings = Some(self.draft.ios_settings.clone());
        }
        if self.has_android_settings() {
            settings.android_settings = Some(self.draft.android_settings.clone());
        }

        Some(settings)
    }

    fn refresh(&mut self) {
        self.has_modifications = has_modifications(&self.saved, &self.draft);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::mock_settings;

    fn ios_draft() -> SettingsDraft {
        SettingsDraft::from_settings(&mock_settings())
    }

    fn android_draft() -> SettingsDraft {
        SettingsDraft::from_settings(&Settings {
            project_type: ProjectType::Android,
            ..mock_settings()
        })
    }

    #[test]
    fn test_ios_project_leaves_android_at_defaults() {
        let settings = mock_settings();
        let draft = SettingsDraft::from_settings(&settings);

        assert_eq!(Some(draft.ios_settings()), settings.ios_settings.as_ref());
        assert_eq!(draft.android_settings(), &AndroidSettings::default());
        assert_eq!(draft.ios_workflow(), settings.ios_workflow);
        assert_eq!(draft.android_workflow(), settings.android_workflow);
        assert!(draft.has_ios_settings());
        assert!(!draft.has_android_settings());
        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_android_project_leaves_ios_at_defaults() {
        let draft = android_draft();

        assert_eq!(draft.ios_settings(), &IosSettings::default());
        assert_eq!(Some(draft.android_settings()), mock_settings().android_settings.as_ref());
        assert!(!draft.has_ios_settings());
        assert!(draft.has_android_settings());
    }

    #[test]
    fn test_other_project_leaves_both_at_defaults() {
        let draft = SettingsDraft::from_settings(&Settings {
            project_type: ProjectType::Other,
            ..mock_settings()
        });

        assert_eq!(draft.ios_settings(), &IosSettings::default());
        assert_eq!(draft.android_settings(), &AndroidSettings::default());
        assert!(!draft.has_ios_settings());
        assert!(!draft.has_android_settings());
        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_ios_project_without_ios_section() {
        let draft = SettingsDraft::from_settings(&Settings {
            ios_settings: None,
            ..mock_settings()
        });

        assert_eq!(draft.ios_settings(), &IosSettings::default());
        assert!(!draft.has_ios_settings());
    }

    #[test]
    fn test_property_change_marks_modified() {
        let mut draft = ios_draft();

        draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::AppSku, "some-value")
            .unwrap();

        assert_eq!(draft.ios_settings().app_sku, "some-value");
        assert!(draft.has_modifications());

        draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::IncludeBitCode, true)
            .unwrap();
        assert!(draft.ios_settings().include_bit_code);
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_property_change_to_same_value_is_not_a_modification() {
        let mut draft = ios_draft();
        let current = draft.ios_settings().app_sku.clone();

        draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::AppSku, current)
            .unwrap();

        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_modifications_persist_across_further_changes() {
        let mut draft = ios_draft();
        let edits = [
            (SettingsField::AppSku, FieldValue::from("sku-2")),
            (SettingsField::AppleDeveloperAccountEmail, FieldValue::from("dev@example.com")),
            (SettingsField::AppSpecificPassword, FieldValue::from("secret")),
        ];

        for (field, value) in edits {
            draft
                .on_settings_property_change(SettingsSection::IosSettings, field, value)
                .unwrap();
            assert!(draft.has_modifications());
        }
    }

    #[test]
    fn test_android_property_change() {
        let mut draft = android_draft();

        draft
            .on_settings_property_change(SettingsSection::AndroidSettings, SettingsField::Track, "beta")
            .unwrap();

        assert_eq!(draft.android_settings().track, "beta");
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_inconsistent_property_change_leaves_draft_untouched() {
        let mut draft = ios_draft();
        let before = draft.clone();

        let err = draft
            .on_settings_property_change(SettingsSection::AndroidSettings, SettingsField::AppSku, "x")
            .unwrap_err();
        assert!(matches!(err, SettingsError::FieldNotInSection { .. }));

        let err = draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::AppSku, false)
            .unwrap_err();
        assert!(matches!(err, SettingsError::ValueTypeMismatch { .. }));

        assert_eq!(draft, before);
    }

    #[test]
    fn test_select_certificate_only_changes_signing_identity() {
        let mut draft = ios_draft();
        let certificates = mock_settings().certificates.unwrap();
        let certificate = certificates[1].clone();
        let mut expected = draft.values().clone();
        expected.ios_settings.selected_code_signing_identity = certificate.slug.clone();

        draft.on_selected_file_change(&SelectableFile::Certificate(certificate));

        assert_eq!(draft.values(), &expected);
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_select_keystore_file() {
        let mut draft = android_draft();
        let keystore = mock_settings().keystore_files.unwrap()[1].clone();

        draft.on_selected_file_change(&SelectableFile::from(keystore.clone()));

        assert_eq!(draft.android_settings().selected_keystore_file, keystore.slug);
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_select_service_account_file() {
        let mut draft = android_draft();
        let service_account = mock_settings().service_account_json_files.unwrap()[0].clone();

        draft.on_selected_file_change(&SelectableFile::from(service_account.clone()));

        assert_eq!(draft.android_settings().selected_service_account, service_account.slug);
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_select_prov_profile_appends_unselected_profile() {
        let mut draft = ios_draft();
        let profile = mock_settings().prov_profiles.unwrap()[1].clone();
        let original = draft.ios_settings().selected_app_store_provisioning_profiles.clone();

        draft.on_selected_file_change(&SelectableFile::from(profile.clone()));

        let mut expected = original.clone();
        expected.push(profile.slug.clone());
        assert_eq!(draft.ios_settings().selected_app_store_provisioning_profiles, expected);
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_select_already_selected_prov_profile_keeps_it() {
        let mut draft = ios_draft();
        let profile = mock_settings().prov_profiles.unwrap()[0].clone();
        let original = draft.ios_settings().selected_app_store_provisioning_profiles.clone();
        assert!(draft.ios_settings().is_prov_profile_selected(&profile.slug));

        draft.on_selected_file_change(&SelectableFile::from(profile.clone()));
        draft.on_selected_file_change(&SelectableFile::from(profile.clone()));

        assert!(draft.ios_settings().is_prov_profile_selected(&profile.slug));
        assert_eq!(draft.ios_settings().selected_app_store_provisioning_profiles, original);
        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_toggle_prov_profile_twice_moves_selected_slug_to_end() {
        let mut draft = ios_draft();
        let original = draft.ios_settings().selected_app_store_provisioning_profiles.clone();
        assert!(original.len() >= 2, "fixture should select several profiles");

        let first = original[0].clone();
        draft.toggle_prov_profile(&first);
        assert_eq!(draft.ios_settings().selected_app_store_provisioning_profiles, original[1..]);
        assert!(draft.has_modifications());

        draft.toggle_prov_profile(&first);
        let mut reordered = original[1..].to_vec();
        reordered.push(first);
        assert_eq!(draft.ios_settings().selected_app_store_provisioning_profiles, reordered);

        let mut draft = ios_draft();
        draft.toggle_prov_profile("prov-profile-slug-4");
        draft.toggle_prov_profile("prov-profile-slug-4");
        assert_eq!(draft.ios_settings().selected_app_store_provisioning_profiles, original);
        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_workflow_change_marks_modified() {
        let mut draft = ios_draft();

        draft.on_workflow_change(Platform::Ios, "Primary");
        assert_eq!(draft.ios_workflow(), "Primary");
        assert!(draft.has_modifications());

        let mut draft = ios_draft();
        draft.on_workflow_change(Platform::Android, "Primary");
        assert_eq!(draft.android_workflow(), "Primary");
        assert!(draft.has_modifications());
    }

    #[test]
    fn test_cancel_restores_saved_values_and_is_idempotent() {
        let settings = mock_settings();
        let mut draft = SettingsDraft::from_settings(&settings);
        let saved = draft.values().clone();

        draft.on_workflow_change(Platform::Ios, "Primary");
        draft.toggle_prov_profile("prov-profile-slug-2");
        draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::AppSku, "changed")
            .unwrap();

        draft.on_cancel();
        assert_eq!(draft.values(), &saved);
        assert_eq!(draft.ios_workflow(), settings.ios_workflow);
        assert!(!draft.has_modifications());

        draft.on_cancel();
        assert_eq!(draft.values(), &saved);
        assert!(!draft.has_modifications());
    }

    #[test]
    fn test_save_merges_draft_and_keeps_modified_flag() {
        let settings = mock_settings();
        let mut draft = SettingsDraft::from_settings(&settings);
        draft.on_workflow_change(Platform::Ios, "Primary");
        draft
            .on_settings_property_change(SettingsSection::IosSettings, SettingsField::AppSku, "sku-9")
            .unwrap();

        let saved = draft.on_save().unwrap();

        assert_eq!(saved.ios_workflow, "Primary");
        assert_eq!(saved.ios_settings.as_ref().unwrap().app_sku, "sku-9");
        assert_eq!(saved.android_settings, settings.android_settings);
        assert_eq!(saved.prov_profiles, settings.prov_profiles);
        assert!(draft.has_modifications());

        draft.load(&saved);
        assert!(!draft.has_modifications());
        assert_eq!(draft.ios_workflow(), "Primary");
    }

    #[test]
    fn test_save_before_load() {
        assert_eq!(SettingsDraft::new().on_save(), None);
        assert!(!SettingsDraft::new().is_loaded());
    }

    #[test]
    fn test_reload_discards_pending_changes() {
        let mut draft = ios_draft();
        draft.on_workflow_change(Platform::Ios, "Primary");

        draft.load(&Settings {
            project_type: ProjectType::Android,
            ..mock_settings()
        });

        assert!(!draft.has_modifications());
        assert_eq!(draft.ios_workflow(), mock_settings().ios_workflow);
        assert_eq!(draft.ios_settings(), &IosSettings::default());
    }

    #[test]
    fn test_has_modifications_is_a_plain_comparison() {
        let saved = DraftValues::from_settings(&mock_settings());
        let mut draft = saved.clone();
        assert!(!has_modifications(&saved, &draft));

        draft.android_workflow.push('x');
        assert!(has_modifications(&saved, &draft));
    }
}
