pub mod view;

use std::rc::Rc;

use shared::{
    AppVersion, FieldValue, Platform, SelectableFile, Settings, SettingsDraft, SettingsError,
    SettingsField, SettingsSection,
};
use yew::prelude::*;

use crate::config::DEFAULT_MAXIMUM_NUMBER_OF_CERTIFICATES;
use crate::services::logging::Logger;
use view::GeneralView;

const COMPONENT: &str = "General";

/// Every way the form can change the draft
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    Load(Rc<Settings>),
    PropertyChange {
        section: SettingsSection,
        field: SettingsField,
        value: FieldValue,
    },
    SelectFile(SelectableFile),
    ToggleProvProfile(String),
    WorkflowChange(Platform, String),
    Cancel,
}

/// Apply `action` to `draft`
pub fn apply(draft: &mut SettingsDraft, action: DraftAction) -> Result<(), SettingsError> {
    match action {
        DraftAction::Load(settings) => draft.load(&settings),
        DraftAction::PropertyChange { section, field, value } => {
            draft.on_settings_property_change(section, field, value)?
        }
        DraftAction::SelectFile(file) => draft.on_selected_file_change(&file),
        DraftAction::ToggleProvProfile(slug) => draft.toggle_prov_profile(&slug),
        DraftAction::WorkflowChange(platform, workflow) => draft.on_workflow_change(platform, workflow),
        DraftAction::Cancel => draft.on_cancel(),
    }
    Ok(())
}

/// Save handler: hands the merged settings to `update_settings` unless a
/// save is already in flight or nothing has been loaded
pub fn save_callback(draft: SettingsDraft, is_saving: bool, update_settings: Callback<Settings>) -> Callback<()> {
    Callback::from(move |_: ()| {
        if is_saving {
            Logger::debug_with_component(COMPONENT, "Save already in progress");
            return;
        }
        match draft.on_save() {
            Some(settings) => {
                Logger::info_with_component(COMPONENT, "Saving settings");
                update_settings.emit(settings);
            }
            None => Logger::warn_with_component(COMPONENT, "Nothing to save before settings are loaded"),
        }
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftStore {
    pub draft: SettingsDraft,
}

impl DraftStore {
    fn from_settings(settings: Option<&Rc<Settings>>) -> Self {
        Self {
            draft: settings
                .map(|settings| SettingsDraft::from_settings(settings))
                .unwrap_or_default(),
        }
    }
}

impl Reducible for DraftStore {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut draft = self.draft.clone();
        match apply(&mut draft, action) {
            Ok(()) => Rc::new(Self { draft }),
            Err(e) => {
                Logger::warn_with_component(COMPONENT, &format!("Ignoring settings change: {}", e));
                self
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct GeneralProps {
    pub app_slug: String,
    #[prop_or_default]
    pub app_version: Option<AppVersion>,
    /// Settings as last delivered by the service
    #[prop_or_default]
    pub settings: Option<Rc<Settings>>,
    pub has_loaded: bool,
    #[prop_or_default]
    pub is_saving: bool,
    pub update_settings: Callback<Settings>,
    pub fetch_settings: Callback<()>,
    #[prop_or(DEFAULT_MAXIMUM_NUMBER_OF_CERTIFICATES)]
    pub maximum_number_of_certificates: usize,
}

/// General settings tab: keeps the edited draft and hands it up on save
#[function_component(General)]
pub fn general(props: &GeneralProps) -> Html {
    let store = {
        let settings = props.settings.clone();
        use_reducer(move || DraftStore::from_settings(settings.as_ref()))
    };

    // Load on mount
    use_effect_with(props.app_slug.clone(), {
        let fetch_settings = props.fetch_settings.clone();
        move |_| {
            fetch_settings.emit(());
            || ()
        }
    });

    // Reinitialize whenever a different settings object arrives
    let settings_identity = props.settings.as_ref().map(|settings| Rc::as_ptr(settings) as usize);
    use_effect_with(settings_identity, {
        let store = store.dispatcher();
        let settings = props.settings.clone();
        move |_| {
            if let Some(settings) = settings {
                Logger::debug_with_component(COMPONENT, "Settings received, resetting draft");
                store.dispatch(DraftAction::Load(settings));
            }
            || ()
        }
    });

    let on_settings_property_change = {
        let store = store.dispatcher();
        Callback::from(move |(section, field, value): (SettingsSection, SettingsField, FieldValue)| {
            store.dispatch(DraftAction::PropertyChange { section, field, value });
        })
    };

    let on_selected_file_change = {
        let store = store.dispatcher();
        Callback::from(move |file: SelectableFile| {
            store.dispatch(DraftAction::SelectFile(file));
        })
    };

    let on_workflow_change = {
        let store = store.dispatcher();
        Callback::from(move |(platform, workflow): (Platform, String)| {
            store.dispatch(DraftAction::WorkflowChange(platform, workflow));
        })
    };

    let on_cancel = {
        let store = store.dispatcher();
        Callback::from(move |_: ()| {
            store.dispatch(DraftAction::Cancel);
        })
    };

    let on_toggle_prov_profile = {
        let store = store.dispatcher();
        Callback::from(move |slug: String| {
            store.dispatch(DraftAction::ToggleProvProfile(slug));
        })
    };

    let on_save = save_callback(store.draft.clone(), props.is_saving, props.update_settings.clone());

    let draft = &store.draft;
    let source = draft.source();
    // settings that arrived but are not in the draft yet still count as loading
    let has_loaded = props.has_loaded && (draft.is_loaded() || props.settings.is_none());

    html! {
        <GeneralView
            app_version={props.app_version.clone()}
            ios_workflow={draft.ios_workflow().to_string()}
            android_workflow={draft.android_workflow().to_string()}
            ios_settings={draft.has_ios_settings().then(|| draft.ios_settings().clone())}
            android_settings={draft.has_android_settings().then(|| draft.android_settings().clone())}
            prov_profiles={source.and_then(|settings| settings.prov_profiles.clone())}
            certificates={source.and_then(|settings| settings.certificates.clone())}
            keystore_files={source.and_then(|settings| settings.keystore_files.clone())}
            service_account_json_files={source.and_then(|settings| settings.service_account_json_files.clone())}
            has_ios_settings={draft.has_ios_settings()}
            has_android_settings={draft.has_android_settings()}
            has_loaded={has_loaded}
            has_settings={draft.is_loaded()}
            has_modifications={draft.has_modifications()}
            is_saving={props.is_saving}
            maximum_number_of_certificates={props.maximum_number_of_certificates}
            on_settings_property_change={on_settings_property_change}
            on_selected_file_change={on_selected_file_change}
            on_toggle_prov_profile={on_toggle_prov_profile}
            on_workflow_change={on_workflow_change}
            on_cancel={on_cancel}
            on_save={on_save}
            on_retry={props.fetch_settings.clone()}
        />
    }
}
