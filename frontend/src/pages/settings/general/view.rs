use shared::{
    AndroidSettings, AppVersion, Certificate, FieldValue, IosSettings, KeystoreFile, Platform,
    ProvProfile, SelectableFile, ServiceAccountJsonFile, SettingsField, SettingsSection,
};
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GeneralViewProps {
    #[prop_or_default]
    pub app_version: Option<AppVersion>,
    pub ios_workflow: String,
    pub android_workflow: String,
    #[prop_or_default]
    pub ios_settings: Option<IosSettings>,
    #[prop_or_default]
    pub android_settings: Option<AndroidSettings>,
    #[prop_or_default]
    pub prov_profiles: Option<Vec<ProvProfile>>,
    #[prop_or_default]
    pub certificates: Option<Vec<Certificate>>,
    #[prop_or_default]
    pub keystore_files: Option<Vec<KeystoreFile>>,
    #[prop_or_default]
    pub service_account_json_files: Option<Vec<ServiceAccountJsonFile>>,
    pub has_ios_settings: bool,
    pub has_android_settings: bool,
    pub has_loaded: bool,
    /// Settings were delivered; false after a failed load
    #[prop_or(true)]
    pub has_settings: bool,
    pub has_modifications: bool,
    #[prop_or_default]
    pub is_saving: bool,
    pub maximum_number_of_certificates: usize,
    pub on_settings_property_change: Callback<(SettingsSection, SettingsField, FieldValue)>,
    pub on_selected_file_change: Callback<SelectableFile>,
    pub on_toggle_prov_profile: Callback<String>,
    pub on_workflow_change: Callback<(Platform, String)>,
    pub on_cancel: Callback<()>,
    pub on_save: Callback<()>,
    #[prop_or_default]
    pub on_retry: Callback<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Loading,
    /// Loading finished without settings
    Unavailable,
    Ready,
}

impl FormState {
    pub fn new(has_loaded: bool, has_settings: bool) -> Self {
        match (has_loaded, has_settings) {
            (false, _) => FormState::Loading,
            (true, false) => FormState::Unavailable,
            (true, true) => FormState::Ready,
        }
    }
}

/// State of the Cancel and Save buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButtons {
    pub disabled: bool,
    pub save_label: &'static str,
}

impl ActionButtons {
    pub fn new(has_modifications: bool, is_saving: bool) -> Self {
        Self {
            disabled: !has_modifications || is_saving,
            save_label: if is_saving { "Saving..." } else { "Save" },
        }
    }
}

pub fn platform_label(version: &AppVersion) -> &'static str {
    if version.is_ios() {
        "iOS"
    } else {
        "Android"
    }
}

/// One selectable entry of a file list
#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub file: SelectableFile,
    pub checked: bool,
}

pub fn file_rows<T>(files: &[T], is_selected: impl Fn(&str) -> bool) -> Vec<FileRow>
where
    T: Clone + Into<SelectableFile>,
{
    files
        .iter()
        .cloned()
        .map(Into::into)
        .map(|file: SelectableFile| {
            let checked = is_selected(file.slug());
            FileRow { file, checked }
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq)]
enum Choice {
    Single,
    Multiple,
}

fn file_list(
    group: &'static str,
    choice: Choice,
    rows: Option<Vec<FileRow>>,
    disabled: bool,
    on_select: &Callback<SelectableFile>,
) -> Html {
    let rows = match rows {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            return html! {
                <p class="settings-no-files">{"No files uploaded yet."}</p>
            }
        }
    };

    let input_type = match choice {
        Choice::Single => "radio",
        Choice::Multiple => "checkbox",
    };

    html! {
        <ul class="settings-file-list">
            {for rows.into_iter().map(|row| {
                let id = format!("{}-{}", group, row.file.slug());
                let name = row.file.name().to_string();
                let onchange = {
                    let on_select = on_select.clone();
                    let file = row.file.clone();
                    Callback::from(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        // a radio only reports being checked, a checkbox toggles either way
                        if choice == Choice::Multiple || input.checked() {
                            on_select.emit(file.clone());
                        }
                    })
                };

                html! {
                    <li class="settings-file" key={id.clone()}>
                        <input
                            id={id.clone()}
                            type={input_type}
                            name={group}
                            value={row.file.slug().to_string()}
                            checked={row.checked}
                            disabled={disabled}
                            onchange={onchange}
                        />
                        <label for={id}>{name}</label>
                    </li>
                }
            })}
        </ul>
    }
}

fn text_input(
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    value: &str,
    disabled: bool,
    on_value: Callback<String>,
) -> Html {
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_value.emit(input.value());
    });

    html! {
        <div class="form-group">
            <label for={name}>{label}</label>
            <input
                id={name}
                name={name}
                type={input_type}
                class="settings-input"
                value={value.to_string()}
                disabled={disabled}
                oninput={oninput}
            />
        </div>
    }
}

/// Build settings form. Renders what it is given and reports every edit
/// through its callbacks.
#[function_component(GeneralView)]
pub fn general_view(props: &GeneralViewProps) -> Html {
    match FormState::new(props.has_loaded, props.has_settings) {
        FormState::Loading => {
            return html! {
                <div class="settings-loading">{"Loading settings..."}</div>
            };
        }
        FormState::Unavailable => {
            let on_retry = {
                let on_retry = props.on_retry.clone();
                Callback::from(move |_: MouseEvent| on_retry.emit(()))
            };
            return html! {
                <div class="settings-unavailable">
                    <p>{"Settings could not be loaded."}</p>
                    <button type="button" class="btn btn-secondary" onclick={on_retry}>{"Retry"}</button>
                </div>
            };
        }
        FormState::Ready => {}
    }

    let disabled = props.is_saving;

    let field_callback = |field: SettingsField| {
        let on_change = props.on_settings_property_change.clone();
        Callback::from(move |value: String| {
            on_change.emit((field.section(), field, FieldValue::Text(value)));
        })
    };

    let workflow_callback = |platform: Platform| {
        let on_change = props.on_workflow_change.clone();
        Callback::from(move |workflow: String| on_change.emit((platform, workflow)))
    };

    let header = match &props.app_version {
        Some(version) => html! {
            <div class="settings-header">
                <img class="settings-app-icon" src={version.icon_url.clone()} alt={version.app_name.clone()} />
                <div>
                    <h2 class="settings-app-title">{version.display_title()}</h2>
                    <span class="settings-app-platform">{platform_label(version)}</span>
                    <small class="settings-app-updated">
                        {format!("Last updated {}", version.last_update.format("%b %-d, %Y"))}
                    </small>
                </div>
            </div>
        },
        None => html! {},
    };

    let ios_section = match (&props.ios_settings, props.has_ios_settings) {
        (Some(ios), true) => {
            let on_include_bit_code = {
                let on_change = props.on_settings_property_change.clone();
                Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_change.emit((
                        SettingsSection::IosSettings,
                        SettingsField::IncludeBitCode,
                        FieldValue::Flag(input.checked()),
                    ));
                })
            };

            let on_toggle_prov_profile = props
                .on_toggle_prov_profile
                .reform(|file: SelectableFile| file.slug().to_string());

            let profile_rows = props
                .prov_profiles
                .as_deref()
                .map(|profiles| file_rows(profiles, |slug| ios.is_prov_profile_selected(slug)));
            let certificate_rows = props
                .certificates
                .as_deref()
                .map(|certificates| file_rows(certificates, |slug| slug == ios.selected_code_signing_identity));

            html! {
                <section class="settings-section settings-ios">
                    <h3 class="settings-section-title">{"iOS Settings"}</h3>
                    {text_input(Platform::Ios.workflow_field_name(), "Workflow", "text", &props.ios_workflow, disabled, workflow_callback(Platform::Ios))}
                    {text_input("appleDeveloperAccountEmail", "Apple Developer Account Email", "email", &ios.apple_developer_account_email, disabled, field_callback(SettingsField::AppleDeveloperAccountEmail))}
                    {text_input("appSku", "App SKU", "text", &ios.app_sku, disabled, field_callback(SettingsField::AppSku))}
                    {text_input("appSpecificPassword", "App-specific Password", "password", &ios.app_specific_password, disabled, field_callback(SettingsField::AppSpecificPassword))}
                    <div class="form-group form-checkbox">
                        <input
                            id="includeBitCode"
                            name="includeBitCode"
                            type="checkbox"
                            checked={ios.include_bit_code}
                            disabled={disabled}
                            onchange={on_include_bit_code}
                        />
                        <label for="includeBitCode">{"Include bitcode"}</label>
                    </div>

                    <h4 class="settings-files-title">{"App Store Provisioning Profiles"}</h4>
                    {file_list("provProfile", Choice::Multiple, profile_rows, disabled, &on_toggle_prov_profile)}

                    <h4 class="settings-files-title">{"Code Signing Identity"}</h4>
                    <small class="settings-hint">
                        {format!("You can upload up to {} certificates.", props.maximum_number_of_certificates)}
                    </small>
                    {file_list("certificate", Choice::Single, certificate_rows, disabled, &props.on_selected_file_change)}
                </section>
            }
        }
        _ => html! {},
    };

    let android_section = match (&props.android_settings, props.has_android_settings) {
        (Some(android), true) => {
            let keystore_rows = props
                .keystore_files
                .as_deref()
                .map(|keystores| file_rows(keystores, |slug| slug == android.selected_keystore_file));
            let service_account_rows = props
                .service_account_json_files
                .as_deref()
                .map(|accounts| file_rows(accounts, |slug| slug == android.selected_service_account));

            html! {
                <section class="settings-section settings-android">
                    <h3 class="settings-section-title">{"Android Settings"}</h3>
                    {text_input(Platform::Android.workflow_field_name(), "Workflow", "text", &props.android_workflow, disabled, workflow_callback(Platform::Android))}
                    {text_input("track", "Track", "text", &android.track, disabled, field_callback(SettingsField::Track))}

                    <h4 class="settings-files-title">{"Android Keystore File"}</h4>
                    {file_list("keystoreFile", Choice::Single, keystore_rows, disabled, &props.on_selected_file_change)}

                    <h4 class="settings-files-title">{"Service Account JSON File"}</h4>
                    {file_list("serviceAccountJsonFile", Choice::Single, service_account_rows, disabled, &props.on_selected_file_change)}
                </section>
            }
        }
        _ => html! {},
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let on_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(()))
    };

    let buttons = ActionButtons::new(props.has_modifications, props.is_saving);

    html! {
        <div class="settings-general">
            {header}
            {ios_section}
            {android_section}
            <div class="settings-buttons">
                <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={buttons.disabled}>
                    {"Cancel"}
                </button>
                <button type="button" class="btn btn-primary" onclick={on_save} disabled={buttons.disabled}>
                    {buttons.save_label}
                </button>
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod render_tests {
    use super::*;
    use shared::mocks::{mock_app_version, mock_settings};
    use yew::ServerRenderer;

    fn loaded_props() -> GeneralViewProps {
        let settings = mock_settings();
        GeneralViewProps {
            app_version: Some(mock_app_version()),
            ios_workflow: settings.ios_workflow.clone(),
            android_workflow: settings.android_workflow.clone(),
            ios_settings: settings.ios_settings.clone(),
            android_settings: settings.android_settings.clone(),
            prov_profiles: settings.prov_profiles.clone(),
            certificates: settings.certificates.clone(),
            keystore_files: settings.keystore_files.clone(),
            service_account_json_files: settings.service_account_json_files.clone(),
            has_ios_settings: true,
            has_android_settings: false,
            has_loaded: true,
            has_settings: true,
            has_modifications: false,
            is_saving: false,
            maximum_number_of_certificates: 30,
            on_settings_property_change: Callback::default(),
            on_selected_file_change: Callback::default(),
            on_toggle_prov_profile: Callback::default(),
            on_workflow_change: Callback::default(),
            on_cancel: Callback::default(),
            on_save: Callback::default(),
            on_retry: Callback::default(),
        }
    }

    async fn render<F>(props: F) -> String
    where
        F: FnOnce() -> GeneralViewProps + Send + 'static,
    {
        ServerRenderer::<GeneralView>::with_props(props)
            .hydratable(false)
            .render()
            .await
    }

    #[tokio::test]
    async fn test_renders_loading_state() {
        let html = render(|| GeneralViewProps {
            has_loaded: false,
            ..loaded_props()
        })
        .await;

        assert!(html.contains("Loading settings..."));
        assert!(!html.contains("iOS Settings"));
        assert!(!html.contains("settings-buttons"));
    }

    #[tokio::test]
    async fn test_renders_unavailable_state_after_failed_load() {
        let html = render(|| GeneralViewProps {
            has_settings: false,
            ..loaded_props()
        })
        .await;

        assert!(html.contains("Settings could not be loaded."));
        assert!(!html.contains("Loading settings..."));
    }

    #[tokio::test]
    async fn test_renders_only_the_ios_section() {
        let html = render(loaded_props).await;

        assert!(html.contains("iOS Settings"));
        assert!(!html.contains("Android Settings"));
        assert!(html.contains("Standup Timer 1.0.3 (32)"));
        assert!(html.contains(r#"name="appSku""#));
        assert!(html.contains("Profile 4.mobileprovision"));
        assert!(html.contains("You can upload up to 30 certificates."));
    }

    #[tokio::test]
    async fn test_renders_only_the_android_section() {
        let html = render(|| GeneralViewProps {
            has_ios_settings: false,
            has_android_settings: true,
            ..loaded_props()
        })
        .await;

        assert!(html.contains("Android Settings"));
        assert!(!html.contains("iOS Settings"));
        assert!(html.contains("release-2.keystore"));
        assert!(html.contains("service-account-1.json"));
    }

    #[tokio::test]
    async fn test_renders_note_for_missing_files() {
        let html = render(|| GeneralViewProps {
            prov_profiles: None,
            certificates: Some(Vec::new()),
            ..loaded_props()
        })
        .await;

        assert_eq!(html.matches("No files uploaded yet.").count(), 2);
        assert!(!html.contains("Profile 1.mobileprovision"));
    }

    #[tokio::test]
    async fn test_renders_saving_label() {
        let html = render(|| GeneralViewProps {
            has_modifications: true,
            is_saving: true,
            ..loaded_props()
        })
        .await;

        assert!(html.contains("Saving..."));

        let html = render(|| GeneralViewProps {
            has_modifications: true,
            ..loaded_props()
        })
        .await;

        assert!(!html.contains("Saving..."));
    }
}
