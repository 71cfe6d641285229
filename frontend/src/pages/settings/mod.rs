pub mod general;

use yew::prelude::*;

use crate::config::FrontendConfig;
use crate::hooks::use_settings::use_settings;
use crate::services::api::ApiClient;
use general::General;

#[derive(Properties, PartialEq)]
pub struct SettingsPageProps {
    pub config: FrontendConfig,
    pub api_client: ApiClient,
}

/// Settings tab wired to the settings service
#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsPageProps) -> Html {
    let settings = use_settings(&props.api_client, &props.config.app_slug);
    let state = settings.state;

    html! {
        <div class="settings-page">
            {if let Some(error) = state.error.clone() {
                html! { <div class="settings-error">{error}</div> }
            } else {
                html! {}
            }}
            {if state.saved_notice {
                html! { <div class="settings-success">{"Settings saved"}</div> }
            } else {
                html! {}
            }}
            <General
                app_slug={props.config.app_slug.clone()}
                app_version={state.app_version.clone()}
                settings={state.settings.clone()}
                has_loaded={state.has_loaded}
                is_saving={state.is_saving}
                update_settings={settings.actions.update_settings.clone()}
                fetch_settings={settings.actions.fetch_settings.clone()}
                maximum_number_of_certificates={props.config.maximum_number_of_certificates}
            />
        </div>
    }
}
