use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::{AppVersion, Settings};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_settings";
const SAVED_NOTICE_MS: u32 = 3000;

/// Counts shown "saved" notices so a timer only hides the one it belongs to
#[derive(Debug, Default)]
pub struct NoticeGeneration(u32);

impl NoticeGeneration {
    /// Start a new notice and return its generation
    pub fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, generation: u32) -> bool {
        self.0 == generation
    }
}

#[derive(Clone, PartialEq, Default)]
pub struct SettingsState {
    /// Last settings delivered by the service. A new `Rc` means new data.
    pub settings: Option<Rc<Settings>>,
    pub app_version: Option<AppVersion>,
    pub has_loaded: bool,
    pub is_saving: bool,
    pub error: Option<String>,
    /// Set for a few seconds after a successful save
    pub saved_notice: bool,
}

pub struct UseSettingsResult {
    pub state: SettingsState,
    pub actions: UseSettingsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSettingsActions {
    pub fetch_settings: Callback<()>,
    pub update_settings: Callback<Settings>,
}

/// Hook for loading and persisting the settings of one app
#[hook]
pub fn use_settings(api_client: &ApiClient, app_slug: &str) -> UseSettingsResult {
    let settings = use_state(|| Option::<Rc<Settings>>::None);
    let app_version = use_state(|| Option::<AppVersion>::None);
    let has_loaded = use_state(|| false);
    let is_saving = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    let saved_notice = use_state(|| false);
    let notice_generation = use_mut_ref(NoticeGeneration::default);

    let fetch_settings = {
        let api_client = api_client.clone();
        let settings = settings.clone();
        let app_version = app_version.clone();
        let has_loaded = has_loaded.clone();
        let error = error.clone();

        use_callback(app_slug.to_string(), move |_, app_slug: &String| {
            let api_client = api_client.clone();
            let app_slug = app_slug.clone();
            let settings = settings.clone();
            let app_version = app_version.clone();
            let has_loaded = has_loaded.clone();
            let error = error.clone();

            spawn_local(async move {
                has_loaded.set(false);
                Logger::debug_with_component(COMPONENT, &format!("Loading settings for {}", app_slug));

                match api_client.get_settings(&app_slug).await {
                    Ok(loaded) => {
                        settings.set(Some(Rc::new(loaded)));
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to load settings: {}", e));
                        error.set(Some(format!("Failed to load settings: {}", e)));
                    }
                }

                match api_client.get_latest_app_version(&app_slug).await {
                    Ok(version) => app_version.set(Some(version)),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("No app version available: {}", e));
                    }
                }

                has_loaded.set(true);
            });
        })
    };

    let update_settings = {
        let api_client = api_client.clone();
        let settings = settings.clone();
        let is_saving = is_saving.clone();
        let error = error.clone();
        let saved_notice = saved_notice.clone();
        let notice_generation = notice_generation.clone();

        use_callback(app_slug.to_string(), move |draft: Settings, app_slug: &String| {
            let api_client = api_client.clone();
            let app_slug = app_slug.clone();
            let settings = settings.clone();
            let is_saving = is_saving.clone();
            let error = error.clone();
            let saved_notice = saved_notice.clone();
            let notice_generation = notice_generation.clone();

            is_saving.set(true);
            error.set(None);

            spawn_local(async move {
                match api_client.update_settings(&app_slug, &draft).await {
                    Ok(saved) => {
                        Logger::info_with_component(COMPONENT, &format!("Settings of {} saved", app_slug));
                        settings.set(Some(Rc::new(saved)));
                        is_saving.set(false);
                        let generation = notice_generation.borrow_mut().next();
                        saved_notice.set(true);

                        TimeoutFuture::new(SAVED_NOTICE_MS).await;
                        if notice_generation.borrow().is_current(generation) {
                            saved_notice.set(false);
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to save settings: {}", e));
                        is_saving.set(false);
                        error.set(Some(format!("Failed to save settings: {}", e)));
                    }
                }
            });
        })
    };

    let state = SettingsState {
        settings: (*settings).clone(),
        app_version: (*app_version).clone(),
        has_loaded: *has_loaded,
        is_saving: *is_saving,
        error: (*error).clone(),
        saved_notice: *saved_notice,
    };

    let actions = UseSettingsActions {
        fetch_settings,
        update_settings,
    };

    UseSettingsResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_latest_notice_expires() {
        let mut generations = NoticeGeneration::default();

        let first = generations.next();
        let second = generations.next();

        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }
}
