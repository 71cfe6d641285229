use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod pages;
mod services;

use components::screenshot_uploader::ScreenshotUploader;
use config::FrontendConfig;
use pages::settings::SettingsPage;
use services::api::ApiClient;
use services::logging::Logger;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    General,
    StoreListing,
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| FrontendConfig::from_location());
    let api_client = use_memo(config.api_base_url.clone(), |base_url| {
        ApiClient::with_base_url(base_url.clone())
    });
    let tab = use_state(|| Tab::General);

    let select_tab = |target: Tab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    let tab_class = |target: Tab| classes!("app-tab", (*tab == target).then_some("app-tab-active"));

    html! {
        <div class="app">
            <header class="app-header">
                <h1 class="app-title">{"Ship"}</h1>
                <nav class="app-tabs">
                    <button type="button" class={tab_class(Tab::General)} onclick={select_tab(Tab::General)}>
                        {"General"}
                    </button>
                    <button type="button" class={tab_class(Tab::StoreListing)} onclick={select_tab(Tab::StoreListing)}>
                        {"Store Listing"}
                    </button>
                </nav>
            </header>
            <main class="app-content">
                {match *tab {
                    Tab::General => html! {
                        <SettingsPage config={(*config).clone()} api_client={(*api_client).clone()} />
                    },
                    Tab::StoreListing => html! {
                        <>
                            <ScreenshotUploader title="App Icon" is_multiple={false} />
                            <ScreenshotUploader title="Screenshots" />
                        </>
                    },
                }}
            </main>
        </div>
    }
}

fn main() {
    let config = FrontendConfig::from_location();
    Logger::set_max_level(config.log_level);
    Logger::info_with_component(
        "main",
        &format!("Starting settings UI for {} against {}", config.app_slug, config.api_base_url),
    );
    yew::Renderer::<App>::new().render();
}
