use web_sys::File;
use yew::prelude::*;

use crate::components::dropzone::intake::remove_first;
use crate::components::dropzone::Dropzone;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ScreenshotUploaderProps {
    pub title: AttrValue,
    #[prop_or(true)]
    pub is_multiple: bool,
}

/// Store listing images picked through a dropzone. Holds the file list the
/// dropzone renders.
#[function_component(ScreenshotUploader)]
pub fn screenshot_uploader(props: &ScreenshotUploaderProps) -> Html {
    let files = use_state(Vec::<File>::new);

    let on_files_added = {
        let files = files.clone();
        let is_multiple = props.is_multiple;
        Callback::from(move |added: Vec<File>| {
            let mut next = if is_multiple { (*files).clone() } else { Vec::new() };
            next.extend(added);
            files.set(next);
        })
    };

    let remove_file = {
        let files = files.clone();
        let title = props.title.clone();
        Callback::from(move |file: File| {
            Logger::debug_with_component("ScreenshotUploader", &format!("Removing {} from {}", file.name(), title));
            files.set(remove_first(files.as_slice(), &file));
        })
    };

    html! {
        <section class="screenshot-uploader">
            <h3 class="screenshot-uploader-title">
                {props.title.clone()}
                <small class="screenshot-uploader-count">{format!(" ({})", files.len())}</small>
            </h3>
            <Dropzone
                files={(*files).clone()}
                on_files_added={on_files_added}
                remove_file={remove_file}
                is_multiple={props.is_multiple}
            />
        </section>
    }
}
