pub mod intake;

use thiserror::Error;
use web_sys::{DragEvent, File, FileList, HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::hooks::use_thumbnail_urls::use_thumbnail_urls;
use crate::services::logging::Logger;
use intake::{accept_images, drop_prompt, shows_drop_target, DropPrompt, DropzoneMode, IntakeFile};

const COMPONENT: &str = "Dropzone";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropzoneError {
    #[error("could not create an object URL: {0}")]
    ObjectUrl(String),
}

#[derive(Properties, PartialEq)]
pub struct DropzoneProps {
    /// Receives the accepted images of every drop or browse selection
    pub on_files_added: Callback<Vec<File>>,
    pub remove_file: Callback<File>,
    /// Files currently held by the caller
    #[prop_or_default]
    pub files: Vec<File>,
    #[prop_or(true)]
    pub is_multiple: bool,
}

fn files_from_list(list: Option<FileList>) -> Vec<File> {
    match list {
        Some(list) => (0..list.length()).filter_map(|index| list.item(index)).collect(),
        None => Vec::new(),
    }
}

/// Image drop target with thumbnails. The file list is owned by the caller.
#[function_component(Dropzone)]
pub fn dropzone(props: &DropzoneProps) -> Html {
    let mode = DropzoneMode::from_is_multiple(props.is_multiple);
    let is_drag_active = use_state(|| false);
    let input_ref = use_node_ref();
    let thumbnail_urls = use_thumbnail_urls(props.files.clone());

    let accept_files = {
        let on_files_added = props.on_files_added.clone();
        Callback::from(move |files: Vec<File>| {
            let (accepted, rejected) = accept_images(files, mode);

            if !rejected.is_empty() {
                let names: Vec<String> = rejected.iter().map(IntakeFile::name).collect();
                Logger::warn_with_component(COMPONENT, &format!("Ignoring files: {}", names.join(", ")));
            }
            if !accepted.is_empty() {
                Logger::debug_with_component(COMPONENT, &format!("{} file(s) added", accepted.len()));
                on_files_added.emit(accepted);
            }
        })
    };

    let on_browse = {
        let accept_files = accept_files.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            accept_files.emit(files_from_list(input.files()));
            // allows picking the same file again
            input.set_value("");
        })
    };

    let on_click = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_drag_enter = {
        let is_drag_active = is_drag_active.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            is_drag_active.set(true);
        })
    };

    let on_drag_over = Callback::from(|e: DragEvent| {
        e.prevent_default();
    });

    let on_drag_leave = {
        let is_drag_active = is_drag_active.clone();
        Callback::from(move |_: DragEvent| {
            is_drag_active.set(false);
        })
    };

    let on_drop = {
        let is_drag_active = is_drag_active.clone();
        let accept_files = accept_files.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            is_drag_active.set(false);
            let files = files_from_list(e.data_transfer().and_then(|transfer| transfer.files()));
            accept_files.emit(files);
        })
    };

    let file_count = props.files.len();
    let has_files = file_count > 0;

    let drop_target = if shows_drop_target(mode, file_count) {
        let prompt = match drop_prompt(file_count) {
            DropPrompt::AddMore => html! { <span class="dropzone-plus">{"+"}</span> },
            DropPrompt::Empty => html! {
                <div class="dropzone-prompt">
                    <p class="dropzone-prompt-text">{"Drag & Drop"}<br />{"or"}</p>
                    <p class="dropzone-browse">
                        <span class="dropzone-plus">{"+"}</span>
                        {"Browse Files"}
                    </p>
                </div>
            },
        };

        html! {
            <div
                class={classes!(
                    "dropzone",
                    (*is_drag_active).then_some("dropzone-active"),
                    has_files.then_some("dropzone-has-files")
                )}
                onclick={on_click}
                ondragenter={on_drag_enter}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
            >
                {prompt}
            </div>
        }
    } else {
        html! {}
    };

    let thumbs = props
        .files
        .iter()
        .zip(thumbnail_urls)
        .enumerate()
        .map(|(index, (file, url))| {
            let on_remove = {
                let remove_file = props.remove_file.clone();
                let file = file.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    remove_file.emit(file.clone());
                })
            };
            let name = IntakeFile::name(file);

            html! {
                <div class="dropzone-thumb" key={format!("{}#{}", file.handle_key(), index)}>
                    <div class="dropzone-remove" title="Remove" onclick={on_remove}>{"×"}</div>
                    {match url {
                        Some(url) => html! { <img class="dropzone-thumbnail" src={url} alt={name} /> },
                        None => html! { <div class="dropzone-thumbnail dropzone-thumbnail-missing">{name}</div> },
                    }}
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div class="dropzone-card">
            <input
                ref={input_ref}
                type="file"
                class="dropzone-input"
                accept="image/*"
                multiple={props.is_multiple}
                onchange={on_browse}
            />
            <div class="dropzone-track">
                {drop_target}
                {thumbs}
            </div>
        </div>
    }
}
