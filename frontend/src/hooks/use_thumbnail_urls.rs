use web_sys::{File, Url};
use yew::prelude::*;

use crate::components::dropzone::intake::ThumbnailUrls;
use crate::components::dropzone::DropzoneError;
use crate::services::logging::Logger;

pub fn create_object_url(file: &File) -> Result<String, DropzoneError> {
    Url::create_object_url_with_blob(file).map_err(|e| DropzoneError::ObjectUrl(format!("{:?}", e)))
}

pub fn revoke_object_url(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        Logger::warn_with_component("Dropzone", &format!("Failed to revoke {}: {:?}", url, e));
    }
}

/// Object URLs for `files`, in the same order.
///
/// Handles live exactly as long as their file is in the list and are all
/// revoked when the calling component unmounts.
#[hook]
pub fn use_thumbnail_urls(files: Vec<File>) -> Vec<Option<String>> {
    let registry = use_mut_ref(ThumbnailUrls::new);

    let failures = registry
        .borrow_mut()
        .sync(&files, create_object_url, revoke_object_url);
    for (name, err) in failures {
        Logger::warn_with_component("Dropzone", &format!("No thumbnail for {}: {}", name, err));
    }

    {
        let registry = registry.clone();
        use_effect_with((), move |_| {
            move || registry.borrow_mut().release_all(revoke_object_url)
        });
    }

    let registry = registry.borrow();
    let urls = files
        .iter()
        .map(|file| registry.url_for(file).map(str::to_string))
        .collect();
    urls
}
