//! File intake rules of the dropzone, independent of the DOM.

use std::collections::HashMap;

use super::DropzoneError;

pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// What the dropzone needs to know about an incoming file
pub trait IntakeFile {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;

    /// Key identifying the file's display handle
    fn handle_key(&self) -> String {
        self.name()
    }
}

impl IntakeFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        self.type_()
    }

    fn handle_key(&self) -> String {
        format!("{}:{}:{}", web_sys::File::name(self), self.size(), self.last_modified())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropzoneMode {
    Single,
    Multiple,
}

impl DropzoneMode {
    pub fn from_is_multiple(is_multiple: bool) -> Self {
        if is_multiple {
            DropzoneMode::Multiple
        } else {
            DropzoneMode::Single
        }
    }
}

/// Content of the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPrompt {
    /// "Drag & Drop or Browse Files"
    Empty,
    /// Compact plus sign next to the existing thumbnails
    AddMore,
}

pub fn is_image(file: &impl IntakeFile) -> bool {
    file.mime_type().starts_with(ACCEPTED_MIME_PREFIX)
}

/// Split incoming files into the ones forwarded to the caller and the
/// rejected rest. In single mode at most the first image is accepted.
pub fn accept_images<F: IntakeFile>(files: Vec<F>, mode: DropzoneMode) -> (Vec<F>, Vec<F>) {
    let (mut accepted, mut rejected): (Vec<F>, Vec<F>) = files.into_iter().partition(is_image);

    if mode == DropzoneMode::Single && accepted.len() > 1 {
        rejected.extend(accepted.drain(1..));
    }

    (accepted, rejected)
}

/// The drop target disappears in single mode once a file is present
pub fn shows_drop_target(mode: DropzoneMode, file_count: usize) -> bool {
    mode == DropzoneMode::Multiple || file_count == 0
}

pub fn drop_prompt(file_count: usize) -> DropPrompt {
    if file_count == 0 {
        DropPrompt::Empty
    } else {
        DropPrompt::AddMore
    }
}

/// Copy of `files` without the first entry equal to `file`
pub fn remove_first<T: PartialEq + Clone>(files: &[T], file: &T) -> Vec<T> {
    let mut remaining = files.to_vec();
    if let Some(index) = remaining.iter().position(|candidate| candidate == file) {
        remaining.remove(index);
    }
    remaining
}

/// Object URLs backing the rendered thumbnails, keyed by [`IntakeFile::handle_key`]
#[derive(Debug, Default)]
pub struct ThumbnailUrls {
    urls: HashMap<String, String>,
}

impl ThumbnailUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the registry match `files`: create handles for new files and
    /// revoke the ones whose file left the list. Files whose handle could
    /// not be created are returned with the error and simply have no URL.
    pub fn sync<F, C, R>(&mut self, files: &[F], mut create: C, mut revoke: R) -> Vec<(String, DropzoneError)>
    where
        F: IntakeFile,
        C: FnMut(&F) -> Result<String, DropzoneError>,
        R: FnMut(&str),
    {
        let keys: Vec<String> = files.iter().map(IntakeFile::handle_key).collect();

        self.urls.retain(|key, url| {
            let keep = keys.contains(key);
            if !keep {
                revoke(url);
            }
            keep
        });

        let mut failures = Vec::new();
        for (file, key) in files.iter().zip(keys) {
            if self.urls.contains_key(&key) {
                continue;
            }
            match create(file) {
                Ok(url) => {
                    self.urls.insert(key, url);
                }
                Err(err) => failures.push((file.name(), err)),
            }
        }

        failures
    }

    pub fn url_for(&self, file: &impl IntakeFile) -> Option<&str> {
        self.urls.get(&file.handle_key()).map(String::as_str)
    }

    /// Revoke every handle, used when the dropzone goes away
    pub fn release_all(&mut self, mut revoke: impl FnMut(&str)) {
        for (_, url) in self.urls.drain() {
            revoke(&url);
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
