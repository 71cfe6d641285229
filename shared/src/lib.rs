//! Types shared by the settings frontend: the settings wire model, the
//! selectable signing files, app metadata and the draft that tracks
//! unsaved edits.

pub mod app_version;
pub mod draft;
pub mod error;
pub mod files;
pub mod settings;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use app_version::AppVersion;
pub use draft::{has_modifications, DraftValues, SettingsDraft};
pub use error::SettingsError;
pub use files::{Certificate, FileKind, KeystoreFile, ProvProfile, SelectableFile, ServiceAccountJsonFile};
pub use settings::{
    AndroidSettings, FieldValue, IosSettings, Platform, ProjectType, Settings, SettingsField,
    SettingsSection,
};
