use thiserror::Error;

use crate::settings::{SettingsField, SettingsSection};

/// Errors raised when a settings mutation is addressed inconsistently
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown settings section `{0}`")]
    UnknownSection(String),

    #[error("unknown settings field `{0}`")]
    UnknownField(String),

    #[error("field `{}` does not belong to section `{}`", .field.name(), .section.name())]
    FieldNotInSection {
        section: SettingsSection,
        field: SettingsField,
    },

    #[error("field `{}` expects a {expected} value", .field.name())]
    ValueTypeMismatch {
        field: SettingsField,
        expected: &'static str,
    },
}
