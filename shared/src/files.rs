use serde::{Deserialize, Serialize};
use std::fmt;

/// Uploaded iOS provisioning profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvProfile {
    pub name: String,
    pub slug: String,
}

/// Uploaded iOS code signing certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    pub slug: String,
}

/// Uploaded Android keystore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreFile {
    pub name: String,
    pub slug: String,
}

/// Uploaded Google Play service account credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountJsonFile {
    pub name: String,
    pub slug: String,
}

/// Kind of a selectable file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    ProvProfile,
    Certificate,
    KeystoreFile,
    ServiceAccountJsonFile,
}

impl FileKind {
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::ProvProfile => "ProvProfile",
            FileKind::Certificate => "Certificate",
            FileKind::KeystoreFile => "KeystoreFile",
            FileKind::ServiceAccountJsonFile => "ServiceAccountJsonFile",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any file the user can pick for signing or publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectableFile {
    ProvProfile(ProvProfile),
    Certificate(Certificate),
    KeystoreFile(KeystoreFile),
    ServiceAccountJsonFile(ServiceAccountJsonFile),
}

impl SelectableFile {
    pub fn kind(&self) -> FileKind {
        match self {
            SelectableFile::ProvProfile(_) => FileKind::ProvProfile,
            SelectableFile::Certificate(_) => FileKind::Certificate,
            SelectableFile::KeystoreFile(_) => FileKind::KeystoreFile,
            SelectableFile::ServiceAccountJsonFile(_) => FileKind::ServiceAccountJsonFile,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            SelectableFile::ProvProfile(file) => &file.slug,
            SelectableFile::Certificate(file) => &file.slug,
            SelectableFile::KeystoreFile(file) => &file.slug,
            SelectableFile::ServiceAccountJsonFile(file) => &file.slug,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SelectableFile::ProvProfile(file) => &file.name,
            SelectableFile::Certificate(file) => &file.name,
            SelectableFile::KeystoreFile(file) => &file.name,
            SelectableFile::ServiceAccountJsonFile(file) => &file.name,
        }
    }
}

impl From<ProvProfile> for SelectableFile {
    fn from(file: ProvProfile) -> Self {
        SelectableFile::ProvProfile(file)
    }
}

impl From<Certificate> for SelectableFile {
    fn from(file: Certificate) -> Self {
        SelectableFile::Certificate(file)
    }
}

impl From<KeystoreFile> for SelectableFile {
    fn from(file: KeystoreFile) -> Self {
        SelectableFile::KeystoreFile(file)
    }
}

impl From<ServiceAccountJsonFile> for SelectableFile {
    fn from(file: ServiceAccountJsonFile) -> Self {
        SelectableFile::ServiceAccountJsonFile(file)
    }
}
