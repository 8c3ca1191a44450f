use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::types::RepositoryType;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpmPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub version_metadata: RpmVersionMetadata,
    #[serde(default)]
    pub file_metadata: RpmFileMetadata,
    #[serde(default)]
    pub hash_sha256: String,
    pub size: u64,
    pub file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpmVersionMetadata {
    pub license: Option<String>,
    #[serde(rename = "projectURL")]
    pub project_url: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpmFileMetadata {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub epoch: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub release: String,
    pub vendor: Option<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub packager: String,
    #[serde(rename = "sourceRPM", default)]
    pub source_rpm: String,
    #[serde(default)]
    pub build_host: String,
    /// Unix build time in seconds.
    #[serde(default)]
    pub build_time: i64,
    pub installed_size: Option<u64>,
    #[serde(default)]
    pub archive_size: u64,
}

impl From<RpmPackage> for Package {
    fn from(rpm: RpmPackage) -> Self {
        Package {
            type_: RepositoryType::Rpm,
            name: rpm.name,
            size: rpm.size,
            version: rpm.version,
            architecture: rpm.file_metadata.architecture,
            license: Some(rpm.version_metadata.license.unwrap_or_default()),
            description: rpm.version_metadata.description,
            summary: Some(rpm.version_metadata.summary),
            project_url: rpm.version_metadata.project_url.unwrap_or_default(),
            last_updated: DateTime::from_timestamp(rpm.file_metadata.build_time, 0),
            file_path: rpm.file_path,
        }
    }
}
