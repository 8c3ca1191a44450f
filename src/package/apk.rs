use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::types::RepositoryType;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub version_metadata: ApkVersionMetadata,
    #[serde(default)]
    pub file_metadata: ApkFileMetadata,
    pub size: u64,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub repo: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkVersionMetadata {
    pub maintainer: Option<String>,
    #[serde(rename = "projectURL")]
    pub project_url: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkFileMetadata {
    #[serde(default)]
    pub checksum: String,
    pub packager: Option<String>,
    pub build_date: Option<i64>,
    pub size: Option<u64>,
    pub architecture: Option<String>,
    pub origin: Option<String>,
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl From<ApkPackage> for Package {
    fn from(apk: ApkPackage) -> Self {
        Package {
            type_: RepositoryType::Apk,
            name: apk.name,
            size: apk.size,
            version: apk.version,
            architecture: apk.file_metadata.architecture.unwrap_or_default(),
            license: apk.version_metadata.license,
            description: apk.version_metadata.description.unwrap_or_default(),
            summary: None,
            project_url: apk.version_metadata.project_url.unwrap_or_default(),
            last_updated: None,
            file_path: apk.file_path,
        }
    }
}
