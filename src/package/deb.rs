use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::types::RepositoryType;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebPackage {
    pub name: String,
    pub version: String,
    pub size: u64,
    pub architecture: String,
    #[serde(default)]
    pub control: String,
    pub metadata: DebMetadata,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub distribution: String,
    #[serde(default)]
    pub md5: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub sha512: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebMetadata {
    #[serde(default)]
    pub maintainer: String,
    #[serde(rename = "projectURL", default)]
    pub project_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

// DEB control files carry no separate summary, so none is synthesized.
impl From<DebPackage> for Package {
    fn from(deb: DebPackage) -> Self {
        Package {
            type_: RepositoryType::Deb,
            name: deb.name,
            size: deb.size,
            version: deb.version,
            architecture: deb.architecture,
            license: None,
            description: deb.metadata.description,
            summary: None,
            project_url: deb.metadata.project_url,
            last_updated: None,
            file_path: deb.file_path,
        }
    }
}
