use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RepositoryType;

pub(crate) mod apk;
pub(crate) mod deb;
pub(crate) mod helm;
pub(crate) mod rpm;

pub use apk::ApkPackage;
pub use deb::DebPackage;
pub use helm::HelmChart;
pub use rpm::RpmPackage;

/// Uniform package shape the console works with, regardless of format.
///
/// `file_path` is the backend's path string, untouched: it keys package
/// lists and is the argument of generated delete commands.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(rename = "type")]
    pub type_: RepositoryType,
    pub name: String,
    pub size: u64,
    pub version: String,
    pub architecture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "projectURL")]
    pub project_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub file_path: String,
}

/// A package record as the backend serves it, one variant per format.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPackage {
    Apk(ApkPackage),
    Deb(DebPackage),
    Rpm(RpmPackage),
    Helm(HelmChart),
}

impl Package {
    pub fn from_raw(raw: RawPackage) -> Package {
        match raw {
            RawPackage::Apk(package) => package.into(),
            RawPackage::Deb(package) => package.into(),
            RawPackage::Rpm(package) => package.into(),
            RawPackage::Helm(chart) => chart.into(),
        }
    }
}
