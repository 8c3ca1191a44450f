use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::types::RepositoryType;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChart {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub home: String,
    pub size: u64,
    pub file_path: String,
}

// Charts have no target architecture; "noarch" keeps the display uniform.
impl From<HelmChart> for Package {
    fn from(chart: HelmChart) -> Self {
        Package {
            type_: RepositoryType::Helm,
            name: chart.name,
            size: chart.size,
            version: chart.version,
            architecture: "noarch".to_string(),
            license: None,
            description: chart.description,
            summary: None,
            project_url: chart.home,
            last_updated: None,
            file_path: chart.file_path,
        }
    }
}
