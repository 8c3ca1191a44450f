use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Package formats the registry can serve.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Deserialize, Serialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    Apk,
    Deb,
    Rpm,
    Helm,
}

impl RepositoryType {
    pub const ALL: [RepositoryType; 4] = [
        RepositoryType::Apk,
        RepositoryType::Deb,
        RepositoryType::Rpm,
        RepositoryType::Helm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryType::Apk => "apk",
            RepositoryType::Deb => "deb",
            RepositoryType::Rpm => "rpm",
            RepositoryType::Helm => "helm",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "apk" => Ok(RepositoryType::Apk),
            "deb" => Ok(RepositoryType::Deb),
            "rpm" => Ok(RepositoryType::Rpm),
            "helm" => Ok(RepositoryType::Helm),
            _ => Err(format!("Unsupported repository type: {value}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stats {
    pub count: u64,
    pub size: u64,
}

/// Repository summary as returned by `/_repositories/`. `name` is absent for
/// the root repository; identity is the `(name, type)` pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_: RepositoryType,
    pub size: u64,
    pub last_updated: DateTime<Utc>,
    pub metadata: Stats,
    pub packages: Stats,
}

#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

// The password must never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
