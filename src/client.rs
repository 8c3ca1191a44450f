use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::package::{ApkPackage, DebPackage, HelmChart, Package, RawPackage, RpmPackage};
use crate::types::{Credentials, Repository, RepositoryType};

/// HTTP client for the registry's console API.
///
/// Every operation returns `Result<_, ApiError>`; transport failures,
/// non-2xx statuses and undecodable bodies all come back as values, never as
/// panics.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl Client {
    pub fn new(endpoint: Endpoint) -> Result<Client, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lkar-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Client { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint.base_url())
    }

    /// Checks the credentials against the login endpoint, scoped to `repo`
    /// when given. Persists nothing; session state is the caller's concern.
    pub async fn login(
        &self,
        user: &str,
        password: &str,
        repo: Option<&str>,
    ) -> Result<(), ApiError> {
        let path = match repo {
            Some(repo) if !repo.is_empty() => format!("/_auth/{repo}/login"),
            _ => "/_auth/login".to_string(),
        };

        let response = self
            .http
            .get(self.url(&path))
            .basic_auth(user, Some(password))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(())
    }

    /// Fire and forget: server side session invalidation is idempotent, so a
    /// failed request only means the session expires on its own.
    pub async fn logout(&self) {
        if let Err(err) = self.http.post(self.url("/_auth/logout")).send().await {
            debug!("Logout request failed: {err}");
        }
    }

    pub async fn credentials(&self) -> Result<Credentials, ApiError> {
        self.get_json(&self.url("/_auth/credentials")).await
    }

    pub async fn repositories(&self, repo: Option<&str>) -> Result<Vec<Repository>, ApiError> {
        let repo = repo.unwrap_or("");
        let mut repositories: Vec<Repository> = self
            .get_json(&self.url(&format!("/_repositories/{repo}")))
            .await?;

        repositories.sort_by(|a, b| {
            a.type_.as_str().cmp(b.type_.as_str()).then_with(|| {
                a.name
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.name.as_deref().unwrap_or(""))
            })
        });

        Ok(repositories)
    }

    pub async fn packages(
        &self,
        type_: RepositoryType,
        repo: Option<&str>,
    ) -> Result<Vec<Package>, ApiError> {
        let repo = repo.unwrap_or("");
        // Hosts dedicated to one type serve their packages without the type
        // segment.
        let path = match self.endpoint.hosts_type(type_) {
            true => format!("/_packages/{repo}"),
            false => format!("/_packages/{type_}/{repo}"),
        };
        let url = self.url(&path);

        let mut packages: Vec<Package> = match type_ {
            RepositoryType::Apk => self
                .get_json::<Vec<ApkPackage>>(&url)
                .await?
                .into_iter()
                .map(RawPackage::Apk)
                .map(Package::from_raw)
                .collect(),
            RepositoryType::Deb => self
                .get_json::<Vec<DebPackage>>(&url)
                .await?
                .into_iter()
                .map(RawPackage::Deb)
                .map(Package::from_raw)
                .collect(),
            RepositoryType::Rpm => self
                .get_json::<Vec<RpmPackage>>(&url)
                .await?
                .into_iter()
                .map(RawPackage::Rpm)
                .map(Package::from_raw)
                .collect(),
            RepositoryType::Helm => self
                .get_json::<Vec<HelmChart>>(&url)
                .await?
                .into_iter()
                .map(RawPackage::Helm)
                .map(Package::from_raw)
                .collect(),
        };

        packages.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(packages)
    }

    // Bodies are decoded from text so status, transport and decode failures
    // stay distinguishable.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
