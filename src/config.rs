use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::types::RepositoryType;

const APP_NAME: &str = "lkar-console";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    /// Registry base url, scheme and host. The browser console inferred this
    /// from `window.location`; here it is explicit.
    pub url: String,
    /// Repository type served on the bare host, for deployments where a
    /// subdomain is dedicated to one type. Inferred from the first DNS label
    /// of `url` when unset.
    pub host_type: Option<RepositoryType>,
    /// Directory holding the persisted console state.
    pub storage: PathBuf,
}

impl Configuration {
    pub fn figment(configs: Vec<PathBuf>) -> Figment {
        let fig = Figment::from(Serialized::defaults(Configuration::default()));

        let app_dirs = AppDirs::new(Some(APP_NAME), true).unwrap();
        let config_path = app_dirs.config_dir.join("config.yaml");

        let fig = match config_path.exists() {
            true => fig.admerge(Yaml::file(config_path)),
            false => fig,
        };

        let fig = configs
            .into_iter()
            .fold(fig, |fig, config_path| fig.admerge(Yaml::file(config_path)));

        fig.admerge(Env::prefixed("LKAR_"))
    }

    pub fn config(figment: Figment) -> Result<Configuration> {
        figment.extract().context("Failed to load configuration")
    }

    pub fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::from_url(&self.url, self.host_type)
    }

    pub fn state_file(&self) -> PathBuf {
        self.storage.join("state.json")
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let app_dirs = AppDirs::new(Some(APP_NAME), true).unwrap();

        Self {
            // lkard's default listen address.
            url: "http://localhost:9887".to_string(),
            host_type: None,
            storage: app_dirs.data_dir,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();

        assert_eq!(config.url, "http://localhost:9887");
        assert_eq!(config.host_type, None);
        assert_eq!(config.state_file().file_name().unwrap(), "state.json");
    }

    #[test]
    fn config_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                url: https://deb.example.com
                host_type: deb
                "#,
            )?;

            let config = Configuration::config(
                Configuration::figment(vec![jail.directory().join("config.yaml")]),
            )
            .expect("Configuration should be parseable");

            assert_eq!(config.url, "https://deb.example.com");
            assert_eq!(config.host_type, Some(RepositoryType::Deb));

            let endpoint = config.endpoint().unwrap();
            assert!(endpoint.hosts_type(RepositoryType::Deb));
            assert!(!endpoint.plain_http());

            Ok(())
        });
    }

    #[test]
    fn environment_wins_over_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "url: https://a.example.com")?;
            jail.set_env("LKAR_URL", "https://b.example.com");

            let config = Configuration::config(
                Configuration::figment(vec![jail.directory().join("config.yaml")]),
            )
            .expect("Configuration should be parseable");

            assert_eq!(config.url, "https://b.example.com");

            Ok(())
        });
    }

    #[test]
    fn invalid_host_type_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "host_type: oci")?;

            let result = Configuration::config(
                Configuration::figment(vec![jail.directory().join("config.yaml")]),
            );

            assert!(result.is_err());

            Ok(())
        });
    }
}
