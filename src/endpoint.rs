use anyhow::{Context, Result, bail};

use crate::types::RepositoryType;

/// Where the registry lives, resolved once from configuration.
///
/// In multi-tenant deployments a subdomain names the repository type
/// (`deb.pkg.example.com` serves only DEB); `host_type` records that so URL
/// building can omit the type segment. It is configured explicitly, with the
/// first DNS label of the host as a fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    plain_http: bool,
    host_type: Option<RepositoryType>,
}

impl Endpoint {
    pub fn new(
        host: impl Into<String>,
        plain_http: bool,
        host_type: Option<RepositoryType>,
    ) -> Endpoint {
        let host = host.into();
        let host_type = host_type.or_else(|| {
            host.split(['.', ':'])
                .next()
                .and_then(|label| label.parse().ok())
        });

        Endpoint {
            host,
            plain_http,
            host_type,
        }
    }

    pub fn from_url(url: &str, host_type: Option<RepositoryType>) -> Result<Endpoint> {
        let url = reqwest::Url::parse(url).with_context(|| format!("Invalid registry url {url}"))?;

        let plain_http = match url.scheme() {
            "http" => true,
            "https" => false,
            other => bail!("Unsupported registry url scheme {other}"),
        };

        let mut host = url
            .host_str()
            .with_context(|| format!("Registry url {url} has no host"))?
            .to_string();
        if let Some(port) = url.port() {
            host = format!("{host}:{port}");
        }

        Ok(Endpoint::new(host, plain_http, host_type))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn plain_http(&self) -> bool {
        self.plain_http
    }

    pub fn scheme(&self) -> &'static str {
        match self.plain_http {
            true => "http",
            false => "https",
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.host)
    }

    /// Whether the bare host already names this repository type.
    pub fn hosts_type(&self, type_: RepositoryType) -> bool {
        self.host_type == Some(type_)
    }

    /// Host with the type segment appended, unless the host itself carries
    /// the type.
    pub fn type_host(&self, type_: RepositoryType) -> String {
        match self.hosts_type(type_) {
            true => self.host.clone(),
            false => format!("{}/{type_}", self.host),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_url_splits_scheme_and_host() {
        let endpoint = Endpoint::from_url("https://pkg.example.com", None).unwrap();

        assert_eq!(endpoint.host(), "pkg.example.com");
        assert!(!endpoint.plain_http());
        assert_eq!(endpoint.base_url(), "https://pkg.example.com");
    }

    #[test]
    fn from_url_keeps_explicit_port() {
        let endpoint = Endpoint::from_url("http://localhost:9887", None).unwrap();

        assert_eq!(endpoint.host(), "localhost:9887");
        assert!(endpoint.plain_http());
        assert_eq!(endpoint.scheme(), "http");
    }

    #[test]
    fn from_url_rejects_other_schemes() {
        assert!(Endpoint::from_url("ftp://example.com", None).is_err());
        assert!(Endpoint::from_url("not a url", None).is_err());
    }

    #[test]
    fn host_type_inferred_from_first_label() {
        let endpoint = Endpoint::from_url("https://deb.example.com", None).unwrap();

        assert!(endpoint.hosts_type(RepositoryType::Deb));
        assert_eq!(endpoint.type_host(RepositoryType::Deb), "deb.example.com");
        assert_eq!(
            endpoint.type_host(RepositoryType::Rpm),
            "deb.example.com/rpm"
        );
    }

    #[test]
    fn explicit_host_type_wins_over_inference() {
        let endpoint =
            Endpoint::from_url("https://deb.example.com", Some(RepositoryType::Apk)).unwrap();

        assert!(endpoint.hosts_type(RepositoryType::Apk));
        assert!(!endpoint.hosts_type(RepositoryType::Deb));
    }

    #[test]
    fn plain_hosts_have_no_host_type() {
        let endpoint = Endpoint::from_url("https://example.com", None).unwrap();

        for type_ in RepositoryType::ALL {
            assert!(!endpoint.hosts_type(type_));
            assert_eq!(
                endpoint.type_host(type_),
                format!("example.com/{type_}")
            );
        }
    }
}
