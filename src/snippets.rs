//! Copy-pasteable command lines for working with the registry.
//!
//! Every builder comes in two renditions: without credentials the
//! `$USER`/`$PASSWORD` placeholders keep the string safe to display; with
//! credentials the literal secret is substituted. The latter is the "hidden"
//! clipboard variant and must never be rendered on screen.

use crate::endpoint::Endpoint;
use crate::types::{Credentials, RepositoryType};

const USER_PLACEHOLDER: &str = "$USER";
const PASSWORD_PLACEHOLDER: &str = "$PASSWORD";

fn user(credentials: Option<&Credentials>) -> &str {
    credentials
        .map(|credentials| credentials.user.as_str())
        .unwrap_or(USER_PLACEHOLDER)
}

fn password(credentials: Option<&Credentials>) -> &str {
    credentials
        .map(|credentials| credentials.password.as_str())
        .unwrap_or(PASSWORD_PLACEHOLDER)
}

fn plain_http(endpoint: &Endpoint) -> &'static str {
    match endpoint.plain_http() {
        true => "--plain-http ",
        false => "",
    }
}

fn host_repo(endpoint: &Endpoint, repo: Option<&str>) -> String {
    match repo {
        Some(repo) if !repo.is_empty() => format!("{}/{repo}", endpoint.host()),
        _ => endpoint.host().to_string(),
    }
}

fn segment(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => format!("/{value}"),
        _ => String::new(),
    }
}

// Sub-repositories render as `distribution component` argument pairs.
fn sub_args(sub: &str) -> String {
    sub.splitn(2, '/').collect::<Vec<_>>().join(" ")
}

pub mod lkar {
    use super::*;

    pub fn login(
        endpoint: &Endpoint,
        repo: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> String {
        format!(
            "lkar login -u {} -p {} {}{}",
            user(credentials),
            password(credentials),
            plain_http(endpoint),
            host_repo(endpoint, repo),
        )
    }

    pub fn setup(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        sub: Option<&str>,
    ) -> String {
        let mut command = format!(
            "lkar {type_} setup {}{}",
            plain_http(endpoint),
            host_repo(endpoint, repo),
        );
        if let Some(sub) = sub {
            command.push(' ');
            command.push_str(&sub_args(sub));
        }
        command
    }

    pub fn push(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        sub: Option<&str>,
    ) -> String {
        let mut command = format!(
            "lkar {type_} push {}{}",
            plain_http(endpoint),
            host_repo(endpoint, repo),
        );
        if let Some(sub) = sub {
            command.push(' ');
            command.push_str(&sub_args(sub));
        }
        command.push_str(&format!(" # my-package.{type_}"));
        command
    }

    pub fn delete(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        file_path: &str,
    ) -> String {
        format!(
            "lkar {type_} delete {}{} {file_path}",
            plain_http(endpoint),
            host_repo(endpoint, repo),
        )
    }
}

pub mod curl {
    use super::*;

    fn auth(credentials: Option<&Credentials>) -> String {
        format!(
            "--user \"{}:{}\"",
            user(credentials),
            password(credentials)
        )
    }

    pub fn setup(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        sub: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> String {
        format!(
            "curl {} {}://{}{}{}/setup | sudo sh",
            auth(credentials),
            endpoint.scheme(),
            endpoint.type_host(type_),
            segment(repo),
            segment(sub),
        )
    }

    pub fn push(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        sub: Option<&str>,
        credentials: Option<&Credentials>,
    ) -> String {
        format!(
            "curl {} {}://{}{}{}/push --upload-file # my-package.{type_}",
            auth(credentials),
            endpoint.scheme(),
            endpoint.type_host(type_),
            segment(repo),
            segment(sub),
        )
    }

    pub fn delete(
        endpoint: &Endpoint,
        type_: RepositoryType,
        repo: Option<&str>,
        file_path: &str,
        credentials: Option<&Credentials>,
    ) -> String {
        format!(
            "curl {} -X DELETE {}://{}{}/{file_path}",
            auth(credentials),
            endpoint.scheme(),
            endpoint.type_host(type_),
            segment(repo),
        )
    }
}
