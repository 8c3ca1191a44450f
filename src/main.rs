use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lkar_console::config::Configuration;
use lkar_console::session::{AuthState, Session};
use lkar_console::snippets::{curl, lkar};
use lkar_console::store::StateStore;
use lkar_console::types::{Credentials, RepositoryType};
use lkar_console::{Client, query};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Extra configuration files, later files override earlier ones.
    #[clap(short, long, value_parser)]
    config: Vec<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in to the registry, optionally scoped to one repository.
    Login {
        #[clap(short, long)]
        user: String,
        #[clap(short, long)]
        password: String,
        repo: Option<String>,
    },
    /// Drop the cached session.
    Logout,
    /// List repositories.
    Repositories { repo: Option<String> },
    /// List the packages of one repository type.
    Packages {
        #[clap(value_parser = parse_type)]
        type_: RepositoryType,
        repo: Option<String>,
        /// Restrict to one sub-repository, e.g. `stable/main`.
        #[clap(long)]
        sub: Option<String>,
    },
    /// Print lkar and curl command lines for a repository.
    Snippets {
        #[clap(value_parser = parse_type)]
        type_: RepositoryType,
        repo: Option<String>,
        #[clap(long)]
        sub: Option<String>,
        /// Substitute the session credentials for $USER/$PASSWORD. The
        /// secret ends up in your terminal; prefer the placeholder form.
        #[clap(long)]
        with_credentials: bool,
    },
}

fn parse_type(value: &str) -> Result<RepositoryType, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Opt::parse();

    let config = Configuration::config(Configuration::figment(options.config))?;
    let endpoint = config.endpoint()?;
    let client = Client::new(endpoint.clone())?;
    let store = StateStore::open(config.state_file());
    let mut session = Session::new(client.clone(), store);

    match options.command {
        Command::Login {
            user,
            password,
            repo,
        } => {
            let credentials = Credentials { user, password };
            match session.login(&credentials, repo.as_deref()).await {
                Ok(()) => println!("Logged in to {}", endpoint.host()),
                Err(err) if err.is_unauthorized() => bail!("invalid username or password"),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out of {}", endpoint.host());
        }
        Command::Repositories { repo } => {
            session.initialize().await;
            require_login(&session, endpoint.host())?;

            let repo = repo.as_deref().or(session.base_repo());
            for repository in client.repositories(repo).await? {
                let name = repository.name.as_deref().unwrap_or("<root>");
                println!(
                    "{:4} {:24} {:5} packages {:10} bytes updated {}",
                    repository.type_.to_string(),
                    name,
                    repository.packages.count,
                    repository.size,
                    repository.last_updated.format("%Y-%m-%d %H:%M:%S"),
                );
            }
        }
        Command::Packages { type_, repo, sub } => {
            session.initialize().await;
            require_login(&session, endpoint.host())?;

            let repo = repo.as_deref().or(session.base_repo());
            let packages = client.packages(type_, repo).await?;

            let subs = query::sub_repositories(&packages, type_);
            if !subs.is_empty() {
                println!("sub-repositories: {}", subs.join(", "));
            }

            let sub = sub.unwrap_or_default();
            for package in query::sub_repository_packages(&packages, type_, &sub) {
                println!(
                    "{:24} {:12} {:8} {:10} bytes {}",
                    package.name, package.version, package.architecture, package.size,
                    package.file_path,
                );
            }
        }
        Command::Snippets {
            type_,
            repo,
            sub,
            with_credentials,
        } => {
            session.initialize().await;

            // The credential-bearing rendition is opt-in; by default the
            // placeholders keep secrets off the screen.
            let credentials = match with_credentials {
                true => session.credentials(),
                false => None,
            };
            let repo = repo.as_deref().or(session.base_repo());
            let sub = sub.as_deref();

            println!("# lkar");
            println!("{}", lkar::login(&endpoint, repo, credentials));
            println!("{}", lkar::setup(&endpoint, type_, repo, sub));
            println!("{}", lkar::push(&endpoint, type_, repo, sub));
            println!();
            println!("# curl");
            println!("{}", curl::setup(&endpoint, type_, repo, sub, credentials));
            println!("{}", curl::push(&endpoint, type_, repo, sub, credentials));
        }
    }

    Ok(())
}

fn require_login(session: &Session, host: &str) -> Result<()> {
    if session.auth() == AuthState::Unauthenticated {
        bail!("{host} requires authentication; run `lkar-console login` first");
    }
    Ok(())
}
