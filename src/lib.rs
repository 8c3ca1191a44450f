pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod package;
pub mod query;
pub mod session;
pub mod snippets;
pub mod store;
pub mod types;

pub use client::Client;
pub use config::Configuration;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use package::{Package, RawPackage};
pub use session::{AuthState, Session};
pub use store::StateStore;
pub use types::{Credentials, Repository, RepositoryType, Stats};
