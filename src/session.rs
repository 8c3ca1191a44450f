use tracing::{debug, warn};

use crate::client::Client;
use crate::error::ApiError;
use crate::store::{self, StateStore};
use crate::types::Credentials;

/// Whether the current session has proven itself to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing loaded or decided yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// The console's session: authentication state, the repository the session
/// is scoped to, and the cached registry credentials.
///
/// `authenticated` and `baseRepo` persist across runs through the injected
/// [`StateStore`]; credentials live in memory only and are re-fetched from
/// the registry whenever the session becomes authenticated.
pub struct Session {
    api: Client,
    store: StateStore,
    auth: AuthState,
    base_repo: Option<String>,
    credentials: Option<Credentials>,
}

impl Session {
    pub fn new(api: Client, store: StateStore) -> Session {
        Session {
            api,
            store,
            auth: AuthState::Unknown,
            base_repo: None,
            credentials: None,
        }
    }

    pub fn auth(&self) -> AuthState {
        self.auth
    }

    pub fn base_repo(&self) -> Option<&str> {
        self.base_repo.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Loads the persisted session. Without a stored authenticated flag the
    /// registry is probed once with an anonymous listing: a rejection means
    /// a login is required, which is a state transition, not an error.
    pub async fn initialize(&mut self) {
        if self.auth != AuthState::Unknown {
            return;
        }

        self.base_repo = self.store.get(store::BASE_REPO);

        if self.store.get(store::AUTHENTICATED) == Some(true) {
            self.enter_authenticated().await;
            return;
        }

        match self.api.repositories(self.base_repo.as_deref()).await {
            Ok(_) => self.enter_authenticated().await,
            Err(err) => {
                debug!("Anonymous probe rejected: {err}");
                self.enter_unauthenticated();
            }
        }
    }

    /// Validates the credentials against the registry, scoped to `repo`.
    /// The base repository is chosen and persisted before authentication is
    /// attempted; on failure the session stays unauthenticated and the error
    /// is handed back for the caller to render.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
        repo: Option<&str>,
    ) -> Result<(), ApiError> {
        self.base_repo = repo.filter(|repo| !repo.is_empty()).map(String::from);
        match self.base_repo.as_deref() {
            Some(repo) => self.store.set(store::BASE_REPO, &repo),
            None => self.store.remove(store::BASE_REPO),
        }

        let result = self
            .api
            .login(
                &credentials.user,
                &credentials.password,
                self.base_repo.as_deref(),
            )
            .await;

        match result {
            Ok(()) => {
                self.enter_authenticated().await;
                Ok(())
            }
            Err(err) => {
                self.enter_unauthenticated();
                Err(err)
            }
        }
    }

    /// Invalidates the server side session best effort and resets the local
    /// one to the undetermined state.
    pub async fn logout(&mut self) {
        self.api.logout().await;

        self.auth = AuthState::Unknown;
        self.credentials = None;
        self.base_repo = None;
        self.store.remove(store::AUTHENTICATED);
        self.store.remove(store::BASE_REPO);
    }

    async fn enter_authenticated(&mut self) {
        self.auth = AuthState::Authenticated;
        self.store.set(store::AUTHENTICATED, &true);

        // Not every backend exposes the credentials endpoint; without it the
        // generated commands keep their placeholders.
        match self.api.credentials().await {
            Ok(credentials) => self.credentials = Some(credentials),
            Err(err) => {
                warn!("Could not fetch session credentials: {err}");
                self.credentials = None;
            }
        }
    }

    fn enter_unauthenticated(&mut self) {
        self.auth = AuthState::Unauthenticated;
        self.credentials = None;
        self.store.set(store::AUTHENTICATED, &false);
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use tempfile::{TempDir, tempdir};
    use test_log::test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::endpoint::Endpoint;

    use super::*;

    fn session(server: &MockServer, dir: &TempDir) -> Session {
        let endpoint = Endpoint::from_url(&server.uri(), None).unwrap();
        let api = Client::new(endpoint).unwrap();
        let store = StateStore::open(dir.path().join("state.json"));
        Session::new(api, store)
    }

    fn credentials() -> Credentials {
        Credentials {
            user: "alice".into(),
            password: "s3cret".into(),
        }
    }

    async fn mount_credentials(server: &MockServer, expect: u64) {
        Mock::given(method("GET"))
            .and(path("/_auth/credentials"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"user": "alice", "password": "s3cret"})),
            )
            .expect(expect)
            .mount(server)
            .await;
    }

    #[test(tokio::test)]
    async fn starts_unknown() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        let session = session(&server, &dir);

        assert_eq!(session.auth(), AuthState::Unknown);
    }

    #[test(tokio::test)]
    async fn failed_probe_settles_on_unauthenticated() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_repositories/"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server, &dir);
        session.initialize().await;

        assert_eq!(session.auth(), AuthState::Unauthenticated);
        assert_eq!(session.credentials(), None);

        // Terminal: a second initialize must not probe again.
        session.initialize().await;
        assert_eq!(session.auth(), AuthState::Unauthenticated);
    }

    #[test(tokio::test)]
    async fn successful_probe_authenticates_and_fetches_credentials_once() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_repositories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        mount_credentials(&server, 1).await;

        let mut session = session(&server, &dir);
        session.initialize().await;
        session.initialize().await;

        assert_eq!(session.auth(), AuthState::Authenticated);
        assert_eq!(session.credentials().unwrap().user, "alice");
    }

    #[test(tokio::test)]
    async fn stored_flag_skips_the_probe() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        // No /_repositories mock mounted: a probe would 404 and the
        // assertion below would fail.
        mount_credentials(&server, 1).await;

        {
            let mut store = StateStore::open(dir.path().join("state.json"));
            store.set(store::AUTHENTICATED, &true);
            store.set(store::BASE_REPO, &"myrepo");
        }

        let mut session = session(&server, &dir);
        session.initialize().await;

        assert_eq!(session.auth(), AuthState::Authenticated);
        assert_eq!(session.base_repo(), Some("myrepo"));
    }

    #[test(tokio::test)]
    async fn credential_fetch_failure_degrades_to_placeholders() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_repositories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/_auth/credentials"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut session = session(&server, &dir);
        session.initialize().await;

        assert_eq!(session.auth(), AuthState::Authenticated);
        assert_eq!(session.credentials(), None);
    }

    #[test(tokio::test)]
    async fn failed_login_stays_unauthenticated() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_auth/repo1/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut session = session(&server, &dir);
        let err = session
            .login(&credentials(), Some("repo1"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(session.auth(), AuthState::Unauthenticated);
        assert_eq!(session.credentials(), None);
        // The chosen repository is persisted even when the login fails.
        assert_eq!(session.base_repo(), Some("repo1"));
    }

    #[test(tokio::test)]
    async fn successful_login_persists_the_session() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_auth/myrepo/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        mount_credentials(&server, 1).await;

        let mut session = session(&server, &dir);
        session.login(&credentials(), Some("myrepo")).await.unwrap();

        assert_eq!(session.auth(), AuthState::Authenticated);
        assert_eq!(session.credentials().unwrap().password, "s3cret");

        let store = StateStore::open(dir.path().join("state.json"));
        assert_eq!(store.get::<bool>(store::AUTHENTICATED), Some(true));
        assert_eq!(
            store.get::<String>(store::BASE_REPO),
            Some("myrepo".to_string())
        );
    }

    #[test(tokio::test)]
    async fn logout_resets_to_unknown_and_clears_persistence() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/_auth/login"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/_auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        mount_credentials(&server, 1).await;

        let mut session = session(&server, &dir);
        session.login(&credentials(), None).await.unwrap();
        session.logout().await;

        assert_eq!(session.auth(), AuthState::Unknown);
        assert_eq!(session.base_repo(), None);
        assert_eq!(session.credentials(), None);

        let store = StateStore::open(dir.path().join("state.json"));
        assert_eq!(store.get::<bool>(store::AUTHENTICATED), None);
        assert_eq!(store.get::<String>(store::BASE_REPO), None);
    }
}
