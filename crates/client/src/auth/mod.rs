//! Session lifecycle: credential storage, token decoding, and the manager
//! that drives sign-in, silent restore, and sign-out.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use kiogloss_core::{AccountId, Email, UserId};

use crate::api::Gateway;
use crate::models::account::{LoginRequest, RegisterRequest, UserDetail};

mod claims;
mod credentials;
mod error;

pub use claims::{AccessClaims, ClaimsError, decode_unverified};
pub use credentials::{CredentialStore, TokenPair};
pub use error::AuthError;

/// Role name the backend grants administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

// ============================================================================
// Identity
// ============================================================================

/// Who is signed in, as far as the client knows.
///
/// Built from token claims the moment a session starts, then enriched with
/// the account id and display name from the profile endpoint. Role checks
/// never wait on enrichment.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    /// Email address, taken from the token's subject.
    pub email: String,
    pub roles: Vec<String>,
    /// Populated by profile enrichment; `None` until it lands.
    pub account_id: Option<AccountId>,
    /// Display name, also from enrichment.
    pub name: Option<String>,
}

impl Identity {
    fn from_claims(claims: &AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.sub.clone(),
            roles: claims.roles.clone(),
            account_id: None,
            name: None,
        }
    }

    fn merge_profile(&mut self, detail: &UserDetail) {
        self.account_id = Some(detail.account.id);
        self.name = Some(detail.name.clone());
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

/// Coarse session state for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// Restore or sign-in is in flight.
    Pending,
    Authenticated,
}

// ============================================================================
// Session manager
// ============================================================================

/// Drives the session lifecycle on top of the gateway's credential store.
pub struct SessionManager {
    gateway: Gateway,
    identity: RwLock<Option<Identity>>,
    loading: AtomicBool,
}

impl SessionManager {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            identity: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.loading.load(Ordering::SeqCst) {
            return SessionState::Pending;
        }
        if self.identity().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// The current identity, or `None` when anonymous.
    ///
    /// An identity is only live while a credential pair exists, so a
    /// terminal invalidation inside the gateway collapses the session to
    /// anonymous on the next read without a callback.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        if self.gateway.credentials().current().is_none() {
            return None;
        }
        self.identity
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The enriched account id, if a session is live and enrichment landed.
    #[must_use]
    pub fn account_id(&self) -> Option<AccountId> {
        self.identity().and_then(|id| id.account_id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// False when anonymous.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.identity().is_some_and(|id| id.has_role(role))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Silently restore a persisted session, if one exists and is usable.
    ///
    /// Never fails: a missing, malformed, or expired token just leaves the
    /// session anonymous with storage wiped. A live token yields a partial
    /// identity immediately; profile enrichment follows and is dropped if
    /// the session was invalidated while it was in flight.
    pub async fn bootstrap(&self) {
        self.loading.store(true, Ordering::SeqCst);
        self.restore().await;
        self.loading.store(false, Ordering::SeqCst);
    }

    async fn restore(&self) {
        let credentials = self.gateway.credentials();
        let Some(pair) = credentials.current() else {
            return;
        };

        let claims = match decode_unverified(&pair.access) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!(error = %err, "stored token is malformed; discarding session");
                credentials.invalidate();
                return;
            }
        };
        if claims.is_expired(chrono::Utc::now()) {
            tracing::debug!("stored token has expired; discarding session");
            credentials.invalidate();
            return;
        }

        self.set_identity(Some(Identity::from_claims(&claims)));
        self.enrich(claims.user_id).await;
    }

    /// Exchange credentials for a session.
    ///
    /// Does not touch the loading flag: only [`SessionManager::bootstrap`]
    /// reports [`SessionState::Pending`], and a rejected sign-in leaves any
    /// existing session exactly as it was.
    pub async fn login(&self, email: Email, password: String) -> Result<Identity, AuthError> {
        let request = LoginRequest { email, password };
        let pair: TokenPair = self
            .gateway
            .post("/login", &request)
            .await
            .map_err(error::classify_login_error)?;
        self.establish(pair).await
    }

    /// Create an account. The backend signs the new user in and answers
    /// with a credential pair, so this ends in a live session like login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Identity, AuthError> {
        let pair: TokenPair = self.gateway.post("/user/", request).await?;
        self.establish(pair).await
    }

    /// Install a fresh credential pair and stand up the identity behind it.
    async fn establish(&self, pair: TokenPair) -> Result<Identity, AuthError> {
        let claims = decode_unverified(&pair.access)?;
        self.gateway.credentials().install(pair);
        self.set_identity(Some(Identity::from_claims(&claims)));
        self.enrich(claims.user_id).await;
        self.identity().ok_or(AuthError::InvalidCredentials)
    }

    /// Drop the session. Idempotent; purely local.
    pub fn logout(&self) {
        self.gateway.credentials().invalidate();
        self.set_identity(None);
    }

    /// Fetch the profile and fold the account id and name into the identity.
    ///
    /// The epoch snapshot taken before the request guards against a logout
    /// racing the response: a stale result is discarded, not applied.
    async fn enrich(&self, user_id: UserId) {
        let credentials = self.gateway.credentials();
        let observed = credentials.epoch();

        let detail: UserDetail = match self.gateway.get(&format!("/user/{user_id}")).await {
            Ok(detail) => detail,
            Err(err) => {
                tracing::warn!(error = %err, "profile enrichment failed; identity stays partial");
                return;
            }
        };

        if credentials.is_stale(observed) {
            tracing::debug!("session changed during enrichment; discarding profile");
            return;
        }

        let mut slot = self
            .identity
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(identity) = slot.as_mut() {
            identity.merge_profile(&detail);
        }
    }

    fn set_identity(&self, identity: Option<Identity>) {
        *self
            .identity
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = identity;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::claims::tests::token_with;
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::{KeyValueStore, MemoryStore, keys};

    /// Manager whose backend is a port nothing listens on.
    fn offline_manager(storage: Arc<dyn KeyValueStore>) -> SessionManager {
        let credentials = Arc::new(CredentialStore::new(storage));
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".parse().expect("url"),
            ..ClientConfig::default()
        };
        let gateway = Gateway::new(&config, credentials).expect("gateway");
        SessionManager::new(gateway)
    }

    fn seed_token(storage: &Arc<dyn KeyValueStore>, exp: i64, roles: &[&str]) {
        let token = token_with(&serde_json::json!({
            "sub": "ana@example.com",
            "user_id": 7,
            "roles": roles,
            "exp": exp,
        }));
        let raw = serde_json::json!({ "access": token, "refresh": "r" }).to_string();
        storage.put(keys::AUTH, &raw).expect("seed");
    }

    #[test]
    fn test_identity_roles() {
        let claims = AccessClaims {
            sub: "ana@example.com".to_owned(),
            user_id: UserId::from(7),
            roles: vec!["ROLE_USER".to_owned(), ROLE_ADMIN.to_owned()],
            exp: i64::MAX,
            iat: 0,
        };
        let identity = Identity::from_claims(&claims);
        assert!(identity.is_admin());
        assert!(identity.has_role("ROLE_USER"));
        assert!(!identity.has_role("ROLE_SUPPORT"));
        assert!(identity.account_id.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_without_credentials_stays_anonymous() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let manager = offline_manager(storage);
        manager.bootstrap().await;
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_bootstrap_discards_expired_token() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        seed_token(&storage, 1_000, &["ROLE_USER"]);

        let manager = offline_manager(Arc::clone(&storage));
        manager.bootstrap().await;

        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(storage.get(keys::AUTH).is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_discards_malformed_token() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let raw = serde_json::json!({ "access": "not-a-jwt", "refresh": "r" }).to_string();
        storage.put(keys::AUTH, &raw).expect("seed");

        let manager = offline_manager(Arc::clone(&storage));
        manager.bootstrap().await;

        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(storage.get(keys::AUTH).is_none());
    }

    #[tokio::test]
    async fn test_live_token_authenticates_even_when_enrichment_fails() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        seed_token(&storage, i64::MAX, &["ROLE_USER", "ROLE_ADMIN"]);

        let manager = offline_manager(storage);
        manager.bootstrap().await;

        assert_eq!(manager.state(), SessionState::Authenticated);
        let identity = manager.identity().expect("identity");
        assert!(identity.is_admin());
        assert!(manager.is_admin());
        assert!(manager.is_authenticated());
        assert_eq!(identity.email, "ana@example.com");
        // Enrichment could not reach the backend.
        assert!(identity.account_id.is_none());
        assert!(manager.account_id().is_none());
    }

    #[tokio::test]
    async fn test_credential_invalidation_collapses_session() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        seed_token(&storage, i64::MAX, &["ROLE_USER"]);

        let manager = offline_manager(storage);
        manager.bootstrap().await;
        assert!(manager.is_authenticated());

        // A terminal invalidation inside the gateway, without any session
        // manager involvement.
        manager.gateway.credentials().invalidate();

        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(manager.identity().is_none());
        assert!(!manager.has_role("ROLE_USER"));
    }

    #[tokio::test]
    async fn test_login_never_reports_pending() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let manager = offline_manager(storage);

        let email: Email = "ana@example.com".parse().expect("email");
        let mut login = Box::pin(manager.login(email, "secret".to_owned()));
        let mut cx = std::task::Context::from_waker(std::task::Waker::noop());

        // Drive the sign-in to its first suspension point; Pending is
        // reserved for bootstrap.
        if std::future::Future::poll(login.as_mut(), &mut cx).is_pending() {
            assert_eq!(manager.state(), SessionState::Anonymous);
        }
        drop(login);
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        seed_token(&storage, i64::MAX, &["ROLE_USER"]);

        let manager = offline_manager(Arc::clone(&storage));
        manager.bootstrap().await;
        assert_eq!(manager.state(), SessionState::Authenticated);

        manager.logout();
        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(storage.get(keys::AUTH).is_none());

        manager.logout();
        assert_eq!(manager.state(), SessionState::Anonymous);
    }
}
