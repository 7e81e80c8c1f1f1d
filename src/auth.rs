//! Account sign-in against a GoTrue-compatible auth service
//!
//! Sessions persist through the same key-value store as the rest of the
//! app, so a signed-in user keeps their namespace across runs. All
//! requests carry the project's anon key; token-bearing requests add a
//! bearer header on top.

use crate::error::KitchenError;
use crate::store::{KeyValueStore, StorageKey, ANONYMOUS_NAMESPACE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Storage purpose under which the active session is kept.
pub const SESSION_PURPOSE: &str = "auth-session";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user id, used as the storage namespace
    pub id: String,
    /// Email address if the provider shared one
    #[serde(default)]
    pub email: Option<String>,
}

/// An access token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for authenticated requests
    pub access_token: String,
    /// Token used to mint a fresh access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// The signed-in user
    pub user: AuthUser,
}

impl AuthSession {
    /// Storage namespace for this session's documents.
    pub fn namespace(&self) -> &str {
        &self.user.id
    }
}

/// Result of a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The service signed the new account in immediately.
    SignedIn(AuthSession),
    /// The account exists but needs email confirmation before sign-in.
    ConfirmationRequired,
}

/// Auth state transition, delivered to the registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    /// A user signed in.
    SignedIn(AuthUser),
    /// The active user signed out.
    SignedOut,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: AuthUser,
}

#[derive(Debug, Default, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<AuthUser>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the hosted auth service.
pub struct AuthClient<S: KeyValueStore> {
    http: reqwest::blocking::Client,
    base_url: String,
    anon_key: String,
    store: S,
    session: Option<AuthSession>,
    listener: Option<Box<dyn Fn(&AuthChange)>>,
}

impl<S: KeyValueStore> std::fmt::Debug for AuthClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.session.is_some())
            .finish()
    }
}

impl<S: KeyValueStore> AuthClient<S> {
    /// Build a client, restoring any persisted session from `store`.
    pub fn new(base_url: &str, anon_key: &str, store: S) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let session = stored_session(&store);
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            store,
            session,
            listener: None,
        })
    }

    /// Register the listener notified on sign-in and sign-out.
    pub fn set_listener(&mut self, listener: impl Fn(&AuthChange) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Create an account with email and password.
    ///
    /// Depending on project settings the service either signs the new
    /// account in immediately or asks for email confirmation first.
    pub fn sign_up(&mut self, email: &str, password: &str) -> Result<SignUpOutcome> {
        log::info!("Signing up {}", email);
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = self.post_auth(&url, &json!({ "email": email, "password": password }))?;

        let parsed: SignUpResponse =
            serde_json::from_str(&body).map_err(|e| KitchenError::UnparseableResponse {
                service: "auth".to_string(),
                detail: e.to_string(),
            })?;

        match (parsed.access_token, parsed.user) {
            (Some(access_token), Some(user)) => {
                let session = AuthSession {
                    access_token,
                    refresh_token: parsed.refresh_token,
                    user,
                };
                self.install_session(session.clone());
                Ok(SignUpOutcome::SignedIn(session))
            }
            _ => Ok(SignUpOutcome::ConfirmationRequired),
        }
    }

    /// Sign in with email and password.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthSession> {
        log::info!("Signing in {}", email);
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let body = self.post_auth(&url, &json!({ "email": email, "password": password }))?;

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| KitchenError::UnparseableResponse {
                service: "auth".to_string(),
                detail: e.to_string(),
            })?;

        let session = AuthSession {
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token,
            user: parsed.user,
        };
        self.install_session(session.clone());
        Ok(session)
    }

    /// URL the user opens in a browser to sign in through an OAuth
    /// provider such as `google`.
    pub fn authorize_url(&self, provider: &str) -> String {
        let state = Uuid::new_v4();
        format!(
            "{}/auth/v1/authorize?provider={}&state={}",
            self.base_url, provider, state
        )
    }

    /// Sign out, clearing the persisted session.
    ///
    /// The server call is best-effort. The local session is dropped and
    /// the listener notified even when the service is unreachable.
    pub fn sign_out(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        log::info!("Signing out {}", session.user.id);

        let url = format!("{}/auth/v1/logout", self.base_url);
        let result = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send();
        match result {
            Ok(response) if !response.status().is_success() => {
                log::warn!("Sign-out request returned HTTP {}", response.status());
            }
            Err(e) => log::warn!("Sign-out request failed: {}", e),
            Ok(_) => {}
        }

        if let Err(e) = self.store.remove(&session_key()) {
            log::warn!("Failed to clear stored session: {}", e);
        }
        self.notify(&AuthChange::SignedOut);
    }

    fn post_auth(&self, url: &str, body: &serde_json::Value) -> Result<String> {
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .map_err(|e| KitchenError::RequestFailed {
                service: "auth".to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().unwrap_or_else(|_| String::new());
        if !status.is_success() {
            return Err(KitchenError::AuthFailed {
                detail: error_detail(&text, status),
            }
            .into());
        }
        Ok(text)
    }

    fn install_session(&mut self, session: AuthSession) {
        let serialized = serde_json::to_string_pretty(&session);
        match serialized {
            Ok(payload) => {
                if let Err(e) = self.store.set(&session_key(), &payload) {
                    log::warn!("Failed to persist session: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize session: {}", e),
        }
        let change = AuthChange::SignedIn(session.user.clone());
        self.session = Some(session);
        self.notify(&change);
    }

    fn notify(&self, change: &AuthChange) {
        if let Some(listener) = &self.listener {
            listener(change);
        }
    }
}

fn session_key() -> StorageKey {
    // The session itself is device-scoped, not user-scoped.
    StorageKey::new(SESSION_PURPOSE, ANONYMOUS_NAMESPACE)
}

/// Read the persisted session without constructing a client.
pub fn stored_session<S: KeyValueStore>(store: &S) -> Option<AuthSession> {
    let raw = match store.get(&session_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read stored session: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring corrupt stored session: {}", e);
            None
        }
    }
}

fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
