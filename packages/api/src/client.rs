//! # HTTP client for the hosted auth API
//!
//! [`AuthClient`] is the only thing the UI talks to for authentication. It
//! covers the slice of the GoTrue REST API the front end needs:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`sign_in_with_oauth`](AuthClient::sign_in_with_oauth) | builds `GET /auth/v1/authorize?provider=..&redirect_to=..` for the browser to follow |
//! | [`sign_in_with_otp`](AuthClient::sign_in_with_otp) | `POST /auth/v1/otp` (magic link) |
//! | [`get_user`](AuthClient::get_user) | `GET /auth/v1/user` |
//! | [`refresh_session`](AuthClient::refresh_session) | `POST /auth/v1/token?grant_type=refresh_token` |
//! | [`sign_out`](AuthClient::sign_out) | `POST /auth/v1/logout` |
//!
//! Every request carries the project's anon key in the `apikey` header. The
//! current session is serialized to JSON under [`AuthConfig::storage_key`] in a
//! [`SessionStorage`]: browser `localStorage` when `persist_session` is on in a
//! wasm build, memory otherwise.

use std::rc::Rc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::provider::OAuthProvider;
use crate::redirect::CallbackUrl;
use crate::session::{now_secs, Session, User};
use crate::storage::{MemoryStorage, SessionStorage};

const CLIENT_INFO: &str = concat!("codemarket-web/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Client for the hosted auth API. Cheap to clone; clones share storage.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: AuthConfig,
    storage: Rc<dyn SessionStorage>,
}

impl AuthClient {
    /// Create a client with the default storage for this target.
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        #[cfg(target_arch = "wasm32")]
        let storage: Rc<dyn SessionStorage> = if config.persist_session {
            Rc::new(crate::storage::LocalStorage::new())
        } else {
            Rc::new(MemoryStorage::new())
        };
        #[cfg(not(target_arch = "wasm32"))]
        let storage: Rc<dyn SessionStorage> = Rc::new(MemoryStorage::new());

        Self::with_storage(config, storage)
    }

    /// Create a client backed by the given storage.
    pub fn with_storage(
        config: AuthConfig,
        storage: Rc<dyn SessionStorage>,
    ) -> Result<Self, AuthError> {
        config.validate()?;

        let apikey = HeaderValue::from_str(config.anon_key.trim())
            .map_err(|e| AuthError::Config(format!("invalid anon key: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert("x-client-info", HeaderValue::from_static(CLIENT_INFO));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            config,
            storage,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ─── OAuth ──────────────────────────────────────────────────────

    /// URL that starts the provider's OAuth flow and returns to `redirect_to`.
    pub fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, AuthError> {
        let mut url = self.config.endpoint("authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(url)
    }

    /// Begin an OAuth sign-in. The caller navigates the browser to the
    /// returned URL; the provider redirects back to `redirect_to`.
    pub fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<Url, AuthError> {
        let url = self.authorize_url(provider, redirect_to)?;
        tracing::info!("Starting {} sign-in", provider.display_name());
        Ok(url)
    }

    // ─── Magic link ─────────────────────────────────────────────────

    /// Email a one-time sign-in link, creating the account if needed.
    pub async fn sign_in_with_otp(&self, email: &str, redirect_to: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        let mut url = self.config.endpoint("otp")?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);

        let resp = self
            .request(Method::POST, url, None)
            .json(&OtpRequest {
                email,
                create_user: true,
            })
            .send()
            .await?;
        Self::expect_success(resp).await?;

        tracing::info!("Sign-in link requested");
        Ok(())
    }

    // ─── Session ────────────────────────────────────────────────────

    /// Fetch the user that owns `access_token`.
    pub async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.config.endpoint("user")?;
        let resp = self
            .request(Method::GET, url, Some(access_token))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// Exchange a refresh token for a new session and store it.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let mut url = self.config.endpoint("token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");

        let resp = self
            .request(Method::POST, url, None)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        let session: Session = Self::handle_response(resp).await?;
        let session = session.stamped(now_secs());

        self.save_session(&session)?;
        tracing::debug!("Session refreshed");
        Ok(session)
    }

    /// The current session, refreshing it first if it has expired.
    ///
    /// Returns `Ok(None)` when nobody is signed in, or when an expired session
    /// cannot be refreshed because the refresh token was rejected.
    pub async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.load_session()? else {
            return Ok(None);
        };
        if !session.is_expired(now_secs()) {
            return Ok(Some(session));
        }

        if !self.config.auto_refresh_token {
            tracing::debug!("Stored session expired and auto refresh is off");
            self.clear_session()?;
            return Ok(None);
        }

        match self.refresh_session(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(e) if e.status() == Some(400) || e.is_unauthorized() => {
                tracing::warn!("Refresh token rejected, signing out locally: {}", e);
                self.clear_session()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Consume session tokens from an OAuth redirect URL, if present.
    ///
    /// Fetches the user for the new access token and stores the session.
    /// Does nothing when `detect_session_in_url` is off.
    pub async fn get_session_from_url(&self, href: &str) -> Result<Option<Session>, AuthError> {
        if !self.config.detect_session_in_url {
            return Ok(None);
        }
        let url = CallbackUrl::parse(href)?;
        let Some(session) = url.session(now_secs()) else {
            return Ok(None);
        };

        let user = self.get_user(&session.access_token).await?;
        let session = session.with_user(user);
        self.save_session(&session)?;

        tracing::info!(
            "Session detected in URL for {}",
            session.email().unwrap_or("<no email>")
        );
        Ok(Some(session))
    }

    /// Revoke the current session and forget it locally.
    ///
    /// The local session is cleared even when the API call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let session = self.load_session()?;
        self.clear_session()?;

        let Some(session) = session else {
            return Ok(());
        };

        let url = self.config.endpoint("logout")?;
        let resp = self
            .request(Method::POST, url, Some(&session.access_token))
            .send()
            .await?;
        match Self::expect_success(resp).await {
            Ok(()) => Ok(()),
            // Token already invalid: nothing left to revoke.
            Err(e) if e.is_unauthorized() || e.status() == Some(404) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn load_session(&self) -> Result<Option<Session>, AuthError> {
        let key = self.config.storage_key();
        let Some(raw) = self.storage.get_item(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored session: {}", e);
                self.storage.remove_item(&key)?;
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &Session) -> Result<(), AuthError> {
        let raw = serde_json::to_string(session)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.storage.set_item(&self.config.storage_key(), &raw)
    }

    fn clear_session(&self) -> Result<(), AuthError> {
        self.storage.remove_item(&self.config.storage_key())
    }

    // ─── Internal helpers ───────────────────────────────────────────

    /// Build a request authorized with `access_token`, or the anon key.
    fn request(&self, method: Method, url: Url, access_token: Option<&str>) -> RequestBuilder {
        let token = access_token.unwrap_or(self.config.anon_key.trim());
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, AuthError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            AuthError::Deserialization(format!(
                "{} (body: {})",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    async fn expect_success(resp: Response) -> Result<(), AuthError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

/// Map an error body to [`AuthError::Api`]. The API is inconsistent about
/// field names across endpoints and versions.
fn api_error(status: u16, body: &str) -> AuthError {
    let value = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = |name: &str| -> Option<String> {
        let v = value.as_ref()?.get(name)?;
        match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    let message = field("msg")
        .or_else(|| field("message"))
        .or_else(|| field("error_description"))
        .or_else(|| field("error"))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                body.chars().take(200).collect()
            }
        });
    let code = field("error_code").or_else(|| field("code"));

    AuthError::Api {
        status,
        code,
        message,
    }
}

/// Cheap local check; the API does the real validation.
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
}
