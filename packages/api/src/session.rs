//! # Session model
//!
//! [`Session`] mirrors the token payload the hosted auth API returns from
//! `/token` and appends to the URL fragment after an OAuth redirect.
//! [`User`] is the subset of the `/user` response the front end reads.
//!
//! Timestamps are Unix seconds. A session counts as expired
//! [`EXPIRY_MARGIN_SECS`] before its `expires_at`, so a token is never sent
//! right as it lapses.

use serde::{Deserialize, Serialize};

/// Seconds before `expires_at` at which a session is treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Authenticated user as reported by the auth API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl User {
    /// Provider the user last signed in with (`"github"`, `"google"`, `"email"`).
    pub fn provider(&self) -> Option<&str> {
        self.app_metadata.get("provider")?.as_str()
    }

    /// Display name, falling back to email if the provider gave no name.
    pub fn display_name(&self) -> Option<&str> {
        ["full_name", "name", "user_name"]
            .iter()
            .find_map(|key| self.user_metadata.get(*key)?.as_str())
            .or(self.email.as_deref())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.user_metadata.get("avatar_url")?.as_str()
    }
}

/// Access/refresh token pair plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Access token issued by the upstream OAuth provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// `now + expires_in`, or `None` when the lifetime is missing or out of range.
fn expiry_from(now: i64, expires_in: i64) -> Option<i64> {
    if expires_in <= 0 {
        return None;
    }
    now.checked_add(expires_in)
}

impl Session {
    /// Parse session tokens from an OAuth redirect fragment (with or without
    /// the leading `#`). Returns `None` unless both tokens are present.
    pub fn from_fragment(fragment: &str, now: i64) -> Option<Self> {
        let fragment = fragment.trim_start_matches('#');
        let mut access_token = None;
        let mut refresh_token = None;
        let mut token_type = None;
        let mut expires_in = None;
        let mut expires_at = None;
        let mut provider_token = None;

        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            match key.as_ref() {
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                "token_type" => token_type = Some(value.into_owned()),
                "expires_in" => expires_in = value.parse::<i64>().ok(),
                "expires_at" => expires_at = value.parse::<i64>().ok(),
                "provider_token" => provider_token = Some(value.into_owned()),
                _ => {}
            }
        }

        let access_token = access_token.filter(|t| !t.is_empty())?;
        let refresh_token = refresh_token.filter(|t| !t.is_empty())?;
        let expires_in = expires_in.unwrap_or(0);

        Some(Self {
            access_token,
            refresh_token,
            token_type: token_type.unwrap_or_else(default_token_type),
            expires_in,
            expires_at: expires_at.or_else(|| expiry_from(now, expires_in)),
            provider_token,
            user: None,
        })
    }

    /// Fill in `expires_at` from `expires_in` when the API omitted it.
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = expiry_from(now, self.expires_in);
        }
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Whether the access token is expired (or about to be) at `now`.
    /// Sessions without an expiry never expire locally.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at.saturating_sub(EXPIRY_MARGIN_SECS) <= now)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref()?.email.as_deref()
    }
}

/// Current Unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Current Unix time in seconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
