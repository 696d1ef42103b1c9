//! # Site configuration — `codemarket.toml`
//!
//! Describes where the hosted auth API lives and how the client treats the
//! session it receives.
//!
//! ```toml
//! [auth]
//! url = "https://<project-ref>.supabase.co"
//! anon_key = "<public anon key>"
//! auto_refresh_token = true
//! persist_session = true
//! detect_session_in_url = true
//! redirect_path = "/auth/callback"
//! ```
//!
//! | Source | Target | Entry point |
//! |--------|--------|-------------|
//! | `codemarket.toml` + `SUPABASE_URL` / `SUPABASE_ANON_KEY` (via `dotenvy`) | native | [`CodeMarketConfig::load`] |
//! | `SUPABASE_URL` / `SUPABASE_ANON_KEY` at build time | wasm32 | [`CodeMarketConfig::load`] |
//!
//! A missing file or section is equivalent to the defaults; a config without a
//! URL or anon key fails [`AuthConfig::validate`].

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AuthError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Top-level configuration stored in `codemarket.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeMarketConfig {
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Connection and session options for the hosted auth API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project base URL, without the `/auth/v1` suffix.
    #[serde(default)]
    pub url: String,
    /// Public (anon) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
    /// Refresh an expired access token when the session is read.
    #[serde(default = "default_true")]
    pub auto_refresh_token: bool,
    /// Keep the session in browser storage across page loads.
    #[serde(default = "default_true")]
    pub persist_session: bool,
    /// Consume session tokens from the URL fragment after an OAuth redirect.
    #[serde(default = "default_true")]
    pub detect_session_in_url: bool,
    /// Storage key override. Derived from the project URL when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// Path the provider sends the browser back to.
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,
}

fn default_true() -> bool {
    true
}

fn default_redirect_path() -> String {
    "/auth/callback".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            auto_refresh_token: true,
            persist_session: true,
            detect_session_in_url: true,
            storage_key: None,
            redirect_path: default_redirect_path(),
        }
    }
}

impl CodeMarketConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "codemarket.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load the config for the current target.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let mut config = match std::fs::read_to_string(Self::filename()) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed {}: {}", Self::filename(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.auth.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Load the config for the current target.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut config = Self::default();
        config.auth.apply_env(|name| match name {
            URL_VAR => option_env!("SUPABASE_URL").map(str::to_string),
            ANON_KEY_VAR => option_env!("SUPABASE_ANON_KEY").map(str::to_string),
            _ => None,
        });
        config
    }
}

impl AuthConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Self::default()
        }
    }

    /// Overlay non-empty values from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.url = url.trim().to_string();
        }
        if let Some(key) = lookup(ANON_KEY_VAR).filter(|v| !v.trim().is_empty()) {
            self.anon_key = key.trim().to_string();
        }
    }

    /// Check that the config can reach an API and return the parsed base URL.
    pub fn validate(&self) -> Result<Url, AuthError> {
        if self.url.trim().is_empty() {
            return Err(AuthError::Config(format!("{URL_VAR} is not set")));
        }
        if self.anon_key.trim().is_empty() {
            return Err(AuthError::Config(format!("{ANON_KEY_VAR} is not set")));
        }
        let base = Url::parse(self.url.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AuthError::Config(format!(
                "unsupported URL scheme: {}",
                base.scheme()
            )));
        }
        Ok(base)
    }

    /// Absolute URL of an auth endpoint, e.g. `endpoint("otp")`.
    pub fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        let base = self.validate()?;
        let prefix = base.path().trim_end_matches('/');
        let mut url = base.clone();
        url.set_path(&format!("{prefix}/auth/v1/{}", path.trim_start_matches('/')));
        Ok(url)
    }

    /// Key under which the session is persisted.
    pub fn storage_key(&self) -> String {
        if let Some(ref key) = self.storage_key {
            return key.clone();
        }
        let project_ref = Url::parse(self.url.trim())
            .ok()
            .and_then(|u| u.host_str().map(|h| h.split('.').next().unwrap_or(h).to_string()))
            .unwrap_or_else(|| "local".to_string());
        format!("sb-{project_ref}-auth-token")
    }

    /// Where the provider should send the browser back to, given the site origin.
    pub fn redirect_url(&self, origin: &str) -> String {
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            self.redirect_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodeMarketConfig::default();
        assert!(config.auth.auto_refresh_token);
        assert!(config.auth.persist_session);
        assert!(config.auth.detect_session_in_url);
        assert_eq!(config.auth.redirect_path, "/auth/callback");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = CodeMarketConfig::from_toml("").unwrap();
        assert_eq!(config, CodeMarketConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CodeMarketConfig::from_toml(
            r#"
            [auth]
            url = "https://abcd.supabase.co"
            anon_key = "anon"
            persist_session = false
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.url, "https://abcd.supabase.co");
        assert!(!config.auth.persist_session);
        assert!(config.auth.auto_refresh_token);
        assert_eq!(config.auth.redirect_path, "/auth/callback");
    }

    #[test]
    fn test_apply_env_overrides_non_empty_values() {
        let mut auth = AuthConfig::new("https://file.supabase.co", "file-key");
        auth.apply_env(|name| match name {
            URL_VAR => Some(" https://env.supabase.co ".to_string()),
            ANON_KEY_VAR => Some("".to_string()),
            _ => None,
        });
        assert_eq!(auth.url, "https://env.supabase.co");
        assert_eq!(auth.anon_key, "file-key");
    }

    #[test]
    fn test_validate_requires_url_and_key() {
        assert!(matches!(
            AuthConfig::default().validate(),
            Err(AuthError::Config(_))
        ));
        assert!(matches!(
            AuthConfig::new("https://abcd.supabase.co", "").validate(),
            Err(AuthError::Config(_))
        ));
        assert!(matches!(
            AuthConfig::new("not a url", "key").validate(),
            Err(AuthError::InvalidUrl(_))
        ));
        assert!(matches!(
            AuthConfig::new("ftp://abcd.supabase.co", "key").validate(),
            Err(AuthError::Config(_))
        ));
        assert!(AuthConfig::new("https://abcd.supabase.co", "key")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_endpoint_joins_auth_prefix() {
        let auth = AuthConfig::new("https://abcd.supabase.co/", "key");
        assert_eq!(
            auth.endpoint("otp").unwrap().as_str(),
            "https://abcd.supabase.co/auth/v1/otp"
        );
        let proxied = AuthConfig::new("http://localhost:54321/base", "key");
        assert_eq!(
            proxied.endpoint("/token").unwrap().as_str(),
            "http://localhost:54321/base/auth/v1/token"
        );
    }

    #[test]
    fn test_storage_key() {
        let auth = AuthConfig::new("https://fkjgcszdgcbcdmclgfer.supabase.co", "key");
        assert_eq!(auth.storage_key(), "sb-fkjgcszdgcbcdmclgfer-auth-token");

        let custom = AuthConfig {
            storage_key: Some("codemarket-session".to_string()),
            ..auth
        };
        assert_eq!(custom.storage_key(), "codemarket-session");
    }

    #[test]
    fn test_redirect_url() {
        let auth = AuthConfig::default();
        assert_eq!(
            auth.redirect_url("https://codemarket.dev/"),
            "https://codemarket.dev/auth/callback"
        );
    }
}
