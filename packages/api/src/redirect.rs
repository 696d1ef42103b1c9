//! Reading the URL the auth API redirects the browser back to.
//!
//! After an OAuth round trip the landing URL carries either session tokens in
//! the fragment (`#access_token=...&refresh_token=...`) or an error in the
//! query string or fragment (`?error=access_denied&error_description=...`).

use url::Url;

use crate::error::AuthError;
use crate::session::Session;

/// An `error` / `error_description` pair reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectError {
    pub code: String,
    pub description: Option<String>,
}

impl RedirectError {
    /// Text to show the user: the description when given, else the code.
    pub fn message(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.code)
    }

    /// Look for an error in a query string or fragment (leading `?`/`#` allowed).
    /// Empty values count as absent.
    pub fn from_params(params: &str) -> Option<Self> {
        let params = params.trim_start_matches(|c: char| c == '?' || c == '#');
        let mut code = None;
        let mut description = None;
        for (key, value) in url::form_urlencoded::parse(params.as_bytes()) {
            match key.as_ref() {
                "error" if code.is_none() => code = Some(value.into_owned()),
                "error_description" if description.is_none() => {
                    description = Some(value.into_owned())
                }
                _ => {}
            }
        }
        let code = code.filter(|c| !c.is_empty())?;
        Some(Self {
            code,
            description: description.filter(|d| !d.is_empty()),
        })
    }
}

/// A parsed redirect landing URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackUrl {
    url: Url,
}

impl CallbackUrl {
    pub fn parse(href: &str) -> Result<Self, AuthError> {
        Ok(Self {
            url: Url::parse(href)?,
        })
    }

    pub fn query(&self) -> &str {
        self.url.query().unwrap_or("")
    }

    pub fn fragment(&self) -> &str {
        self.url.fragment().unwrap_or("")
    }

    /// Whether the fragment carries OAuth tokens that should not stay visible.
    pub fn has_access_token(&self) -> bool {
        self.fragment().contains("access_token")
    }

    /// Provider error from the query string, else from the fragment.
    pub fn error(&self) -> Option<RedirectError> {
        RedirectError::from_params(self.query())
            .or_else(|| RedirectError::from_params(self.fragment()))
    }

    /// Session tokens carried in the fragment, if any.
    pub fn session(&self, now: i64) -> Option<Session> {
        Session::from_fragment(self.fragment(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error() {
        let url = CallbackUrl::parse("https://codemarket.dev/auth/callback?error=access_denied")
            .unwrap();
        let err = url.error().unwrap();
        assert_eq!(err.code, "access_denied");
        assert_eq!(err.message(), "access_denied");
    }

    #[test]
    fn test_description_takes_precedence() {
        let url = CallbackUrl::parse(
            "https://codemarket.dev/auth/callback?error=server_error&error_description=Unable+to+exchange+external+code",
        )
        .unwrap();
        assert_eq!(
            url.error().unwrap().message(),
            "Unable to exchange external code"
        );
    }

    #[test]
    fn test_fragment_error() {
        let url = CallbackUrl::parse(
            "https://codemarket.dev/auth/callback#error=unauthorized_client&error_code=401&error_description=Email%20link%20is%20invalid%20or%20has%20expired",
        )
        .unwrap();
        let err = url.error().unwrap();
        assert_eq!(err.code, "unauthorized_client");
        assert_eq!(err.message(), "Email link is invalid or has expired");
    }

    #[test]
    fn test_query_error_wins_over_fragment() {
        let url = CallbackUrl::parse(
            "https://codemarket.dev/auth/callback?error=access_denied#error=server_error",
        )
        .unwrap();
        assert_eq!(url.error().unwrap().code, "access_denied");
    }

    #[test]
    fn test_empty_values_are_absent() {
        let url = CallbackUrl::parse(
            "https://codemarket.dev/auth/callback?error=&error_description=ignored#error=late&error_description=",
        )
        .unwrap();
        let err = url.error().unwrap();
        assert_eq!(err.code, "late");
        assert_eq!(err.description, None);

        let clean = CallbackUrl::parse("https://codemarket.dev/auth/callback?next=%2Fmypage").unwrap();
        assert!(clean.error().is_none());
    }

    #[test]
    fn test_access_token_fragment() {
        let url = CallbackUrl::parse(
            "https://codemarket.dev/auth/callback#access_token=at&refresh_token=rt&expires_in=60",
        )
        .unwrap();
        assert!(url.has_access_token());
        let session = url.session(100).unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_at, Some(160));
        assert!(url.error().is_none());
    }

    #[test]
    fn test_rejects_relative_href() {
        assert!(matches!(
            CallbackUrl::parse("/auth/callback"),
            Err(AuthError::InvalidUrl(_))
        ));
    }
}
