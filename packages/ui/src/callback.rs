//! What the OAuth callback page does once the session lookup has settled.
//!
//! The order is fixed: an existing session wins, then an error in the query
//! string, then an error in the fragment. With none of those the visitor is
//! sent back to the login page without a message.

use std::time::Duration;

use api::{CallbackUrl, Session};

use crate::toast::ToastLevel;

/// Pause before leaving the callback page after an error, so the message can be read.
pub const CALLBACK_ERROR_DELAY: Duration = Duration::from_secs(3);

pub const SIGNED_IN_MESSAGE: &str = "Signed in!";

/// Pages the shared views can ask the router to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    MyPage,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::MyPage => "/mypage",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CallbackOutcome {
    SignedIn { email: Option<String> },
    Failed { message: String },
    NoSession,
}

impl CallbackOutcome {
    /// Decide the outcome from the session lookup and the landing URL.
    pub fn resolve(session: Result<Option<&Session>, &str>, href: Option<&str>) -> Self {
        let session = match session {
            Ok(session) => session,
            Err(message) => {
                return Self::Failed {
                    message: message.to_string(),
                }
            }
        };
        if let Some(session) = session {
            return Self::SignedIn {
                email: session.email().map(str::to_string),
            };
        }

        let Some(href) = href else {
            return Self::NoSession;
        };
        match CallbackUrl::parse(href) {
            Ok(url) => match url.error() {
                Some(err) => Self::Failed {
                    message: err.message().to_string(),
                },
                None => Self::NoSession,
            },
            Err(e) => {
                tracing::warn!("Unreadable callback URL {}: {}", href, e);
                Self::NoSession
            }
        }
    }

    pub fn destination(&self) -> Destination {
        match self {
            Self::SignedIn { .. } => Destination::MyPage,
            Self::Failed { .. } | Self::NoSession => Destination::Login,
        }
    }

    /// How long to wait before navigating.
    pub fn delay(&self) -> Duration {
        match self {
            Self::Failed { .. } => CALLBACK_ERROR_DELAY,
            _ => Duration::ZERO,
        }
    }

    /// Toast to raise, if any.
    pub fn notification(&self) -> Option<(ToastLevel, String)> {
        match self {
            Self::SignedIn { .. } => Some((ToastLevel::Success, SIGNED_IN_MESSAGE.to_string())),
            Self::Failed { message } => Some((
                ToastLevel::Error,
                format!("Authentication error: {message}"),
            )),
            Self::NoSession => None,
        }
    }

    /// Message to show on the page itself while waiting to leave.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLBACK: &str = "https://codemarket.dev/auth/callback";

    fn session() -> Session {
        let mut session =
            Session::from_fragment("access_token=at&refresh_token=rt&expires_in=3600", 0).unwrap();
        session.user = Some(api::User {
            id: "u1".to_string(),
            email: Some("dev@codemarket.dev".to_string()),
            app_metadata: Default::default(),
            user_metadata: Default::default(),
        });
        session
    }

    #[test]
    fn test_query_error_redirects_to_login_after_delay() {
        let href = format!("{CALLBACK}?error=access_denied");
        let outcome = CallbackOutcome::resolve(Ok(None), Some(&href));
        assert_eq!(
            outcome,
            CallbackOutcome::Failed {
                message: "access_denied".to_string()
            }
        );
        assert_eq!(outcome.error_message(), Some("access_denied"));
        assert_eq!(outcome.destination(), Destination::Login);
        assert_eq!(outcome.delay(), Duration::from_secs(3));
        assert_eq!(
            outcome.notification(),
            Some((
                ToastLevel::Error,
                "Authentication error: access_denied".to_string()
            ))
        );
    }

    #[test]
    fn test_active_session_redirects_to_mypage() {
        let session = session();
        let outcome = CallbackOutcome::resolve(Ok(Some(&session)), Some(CALLBACK));
        assert_eq!(
            outcome,
            CallbackOutcome::SignedIn {
                email: Some("dev@codemarket.dev".to_string())
            }
        );
        assert_eq!(outcome.destination(), Destination::MyPage);
        assert_eq!(outcome.destination().path(), "/mypage");
        assert_eq!(outcome.delay(), Duration::ZERO);
        assert_eq!(
            outcome.notification(),
            Some((ToastLevel::Success, SIGNED_IN_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_session_wins_over_error_in_url() {
        let session = session();
        let href = format!("{CALLBACK}?error=access_denied");
        let outcome = CallbackOutcome::resolve(Ok(Some(&session)), Some(&href));
        assert_eq!(outcome.destination(), Destination::MyPage);
    }

    #[test]
    fn test_no_session_no_error_redirects_immediately() {
        let outcome = CallbackOutcome::resolve(Ok(None), Some(CALLBACK));
        assert_eq!(outcome, CallbackOutcome::NoSession);
        assert_eq!(outcome.destination().path(), "/login");
        assert_eq!(outcome.delay(), Duration::ZERO);
        assert_eq!(outcome.notification(), None);
        assert_eq!(outcome.error_message(), None);

        assert_eq!(
            CallbackOutcome::resolve(Ok(None), None),
            CallbackOutcome::NoSession
        );
    }

    #[test]
    fn test_fragment_error_with_description() {
        let href = format!(
            "{CALLBACK}#error=access_denied&error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired"
        );
        let outcome = CallbackOutcome::resolve(Ok(None), Some(&href));
        assert_eq!(
            outcome.error_message(),
            Some("Email link is invalid or has expired")
        );
    }

    #[test]
    fn test_query_error_checked_before_fragment() {
        let href = format!("{CALLBACK}?error=from_query#error=from_fragment");
        let outcome = CallbackOutcome::resolve(Ok(None), Some(&href));
        assert_eq!(outcome.error_message(), Some("from_query"));
    }

    #[test]
    fn test_session_lookup_failure_is_reported() {
        let outcome = CallbackOutcome::resolve(Err("network error: timed out"), Some(CALLBACK));
        assert_eq!(outcome.error_message(), Some("network error: timed out"));
        assert_eq!(outcome.destination(), Destination::Login);
        assert_eq!(outcome.delay(), CALLBACK_ERROR_DELAY);
    }

    #[test]
    fn test_unparsable_href_falls_back_to_login() {
        let outcome = CallbackOutcome::resolve(Ok(None), Some("not a url"));
        assert_eq!(outcome, CallbackOutcome::NoSession);
    }
}
