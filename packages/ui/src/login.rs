//! Sign-in methods on the login page and their in-flight flags.

use api::OAuthProvider;

/// One of the three ways to sign in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoginMethod {
    GitHub,
    Google,
    Email,
}

impl From<OAuthProvider> for LoginMethod {
    fn from(provider: OAuthProvider) -> Self {
        match provider {
            OAuthProvider::GitHub => Self::GitHub,
            OAuthProvider::Google => Self::Google,
        }
    }
}

impl LoginMethod {
    /// Button label while idle.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GitHub => "Sign in with GitHub",
            Self::Google => "Sign in with Google",
            Self::Email => "Send sign-in link",
        }
    }

    /// Button label while the request is in flight.
    pub fn pending_label(&self) -> &'static str {
        match self {
            Self::GitHub => "Connecting to GitHub...",
            Self::Google => "Connecting to Google...",
            Self::Email => "Sending...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::GitHub => "Redirecting to GitHub...",
            Self::Google => "Redirecting to Google...",
            Self::Email => "Sign-in link sent. Please check your inbox.",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub sign-in failed. Please check your network connection.",
            Self::Google => "Google sign-in failed. Please check your network connection.",
            Self::Email => "Email sign-in failed. Please check your network connection.",
        }
    }
}

/// Shown when the email form is submitted empty.
pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter your email address.";

/// Per-method "request in flight" flags.
///
/// Each method has its own flag; starting or finishing one never touches
/// the others.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub github: bool,
    pub google: bool,
    pub email: bool,
}

impl LoadingFlags {
    pub fn is_loading(&self, method: LoginMethod) -> bool {
        match method {
            LoginMethod::GitHub => self.github,
            LoginMethod::Google => self.google,
            LoginMethod::Email => self.email,
        }
    }

    fn flag_mut(&mut self, method: LoginMethod) -> &mut bool {
        match method {
            LoginMethod::GitHub => &mut self.github,
            LoginMethod::Google => &mut self.google,
            LoginMethod::Email => &mut self.email,
        }
    }

    /// Mark `method` as in flight. Returns false if it already was, in which
    /// case the caller must not issue a second request.
    pub fn begin(&mut self, method: LoginMethod) -> bool {
        let flag = self.flag_mut(method);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    /// Clear the flag once the request has settled, successfully or not.
    pub fn finish(&mut self, method: LoginMethod) {
        *self.flag_mut(method) = false;
    }

    /// Settle an OAuth start. After a successful redirect the flag stays set
    /// until the browser leaves the page.
    pub fn settle_redirect(&mut self, method: LoginMethod, redirected: bool) {
        if !redirected {
            self.finish(method);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_sets_only_that_flag() {
        let mut flags = LoadingFlags::default();
        assert!(flags.begin(LoginMethod::GitHub));
        assert!(flags.is_loading(LoginMethod::GitHub));
        assert!(!flags.is_loading(LoginMethod::Google));
        assert!(!flags.is_loading(LoginMethod::Email));
    }

    #[test]
    fn test_at_most_one_request_per_method() {
        let mut flags = LoadingFlags::default();
        assert!(flags.begin(LoginMethod::Google));
        assert!(!flags.begin(LoginMethod::Google));
        // Other methods are independent
        assert!(flags.begin(LoginMethod::GitHub));
        assert!(flags.begin(LoginMethod::Email));
    }

    #[test]
    fn test_finish_clears_only_that_flag() {
        let mut flags = LoadingFlags::default();
        flags.begin(LoginMethod::GitHub);
        flags.begin(LoginMethod::Google);
        flags.finish(LoginMethod::GitHub);
        assert_eq!(
            flags,
            LoadingFlags {
                github: false,
                google: true,
                email: false,
            }
        );
        assert!(flags.begin(LoginMethod::GitHub));
    }

    #[test]
    fn test_oauth_flag_held_through_redirect() {
        let mut flags = LoadingFlags::default();
        flags.begin(LoginMethod::GitHub);
        flags.settle_redirect(LoginMethod::GitHub, true);
        assert!(flags.is_loading(LoginMethod::GitHub));
        assert!(!flags.begin(LoginMethod::GitHub));

        flags.begin(LoginMethod::Google);
        flags.settle_redirect(LoginMethod::Google, false);
        assert!(!flags.is_loading(LoginMethod::Google));
        assert!(flags.is_loading(LoginMethod::GitHub));
    }

    #[test]
    fn test_provider_maps_to_method() {
        assert_eq!(LoginMethod::from(OAuthProvider::GitHub), LoginMethod::GitHub);
        assert_eq!(LoginMethod::from(OAuthProvider::Google), LoginMethod::Google);
        assert!(LoginMethod::Google.failure_message().starts_with("Google"));
    }
}
