//! Authentication context and hooks for the UI.

use api::{AuthClient, AuthError, CodeMarketConfig, Session};
use dioxus::prelude::*;

use crate::browser;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the initial session lookup has settled.
    pub loading: bool,
    /// Why the initial session lookup failed, if it did.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    fn settled(result: Result<Option<Session>, AuthError>) -> Self {
        match result {
            Ok(session) => Self {
                session,
                loading: false,
                error: None,
            },
            Err(e) => Self {
                session: None,
                loading: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Auth client plus the reactive session state, shared through context.
#[derive(Clone)]
pub struct AuthContext {
    client: Result<AuthClient, String>,
    pub state: Signal<AuthState>,
}

impl AuthContext {
    /// The configured client, or the configuration error.
    pub fn client(&self) -> Result<AuthClient, AuthError> {
        self.client.clone().map_err(AuthError::Config)
    }
}

/// Get the auth context provided by [`AuthProvider`].
pub fn use_auth_context() -> AuthContext {
    use_context::<AuthContext>()
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_auth_context().state
}

/// Provider component that creates the auth client and resolves the session.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let client = use_hook(|| {
        let config = CodeMarketConfig::load();
        AuthClient::new(config.auth).map_err(|e| {
            tracing::error!("Auth client unavailable: {}", e);
            match e {
                AuthError::Config(msg) => msg,
                other => other.to_string(),
            }
        })
    });

    // Resolve the session once on mount: tokens in the URL first, then storage
    let init_client = client.clone();
    let _ = use_resource(move || {
        let client = init_client.clone();
        async move {
            let result = resolve_initial_session(client).await;
            if let Err(ref e) = result {
                tracing::error!("Session lookup failed: {}", e);
            }
            auth_state.set(AuthState::settled(result));
        }
    });

    use_context_provider(|| AuthContext {
        client,
        state: auth_state,
    });

    rsx! {
        {children}
    }
}

async fn resolve_initial_session(
    client: Result<AuthClient, String>,
) -> Result<Option<Session>, AuthError> {
    let client = client.map_err(AuthError::Config)?;
    if let Some(href) = browser::current_href() {
        if let Some(session) = client.get_session_from_url(&href).await? {
            return Ok(Some(session));
        }
    }
    client.get_session().await
}

/// Sign out and clear the shared session state.
pub async fn sign_out(ctx: &AuthContext) -> Result<(), AuthError> {
    let mut state = ctx.state;
    let result = match ctx.client() {
        Ok(client) => client.sign_out().await,
        Err(e) => Err(e),
    };
    // The local session is gone either way
    state.set(AuthState {
        session: None,
        loading: false,
        error: None,
    });
    result
}
