//! OAuth / magic-link landing page.

use api::CallbackUrl;
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::browser;
use crate::callback::{CallbackOutcome, Destination};
use crate::toast::{notify, use_toasts};

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Runs once the initial session lookup has settled, then navigates away.
#[component]
pub fn AuthCallbackView(on_navigate: EventHandler<Destination>) -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let mut outcome = use_signal(|| Option::<CallbackOutcome>::None);

    use_effect(move || {
        let state = auth();
        if state.loading || outcome.peek().is_some() {
            return;
        }

        // Read the URL before cleaning it; the error may be in the query string
        let href = browser::current_href();
        let lookup = match state.error.as_deref() {
            Some(e) => Err(e),
            None => Ok(state.session.as_ref()),
        };
        let resolved = CallbackOutcome::resolve(lookup, href.as_deref());

        let has_tokens = href
            .as_deref()
            .and_then(|h| CallbackUrl::parse(h).ok())
            .is_some_and(|u| u.has_access_token());
        if has_tokens {
            browser::strip_url_fragment();
        }

        match &resolved {
            CallbackOutcome::SignedIn { email } => {
                tracing::info!("User is signed in: {}", email.as_deref().unwrap_or("<no email>"));
            }
            CallbackOutcome::Failed { message } => {
                tracing::error!("Auth callback error: {}", message);
            }
            CallbackOutcome::NoSession => {
                tracing::info!("No active session found in callback");
            }
        }

        if let Some((level, message)) = resolved.notification() {
            notify(toasts, level, message);
        }

        let destination = resolved.destination();
        let delay = resolved.delay();
        outcome.set(Some(resolved));

        spawn(async move {
            if !delay.is_zero() {
                browser::sleep(delay).await;
            }
            on_navigate.call(destination);
        });
    });

    let error = outcome().and_then(|o| o.error_message().map(str::to_string));
    let delay_secs = crate::callback::CALLBACK_ERROR_DELAY.as_secs();

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "page page-gradient page-centered",
            div {
                class: "glass-card",
                if let Some(message) = error {
                    h1 { class: "card-title", "Authentication error" }
                    div {
                        class: "callback-error",
                        p { "{message}" }
                        p {
                            class: "hint",
                            "Returning to the login page in {delay_secs} seconds..."
                        }
                    }
                } else {
                    h1 { class: "card-title", "Signing you in..." }
                    div {
                        class: "spinner-wrap",
                        div {
                            class: "spinner",
                            role: "status",
                            span { class: "sr-only", "Loading..." }
                        }
                    }
                }
            }
        }
    }
}
