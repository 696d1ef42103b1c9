//! Landing page for signed-in users.

use dioxus::prelude::*;

use crate::auth::{sign_out, use_auth_context};
use crate::callback::Destination;
use crate::navbar::NavBar;
use crate::toast::{notify, use_toasts, ToastLevel};

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Shows who is signed in; anonymous visitors are sent to the login page.
#[component]
pub fn MyPageView(on_navigate: EventHandler<Destination>) -> Element {
    let ctx = use_auth_context();
    let auth = ctx.state;
    let toasts = use_toasts();
    let mut signing_out = use_signal(|| false);

    use_effect(move || {
        let state = auth();
        if !state.loading && !state.is_signed_in() {
            on_navigate.call(Destination::Login);
        }
    });

    let on_sign_out = move |_| {
        if signing_out() {
            return;
        }
        signing_out.set(true);
        let ctx = ctx.clone();
        spawn(async move {
            match sign_out(&ctx).await {
                Ok(()) => notify(toasts, ToastLevel::Info, "Signed out."),
                Err(e) => tracing::warn!("Sign-out did not reach the server: {}", e),
            }
            signing_out.set(false);
        });
    };

    let state = auth();
    let user = state.session.as_ref().and_then(|s| s.user.clone());

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "page page-gradient",
            NavBar {
                on_sign_in: move |_| on_navigate.call(Destination::Login),
                on_get_started: move |_| on_navigate.call(Destination::Home),
            }

            div {
                class: "login-container",
                div {
                    class: "glass-card",
                    if state.loading {
                        div {
                            class: "spinner-wrap",
                            div { class: "spinner", role: "status" }
                        }
                    } else if let Some(user) = user {
                        h1 { class: "card-title", "My Page" }
                        div {
                            class: "profile",
                            if let Some(avatar) = user.avatar_url() {
                                img {
                                    class: "profile-avatar",
                                    src: "{avatar}",
                                    alt: "Avatar",
                                }
                            }
                            p {
                                class: "profile-name",
                                {user.display_name().unwrap_or("CodeMarket member").to_string()}
                            }
                            if let Some(email) = user.email.as_deref() {
                                p { class: "hint", "{email}" }
                            }
                            if let Some(provider) = user.provider() {
                                p { class: "hint", "Signed in with {provider}" }
                            }
                        }
                        div {
                            class: "login-buttons",
                            button {
                                class: "login-btn btn-premium",
                                onclick: move |_| on_navigate.call(Destination::Home),
                                "Browse templates"
                            }
                            button {
                                class: "login-btn btn-ghost",
                                disabled: signing_out(),
                                onclick: on_sign_out,
                                if signing_out() { "Signing out..." } else { "Sign out" }
                            }
                        }
                    }
                }
            }
        }
    }
}
