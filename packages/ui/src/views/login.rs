//! Login page: GitHub, Google, and magic-link sign-in.

use api::OAuthProvider;
use dioxus::prelude::*;

use crate::auth::{use_auth_context, AuthContext};
use crate::brands::{FaGithub, FaGoogle};
use crate::browser;
use crate::callback::Destination;
use crate::icons::FaEnvelope;
use crate::login::{LoadingFlags, LoginMethod, EMPTY_EMAIL_MESSAGE};
use crate::navbar::NavBar;
use crate::toast::{notify, use_toasts, ToastLevel, Toasts};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Start an OAuth sign-in: build the authorize URL and send the browser there.
fn start_oauth(
    ctx: &AuthContext,
    mut loading: Signal<LoadingFlags>,
    toasts: Signal<Toasts>,
    provider: OAuthProvider,
) {
    let method = LoginMethod::from(provider);
    if !loading.write().begin(method) {
        return;
    }

    let result = ctx.client().and_then(|client| {
        let redirect = client.config().redirect_url(&browser::current_origin());
        let url = client.sign_in_with_oauth(provider, &redirect)?;
        browser::redirect_to(url.as_str())
    });

    match &result {
        Ok(()) => notify(toasts, ToastLevel::Success, method.success_message()),
        Err(e) => {
            tracing::error!("{} sign-in error: {}", provider.display_name(), e);
            notify(toasts, ToastLevel::Error, method.failure_message());
        }
    }
    loading.write().settle_redirect(method, result.is_ok());
}

/// Shared login page.
#[component]
pub fn LoginView(on_navigate: EventHandler<Destination>) -> Element {
    let ctx = use_auth_context();
    let auth = ctx.state;
    let toasts = use_toasts();
    let mut loading = use_signal(LoadingFlags::default);
    let mut email = use_signal(String::new);
    let mut show_email_input = use_signal(|| false);

    // Already signed in: skip the login page
    use_effect(move || {
        let state = auth();
        if !state.loading && state.is_signed_in() {
            on_navigate.call(Destination::MyPage);
        }
    });

    let submit_ctx = ctx.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() {
            notify(toasts, ToastLevel::Error, EMPTY_EMAIL_MESSAGE);
            return;
        }
        if !loading.write().begin(LoginMethod::Email) {
            return;
        }

        let ctx = submit_ctx.clone();
        spawn(async move {
            let result = match ctx.client() {
                Ok(client) => {
                    let redirect = client.config().redirect_url(&browser::current_origin());
                    client.sign_in_with_otp(&address, &redirect).await
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    notify(toasts, ToastLevel::Success, LoginMethod::Email.success_message());
                    email.set(String::new());
                    show_email_input.set(false);
                }
                Err(e) => {
                    tracing::error!("Email sign-in error: {}", e);
                    notify(toasts, ToastLevel::Error, LoginMethod::Email.failure_message());
                }
            }
            loading.write().finish(LoginMethod::Email);
        });
    };

    let flags = loading();
    let github_ctx = ctx.clone();
    let google_ctx = ctx.clone();

    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "page page-gradient",
            NavBar {
                on_sign_in: move |_| on_navigate.call(Destination::Login),
                on_get_started: move |_| on_navigate.call(Destination::Login),
            }

            div {
                class: "login-container",
                div {
                    class: "glass-card",
                    h1 { class: "card-title", "Sign in" }

                    div {
                        class: "login-buttons",

                        button {
                            class: "login-btn github-btn",
                            disabled: flags.github,
                            onclick: move |_| start_oauth(&github_ctx, loading, toasts, OAuthProvider::GitHub),
                            Icon { icon: FaGithub, width: 20, height: 20 }
                            if flags.github {
                                {LoginMethod::GitHub.pending_label()}
                            } else {
                                {LoginMethod::GitHub.label()}
                            }
                        }

                        button {
                            class: "login-btn google-btn",
                            disabled: flags.google,
                            onclick: move |_| start_oauth(&google_ctx, loading, toasts, OAuthProvider::Google),
                            Icon { icon: FaGoogle, width: 20, height: 20 }
                            if flags.google {
                                {LoginMethod::Google.pending_label()}
                            } else {
                                {LoginMethod::Google.label()}
                            }
                        }

                        button {
                            class: "login-btn btn-premium",
                            onclick: move |_| show_email_input.toggle(),
                            Icon { icon: FaEnvelope, width: 20, height: 20 }
                            "Sign in with email"
                        }
                    }

                    if show_email_input() {
                        form {
                            class: "email-form",
                            onsubmit: on_submit,
                            input {
                                class: "email-input",
                                r#type: "email",
                                value: "{email}",
                                placeholder: "Enter your email address",
                                required: true,
                                oninput: move |evt| email.set(evt.value()),
                            }
                            button {
                                class: "login-btn btn-premium",
                                r#type: "submit",
                                disabled: flags.email,
                                if flags.email {
                                    {LoginMethod::Email.pending_label()}
                                } else {
                                    {LoginMethod::Email.label()}
                                }
                            }
                            p {
                                class: "hint",
                                "We'll email you a link that signs you in."
                            }
                        }
                    }

                    div {
                        class: "divider",
                        span { "or" }
                    }

                    p {
                        class: "hint",
                        "No account yet? Any of the options above creates one."
                    }
                }
            }
        }
    }
}
