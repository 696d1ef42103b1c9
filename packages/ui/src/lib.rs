//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
pub mod brands {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

pub mod views;

mod navbar;
pub use navbar::NavBar;

mod auth;
pub use auth::{sign_out, use_auth, use_auth_context, AuthContext, AuthProvider, AuthState};

pub mod browser;

pub mod callback;
pub use callback::{CallbackOutcome, Destination};

pub mod login;
pub use login::{LoadingFlags, LoginMethod};

pub mod toast;
pub use toast::{notify, use_toasts, ToastLevel, ToastProvider, Toasts};
