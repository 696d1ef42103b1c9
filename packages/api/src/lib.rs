//! # API crate — client for the hosted auth backend
//!
//! CodeMarket has no server of its own. Sign-in, sessions, and magic links are
//! handled by a hosted GoTrue-compatible auth API; this crate is the front
//! end's only way to reach it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`AuthClient`]: OAuth authorize URLs, magic-link requests, session lookup/refresh, sign-out |
//! | [`config`] | [`CodeMarketConfig`] / [`AuthConfig`], loaded from `codemarket.toml` and the environment |
//! | [`redirect`] | Parsing the URL the browser lands on after an OAuth round trip |
//! | [`session`] | [`Session`] and [`User`] models |
//! | [`storage`] | [`SessionStorage`] backends (memory, browser `localStorage`) |
//!
//! Everything here is platform-neutral except [`storage::LocalStorage`], which
//! only exists on `wasm32`.

pub mod client;
pub mod config;
mod error;
mod provider;
pub mod redirect;
pub mod session;
pub mod storage;

pub use client::{is_plausible_email, AuthClient};
pub use config::{AuthConfig, CodeMarketConfig};
pub use error::AuthError;
pub use provider::OAuthProvider;
pub use redirect::{CallbackUrl, RedirectError};
pub use session::{Session, User};
pub use storage::{MemoryStorage, SessionStorage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
