//! Thin wrappers over the browser APIs the pages touch.
//!
//! Native builds have no location bar; the getters return `None` there and
//! navigation fails with [`AuthError::Browser`].

use std::time::Duration;

use api::AuthError;

/// Origin used for redirect URLs when the page has no `window` (native builds).
pub const FALLBACK_ORIGIN: &str = "http://localhost:8080";

/// Full URL of the current page.
pub fn current_href() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().href().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// `scheme://host[:port]` of the current page.
pub fn current_origin() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return origin;
        }
    }
    FALLBACK_ORIGIN.to_string()
}

/// Send the browser to an external URL (e.g. an OAuth authorize page).
pub fn redirect_to(url: &str) -> Result<(), AuthError> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| AuthError::Browser("no window".to_string()))?;
        window
            .location()
            .set_href(url)
            .map_err(|e| AuthError::Browser(format!("{e:?}")))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Err(AuthError::Browser(format!("cannot open {url} without a browser")))
    }
}

/// Drop the query string and fragment from the visible URL without reloading.
pub fn strip_url_fragment() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(pathname) = window.location().pathname() else {
            return;
        };
        let title = window.document().map(|d| d.title()).unwrap_or_default();
        if let Ok(history) = window.history() {
            if let Err(e) = history.replace_state_with_url(
                &wasm_bindgen::JsValue::NULL,
                &title,
                Some(&pathname),
            ) {
                tracing::warn!("Failed to clean callback URL: {:?}", e);
            }
        }
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
