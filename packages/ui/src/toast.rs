//! Transient notifications ("toasts") shown in the corner of every page.

use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::browser;

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Older toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    next_id: u64,
    pub entries: Vec<Toast>,
}

impl Toasts {
    /// Add a toast and return its id.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_TOASTS {
            let excess = self.entries.len() - MAX_TOASTS;
            self.entries.drain(..excess);
        }
        id
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t.id != id);
        self.entries.len() != before
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast and schedule its removal after [`TOAST_DURATION`].
///
/// The timer runs in the root scope so it outlives the component that raised
/// the toast.
pub fn notify(mut toasts: Signal<Toasts>, level: ToastLevel, message: impl Into<String>) {
    let id = toasts.write().push(level, message);
    spawn_forever(async move {
        browser::sleep(TOAST_DURATION).await;
        if let Ok(mut toasts) = toasts.try_write() {
            toasts.dismiss(id);
        }
    });
}

/// Provides the toast list to descendants and renders it above them.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_signal(Toasts::default);
    use_context_provider(|| toasts);

    rsx! {
        {children}
        Toaster {}
    }
}

#[component]
fn Toaster() -> Element {
    let mut toasts = use_toasts();
    let entries = toasts().entries.clone();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }

        div {
            class: "toaster",
            role: "status",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Error => "toast error",
                        ToastLevel::Success => "toast success",
                        ToastLevel::Info => "toast info",
                    },
                    onclick: move |_| {
                        toasts.write().dismiss(toast.id);
                    },
                    "{toast.message}"
                }
            }
        }
    }
}
