use dioxus::prelude::*;
use ui::views::AuthCallbackView;

use super::route_for;

/// Landing page the auth provider redirects back to.
///
/// Navigation replaces the history entry so "back" never returns here.
#[component]
pub fn AuthCallback() -> Element {
    let nav = use_navigator();
    rsx! {
        AuthCallbackView {
            on_navigate: move |destination| {
                nav.replace(route_for(destination));
            },
        }
    }
}
