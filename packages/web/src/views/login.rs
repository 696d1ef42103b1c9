//! Login page view with OAuth and email sign-in.

use dioxus::prelude::*;
use ui::views::LoginView;

use super::route_for;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    rsx! {
        LoginView {
            on_navigate: move |destination| {
                nav.push(route_for(destination));
            },
        }
    }
}
