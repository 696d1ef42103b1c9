use dioxus::prelude::*;

use crate::callback::Destination;
use crate::navbar::NavBar;

const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

/// Marketing landing page.
#[component]
pub fn HomeView(on_navigate: EventHandler<Destination>) -> Element {
    rsx! {
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "page page-gradient",
            NavBar {
                on_sign_in: move |_| on_navigate.call(Destination::Login),
                on_get_started: move |_| on_navigate.call(Destination::Login),
            }

            section {
                class: "hero",
                h1 { "Ship faster with production-ready code" }
                p { "Buy and sell templates, starters, and components built by working developers." }
                button {
                    class: "login-btn btn-premium hero-cta",
                    onclick: move |_| on_navigate.call(Destination::Login),
                    "Get Started"
                }
            }

            section {
                id: "templates",
                class: "home-section",
                h2 { "Templates" }
                p { "Full applications and starters, ready to deploy." }
            }
            section {
                id: "features",
                class: "home-section",
                h2 { "Features" }
                p { "Source access, license management, and updates from the author." }
            }
            section {
                id: "pricing",
                class: "home-section",
                h2 { "Pricing" }
                p { "Free to browse. Sellers keep the majority of every sale." }
            }
        }
    }
}
