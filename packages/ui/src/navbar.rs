use dioxus::prelude::*;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Fixed site header: brand, section anchors, and the sign-in entry points.
#[component]
pub fn NavBar(on_sign_in: EventHandler<()>, on_get_started: EventHandler<()>) -> Element {
    rsx! {
        document::Stylesheet { href: NAVBAR_CSS }
        nav {
            class: "navbar",
            div {
                class: "navbar-inner",
                div {
                    class: "navbar-brand",
                    h1 { "CodeMarket" }
                }
                div {
                    class: "navbar-links",
                    a { href: "#templates", "Templates" }
                    a { href: "#features", "Features" }
                    a { href: "#pricing", "Pricing" }
                }
                div {
                    class: "navbar-actions",
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_sign_in.call(()),
                        "Sign In"
                    }
                    button {
                        class: "btn btn-premium",
                        onclick: move |_| on_get_started.call(()),
                        "Get Started"
                    }
                }
            }
        }
    }
}
