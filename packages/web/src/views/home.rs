use dioxus::prelude::*;
use ui::views::HomeView;

use super::route_for;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();
    rsx! {
        HomeView {
            on_navigate: move |destination| {
                nav.push(route_for(destination));
            },
        }
    }
}
