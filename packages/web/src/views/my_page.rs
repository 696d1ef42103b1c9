use dioxus::prelude::*;
use ui::views::MyPageView;

use super::route_for;

#[component]
pub fn MyPage() -> Element {
    let nav = use_navigator();
    rsx! {
        MyPageView {
            on_navigate: move |destination| {
                nav.push(route_for(destination));
            },
        }
    }
}
