use dioxus::prelude::*;
use ui::views::MarketView;

#[component]
pub fn Home() -> Element {
    rsx! {
        MarketView {}
    }
}
