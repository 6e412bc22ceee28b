use dioxus::prelude::*;
use market::{Command, Surface};

use crate::{use_market, AdminPostsPanel, InsightsPanel, UsersPanel, MARKET_CSS};

/// The admin dashboard. Non-admin sessions are sent back to the market page.
#[component]
pub fn AdminView() -> Element {
    let market = use_market();
    use_hook(move || market.send(Command::Enter(Surface::Admin)));

    let name = market.state().read().session.as_ref().map(|u| u.name.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: MARKET_CSS }
        header {
            class: "navbar",
            a { class: "navbar-logo", href: "/", "KU 마켓 관리자" }
            nav {
                class: "navbar-actions",
                if let Some(name) = name {
                    span { class: "navbar-user", "{name}님" }
                }
                button {
                    class: "btn-secondary",
                    onclick: move |_| market.send(Command::Logout),
                    "로그아웃"
                }
            }
        }
        main {
            class: "admin-page",
            InsightsPanel {}
            AdminPostsPanel {}
            UsersPanel {}
        }
    }
}
