use dioxus::prelude::*;
use market::{CategoryFilter, Command};

use crate::icons::{FaMagnifyingGlass, FaPen};
use crate::{use_market, Icon};

/// Page header: logo, search box and the session-dependent buttons.
#[component]
pub fn Navbar() -> Element {
    let market = use_market();
    let state = market.state();
    let controls = state.read().controls();
    let user_name = state.read().session.as_ref().map(|u| u.name.clone());
    let mut search = use_signal(String::new);

    rsx! {
        header {
            class: "navbar",
            a { class: "navbar-logo", href: "/", "KU 마켓" }

            form {
                class: "navbar-search",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    market.send(Command::Search(search()));
                },
                input {
                    r#type: "text",
                    placeholder: "검색어를 입력하세요",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "btn-icon",
                    Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                }
            }

            nav {
                class: "navbar-actions",
                if let Some(name) = user_name {
                    span { class: "navbar-user", "{name}님" }
                }
                if controls.show_write {
                    button {
                        class: "btn-primary",
                        onclick: move |_| market.send(Command::OpenWrite),
                        Icon { icon: FaPen, width: 12, height: 12 }
                        " 글쓰기"
                    }
                }
                if controls.show_my_posts {
                    button {
                        class: "btn-secondary",
                        onclick: move |_| market.send(Command::ShowMyPosts),
                        "내 판매글"
                    }
                }
                if controls.show_admin {
                    button {
                        class: "btn-secondary",
                        onclick: move |_| market.send(Command::OpenAdmin),
                        "관리자"
                    }
                }
                button {
                    class: "btn-secondary",
                    onclick: move |_| market.send(Command::AccountButton),
                    "{controls.account_label}"
                }
            }
        }
    }
}

/// One button per category, the active one highlighted.
#[component]
pub fn CategoryBar() -> Element {
    let market = use_market();
    let active = market.state().read().filter.category;

    rsx! {
        div {
            class: "category-bar",
            for choice in CategoryFilter::choices() {
                button {
                    key: "{choice.as_query()}",
                    class: if choice == active { "category-btn active" } else { "category-btn" },
                    onclick: move |_| market.send(Command::SelectCategory(choice)),
                    "{choice.label()}"
                }
            }
        }
    }
}
