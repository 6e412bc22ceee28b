//! The three independently loaded sections of the admin dashboard.

use dioxus::prelude::*;
use market::admin::Panel;
use market::{Command, PostStatus};

use crate::icons::FaTrash;
use crate::{use_market, Icon, PostCardView};

#[component]
pub fn InsightsPanel() -> Element {
    let market = use_market();
    let panel = market.state().read().admin.insights.clone();

    rsx! {
        section {
            class: "admin-section",
            h2 { "인사이트" }
            match panel {
                Panel::Loading => rsx! { p { class: "listing-notice", "불러오는 중..." } },
                Panel::Failed(message) => rsx! { p { "{message}" } },
                Panel::Ready(insights) => rsx! {
                    p { "총 사용자 수: {insights.total_users}" }
                    p { "총 게시물 수: {insights.total_posts}" }
                    h3 { "카테고리별 게시물" }
                    ul {
                        for entry in insights.categories.iter() {
                            li { key: "{entry.category}", "{entry.label()}: {entry.count}" }
                        }
                    }
                },
            }
        }
    }
}

/// Every post, each with status and delete buttons.
#[component]
pub fn AdminPostsPanel() -> Element {
    let market = use_market();
    let panel = market.state().read().admin.posts.clone();

    rsx! {
        section {
            class: "admin-section",
            h2 { "게시물 관리" }
            match panel {
                Panel::Loading => rsx! { p { class: "listing-notice", "불러오는 중..." } },
                Panel::Failed(message) => rsx! { p { "{message}" } },
                Panel::Ready(cards) => rsx! {
                    div {
                        class: "posts-grid",
                        for card in cards {
                            PostCardView {
                                key: "{card.id}",
                                card: card.clone(),
                                div {
                                    class: "post-actions",
                                    for status in PostStatus::ALL {
                                        button {
                                            key: "{status}",
                                            class: "btn-secondary btn-small",
                                            onclick: move |_| market.send(Command::SetStatus { id: card.id, status }),
                                            "{status.label()}"
                                        }
                                    }
                                    button {
                                        class: "btn-danger btn-small",
                                        onclick: move |_| market.send(Command::DeletePost(card.id)),
                                        "삭제"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn UsersPanel() -> Element {
    let market = use_market();
    let panel = market.state().read().admin.users.clone();

    rsx! {
        section {
            class: "admin-section",
            h2 { "사용자 관리" }
            match panel {
                Panel::Loading => rsx! { p { class: "listing-notice", "불러오는 중..." } },
                Panel::Failed(message) => rsx! { p { "{message}" } },
                Panel::Ready(users) => rsx! {
                    ul {
                        class: "user-list",
                        for user in users {
                            li {
                                key: "{user.id}",
                                class: "user-item",
                                span { "{user.summary}" }
                                button {
                                    class: "btn-danger btn-small",
                                    onclick: move |_| market.send(Command::DeleteUser(user.id)),
                                    Icon { icon: FaTrash, width: 12, height: 12 }
                                    " 삭제"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
