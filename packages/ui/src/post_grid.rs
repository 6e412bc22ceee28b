use dioxus::prelude::*;
use market::listing::{Listing, PostCard, PLACEHOLDER_GLYPH};
use market::Command;

use crate::use_market;

/// The listing area: grid, empty state, or a load notice.
#[component]
pub fn PostGrid() -> Element {
    let market = use_market();
    let listing = market.state().read().listing.clone();

    match listing {
        Listing::Loading => rsx! {
            p { class: "listing-notice", "불러오는 중..." }
        },
        Listing::Empty => rsx! {
            div {
                class: "empty-state",
                div { class: "empty-glyph", "{PLACEHOLDER_GLYPH}" }
                p { "등록된 상품이 없습니다." }
            }
        },
        Listing::Failed(message) => rsx! {
            p { class: "listing-notice", "{message}" }
        },
        Listing::Grid(cards) => rsx! {
            div {
                class: "posts-grid",
                for card in cards {
                    PostCardView {
                        key: "{card.id}",
                        card: card.clone(),
                        on_open: move |id: i64| market.send(Command::ShowPostDetail(id)),
                    }
                }
            }
        },
    }
}

#[component]
pub fn PostCardView(
    card: PostCard,
    on_open: Option<EventHandler<i64>>,
    /// Extra controls rendered under the card body (admin actions).
    children: Element,
) -> Element {
    let id = card.id;
    let status_class = card.status.as_str();

    rsx! {
        div {
            class: "post-card",
            onclick: move |_| {
                if let Some(handler) = &on_open {
                    handler.call(id);
                }
            },
            div {
                class: "post-image",
                if let Some(src) = &card.image {
                    img { src: "{src}", alt: "{card.title}", loading: "lazy" }
                } else {
                    "{PLACEHOLDER_GLYPH}"
                }
            }
            div {
                class: "post-content",
                div { class: "post-status {status_class}", "{card.status_label}" }
                div { class: "post-title", "{card.title}" }
                div { class: "post-price", "{card.price}" }
                div {
                    class: "post-meta",
                    span { "{card.author}" }
                    span { "{card.date}" }
                }
                {children}
            }
        }
    }
}
