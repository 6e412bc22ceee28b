use dioxus::prelude::*;
use market::Command;

use crate::icons::FaXmark;
use crate::{use_market, Icon};

/// Body of the detail modal for the post in `AppState::detail`.
#[component]
pub fn PostDetail() -> Element {
    let market = use_market();
    let Some(detail) = market.state().read().detail.clone() else {
        return rsx! {};
    };
    let status_class = detail.status.as_str();

    rsx! {
        div {
            class: "post-detail",
            h2 { class: "modal-title", "{detail.title}" }
            if !detail.images.is_empty() {
                div {
                    class: "post-detail-images",
                    for src in detail.images.clone() {
                        GalleryImage { key: "{src}", src: src.clone() }
                    }
                }
            }
            div {
                class: "post-detail-info",
                div { class: "post-status {status_class}", "{detail.status_label}" }
                div { class: "post-detail-price", "{detail.price}" }
                div {
                    class: "post-detail-meta",
                    span { "카테고리: {detail.category_label}" }
                    span { "작성자: {detail.author}" }
                    span { "{detail.date}" }
                }
            }
            div {
                class: "post-detail-content",
                for (i, line) in detail.content_lines.iter().enumerate() {
                    if i > 0 {
                        br {}
                    }
                    "{line}"
                }
            }
            if let Some(actions) = detail.actions {
                div {
                    class: "post-actions",
                    for status in actions.statuses {
                        button {
                            key: "{status}",
                            class: "btn-secondary",
                            onclick: move |_| market.send(Command::SetStatus { id: actions.post_id, status }),
                            "{status.label()}"
                        }
                    }
                    button {
                        class: "btn-danger",
                        onclick: move |_| market.send(Command::DeletePost(actions.post_id)),
                        "삭제"
                    }
                }
            }
        }
    }
}

#[component]
fn GalleryImage(src: String) -> Element {
    let market = use_market();
    let enlarge = src.clone();

    rsx! {
        img {
            class: "post-detail-image",
            src: "{src}",
            alt: "상품 이미지",
            onclick: move |_| market.send(Command::EnlargeImage(enlarge.clone())),
        }
    }
}

/// Full-size view of one image, above every modal.
#[component]
pub fn ImageOverlay() -> Element {
    let market = use_market();
    let Some(src) = market.state().read().enlarged.clone() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "image-overlay",
            onclick: move |_| market.send(Command::CloseImage),
            button {
                class: "btn-icon image-overlay-close",
                Icon { icon: FaXmark, width: 20, height: 20 }
            }
            img { src: "{src}", alt: "확대 이미지" }
        }
    }
}
