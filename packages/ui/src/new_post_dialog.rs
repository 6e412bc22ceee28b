use dioxus::prelude::*;
use market::dispatch::PostDraft;
use market::staging::PickedImage;
use market::{Category, Command};

use crate::icons::FaXmark;
use crate::{use_market, Icon};

/// Write form for a new post, with image previews and the running size total.
#[component]
pub fn NewPostDialog() -> Element {
    let market = use_market();
    let state = market.state();
    let mut title = use_signal(String::new);
    let mut category = use_signal(Category::default);
    let mut price = use_signal(String::new);
    let mut content = use_signal(String::new);

    let thumbnails = state.read().staging.thumbnails();
    let total = state.read().staging.total_display();

    let handle_files = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let limit = market.max_image_bytes().unwrap_or(u64::MAX);
        let mut picked = Vec::new();
        for name in engine.files() {
            if let Some(size) = engine.file_size(&name).await {
                if size > limit {
                    picked.push(PickedImage::unread(name, size));
                    continue;
                }
            }
            match engine.read_file(&name).await {
                Some(data) => picked.push(PickedImage::new(name, data)),
                None => tracing::warn!(%name, "could not read selected file"),
            }
        }
        market.send(Command::StageImages(picked));
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        market.send(Command::CreatePost(PostDraft {
            title: title(),
            price: price(),
            content: content(),
            category: category(),
        }));
    };

    rsx! {
        form {
            class: "modal-form",
            onsubmit: handle_submit,
            h2 { class: "modal-title", "판매글 작성" }

            input {
                r#type: "text",
                placeholder: "제목",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }
            select {
                value: category().as_str(),
                onchange: move |evt: FormEvent| {
                    if let Ok(c) = evt.value().parse::<Category>() {
                        category.set(c);
                    }
                },
                for c in Category::ALL {
                    option { key: "{c.as_str()}", value: c.as_str(), "{c.label()}" }
                }
            }
            input {
                r#type: "number",
                min: "0",
                placeholder: "가격 (원)",
                value: price(),
                oninput: move |evt: FormEvent| price.set(evt.value()),
            }
            textarea {
                rows: "6",
                placeholder: "상품 설명",
                value: content(),
                oninput: move |evt: FormEvent| content.set(evt.value()),
            }

            label {
                class: "file-label",
                "이미지 (최대 5장, 장당 10MB)"
                input {
                    r#type: "file",
                    accept: "image/png,image/jpeg,image/gif,image/webp",
                    multiple: true,
                    onchange: handle_files,
                }
            }
            div {
                class: "image-preview",
                for entry in thumbnails {
                    div {
                        key: "{entry.id:?}",
                        class: "preview-item",
                        img { src: "{entry.preview}", alt: "{entry.name}" }
                        button {
                            r#type: "button",
                            class: "btn-icon preview-remove",
                            onclick: move |_| market.send(Command::RemoveImage(entry.id)),
                            Icon { icon: FaXmark, width: 10, height: 10 }
                        }
                    }
                }
            }
            p { class: "total-size", "총 용량: {total}" }

            div {
                class: "modal-buttons",
                button { r#type: "submit", class: "btn-primary", "등록하기" }
                button {
                    r#type: "button",
                    class: "btn-secondary",
                    onclick: move |_| market.send(Command::CloseModal),
                    "취소"
                }
            }
        }
    }
}
