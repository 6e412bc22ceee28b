//! Login and registration forms shown inside the modal overlay.

use dioxus::prelude::*;
use market::Command;

use crate::use_market;

#[component]
pub fn LoginForm() -> Element {
    let market = use_market();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        market.send(Command::Login {
            email: email(),
            password: password(),
        });
    };

    rsx! {
        form {
            class: "modal-form",
            onsubmit: handle_submit,
            h2 { class: "modal-title", "로그인" }
            input {
                r#type: "email",
                placeholder: "고려대학교 이메일",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            input {
                r#type: "password",
                placeholder: "비밀번호",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button { r#type: "submit", class: "btn-primary btn-block", "로그인" }
            p {
                class: "modal-switch",
                "계정이 없으신가요? "
                a {
                    href: "#",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        market.send(Command::OpenRegister);
                    },
                    "회원가입"
                }
            }
        }
    }
}

#[component]
pub fn RegisterForm() -> Element {
    let market = use_market();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut student_id = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        market.send(Command::Register {
            email: email(),
            password: password(),
            name: name(),
            student_id: student_id(),
        });
    };

    rsx! {
        form {
            class: "modal-form",
            onsubmit: handle_submit,
            h2 { class: "modal-title", "회원가입" }
            input {
                r#type: "email",
                placeholder: "example@korea.ac.kr",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            input {
                r#type: "password",
                placeholder: "비밀번호",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            input {
                r#type: "text",
                placeholder: "이름",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
            input {
                r#type: "text",
                placeholder: "학번",
                value: student_id(),
                oninput: move |evt: FormEvent| student_id.set(evt.value()),
            }
            button { r#type: "submit", class: "btn-primary btn-block", "가입하기" }
            p {
                class: "modal-switch",
                "이미 계정이 있으신가요? "
                a {
                    href: "#",
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        market.send(Command::OpenLogin);
                    },
                    "로그인"
                }
            }
        }
    }
}
