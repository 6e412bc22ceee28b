use dioxus::prelude::*;
use market::{Command, Modal, Surface};

use crate::views::ModalOverlay;
use crate::{
    use_market, CategoryBar, ImageOverlay, LoginForm, Navbar, NewPostDialog, PostDetail, PostGrid, RegisterForm,
    MARKET_CSS,
};

/// The market page: header, category filter, post grid and its modals.
#[component]
pub fn MarketView() -> Element {
    let market = use_market();
    use_hook(move || market.send(Command::Enter(Surface::Market)));

    let modal = market.state().read().modal;
    let close = move |_: ()| market.send(Command::CloseModal);

    rsx! {
        document::Link { rel: "stylesheet", href: MARKET_CSS }
        Navbar {}
        main {
            class: "market-page",
            CategoryBar {}
            PostGrid {}
        }

        match modal {
            Some(Modal::Login) => rsx! {
                ModalOverlay { on_close: close, LoginForm {} }
            },
            Some(Modal::Register) => rsx! {
                ModalOverlay { on_close: close, RegisterForm {} }
            },
            Some(Modal::Write) => rsx! {
                ModalOverlay { on_close: close, wide: true, NewPostDialog {} }
            },
            Some(Modal::Detail) => rsx! {
                ModalOverlay { on_close: close, wide: true, PostDetail {} }
            },
            None => rsx! {},
        }
        ImageOverlay {}
    }
}
