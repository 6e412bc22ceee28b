//! This crate contains all shared UI for the workspace.
//!
//! Components only render [`market::AppState`] and turn DOM events into
//! [`market::Command`]s sent through the [`Market`] handle from
//! [`use_market`]; no component talks to the backend itself.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MARKET_CSS: Asset = asset!("/assets/market.css");

mod provider;
pub use provider::{use_market, Market, MarketProvider};

mod prompt;
pub use prompt::BrowserPrompt;

mod navbar;
pub use navbar::{CategoryBar, Navbar};

mod auth;
pub use auth::{LoginForm, RegisterForm};

mod post_grid;
pub use post_grid::{PostCardView, PostGrid};

mod post_detail;
pub use post_detail::{ImageOverlay, PostDetail};

mod new_post_dialog;
pub use new_post_dialog::NewPostDialog;

mod admin_panels;
pub use admin_panels::{AdminPostsPanel, InsightsPanel, UsersPanel};
