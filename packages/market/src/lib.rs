//! # Market: platform-free core of the campus marketplace client
//!
//! Everything the web frontend does that is not DOM wiring lives here, so it can
//! be exercised natively in tests:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: posts, statuses, categories, users, insights, upload payloads |
//! | [`format`] | Price, relative-time and byte-size display strings |
//! | [`session`] | The logged-in user record and the controls it unlocks |
//! | [`staging`] | Client-side bookkeeping for images picked but not yet uploaded |
//! | [`listing`] / [`detail`] / [`admin`] | View models the UI renders |
//! | [`state`] | [`AppState`] and the [`StateCell`] seam the dispatcher writes through |
//! | [`backend`] | The [`MarketBackend`] and [`Prompt`] traits |
//! | [`dispatch`] | The typed [`Command`] set and [`Dispatcher::dispatch`] |
//! | [`config`] | `market.toml` configuration |

pub mod admin;
pub mod backend;
pub mod config;
pub mod detail;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod listing;
pub mod models;
pub mod session;
pub mod staging;
pub mod state;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{MarketBackend, Prompt};
pub use config::MarketConfig;
pub use dispatch::{Command, Dispatcher, Redirect};
pub use error::{MarketError, MarketResult};
pub use models::{
    Category, CategoryFilter, Credentials, Insights, NewPost, Post, PostQuery, PostStatus, Registration, UserRow,
};
pub use session::{Controls, UserInfo};
pub use state::{AppState, Modal, StateCell, Surface};
