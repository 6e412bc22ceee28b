//! # Seams to the outside world
//!
//! [`MarketBackend`] is the REST contract, one method per endpoint. The HTTP
//! implementation lives in the `api` crate; [`crate::MemoryBackend`] is the
//! in-process one used by tests.
//!
//! Every method resolves to `Err(MarketError::Rejected(..))` when the server
//! answers `success: false` and to `Err(MarketError::Transport(..))` when no
//! usable answer arrived.
//!
//! [`Prompt`] is the blocking browser dialog pair (`alert`/`confirm`).

use std::future::Future;

use crate::error::MarketResult;
use crate::models::{Credentials, Insights, NewPost, Post, PostQuery, PostStatus, Registration, UserRow};
use crate::session::UserInfo;

pub trait MarketBackend {
    /// `GET /api/check-session`. `Ok(None)` when nobody is logged in.
    fn check_session(&self) -> impl Future<Output = MarketResult<Option<UserInfo>>>;
    /// `POST /api/login`.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = MarketResult<UserInfo>>;
    /// `POST /api/register`. Resolves to the server's confirmation message.
    fn register(&self, registration: &Registration) -> impl Future<Output = MarketResult<String>>;
    /// `POST /api/logout`.
    fn logout(&self) -> impl Future<Output = MarketResult<()>>;
    /// `GET /api/posts?category=…&search=…`.
    fn list_posts(&self, query: &PostQuery) -> impl Future<Output = MarketResult<Vec<Post>>>;
    /// `GET /api/posts/{id}`.
    fn get_post(&self, id: i64) -> impl Future<Output = MarketResult<Post>>;
    /// `POST /api/posts` as multipart. Resolves to the new post id.
    fn create_post(&self, post: &NewPost) -> impl Future<Output = MarketResult<i64>>;
    /// `PUT /api/posts/{id}` with `{"status": …}`.
    fn update_status(&self, id: i64, status: PostStatus) -> impl Future<Output = MarketResult<()>>;
    /// `DELETE /api/posts/{id}`.
    fn delete_post(&self, id: i64) -> impl Future<Output = MarketResult<()>>;
    /// `GET /api/users` (admin).
    fn list_users(&self) -> impl Future<Output = MarketResult<Vec<UserRow>>>;
    /// `GET /api/users/{id}` (admin).
    fn get_user(&self, id: i64) -> impl Future<Output = MarketResult<UserRow>>;
    /// `DELETE /api/users/{id}` (admin).
    fn delete_user(&self, id: i64) -> impl Future<Output = MarketResult<()>>;
    /// `GET /api/insights` (admin).
    fn insights(&self) -> impl Future<Output = MarketResult<Insights>>;
}

pub trait Prompt {
    fn alert(&self, message: &str);
    /// Ask before something destructive. `false` means "do nothing".
    fn confirm(&self, message: &str) -> bool;
}
