//! `HttpBackend`: one method per REST endpoint.

use market::{
    Credentials, Insights, MarketBackend, MarketConfig, MarketError, MarketResult, NewPost, Post, PostQuery,
    PostStatus, Registration, UserInfo, UserRow,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};

use crate::envelope::Envelope;

/// Origin used by native builds when `MARKET_API_URL` is unset.
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

fn transport(e: reqwest::Error) -> MarketError {
    MarketError::Transport(e.to_string())
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Client for the API served at `base_url` (scheme and host, no trailing path).
    pub fn new(base_url: impl Into<String>) -> MarketResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(true);
        let client = builder.build().map_err(transport)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "http backend ready");
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &MarketConfig) -> MarketResult<Self> {
        Self::new(config.api.base_url.clone())
    }

    /// Client for a native build. `MARKET_API_URL` (after loading `.env`) wins
    /// over `config`, which wins over [`DEFAULT_API_URL`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env(config: &MarketConfig) -> MarketResult<Self> {
        dotenvy::dotenv().ok();
        Self::new(native_base_url(std::env::var("MARKET_API_URL").ok(), config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> MarketResult<Envelope> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        Envelope::parse(&text).map_err(|e| {
            tracing::warn!(%status, "undecodable reply");
            e
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn native_base_url(from_env: Option<String>, config: &MarketConfig) -> String {
    from_env
        .filter(|url| !url.is_empty())
        .or_else(|| Some(config.api.base_url.clone()).filter(|url| !url.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Multipart body of `POST /api/posts`.
fn post_form(post: &NewPost) -> MarketResult<Form> {
    let mut form = Form::new()
        .text("title", post.title.clone())
        .text("price", post.price.to_string())
        .text("content", post.content.clone())
        .text("category", post.category.as_str());
    for image in &post.images {
        let part = Part::bytes(image.data.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime)
            .map_err(transport)?;
        form = form.part("images", part);
    }
    Ok(form)
}

impl MarketBackend for HttpBackend {
    async fn check_session(&self) -> MarketResult<Option<UserInfo>> {
        self.send(self.client.get(self.url("/api/check-session")))
            .await?
            .session()
    }

    async fn login(&self, credentials: &Credentials) -> MarketResult<UserInfo> {
        self.send(self.client.post(self.url("/api/login")).json(credentials))
            .await?
            .field("user")
    }

    async fn register(&self, registration: &Registration) -> MarketResult<String> {
        let message = self
            .send(self.client.post(self.url("/api/register")).json(registration))
            .await?
            .message()?;
        Ok(message.unwrap_or_else(|| "회원가입이 완료되었습니다.".to_string()))
    }

    async fn logout(&self) -> MarketResult<()> {
        self.send(self.client.post(self.url("/api/logout"))).await?.done()
    }

    async fn list_posts(&self, query: &PostQuery) -> MarketResult<Vec<Post>> {
        self.send(self.client.get(self.url("/api/posts")).query(&query.pairs()))
            .await?
            .field("posts")
    }

    async fn get_post(&self, id: i64) -> MarketResult<Post> {
        self.send(self.client.get(self.url(&format!("/api/posts/{id}"))))
            .await?
            .field("post")
    }

    async fn create_post(&self, post: &NewPost) -> MarketResult<i64> {
        let form = post_form(post)?;
        self.send(self.client.post(self.url("/api/posts")).multipart(form))
            .await?
            .field("post_id")
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> MarketResult<()> {
        let body = serde_json::json!({ "status": status });
        self.send(self.client.put(self.url(&format!("/api/posts/{id}"))).json(&body))
            .await?
            .done()
    }

    async fn delete_post(&self, id: i64) -> MarketResult<()> {
        self.send(self.client.delete(self.url(&format!("/api/posts/{id}"))))
            .await?
            .done()
    }

    async fn list_users(&self) -> MarketResult<Vec<UserRow>> {
        self.send(self.client.get(self.url("/api/users")))
            .await?
            .field("users")
    }

    async fn get_user(&self, id: i64) -> MarketResult<UserRow> {
        self.send(self.client.get(self.url(&format!("/api/users/{id}"))))
            .await?
            .field("user")
    }

    async fn delete_user(&self, id: i64) -> MarketResult<()> {
        self.send(self.client.delete(self.url(&format!("/api/users/{id}"))))
            .await?
            .done()
    }

    async fn insights(&self) -> MarketResult<Insights> {
        self.send(self.client.get(self.url("/api/insights")))
            .await?
            .field("insights")
    }
}
