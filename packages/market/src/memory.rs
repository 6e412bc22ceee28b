use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::backend::MarketBackend;
use crate::error::{MarketError, MarketResult};
use crate::models::{
    CategoryCount, Credentials, ImageRef, Insights, NewPost, Post, PostQuery, PostStatus, Registration,
    UserRow,
};
use crate::session::UserInfo;

const MAX_IMAGES_PER_POST: usize = 5;

/// In-memory MarketBackend for tests and offline demos.
///
/// Applies the same authorisation rules and answers with the same messages as
/// the real server, and records every request it receives.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<Account>,
    posts: Vec<Post>,
    session: Option<i64>,
    next_id: i64,
    calls: Vec<String>,
    offline: bool,
}

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    email: String,
    password: String,
    name: String,
    student_id: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl Account {
    fn info(&self) -> UserInfo {
        UserInfo {
            id: Some(self.id),
            email: self.email.clone(),
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            is_admin: self.is_admin,
        }
    }

    fn row(&self) -> UserRow {
        UserRow {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            created_at: self.created_at,
        }
    }
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, call: String) -> MarketResult<()> {
        self.calls.push(call);
        if self.offline {
            return Err(MarketError::Transport("backend unreachable".to_string()));
        }
        Ok(())
    }

    fn current(&self) -> Option<&Account> {
        let id = self.session?;
        self.users.iter().find(|u| u.id == id)
    }

    fn require_login(&self) -> MarketResult<&Account> {
        self.current()
            .ok_or_else(|| MarketError::Rejected("로그인이 필요합니다.".to_string()))
    }

    fn require_admin(&self) -> MarketResult<&Account> {
        self.current()
            .filter(|u| u.is_admin)
            .ok_or_else(|| MarketError::Rejected("권한이 없습니다.".to_string()))
    }

    /// Index of a post the current user may modify.
    fn managed_post(&self, id: i64) -> MarketResult<usize> {
        let user = self.require_login()?;
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| MarketError::Rejected("게시글을 찾을 수 없습니다.".to_string()))?;
        if !user.can_manage(&self.posts[index].author_email) {
            return Err(MarketError::Rejected("권한이 없습니다.".to_string()));
        }
        Ok(index)
    }
}

impl Account {
    fn can_manage(&self, author_email: &str) -> bool {
        self.is_admin || self.email == author_email
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend holding the two stock accounts: `test@korea.ac.kr` / `test1234`
    /// and the admin `admin@korea.ac.kr` / `admin1234`.
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.add_user("test@korea.ac.kr", "test1234", "김고려", "2021123456", false);
        backend.add_user("admin@korea.ac.kr", "admin1234", "관리자", "0000000000", true);
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_user(&self, email: &str, password: &str, name: &str, student_id: &str, is_admin: bool) -> i64 {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.users.push(Account {
            id,
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            student_id: student_id.to_string(),
            is_admin,
            created_at: Utc::now(),
        });
        id
    }

    /// Insert a post directly, bypassing the session check. Returns its id.
    pub fn add_post(&self, mut post: Post) -> i64 {
        let mut inner = self.lock();
        post.id = inner.next_id();
        let id = post.id;
        inner.posts.push(post);
        id
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    /// Every request seen so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// While offline every request fails as a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }
}

impl MarketBackend for MemoryBackend {
    async fn check_session(&self) -> MarketResult<Option<UserInfo>> {
        let mut inner = self.lock();
        inner.record("GET /api/check-session".to_string())?;
        Ok(inner.current().map(Account::info))
    }

    async fn login(&self, credentials: &Credentials) -> MarketResult<UserInfo> {
        let mut inner = self.lock();
        inner.record("POST /api/login".to_string())?;
        let account = inner
            .users
            .iter()
            .find(|u| u.email == credentials.email && u.password == credentials.password)
            .cloned()
            .ok_or_else(|| MarketError::Rejected("이메일 또는 비밀번호가 올바르지 않습니다.".to_string()))?;
        inner.session = Some(account.id);
        Ok(account.info())
    }

    async fn register(&self, registration: &Registration) -> MarketResult<String> {
        let mut inner = self.lock();
        inner.record("POST /api/register".to_string())?;
        if !registration.email.ends_with("@korea.ac.kr") {
            return Err(MarketError::Rejected("고려대학교 이메일만 가입 가능합니다.".to_string()));
        }
        if inner.users.iter().any(|u| u.email == registration.email) {
            return Err(MarketError::Rejected("이미 가입된 이메일입니다.".to_string()));
        }
        let id = inner.next_id();
        inner.users.push(Account {
            id,
            email: registration.email.clone(),
            password: registration.password.clone(),
            name: registration.name.clone(),
            student_id: registration.student_id.clone(),
            is_admin: false,
            created_at: Utc::now(),
        });
        Ok("회원가입이 완료되었습니다.".to_string())
    }

    async fn logout(&self) -> MarketResult<()> {
        let mut inner = self.lock();
        inner.record("POST /api/logout".to_string())?;
        inner.session = None;
        Ok(())
    }

    async fn list_posts(&self, query: &PostQuery) -> MarketResult<Vec<Post>> {
        let mut inner = self.lock();
        inner.record(format!(
            "GET /api/posts?category={}&search={}",
            query.category.as_query(),
            query.search
        ))?;
        let mut posts: Vec<Post> = inner.posts.iter().filter(|p| query.matches(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> MarketResult<Post> {
        let mut inner = self.lock();
        inner.record(format!("GET /api/posts/{id}"))?;
        let post = inner
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| MarketError::Rejected("게시글을 찾을 수 없습니다.".to_string()))?;
        post.views += 1;
        Ok(post.clone())
    }

    async fn create_post(&self, new_post: &NewPost) -> MarketResult<i64> {
        let mut inner = self.lock();
        inner.record("POST /api/posts".to_string())?;
        let author = inner.require_login()?.clone();
        if new_post.images.len() > MAX_IMAGES_PER_POST {
            return Err(MarketError::Rejected(format!(
                "최대 {MAX_IMAGES_PER_POST}개까지 업로드 가능합니다."
            )));
        }
        let id = inner.next_id();
        let images = new_post
            .images
            .iter()
            .enumerate()
            .map(|(i, upload)| ImageRef {
                path: format!("static/uploads/{id}_{i}_{}", upload.name),
                size: Some(upload.data.len() as u64),
            })
            .collect();
        inner.posts.push(Post {
            id,
            title: new_post.title.clone(),
            price: new_post.price as i64,
            content: new_post.content.clone(),
            category: new_post.category,
            status: PostStatus::Sale,
            author: author.name,
            author_email: author.email,
            created_at: Utc::now(),
            views: 0,
            images,
        });
        Ok(id)
    }

    async fn update_status(&self, id: i64, status: PostStatus) -> MarketResult<()> {
        let mut inner = self.lock();
        inner.record(format!("PUT /api/posts/{id}"))?;
        let index = inner.managed_post(id)?;
        inner.posts[index].status = status;
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> MarketResult<()> {
        let mut inner = self.lock();
        inner.record(format!("DELETE /api/posts/{id}"))?;
        let index = inner.managed_post(id)?;
        inner.posts.remove(index);
        Ok(())
    }

    async fn list_users(&self) -> MarketResult<Vec<UserRow>> {
        let mut inner = self.lock();
        inner.record("GET /api/users".to_string())?;
        inner.require_admin()?;
        let mut rows: Vec<UserRow> = inner.users.iter().map(Account::row).collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_user(&self, id: i64) -> MarketResult<UserRow> {
        let mut inner = self.lock();
        inner.record(format!("GET /api/users/{id}"))?;
        inner.require_admin()?;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .map(Account::row)
            .ok_or_else(|| MarketError::Rejected("사용자를 찾을 수 없습니다.".to_string()))
    }

    async fn delete_user(&self, id: i64) -> MarketResult<()> {
        let mut inner = self.lock();
        inner.record(format!("DELETE /api/users/{id}"))?;
        inner.require_admin()?;
        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| MarketError::Rejected("사용자를 찾을 수 없습니다.".to_string()))?;
        let removed = inner.users.remove(index);
        inner.posts.retain(|p| p.author_email != removed.email);
        Ok(())
    }

    async fn insights(&self) -> MarketResult<Insights> {
        let mut inner = self.lock();
        inner.record("GET /api/insights".to_string())?;
        inner.require_admin()?;
        let mut categories: Vec<CategoryCount> = Vec::new();
        for post in &inner.posts {
            let tag = post.category.as_str();
            match categories.iter_mut().find(|c| c.category == tag) {
                Some(entry) => entry.count += 1,
                None => categories.push(CategoryCount {
                    category: tag.to_string(),
                    count: 1,
                }),
            }
        }
        Ok(Insights {
            total_users: inner.users.len() as u64,
            total_posts: inner.posts.len() as u64,
            categories,
        })
    }
}
