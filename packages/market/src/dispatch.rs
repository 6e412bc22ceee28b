//! # Commands and the dispatcher
//!
//! Every user action is a [`Command`]. The UI never calls the backend itself;
//! it hands commands to [`Dispatcher::dispatch`], which validates, issues at
//! most the requests the action needs, reports the outcome through the
//! [`Prompt`], and writes the re-rendered view models into [`AppState`].
//!
//! Failures follow one policy:
//!
//! | Error | Reported as |
//! |-------|-------------|
//! | [`MarketError::Invalid`] | alert, no request sent |
//! | [`MarketError::Rejected`] | the server's message, alerted verbatim |
//! | [`MarketError::Transport`] | logged, plus a generic alert for the action |
//!
//! Nothing is retried. Deleting a post or a user asks for confirmation first;
//! declining sends nothing.

use chrono::Utc;

use crate::backend::{MarketBackend, Prompt};
use crate::config::MarketConfig;
use crate::detail::PostDetailView;
use crate::error::{MarketError, MarketResult};
use crate::listing::Listing;
use crate::models::{Category, CategoryFilter, Credentials, NewPost, PostQuery, PostStatus, Registration};
use crate::staging::{ImageId, ImageStaging, PickedImage};
use crate::state::{AppState, Modal, StateCell, Surface};

const MIB: u64 = 1024 * 1024;

const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
const FIELDS_REQUIRED: &str = "모든 필드를 입력해주세요.";
const POST_FIELDS_REQUIRED: &str = "제목, 가격, 설명은 필수 항목입니다.";
const PRICE_INVALID: &str = "가격은 0 이상의 숫자로 입력해주세요.";
const LOAD_POSTS_FAILED: &str = "게시글을 불러오지 못했습니다.";

/// A user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A page was opened: check the session and load what it shows.
    Enter(Surface),
    CheckSession,
    /// The header login button: logs out when logged in, else opens the login form.
    AccountButton,
    OpenLogin,
    OpenRegister,
    /// Opens the write form with an empty staged set.
    OpenWrite,
    CloseModal,
    EnlargeImage(String),
    CloseImage,
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        name: String,
        student_id: String,
    },
    Logout,
    SelectCategory(CategoryFilter),
    Search(String),
    LoadPosts,
    ShowMyPosts,
    ShowPostDetail(i64),
    /// The file input changed; replaces the staged set.
    StageImages(Vec<PickedImage>),
    RemoveImage(ImageId),
    CreatePost(PostDraft),
    SetStatus {
        id: i64,
        status: PostStatus,
    },
    DeletePost(i64),
    DeleteUser(i64),
    OpenAdmin,
    LoadInsights,
    LoadAdminPosts,
    LoadUsers,
}

/// Text fields of the write form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub price: String,
    pub content: String,
    pub category: Category,
}

/// Navigation a command asks the UI to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Home,
    Admin,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Home => "/",
            Redirect::Admin => "/admin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher<B, P> {
    backend: B,
    prompt: P,
    config: MarketConfig,
}

impl<B: MarketBackend, P: Prompt> Dispatcher<B, P> {
    pub fn new(backend: B, prompt: P, config: MarketConfig) -> Self {
        Self {
            backend,
            prompt,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Handle one command against `state`.
    pub async fn dispatch<S: StateCell>(&self, state: &mut S, command: Command) -> Option<Redirect> {
        match command {
            Command::Enter(surface) => return self.enter(state, surface).await,
            Command::CheckSession => self.check_session(state).await,
            Command::AccountButton => {
                if state.read_state(|s| s.session.is_some()) {
                    return self.logout(state).await;
                }
                state.write_state(|s| s.modal = Some(Modal::Login));
            }
            Command::OpenLogin => state.write_state(|s| s.modal = Some(Modal::Login)),
            Command::OpenRegister => state.write_state(|s| s.modal = Some(Modal::Register)),
            Command::OpenWrite => state.write_state(|s| {
                s.staging.clear();
                s.modal = Some(Modal::Write);
            }),
            Command::CloseModal => state.write_state(|s| s.modal = None),
            Command::EnlargeImage(src) => state.write_state(|s| s.enlarged = Some(src)),
            Command::CloseImage => state.write_state(|s| s.enlarged = None),
            Command::Login { email, password } => self.login(state, email, password).await,
            Command::Register {
                email,
                password,
                name,
                student_id,
            } => {
                self.register(
                    state,
                    Registration {
                        email,
                        password,
                        name,
                        student_id,
                    },
                )
                .await
            }
            Command::Logout => return self.logout(state).await,
            Command::SelectCategory(category) => {
                state.write_state(|s| s.filter.category = category);
                self.load_posts(state).await;
            }
            Command::Search(text) => {
                state.write_state(|s| s.filter.search = text);
                self.load_posts(state).await;
            }
            Command::LoadPosts => self.load_posts(state).await,
            Command::ShowMyPosts => self.show_my_posts(state).await,
            Command::ShowPostDetail(id) => self.show_post_detail(state, id).await,
            Command::StageImages(files) => self.stage_images(state, files),
            Command::RemoveImage(id) => {
                state.write_state(|s| s.staging.remove(id));
            }
            Command::CreatePost(draft) => self.create_post(state, draft).await,
            Command::SetStatus { id, status } => self.set_status(state, id, status).await,
            Command::DeletePost(id) => self.delete_post(state, id).await,
            Command::DeleteUser(id) => self.delete_user(state, id).await,
            Command::OpenAdmin => return Some(Redirect::Admin),
            Command::LoadInsights => self.load_insights(state).await,
            Command::LoadAdminPosts => self.load_admin_posts(state).await,
            Command::LoadUsers => self.load_users(state).await,
        }
        None
    }

    /// Surface a failed action to the user.
    fn report(&self, error: MarketError, generic: &str) {
        match error {
            MarketError::Transport(detail) => {
                tracing::error!(%detail, "{generic}");
                self.prompt.alert(generic);
            }
            MarketError::Rejected(message) | MarketError::Invalid(message) => {
                tracing::warn!(%message, "action refused");
                self.prompt.alert(&message);
            }
        }
    }

    async fn enter<S: StateCell>(&self, state: &mut S, surface: Surface) -> Option<Redirect> {
        state.write_state(|s| s.surface = surface);
        self.check_session(state).await;
        match surface {
            Surface::Market => self.load_posts(state).await,
            Surface::Admin => {
                if !state.read_state(AppState::is_admin) {
                    tracing::warn!("admin page opened without an admin session");
                    return Some(Redirect::Home);
                }
                self.load_insights(state).await;
                self.load_admin_posts(state).await;
                self.load_users(state).await;
            }
        }
        None
    }

    async fn check_session<S: StateCell>(&self, state: &mut S) {
        match self.backend.check_session().await {
            Ok(user) => state.write_state(|s| s.session = user),
            Err(e) => tracing::error!(error = %e, "session check failed"),
        }
    }

    async fn login<S: StateCell>(&self, state: &mut S, email: String, password: String) {
        let email = email.trim().to_string();
        if email.is_empty() || password.is_empty() {
            return self.report(MarketError::Invalid(FIELDS_REQUIRED.to_string()), FIELDS_REQUIRED);
        }

        match self.backend.login(&Credentials { email, password }).await {
            Ok(user) => {
                tracing::info!(email = %user.email, admin = user.is_admin, "logged in");
                state.write_state(|s| {
                    s.session = Some(user);
                    s.modal = None;
                });
                self.prompt.alert("로그인되었습니다!");
                self.refresh_posts(state).await;
            }
            Err(e) => self.report(e, "로그인 중 오류가 발생했습니다."),
        }
    }

    async fn register<S: StateCell>(&self, state: &mut S, mut registration: Registration) {
        registration.email = registration.email.trim().to_string();
        registration.name = registration.name.trim().to_string();
        registration.student_id = registration.student_id.trim().to_string();
        if registration.email.is_empty()
            || registration.password.is_empty()
            || registration.name.is_empty()
            || registration.student_id.is_empty()
        {
            return self.report(MarketError::Invalid(FIELDS_REQUIRED.to_string()), FIELDS_REQUIRED);
        }

        match self.backend.register(&registration).await {
            Ok(message) => {
                tracing::info!(email = %registration.email, "registered");
                self.prompt.alert(&message);
                state.write_state(|s| s.modal = Some(Modal::Login));
            }
            Err(e) => self.report(e, "회원가입 중 오류가 발생했습니다."),
        }
    }

    async fn logout<S: StateCell>(&self, state: &mut S) -> Option<Redirect> {
        match self.backend.logout().await {
            Ok(()) => {
                tracing::info!("logged out");
                let surface = state.write_state(|s| {
                    s.session = None;
                    s.modal = None;
                    s.detail = None;
                    s.surface
                });
                self.prompt.alert("로그아웃되었습니다.");
                match surface {
                    Surface::Admin => return Some(Redirect::Home),
                    Surface::Market => self.load_posts(state).await,
                }
            }
            Err(e) => self.report(e, "로그아웃 중 오류가 발생했습니다."),
        }
        None
    }

    async fn load_posts<S: StateCell>(&self, state: &mut S) {
        let query = state.read_state(|s| s.filter.query());
        let listing = match self.backend.list_posts(&query).await {
            Ok(posts) => Listing::from_posts(&posts, Utc::now()),
            Err(MarketError::Rejected(message)) => Listing::Failed(message),
            Err(e) => {
                tracing::error!(error = %e, "failed to load posts");
                Listing::Failed(LOAD_POSTS_FAILED.to_string())
            }
        };
        state.write_state(|s| s.listing = listing);
    }

    /// Reload whatever post list the current surface shows.
    async fn refresh_posts<S: StateCell>(&self, state: &mut S) {
        match state.read_state(|s| s.surface) {
            Surface::Market => self.load_posts(state).await,
            Surface::Admin => self.load_admin_posts(state).await,
        }
    }

    async fn show_my_posts<S: StateCell>(&self, state: &mut S) {
        let Some(email) = state.read_state(|s| s.session.as_ref().map(|u| u.email.clone())) else {
            return self.report(MarketError::Invalid(LOGIN_REQUIRED.to_string()), LOGIN_REQUIRED);
        };

        let listing = match self.backend.list_posts(&PostQuery::default()).await {
            Ok(posts) => {
                let mine: Vec<_> = posts.into_iter().filter(|p| p.author_email == email).collect();
                Listing::from_posts(&mine, Utc::now())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load own posts");
                Listing::Failed(LOAD_POSTS_FAILED.to_string())
            }
        };
        state.write_state(|s| s.listing = listing);
    }

    async fn show_post_detail<S: StateCell>(&self, state: &mut S, id: i64) {
        match self.backend.get_post(id).await {
            Ok(post) => state.write_state(|s| {
                s.detail = Some(PostDetailView::build(&post, s.session.as_ref(), Utc::now()));
                s.modal = Some(Modal::Detail);
            }),
            Err(e) => self.report(e, "게시글을 불러오는 중 오류가 발생했습니다."),
        }
    }

    fn stage_images<S: StateCell>(&self, state: &mut S, files: Vec<PickedImage>) {
        let max_bytes = self.config.upload.max_image_bytes;
        state.write_state(|s| s.staging.clear());
        for file in files {
            if let Err(e) = state.write_state(|s| s.staging.stage(file, max_bytes)) {
                tracing::warn!(error = ?e, "image not staged");
                self.prompt.alert(&e.to_string());
            }
        }
    }

    /// Turn the form fields and staged images into an upload, or explain why not.
    fn validate_post(&self, draft: PostDraft, staging: &ImageStaging) -> MarketResult<NewPost> {
        let title = draft.title.trim().to_string();
        let price = draft.price.trim().to_string();
        let content = draft.content.trim().to_string();
        if title.is_empty() || price.is_empty() || content.is_empty() {
            return Err(MarketError::Invalid(POST_FIELDS_REQUIRED.to_string()));
        }
        let price: u64 = price
            .parse()
            .map_err(|_| MarketError::Invalid(PRICE_INVALID.to_string()))?;

        let limits = &self.config.upload;
        if staging.len() > limits.max_images {
            return Err(MarketError::Invalid(format!(
                "최대 {}개까지 업로드 가능합니다.",
                limits.max_images
            )));
        }
        if staging.total_bytes() > limits.max_total_bytes {
            return Err(MarketError::Invalid(format!(
                "전체 이미지 용량은 {}MB 이하여야 합니다.",
                limits.max_total_bytes / MIB
            )));
        }

        Ok(NewPost {
            title,
            price,
            content,
            category: draft.category,
            images: staging.to_uploads(),
        })
    }

    async fn create_post<S: StateCell>(&self, state: &mut S, draft: PostDraft) {
        const GENERIC: &str = "게시글 작성 중 오류가 발생했습니다.";
        if state.read_state(|s| s.session.is_none()) {
            return self.report(MarketError::Invalid(LOGIN_REQUIRED.to_string()), GENERIC);
        }
        let new_post = match state.read_state(|s| self.validate_post(draft, &s.staging)) {
            Ok(post) => post,
            Err(e) => return self.report(e, GENERIC),
        };

        match self.backend.create_post(&new_post).await {
            Ok(id) => {
                tracing::info!(id, images = new_post.images.len(), "post created");
                self.prompt.alert("게시글이 등록되었습니다!");
                state.write_state(|s| {
                    s.modal = None;
                    s.staging.clear();
                });
                self.load_posts(state).await;
            }
            Err(e) => self.report(e, GENERIC),
        }
    }

    /// Re-render after a post changed: the market page closes the detail view
    /// and reloads the grid, the admin page reloads its list.
    async fn after_post_change<S: StateCell>(&self, state: &mut S) {
        state.write_state(|s| {
            if s.surface == Surface::Market {
                s.modal = None;
                s.detail = None;
            }
        });
        self.refresh_posts(state).await;
    }

    async fn set_status<S: StateCell>(&self, state: &mut S, id: i64, status: PostStatus) {
        match self.backend.update_status(id, status).await {
            Ok(()) => {
                tracing::info!(id, %status, "status changed");
                self.prompt.alert("상태가 변경되었습니다.");
                self.after_post_change(state).await;
            }
            Err(e) => self.report(e, "상태 변경 중 오류가 발생했습니다."),
        }
    }

    async fn delete_post<S: StateCell>(&self, state: &mut S, id: i64) {
        if !self.prompt.confirm("정말 삭제하시겠습니까?") {
            return;
        }
        match self.backend.delete_post(id).await {
            Ok(()) => {
                tracing::info!(id, "post deleted");
                self.prompt.alert("게시글이 삭제되었습니다.");
                self.after_post_change(state).await;
            }
            Err(e) => self.report(e, "게시글 삭제 중 오류가 발생했습니다."),
        }
    }

    async fn delete_user<S: StateCell>(&self, state: &mut S, id: i64) {
        if !self
            .prompt
            .confirm("이 사용자를 삭제하시겠습니까? 모든 게시물이 함께 삭제됩니다.")
        {
            return;
        }
        match self.backend.delete_user(id).await {
            Ok(()) => {
                tracing::info!(id, "user deleted");
                self.prompt.alert("사용자가 삭제되었습니다.");
                self.load_users(state).await;
                self.load_admin_posts(state).await;
            }
            Err(e) => self.report(e, "사용자 삭제 중 오류가 발생했습니다."),
        }
    }

    async fn load_insights<S: StateCell>(&self, state: &mut S) {
        let result = self.backend.insights().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "failed to load insights");
        }
        state.write_state(|s| s.admin.set_insights(result));
    }

    async fn load_admin_posts<S: StateCell>(&self, state: &mut S) {
        let result = self.backend.list_posts(&PostQuery::default()).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "failed to load admin posts");
        }
        state.write_state(|s| s.admin.set_posts(result, Utc::now()));
    }

    async fn load_users<S: StateCell>(&self, state: &mut S) {
        let result = self.backend.list_users().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "failed to load users");
        }
        state.write_state(|s| s.admin.set_users(result));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::admin::Panel;
    use crate::listing::tests::sample_post;
    use crate::memory::MemoryBackend;

    /// Prompt that records alerts and answers confirms with a fixed value.
    #[derive(Clone, Default)]
    struct RecordingPrompt {
        alerts: Rc<RefCell<Vec<String>>>,
        confirms: Rc<RefCell<Vec<String>>>,
        accept: Rc<Cell<bool>>,
    }

    impl RecordingPrompt {
        fn alerts(&self) -> Vec<String> {
            self.alerts.borrow().clone()
        }
    }

    impl Prompt for RecordingPrompt {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            self.accept.get()
        }
    }

    fn setup() -> (Dispatcher<MemoryBackend, RecordingPrompt>, MemoryBackend, RecordingPrompt) {
        let backend = MemoryBackend::seeded();
        let prompt = RecordingPrompt::default();
        let dispatcher = Dispatcher::new(backend.clone(), prompt.clone(), MarketConfig::default());
        (dispatcher, backend, prompt)
    }

    fn login(email: &str, password: &str) -> Command {
        Command::Login {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn draft(title: &str, price: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            price: price.to_string(),
            content: "설명".to_string(),
            category: Category::Books,
        }
    }

    fn picked(name: &str, size: u64) -> PickedImage {
        PickedImage::new(name, vec![7u8; size as usize])
    }

    #[tokio::test]
    async fn test_login_reveals_member_controls() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::Enter(Surface::Market)).await;
        assert!(!state.controls().show_write);

        state.modal = Some(Modal::Login);
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;

        assert_eq!(state.session.as_ref().unwrap().name, "김고려");
        let controls = state.controls();
        assert!(controls.show_write && controls.show_my_posts);
        assert!(!controls.show_admin);
        assert_eq!(controls.account_label, "로그아웃");
        assert_eq!(state.modal, None);
        assert_eq!(prompt.alerts(), vec!["로그인되었습니다!"]);
    }

    #[tokio::test]
    async fn test_admin_login_reveals_admin_control() {
        let (dispatcher, _backend, _prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("admin@korea.ac.kr", "admin1234"))
            .await;
        assert!(state.controls().show_admin);
        assert_eq!(dispatcher.dispatch(&mut state, Command::OpenAdmin).await, Some(Redirect::Admin));
    }

    #[tokio::test]
    async fn test_failed_login_alerts_server_message() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "wrong"))
            .await;
        assert!(state.session.is_none());
        assert_eq!(prompt.alerts(), vec!["이메일 또는 비밀번호가 올바르지 않습니다."]);
    }

    #[tokio::test]
    async fn test_missing_fields_send_nothing() {
        let (dispatcher, backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, login("", "test1234")).await;
        dispatcher
            .dispatch(
                &mut state,
                Command::Register {
                    email: "new@korea.ac.kr".into(),
                    password: "pw".into(),
                    name: " ".into(),
                    student_id: "1".into(),
                },
            )
            .await;
        assert!(backend.calls().is_empty());
        assert_eq!(prompt.alerts(), vec![FIELDS_REQUIRED, FIELDS_REQUIRED]);
    }

    #[tokio::test]
    async fn test_register_then_login_form() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState {
            modal: Some(Modal::Register),
            ..AppState::default()
        };
        dispatcher
            .dispatch(
                &mut state,
                Command::Register {
                    email: "new@korea.ac.kr".into(),
                    password: "pw".into(),
                    name: "새내기".into(),
                    student_id: "2025000001".into(),
                },
            )
            .await;
        assert_eq!(state.modal, Some(Modal::Login));
        assert_eq!(prompt.alerts(), vec!["회원가입이 완료되었습니다."]);
    }

    #[tokio::test]
    async fn test_empty_and_nonempty_listing() {
        let (dispatcher, backend, _prompt) = setup();
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::LoadPosts).await;
        assert!(state.listing.shows_empty_state());
        assert!(!state.listing.shows_grid());

        backend.add_post(sample_post(0, "test@korea.ac.kr", Utc::now()));
        dispatcher.dispatch(&mut state, Command::LoadPosts).await;
        assert!(state.listing.shows_grid());
        assert!(!state.listing.shows_empty_state());
        assert_eq!(state.listing.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_filters_reach_the_query() {
        let (dispatcher, backend, _prompt) = setup();
        let mut book = sample_post(0, "test@korea.ac.kr", Utc::now());
        book.title = "알고리즘 책".into();
        backend.add_post(book);
        let mut laptop = sample_post(0, "test@korea.ac.kr", Utc::now());
        laptop.category = Category::Electronics;
        laptop.title = "노트북".into();
        backend.add_post(laptop);

        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, Command::SelectCategory(CategoryFilter::Only(Category::Electronics)))
            .await;
        assert_eq!(state.listing.cards().len(), 1);
        assert_eq!(state.listing.cards()[0].title, "노트북");

        dispatcher.dispatch(&mut state, Command::Search("책".into())).await;
        assert!(state.listing.shows_empty_state());
        assert_eq!(
            backend.calls().last().unwrap(),
            "GET /api/posts?category=electronics&search=책"
        );

        dispatcher.dispatch(&mut state, Command::SelectCategory(CategoryFilter::All)).await;
        assert_eq!(state.listing.cards()[0].title, "알고리즘 책");
    }

    #[tokio::test]
    async fn test_transport_failure_is_passive_on_listing() {
        let (dispatcher, backend, prompt) = setup();
        backend.set_offline(true);
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::Enter(Surface::Market)).await;
        assert_eq!(state.listing, Listing::Failed(LOAD_POSTS_FAILED.to_string()));
        assert!(prompt.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_on_action_alerts_generic_message() {
        let (dispatcher, backend, prompt) = setup();
        backend.set_offline(true);
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        assert_eq!(prompt.alerts(), vec!["로그인 중 오류가 발생했습니다."]);
        assert!(state.session.is_none());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let (dispatcher, backend, prompt) = setup();
        let id = backend.add_post(sample_post(0, "test@korea.ac.kr", Utc::now()));
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        let before = state.listing.clone();
        backend.clear_calls();

        prompt.accept.set(false);
        dispatcher.dispatch(&mut state, Command::DeletePost(id)).await;

        assert!(backend.calls().is_empty());
        assert_eq!(state.listing, before);
        assert_eq!(backend.posts().len(), 1);
        assert_eq!(*prompt.confirms.borrow(), vec!["정말 삭제하시겠습니까?"]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_closes_detail_and_reloads() {
        let (dispatcher, backend, prompt) = setup();
        let id = backend.add_post(sample_post(0, "test@korea.ac.kr", Utc::now()));
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::ShowPostDetail(id)).await;
        assert_eq!(state.modal, Some(Modal::Detail));
        assert!(state.detail.as_ref().unwrap().actions.is_some());

        prompt.accept.set(true);
        dispatcher.dispatch(&mut state, Command::DeletePost(id)).await;
        assert_eq!(state.modal, None);
        assert!(state.detail.is_none());
        assert!(state.listing.shows_empty_state());
        assert_eq!(prompt.alerts().last().unwrap(), "게시글이 삭제되었습니다.");
    }

    #[tokio::test]
    async fn test_detail_hides_actions_from_strangers() {
        let (dispatcher, backend, _prompt) = setup();
        let id = backend.add_post(sample_post(0, "someone@korea.ac.kr", Utc::now()));
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::ShowPostDetail(id)).await;
        assert!(state.detail.as_ref().unwrap().actions.is_none());

        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::ShowPostDetail(id)).await;
        assert!(state.detail.as_ref().unwrap().actions.is_none());
    }

    #[tokio::test]
    async fn test_missing_post_alerts_server_message() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::ShowPostDetail(404)).await;
        assert_eq!(state.modal, None);
        assert_eq!(prompt.alerts(), vec!["게시글을 찾을 수 없습니다."]);
    }

    #[tokio::test]
    async fn test_status_can_move_in_any_direction() {
        let (dispatcher, backend, prompt) = setup();
        let id = backend.add_post(sample_post(0, "test@korea.ac.kr", Utc::now()));
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        for status in [PostStatus::Sold, PostStatus::Sale, PostStatus::Reserved] {
            dispatcher.dispatch(&mut state, Command::SetStatus { id, status }).await;
            assert_eq!(state.listing.cards()[0].status, status);
        }
        assert_eq!(prompt.alerts().iter().filter(|a| *a == "상태가 변경되었습니다.").count(), 3);
    }

    #[tokio::test]
    async fn test_my_posts_filters_by_author() {
        let (dispatcher, backend, prompt) = setup();
        backend.add_post(sample_post(0, "test@korea.ac.kr", Utc::now()));
        backend.add_post(sample_post(0, "admin@korea.ac.kr", Utc::now()));
        let mut state = AppState::default();

        dispatcher.dispatch(&mut state, Command::ShowMyPosts).await;
        assert_eq!(prompt.alerts(), vec![LOGIN_REQUIRED]);

        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        assert_eq!(state.listing.cards().len(), 2);
        dispatcher.dispatch(&mut state, Command::ShowMyPosts).await;
        assert_eq!(state.listing.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_image_is_skipped_with_alert() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(
                &mut state,
                Command::StageImages(vec![
                    picked("a.jpg", 1000),
                    picked("huge.jpg", 10 * MIB + 1),
                    picked("b.png", 500),
                ]),
            )
            .await;
        assert_eq!(state.staging.len(), 2);
        assert_eq!(state.staging.total_bytes(), 1500);
        assert_eq!(prompt.alerts(), vec!["각 이미지는 10MB 이하여야 합니다."]);

        // A new selection replaces the previous one.
        dispatcher
            .dispatch(&mut state, Command::StageImages(vec![picked("c.gif", 10)]))
            .await;
        assert_eq!(state.staging.total_bytes(), 10);
        let id = state.staging.entries()[0].id;
        dispatcher.dispatch(&mut state, Command::RemoveImage(id)).await;
        assert!(state.staging.is_empty());
    }

    #[tokio::test]
    async fn test_unread_file_over_configured_limit_is_refused() {
        let backend = MemoryBackend::seeded();
        let prompt = RecordingPrompt::default();
        let config = MarketConfig::default().with_max_image_bytes(2 * MIB);
        let dispatcher = Dispatcher::new(backend, prompt.clone(), config);
        let mut state = AppState::default();
        dispatcher
            .dispatch(
                &mut state,
                Command::StageImages(vec![
                    PickedImage::unread("scan.png", 5 * MIB),
                    picked("thumb.png", 100),
                ]),
            )
            .await;
        assert_eq!(state.staging.len(), 1);
        assert_eq!(state.staging.total_bytes(), 100);
        assert_eq!(prompt.alerts(), vec!["각 이미지는 2MB 이하여야 합니다."]);
    }

    #[tokio::test]
    async fn test_create_post_validation() {
        let (dispatcher, backend, prompt) = setup();
        let mut state = AppState::default();

        dispatcher.dispatch(&mut state, Command::CreatePost(draft("책", "1000"))).await;
        assert_eq!(prompt.alerts(), vec![LOGIN_REQUIRED]);

        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        backend.clear_calls();
        dispatcher.dispatch(&mut state, Command::CreatePost(draft("", "1000"))).await;
        dispatcher.dispatch(&mut state, Command::CreatePost(draft("책", "만원"))).await;

        let files = (0..6).map(|i| picked(&format!("{i}.jpg"), 10)).collect();
        dispatcher.dispatch(&mut state, Command::StageImages(files)).await;
        dispatcher.dispatch(&mut state, Command::CreatePost(draft("책", "1000"))).await;

        assert!(backend.calls().is_empty());
        let alerts = prompt.alerts();
        assert_eq!(
            &alerts[alerts.len() - 3..],
            [POST_FIELDS_REQUIRED, PRICE_INVALID, "최대 5개까지 업로드 가능합니다."]
        );
    }

    #[tokio::test]
    async fn test_create_post_uploads_staged_images() {
        let (dispatcher, backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::OpenWrite).await;
        dispatcher
            .dispatch(
                &mut state,
                Command::StageImages(vec![picked("a.jpg", 100), picked("b.jpg", 200)]),
            )
            .await;
        let first = state.staging.entries()[0].id;
        dispatcher.dispatch(&mut state, Command::RemoveImage(first)).await;

        dispatcher
            .dispatch(&mut state, Command::CreatePost(draft("  전공책  ", "15000")))
            .await;

        let posts = backend.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "전공책");
        assert_eq!(posts[0].price, 15000);
        assert_eq!(posts[0].images.len(), 1);
        assert_eq!(posts[0].images[0].size, Some(200));
        assert_eq!(state.modal, None);
        assert!(state.staging.is_empty());
        assert_eq!(state.listing.cards()[0].price, "15,000원");
        assert_eq!(prompt.alerts().last().unwrap(), "게시글이 등록되었습니다!");
    }

    #[tokio::test]
    async fn test_account_button_toggles() {
        let (dispatcher, _backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher.dispatch(&mut state, Command::AccountButton).await;
        assert_eq!(state.modal, Some(Modal::Login));

        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::AccountButton).await;
        assert!(state.session.is_none());
        assert_eq!(prompt.alerts().last().unwrap(), "로그아웃되었습니다.");
    }

    #[tokio::test]
    async fn test_admin_surface_requires_admin() {
        let (dispatcher, _backend, _prompt) = setup();
        let mut state = AppState::default();
        assert_eq!(
            dispatcher.dispatch(&mut state, Command::Enter(Surface::Admin)).await,
            Some(Redirect::Home)
        );

        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        assert_eq!(
            dispatcher.dispatch(&mut state, Command::Enter(Surface::Admin)).await,
            Some(Redirect::Home)
        );
    }

    #[tokio::test]
    async fn test_admin_dashboard_flow() {
        let (dispatcher, backend, prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("test@korea.ac.kr", "test1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::CreatePost(draft("책", "1000"))).await;
        dispatcher
            .dispatch(&mut state, login("admin@korea.ac.kr", "admin1234"))
            .await;

        assert_eq!(dispatcher.dispatch(&mut state, Command::Enter(Surface::Admin)).await, None);
        assert_eq!(state.admin.insights.ready().unwrap().total_posts, 1);
        assert_eq!(state.admin.posts.ready().unwrap().len(), 1);
        let users = state.admin.users.ready().unwrap().clone();
        assert_eq!(users.len(), 2);

        let post_id = state.admin.posts.ready().unwrap()[0].id;
        dispatcher
            .dispatch(&mut state, Command::SetStatus { id: post_id, status: PostStatus::Reserved })
            .await;
        assert_eq!(state.admin.posts.ready().unwrap()[0].status, PostStatus::Reserved);

        let member = users.iter().find(|u| u.summary.contains("test@korea.ac.kr")).unwrap();
        prompt.accept.set(true);
        dispatcher.dispatch(&mut state, Command::DeleteUser(member.id)).await;
        assert_eq!(state.admin.users.ready().unwrap().len(), 1);
        assert!(state.admin.posts.ready().unwrap().is_empty());
        assert_eq!(prompt.alerts().last().unwrap(), "사용자가 삭제되었습니다.");
        assert!(backend.posts().is_empty());

        assert_eq!(dispatcher.dispatch(&mut state, Command::Logout).await, Some(Redirect::Home));
    }

    #[tokio::test]
    async fn test_admin_panels_fail_independently() {
        let (dispatcher, backend, _prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, login("admin@korea.ac.kr", "admin1234"))
            .await;
        dispatcher.dispatch(&mut state, Command::Enter(Surface::Admin)).await;
        backend.set_offline(true);
        dispatcher.dispatch(&mut state, Command::LoadUsers).await;
        assert_eq!(state.admin.users, Panel::Failed("사용자 로드 중 오류 발생".into()));
        assert!(state.admin.insights.ready().is_some());
    }

    #[tokio::test]
    async fn test_image_overlay() {
        let (dispatcher, _backend, _prompt) = setup();
        let mut state = AppState::default();
        dispatcher
            .dispatch(&mut state, Command::EnlargeImage("/static/uploads/a.jpg".into()))
            .await;
        assert_eq!(state.enlarged.as_deref(), Some("/static/uploads/a.jpg"));
        dispatcher.dispatch(&mut state, Command::CloseImage).await;
        assert!(state.enlarged.is_none());
    }
}
