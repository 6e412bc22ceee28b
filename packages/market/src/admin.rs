//! Admin dashboard view model: insights, every post, and the user list.
//!
//! Each panel loads on its own, so one failing endpoint leaves the others usable.

use chrono::{DateTime, Utc};

use crate::error::MarketError;
use crate::listing::PostCard;
use crate::models::{Insights, Post, UserRow};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Panel<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Panel<T> {
    /// Map a load result, naming the panel (`인사이트`, `게시물`, `사용자`) in
    /// the failure notice.
    pub fn from_result(result: Result<T, MarketError>, subject: &str) -> Self {
        match result {
            Ok(value) => Panel::Ready(value),
            Err(MarketError::Transport(_)) => Panel::Failed(format!("{subject} 로드 중 오류 발생")),
            Err(e) => Panel::Failed(format!("{subject} 로드에 실패했습니다: {e}")),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLine {
    pub id: i64,
    pub summary: String,
}

impl From<&UserRow> for UserLine {
    fn from(row: &UserRow) -> Self {
        Self {
            id: row.id,
            summary: format!("{} ({}, 학번: {})", row.name, row.email, row.student_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub insights: Panel<Insights>,
    pub posts: Panel<Vec<PostCard>>,
    pub users: Panel<Vec<UserLine>>,
}

impl AdminState {
    pub fn set_posts(&mut self, result: Result<Vec<Post>, MarketError>, now: DateTime<Utc>) {
        let cards = result.map(|posts| posts.iter().map(|p| PostCard::from_post(p, now)).collect());
        self.posts = Panel::from_result(cards, "게시물");
    }

    pub fn set_users(&mut self, result: Result<Vec<UserRow>, MarketError>) {
        let lines = result.map(|rows| rows.iter().map(UserLine::from).collect());
        self.users = Panel::from_result(lines, "사용자");
    }

    pub fn set_insights(&mut self, result: Result<Insights, MarketError>) {
        self.insights = Panel::from_result(result, "인사이트");
    }
}
