//! Single-post detail view model.

use chrono::{DateTime, Local, Utc};

use crate::format::{format_won, relative_time};
use crate::models::{Post, PostStatus};
use crate::session::UserInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailView {
    pub id: i64,
    pub title: String,
    pub images: Vec<String>,
    pub status: PostStatus,
    pub status_label: &'static str,
    pub category_label: &'static str,
    pub price: String,
    pub author: String,
    pub date: String,
    /// Content split on newlines so the renderer can keep the breaks.
    pub content_lines: Vec<String>,
    /// Status and delete buttons; `None` unless the viewer owns the post or is admin.
    pub actions: Option<PostActions>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostActions {
    pub post_id: i64,
    /// Every status is offered regardless of the current one.
    pub statuses: [PostStatus; 3],
}

impl PostActions {
    pub fn for_post(post_id: i64) -> Self {
        Self {
            post_id,
            statuses: PostStatus::ALL,
        }
    }
}

impl PostDetailView {
    pub fn build(post: &Post, viewer: Option<&UserInfo>, now: DateTime<Utc>) -> Self {
        let actions = viewer
            .filter(|user| user.can_manage(&post.author_email))
            .map(|_| PostActions::for_post(post.id));

        Self {
            id: post.id,
            title: post.title.clone(),
            images: post.images.iter().map(|img| img.src()).collect(),
            status: post.status,
            status_label: post.status.label(),
            category_label: post.category.label(),
            price: format_won(post.price),
            author: post.author.clone(),
            date: relative_time(post.created_at, now, &Local),
            content_lines: post.content.split('\n').map(str::to_string).collect(),
            actions,
        }
    }
}
