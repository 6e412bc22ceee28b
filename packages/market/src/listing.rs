//! Post grid view model.

use chrono::{DateTime, Local, Utc};

use crate::format::{format_won, relative_time};
use crate::models::{Post, PostStatus};

/// Shown on a card whose post has no image.
pub const PLACEHOLDER_GLYPH: &str = "📦";

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub title: String,
    /// Source of the first image, if any.
    pub image: Option<String>,
    pub status: PostStatus,
    pub status_label: &'static str,
    pub price: String,
    pub author: String,
    pub date: String,
}

impl PostCard {
    pub fn from_post(post: &Post, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            image: post.first_image().map(|img| img.src()),
            status: post.status,
            status_label: post.status.label(),
            price: format_won(post.price),
            author: post.author.clone(),
            date: relative_time(post.created_at, now, &Local),
        }
    }
}

/// What the listing area shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Listing {
    #[default]
    Loading,
    /// Grid hidden, empty-state placeholder shown.
    Empty,
    Grid(Vec<PostCard>),
    /// Passive notice after a failed load.
    Failed(String),
}

impl Listing {
    pub fn from_posts(posts: &[Post], now: DateTime<Utc>) -> Self {
        if posts.is_empty() {
            Listing::Empty
        } else {
            Listing::Grid(posts.iter().map(|p| PostCard::from_post(p, now)).collect())
        }
    }

    pub fn shows_grid(&self) -> bool {
        matches!(self, Listing::Grid(_))
    }

    pub fn shows_empty_state(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            Listing::Grid(cards) => cards,
            _ => &[],
        }
    }
}
