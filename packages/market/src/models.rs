//! # Wire models for the marketplace REST API
//!
//! These mirror the JSON the backend sends and receives. A few shapes need
//! care:
//!
//! - [`PostStatus`] is a closed set; anything other than `sale`, `reserved` or
//!   `sold` fails to decode instead of rendering a blank label.
//! - [`ImageRef`] accepts both the bare path strings of the list endpoint and
//!   the `{file_path, file_size}` objects of the detail endpoint.
//! - Timestamps arrive as SQLite `CURRENT_TIMESTAMP` text (`2025-03-20 12:00:00`,
//!   UTC); RFC 3339 is accepted too. See [`timestamp`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction state of a post. Any state may be set from any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Sale,
    Reserved,
    Sold,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [PostStatus::Sale, PostStatus::Reserved, PostStatus::Sold];

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Sale => "sale",
            PostStatus::Reserved => "reserved",
            PostStatus::Sold => "sold",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PostStatus::Sale => "판매중",
            PostStatus::Reserved => "예약중",
            PostStatus::Sold => "판매완료",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Electronics,
    Books,
    Fashion,
    Etc,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Books,
        Category::Fashion,
        Category::Etc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Fashion => "fashion",
            Category::Etc => "etc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "전자기기",
            Category::Books => "도서",
            Category::Fashion => "의류",
            Category::Etc => "기타",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Category selection of the listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Value of the `category` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "전체",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Every filter button in display order.
    pub fn choices() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

/// Reference to an uploaded image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawImage")]
pub struct ImageRef {
    #[serde(rename = "file_path")]
    pub path: String,
    #[serde(rename = "file_size")]
    pub size: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawImage {
    Path(String),
    Stored {
        file_path: String,
        #[serde(default)]
        file_size: Option<u64>,
    },
}

impl From<RawImage> for ImageRef {
    fn from(raw: RawImage) -> Self {
        match raw {
            RawImage::Path(path) => ImageRef { path, size: None },
            RawImage::Stored {
                file_path,
                file_size,
            } => ImageRef {
                path: file_path,
                size: file_size,
            },
        }
    }
}

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    /// URL usable as an `img` source. Stored paths are relative to the site root.
    pub fn src(&self) -> String {
        let p = self.path.as_str();
        if p.starts_with('/')
            || p.starts_with("http://")
            || p.starts_with("https://")
            || p.starts_with("data:")
        {
            p.to_string()
        } else {
            format!("/{p}")
        }
    }
}

/// A marketplace listing as the client sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub content: String,
    pub category: Category,
    pub status: PostStatus,
    pub author: String,
    pub author_email: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl Post {
    pub fn first_image(&self) -> Option<&ImageRef> {
        self.images.first()
    }
}

/// A row of the admin user list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub student_id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub total_users: u64,
    pub total_posts: u64,
    #[serde(default)]
    pub categories: Vec<CategoryCount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Raw tag as stored; may be one the client does not know.
    pub category: String,
    pub count: u64,
}

impl CategoryCount {
    /// Localized label, falling back to the raw tag.
    pub fn label(&self) -> &str {
        self.category
            .parse::<Category>()
            .map(Category::label)
            .unwrap_or(self.category.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub student_id: String,
}

/// Query string of `GET /api/posts`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl PostQuery {
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [("category", self.category.as_query()), ("search", self.search.as_str())]
    }

    /// Whether `post` would be returned for this query.
    pub fn matches(&self, post: &Post) -> bool {
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => post.category == c,
        };
        category_ok
            && (self.search.is_empty()
                || post.title.contains(&self.search)
                || post.content.contains(&self.search))
    }
}

/// One file part of a post upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

/// Validated body of `POST /api/posts`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub price: u64,
    pub content: String,
    pub category: Category,
    pub images: Vec<Upload>,
}

/// Serde adapter for backend timestamps.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn list_item() -> serde_json::Value {
        json!({
            "id": 7,
            "title": "아이패드 팝니다",
            "content": "상태 좋아요\n직거래만",
            "price": 350000,
            "category": "electronics",
            "author_id": 1,
            "status": "reserved",
            "views": 12,
            "created_at": "2025-03-20 12:00:00",
            "author_name": "김고려",
            "author_email": "test@korea.ac.kr",
            "author": "김고려",
            "images": ["static/uploads/a.jpg", "static/uploads/b.png"]
        })
    }

    #[test]
    fn test_decode_list_post() {
        let post: Post = serde_json::from_value(list_item()).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.status, PostStatus::Reserved);
        assert_eq!(post.category, Category::Electronics);
        assert_eq!(post.created_at, Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap());
        assert_eq!(post.images.len(), 2);
        assert_eq!(post.first_image().unwrap().src(), "/static/uploads/a.jpg");
        assert_eq!(post.images[0].size, None);
    }

    #[test]
    fn test_decode_detail_images() {
        let mut value = list_item();
        value["images"] = json!([
            {"file_path": "static/uploads/a.jpg", "file_size": 2048},
            {"file_path": "/static/uploads/b.png", "file_size": 10}
        ]);
        let post: Post = serde_json::from_value(value).unwrap();
        assert_eq!(post.images[0], ImageRef { path: "static/uploads/a.jpg".into(), size: Some(2048) });
        assert_eq!(post.images[1].src(), "/static/uploads/b.png");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut value = list_item();
        value["status"] = json!("archived");
        assert!(serde_json::from_value::<Post>(value).is_err());
    }

    #[test]
    fn test_missing_images_defaults_empty() {
        let mut value = list_item();
        value.as_object_mut().unwrap().remove("images");
        let post: Post = serde_json::from_value(value).unwrap();
        assert!(post.first_image().is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamp::parse("2025-01-02 03:04:05"), Some(expected));
        assert_eq!(timestamp::parse("2025-01-02T03:04:05"), Some(expected));
        assert_eq!(timestamp::parse("2025-01-02T12:04:05+09:00"), Some(expected));
        assert_eq!(timestamp::parse("yesterday"), None);
    }

    #[test]
    fn test_category_filter_query_values() {
        let tags: Vec<_> = CategoryFilter::choices().map(CategoryFilter::as_query).collect();
        assert_eq!(tags, ["all", "electronics", "books", "fashion", "etc"]);
        assert_eq!("books".parse::<Category>(), Ok(Category::Books));
        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_count_label_falls_back_to_tag() {
        let known = CategoryCount { category: "fashion".into(), count: 2 };
        let unknown = CategoryCount { category: "furniture".into(), count: 1 };
        assert_eq!(known.label(), "의류");
        assert_eq!(unknown.label(), "furniture");
    }

    #[test]
    fn test_query_matches_title_or_content() {
        let post: Post = serde_json::from_value(list_item()).unwrap();
        let mut query = PostQuery::default();
        assert!(query.matches(&post));
        query.search = "직거래".into();
        assert!(query.matches(&post));
        query.category = CategoryFilter::Only(Category::Books);
        assert!(!query.matches(&post));
    }
}
