//! The logged-in user record and the controls it unlocks.

use serde::{Deserialize, Deserializer, Serialize};

/// Current user as reported by the login and session-check endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Absent from the login and session-check payloads.
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub name: String,
    pub student_id: String,
    /// The backend sends `0`/`1`; booleans are accepted too.
    #[serde(default, deserialize_with = "flag")]
    pub is_admin: bool,
}

impl UserInfo {
    /// Whether this user may change or delete a post written by `author_email`.
    pub fn can_manage(&self, author_email: &str) -> bool {
        self.is_admin || self.email == author_email
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i == 1,
    })
}

/// Visibility of the header controls. A pure function of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub account_label: &'static str,
    pub show_write: bool,
    pub show_my_posts: bool,
    pub show_admin: bool,
}

impl Controls {
    pub fn for_session(user: Option<&UserInfo>) -> Self {
        match user {
            Some(user) => Self {
                account_label: "로그아웃",
                show_write: true,
                show_my_posts: true,
                show_admin: user.is_admin,
            },
            None => Self {
                account_label: "로그인",
                show_write: false,
                show_my_posts: false,
                show_admin: false,
            },
        }
    }
}
