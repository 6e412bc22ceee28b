//! # Application state
//!
//! [`AppState`] is everything the page shows: the session, the listing filter,
//! the rendered listing and detail view, which modal is open, the staged
//! upload set and the admin panels. The UI owns it (in a signal) and hands it
//! to the dispatcher through [`StateCell`].
//!
//! The dispatcher never holds a borrow across an await: it reads what it needs,
//! issues the request, then writes the result in a short closure. Two commands
//! in flight therefore interleave field by field, the later write winning.

use crate::admin::AdminState;
use crate::detail::PostDetailView;
use crate::listing::Listing;
use crate::models::{CategoryFilter, PostQuery};
use crate::session::{Controls, UserInfo};
use crate::staging::ImageStaging;

/// Which page issued a command; decides what to refresh after a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Surface {
    #[default]
    Market,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Register,
    Write,
    Detail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub category: CategoryFilter,
    pub search: String,
}

impl Filter {
    pub fn query(&self) -> PostQuery {
        PostQuery {
            category: self.category,
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub surface: Surface,
    pub session: Option<UserInfo>,
    pub filter: Filter,
    pub listing: Listing,
    pub detail: Option<PostDetailView>,
    pub modal: Option<Modal>,
    /// Image shown full-size over everything else.
    pub enlarged: Option<String>,
    pub staging: ImageStaging,
    pub admin: AdminState,
}

impl AppState {
    pub fn controls(&self) -> Controls {
        Controls::for_session(self.session.as_ref())
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.modal == Some(modal)
    }
}

/// Where the dispatcher reads and writes [`AppState`].
pub trait StateCell {
    fn read_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;
    fn write_state<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateCell for AppState {
    fn read_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(self)
    }

    fn write_state<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(self)
    }
}
