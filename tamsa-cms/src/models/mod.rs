mod activity;
mod category;
mod document;
mod feed;
mod leader;
mod opportunity;

pub use activity::*;
pub use category::*;
pub use document::*;
pub use feed::*;
pub use leader::*;
pub use opportunity::*;

use serde::Serialize;

/// Who submitted a record. Public form posts are attributed to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Author {
    User,
    Admin,
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "User",
            Author::Admin => "Admin",
        }
    }
}
