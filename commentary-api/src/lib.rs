use chrono::Utc;

mod comment;
pub use comment::{Comment, NewComment, Payload};

mod error;
pub use error::Error;

mod page;
pub use page::PageId;

mod service;
pub use service::CommentService;

mod user;
pub use user::UserId;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    /// Generate a fresh id for a comment that has not been submitted yet
    pub fn generate() -> CommentId {
        CommentId(Uuid::new_v4().as_simple().to_string())
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> CommentId {
        CommentId(String::from(s))
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Envelope wrapping every response body of the comment service
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Content<T> {
    pub content: T,
}
