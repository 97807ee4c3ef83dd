use async_trait::async_trait;

use crate::{Comment, CommentId, Error, UserId};

/// Remote store of comments
///
/// Methods return the `content` of the service's response envelope.
#[async_trait]
pub trait CommentService {
    /// List the comments attached to the page of `user`
    async fn get_comments(&self, user: &UserId) -> Result<Vec<Comment>, Error>;

    /// Store `comment`, returning the copy the service kept
    async fn create_comment(&self, comment: Comment) -> Result<Comment, Error>;

    /// Delete a comment. The service answers `null` once the comment is gone.
    async fn remove_comment(&self, id: &CommentId) -> Result<serde_json::Value, Error>;
}
