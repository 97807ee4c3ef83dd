use chrono::Utc;

use crate::{
    api::{CommentId, CommentService, NewComment, UserId},
    CommentsAction, Store, StoreError,
};

/// What happened to a comment the user asked to remove
#[derive(Clone, Debug, PartialEq)]
pub enum Removal {
    Deleted,

    /// The service answered with something else than `null`, so the comment
    /// is kept in the store
    Retained(serde_json::Value),

    Failed,
}

pub async fn load_comments_list<S>(
    store: &Store,
    service: &S,
    user: &UserId,
) -> Result<(), StoreError>
where
    S: CommentService + ?Sized,
{
    store.dispatch(CommentsAction::CommentsRequested)?;
    match service.get_comments(user).await {
        Ok(content) => {
            tracing::debug!(%user, num_comments = content.len(), "received comments");
            store.dispatch(CommentsAction::CommentsReceived(content))
        }
        Err(e) => {
            tracing::error!(%user, err = %e, "failed to load comments");
            store.dispatch(CommentsAction::CommentsRequestFailed(e.to_string()))
        }
    }
}

/// Submit a new comment
///
/// The comment only shows up in the store once the service accepted it, and
/// the copy the service returned is the one that gets stored.
pub async fn create_comment<S>(
    store: &Store,
    service: &S,
    comment: NewComment,
) -> Result<(), StoreError>
where
    S: CommentService + ?Sized,
{
    let comment = comment.build(Utc::now());
    let id = comment.id.clone();
    match service.create_comment(comment).await {
        Ok(content) => {
            tracing::debug!(local_id = %id, id = %content.id, "comment created");
            store.dispatch(CommentsAction::CommentCreatedSuccessfully(content))
        }
        Err(e) => {
            tracing::error!(local_id = %id, err = %e, "failed to create comment");
            store.dispatch(CommentsAction::CommentCreationFailed(e.to_string()))
        }
    }
}

pub async fn remove_comment<S>(
    store: &Store,
    service: &S,
    id: &CommentId,
) -> Result<Removal, StoreError>
where
    S: CommentService + ?Sized,
{
    match service.remove_comment(id).await {
        Ok(serde_json::Value::Null) => {
            store.dispatch(CommentsAction::CommentDeletedSuccessfully(id.clone()))?;
            Ok(Removal::Deleted)
        }
        Ok(content) => {
            tracing::warn!(%id, ?content, "service did not confirm comment removal");
            Ok(Removal::Retained(content))
        }
        Err(e) => {
            tracing::error!(%id, err = %e, "failed to remove comment");
            store.dispatch(CommentsAction::CommentDeletionFailed(e.to_string()))?;
            Ok(Removal::Failed)
        }
    }
}
