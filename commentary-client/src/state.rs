use crate::api::{Comment, CommentId};

/// Transitions of the comments slice
#[derive(Clone, Debug, PartialEq)]
pub enum CommentsAction {
    CommentsRequested,
    CommentsReceived(Vec<Comment>),
    CommentsRequestFailed(String),
    CommentCreatedSuccessfully(Comment),
    CommentCreationFailed(String),
    CommentDeletedSuccessfully(CommentId),
    CommentDeletionFailed(String),
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Comment list has not been loaded yet")]
    NotLoaded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommentsState {
    /// `None` until the first successful load
    pub entities: Option<Vec<Comment>>,

    /// Whether a list load is in flight
    pub is_loading: bool,

    /// Message of the last failure
    pub error: Option<String>,
}

impl Default for CommentsState {
    fn default() -> CommentsState {
        CommentsState {
            entities: None,
            is_loading: true,
            error: None,
        }
    }
}

impl CommentsState {
    /// Apply one transition
    ///
    /// On error the state is left untouched.
    pub fn update(&mut self, action: CommentsAction) -> Result<(), StoreError> {
        match action {
            CommentsAction::CommentsRequested => {
                self.is_loading = true;
            }
            CommentsAction::CommentsReceived(list) => {
                self.entities = Some(list);
                self.is_loading = false;
                self.error = None;
            }
            CommentsAction::CommentsRequestFailed(msg)
            | CommentsAction::CommentCreationFailed(msg)
            | CommentsAction::CommentDeletionFailed(msg) => {
                self.error = Some(msg);
                self.is_loading = false;
            }
            CommentsAction::CommentCreatedSuccessfully(c) => {
                self.entities.as_mut().ok_or(StoreError::NotLoaded)?.push(c);
                self.error = None;
            }
            CommentsAction::CommentDeletedSuccessfully(id) => {
                if let Some(entities) = &mut self.entities {
                    if let Some(pos) = entities.iter().position(|c| c.id == id) {
                        entities.remove(pos);
                    }
                }
                self.error = None;
            }
        }
        Ok(())
    }

    /// Pure version of [`CommentsState::update`]
    pub fn reduce(&self, action: CommentsAction) -> Result<CommentsState, StoreError> {
        let mut res = self.clone();
        res.update(action)?;
        Ok(res)
    }
}
