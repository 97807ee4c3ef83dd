use std::collections::VecDeque;

use async_trait::async_trait;
use commentary_api::{Comment, CommentId, CommentService, Error, PageId, UserId};
use parking_lot::Mutex;

/// In-memory comment service
///
/// Calls can be made to fail with [`MockServer::fail_next`].
#[derive(Debug, Default)]
pub struct MockServer(Mutex<Db>);

#[derive(Debug, Default)]
struct Db {
    comments: Vec<Comment>,
    failures: VecDeque<Error>,
    removal_answer: Option<serde_json::Value>,
}

impl Db {
    fn check_failure(&mut self) -> Result<(), Error> {
        match self.failures.pop_front() {
            Some(e) => {
                tracing::debug!(err = %e, "mock server injecting failure");
                Err(e)
            }
            None => Ok(()),
        }
    }
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    pub fn with_comments(comments: Vec<Comment>) -> MockServer {
        MockServer(Mutex::new(Db {
            comments,
            ..Db::default()
        }))
    }

    /// Make the next call fail with `err`. Failures queue up.
    pub fn fail_next(&self, err: Error) {
        self.0.lock().failures.push_back(err);
    }

    /// Answer every successful removal with `content` instead of `null`,
    /// without actually removing anything
    pub fn answer_removals_with(&self, content: serde_json::Value) {
        self.0.lock().removal_answer = Some(content);
    }

    /// Return all the comments currently stored, in insertion order
    pub fn test_comments(&self) -> Vec<Comment> {
        self.0.lock().comments.clone()
    }
}

#[async_trait]
impl CommentService for MockServer {
    async fn get_comments(&self, user: &UserId) -> Result<Vec<Comment>, Error> {
        let mut db = self.0.lock();
        db.check_failure()?;
        let page = PageId::from(user.clone());
        Ok(db
            .comments
            .iter()
            .filter(|c| c.page_id == page)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, Error> {
        let mut db = self.0.lock();
        db.check_failure()?;
        if db.comments.iter().any(|c| c.id == comment.id) {
            return Err(Error::id_already_used(comment.id));
        }
        db.comments.push(comment.clone());
        Ok(comment)
    }

    async fn remove_comment(&self, id: &CommentId) -> Result<serde_json::Value, Error> {
        let mut db = self.0.lock();
        db.check_failure()?;
        let pos = db
            .comments
            .iter()
            .position(|c| c.id == *id)
            .ok_or_else(|| Error::not_found(id.clone()))?;
        if let Some(answer) = db.removal_answer.clone() {
            return Ok(answer);
        }
        db.comments.remove(pos);
        Ok(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use commentary_api::Payload;

    use super::*;

    fn comment(id: &str, page: &str) -> Comment {
        Comment {
            id: CommentId::from(id),
            page_id: PageId::from(page),
            user_id: UserId::stub(),
            created_at: commentary_api::Time::default(),
            payload: Payload::new(),
        }
    }

    #[tokio::test]
    async fn filters_by_page() {
        let s = MockServer::with_comments(vec![comment("a", "1"), comment("b", "2")]);
        let got = s.get_comments(&UserId::from("2")).await.unwrap();
        assert_eq!(got, vec![comment("b", "2")]);
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let s = MockServer::new();
        s.create_comment(comment("a", "1")).await.unwrap();
        assert_eq!(
            s.create_comment(comment("a", "1")).await,
            Err(Error::id_already_used(CommentId::from("a"))),
        );
        assert_eq!(s.test_comments().len(), 1);
    }

    #[tokio::test]
    async fn failures_are_consumed_in_order() {
        let s = MockServer::with_comments(vec![comment("a", "1")]);
        s.fail_next(Error::PermissionDenied(String::from("nope")));
        s.fail_next(Error::Network(String::from("down")));
        let user = UserId::from("1");
        assert_eq!(
            s.get_comments(&user).await,
            Err(Error::PermissionDenied(String::from("nope")))
        );
        assert_eq!(
            s.get_comments(&user).await,
            Err(Error::Network(String::from("down")))
        );
        assert_eq!(s.get_comments(&user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removal() {
        let s = MockServer::with_comments(vec![comment("a", "1")]);
        assert_eq!(
            s.remove_comment(&CommentId::from("b")).await,
            Err(Error::not_found(CommentId::from("b"))),
        );
        assert_eq!(
            s.remove_comment(&CommentId::from("a")).await,
            Ok(serde_json::Value::Null)
        );
        assert!(s.test_comments().is_empty());
    }

    #[tokio::test]
    async fn unconfirmed_removal_keeps_comment() {
        let s = MockServer::with_comments(vec![comment("a", "1")]);
        s.answer_removals_with(serde_json::json!({}));
        assert_eq!(
            s.remove_comment(&CommentId::from("a")).await,
            Ok(serde_json::json!({}))
        );
        assert_eq!(s.test_comments().len(), 1);
    }
}
