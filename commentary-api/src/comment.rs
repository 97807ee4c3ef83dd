use crate::{CommentId, PageId, Time, UserId};

/// Free-form fields of a comment, kept as-is on the wire
pub type Payload = serde_json::Map<String, serde_json::Value>;

const RESERVED_FIELDS: [&str; 4] = ["_id", "pageId", "userId", "created_at"];

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,

    #[serde(rename = "pageId")]
    pub page_id: PageId,

    /// Author of this comment
    #[serde(rename = "userId")]
    pub user_id: UserId,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: Time,

    /// Everything else the author submitted (eg. `content`)
    #[serde(flatten)]
    pub payload: Payload,
}

/// A comment as written by the user, before it gets an id and a date
#[derive(Clone, Debug, PartialEq)]
pub struct NewComment {
    pub payload: Payload,
    pub page_id: PageId,
    pub current_user_id: UserId,
}

impl NewComment {
    /// Build the comment to submit, with a freshly generated id
    ///
    /// Payload fields named like one of the comment's own fields are dropped.
    pub fn build(self, created_at: Time) -> Comment {
        let mut payload = self.payload;
        for f in RESERVED_FIELDS {
            if payload.remove(f).is_some() {
                tracing::debug!(field = f, "dropping reserved field from comment payload");
            }
        }
        Comment {
            id: CommentId::generate(),
            page_id: self.page_id,
            user_id: self.current_user_id,
            created_at,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn payload(v: serde_json::Value) -> Payload {
        match v {
            serde_json::Value::Object(m) => m,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn wire_format() {
        let c = Comment {
            id: CommentId::from("a"),
            page_id: PageId::from("page"),
            user_id: UserId::from("bob"),
            created_at: chrono::Utc.timestamp_millis_opt(1_670_000_000_123).unwrap(),
            payload: payload(json!({ "content": "hello" })),
        };
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({
                "_id": "a",
                "pageId": "page",
                "userId": "bob",
                "created_at": 1_670_000_000_123i64,
                "content": "hello",
            }),
        );
        let back: Comment = serde_json::from_value(serde_json::to_value(&c).unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn build_overrides_reserved_fields() {
        let now = chrono::Utc::now();
        let c = NewComment {
            payload: payload(json!({
                "_id": "forged",
                "userId": "mallory",
                "content": "hi",
            })),
            page_id: PageId::from("page"),
            current_user_id: UserId::from("alice"),
        }
        .build(now);
        assert_ne!(c.id, CommentId::from("forged"));
        assert_eq!(c.user_id, UserId::from("alice"));
        assert_eq!(c.page_id, PageId::from("page"));
        assert_eq!(c.created_at, now);
        assert_eq!(c.payload, payload(json!({ "content": "hi" })));
    }
}
