use anyhow::anyhow;

use crate::CommentId;

/// Failure reported by the comment service
///
/// Every variant carries the service's own message, which is what `Display`
/// shows and what ends up in client state.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{message}")]
    NotFound { id: CommentId, message: String },

    #[error("{message}")]
    IdAlreadyUsed { id: CommentId, message: String },
}

impl Error {
    pub fn not_found(id: CommentId) -> Error {
        Error::NotFound {
            message: format!("no comment with id {id}"),
            id,
        }
    }

    pub fn id_already_used(id: CommentId) -> Error {
        Error::IdAlreadyUsed {
            message: format!("comment id {id} is already used"),
            id,
        }
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| anyhow!("parsing error contents: {e}"))?;
        let message = |default: &str| {
            String::from(
                data.get("message")
                    .and_then(|msg| msg.as_str())
                    .unwrap_or(default),
            )
        };
        let id = |what: &str| {
            data.get("id")
                .and_then(|id| id.as_str())
                .map(CommentId::from)
                .ok_or_else(|| anyhow!("error is a {what} without a comment id"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(message("unknown error")),
                "network" => Error::Network(message("network error")),
                "permission-denied" => Error::PermissionDenied(message("permission denied")),
                "not-found" => Error::NotFound {
                    id: id("not-found error")?,
                    message: message("comment not found"),
                },
                "conflict-id" => Error::IdAlreadyUsed {
                    id: id("id conflict")?,
                    message: message("comment id conflict"),
                },
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
