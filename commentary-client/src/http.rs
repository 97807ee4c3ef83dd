use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};

use crate::api::{Comment, CommentId, CommentService, Content, Error, UserId};

/// Comment service reached over HTTP
///
/// Every endpoint answers with a `{"content": ...}` envelope.
#[derive(Clone, Debug)]
pub struct HttpCommentService {
    client: reqwest::Client,
    host: Url,
    token: Option<String>,
}

impl HttpCommentService {
    pub fn new(host: Url) -> HttpCommentService {
        HttpCommentService {
            client: reqwest::Client::new(),
            host,
            token: None,
        }
    }

    pub fn with_token(mut self, token: String) -> HttpCommentService {
        self.token = Some(token);
        self
    }

    /// `{host}/comment/{id}`, with `id` escaped as a single path segment
    fn url(&self, id: Option<&CommentId>) -> Url {
        let mut url = self.host.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments
                    .pop_if_empty()
                    .push("comment")
                    .push(id.map(|id| &id.0 as &str).unwrap_or(""));
            }
            Err(()) => {
                tracing::warn!(host = %self.host, "comment service host cannot have a path")
            }
        }
        url
    }

    fn request(&self, method: Method, id: Option<&CommentId>) -> RequestBuilder {
        let req = self.client.request(method, self.url(id));
        match &self.token {
            Some(tok) => req.bearer_auth(tok),
            None => req,
        }
    }

    fn list_request(&self, user: &UserId) -> RequestBuilder {
        self.request(Method::GET, None).query(&[
            ("orderBy", String::from("\"pageId\"")),
            ("equalTo", format!("\"{}\"", user)),
        ])
    }

    fn create_request(&self, comment: &Comment) -> RequestBuilder {
        self.request(Method::PUT, Some(&comment.id)).json(comment)
    }

    fn remove_request(&self, id: &CommentId) -> RequestBuilder {
        self.request(Method::DELETE, Some(id))
    }

    async fn fetch<R>(&self, req: RequestBuilder) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let resp = req
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .bytes()
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            return Err(Error::parse(&body).unwrap_or_else(|err| {
                tracing::debug!(?err, %status, "error response has no structured body");
                Error::Unknown(format!("server answered {status}"))
            }));
        }
        let content: Content<R> = resp
            .json()
            .await
            .map_err(|e| Error::Unknown(format!("failed to parse server response: {e}")))?;
        Ok(content.content)
    }
}

#[async_trait]
impl CommentService for HttpCommentService {
    async fn get_comments(&self, user: &UserId) -> Result<Vec<Comment>, Error> {
        self.fetch(self.list_request(user)).await
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, Error> {
        self.fetch(self.create_request(&comment)).await
    }

    async fn remove_comment(&self, id: &CommentId) -> Result<serde_json::Value, Error> {
        self.fetch(self.remove_request(id)).await
    }
}
