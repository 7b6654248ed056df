use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use uuid::Uuid;

use snipman_core::{NewTag, Snippet, SnippetId, Tag, TagId, ValidDraft};

use crate::config::ClientConfig;
use crate::error::{ClientBuildError, Operation, RequestFailed};
use crate::repository::SnippetRepository;

/// Correlation header attached to every request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP implementation of [`SnippetRepository`]. No caching, no retries.
#[derive(Debug, Clone)]
pub struct SnippetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SnippetClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url =
            Url::parse(config.base_url.trim()).map_err(|e| ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::NotABase(base_url.to_string()));
        }
        if config.request_timeout_secs == 0 {
            return Err(ClientBuildError::ZeroTimeout);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(segments))
    }

    /// Perform exactly one round trip. Any non-2xx answer or transport
    /// failure becomes a [`RequestFailed`].
    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, RequestFailed> {
        let request_id = Uuid::new_v4().to_string();
        let request = request.header(REQUEST_ID_HEADER, &request_id);

        if let Some(built) = request.try_clone().and_then(|r| r.build().ok()) {
            debug!(
                operation = %operation,
                method = %built.method(),
                url = %built.url(),
                request_id = %request_id,
                "sending request"
            );
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(fail(RequestFailed::new(operation, None, e.to_string()))),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = failure_message(response).await;
        Err(fail(RequestFailed::new(
            operation,
            Some(status.as_u16()),
            message,
        )))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, RequestFailed> {
        let response = self.send(operation, request).await?;
        let (status, body) = read_body(operation, response).await?;
        serde_json::from_slice(&body).map_err(|e| {
            fail(RequestFailed::new(
                operation,
                Some(status),
                format!("invalid response body: {e}"),
            ))
        })
    }
}

fn fail(err: RequestFailed) -> RequestFailed {
    error!(
        operation = %err.operation,
        status = ?err.status,
        message = %err.message,
        "request failed"
    );
    err
}

async fn read_body(
    operation: Operation,
    response: Response,
) -> Result<(u16, Vec<u8>), RequestFailed> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(|e| {
        fail(RequestFailed::new(
            operation,
            Some(status),
            format!("failed to read response body: {e}"),
        ))
    })?;
    Ok((status, body.to_vec()))
}

/// Best-effort message for a failed response: the body's `message` or
/// `error` field, falling back to the status's canonical reason.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    let Ok(body) = response.bytes().await else {
        return fallback;
    };
    extract_message(&body).unwrap_or(fallback)
}

fn extract_message(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|field| json.get(*field).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl SnippetRepository for SnippetClient {
    async fn list_snippets(&self) -> Result<Vec<Snippet>, RequestFailed> {
        self.send_json(
            Operation::ListSnippets,
            self.request(Method::GET, &["snippets"]),
        )
        .await
    }

    async fn get_snippet(&self, id: &SnippetId) -> Result<Option<Snippet>, RequestFailed> {
        let operation = Operation::GetSnippet;
        let response = self
            .send(operation, self.request(Method::GET, &["snippets", id.as_str()]))
            .await?;
        let (status, body) = read_body(operation, response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice::<Option<Snippet>>(&body).map_err(|e| {
            fail(RequestFailed::new(
                operation,
                Some(status),
                format!("invalid response body: {e}"),
            ))
        })
    }

    async fn create_snippet(&self, draft: &ValidDraft) -> Result<Snippet, RequestFailed> {
        self.send_json(
            Operation::CreateSnippet,
            self.request(Method::POST, &["snippets"]).json(draft),
        )
        .await
    }

    async fn update_snippet(
        &self,
        id: &SnippetId,
        draft: &ValidDraft,
    ) -> Result<Snippet, RequestFailed> {
        self.send_json(
            Operation::UpdateSnippet,
            self.request(Method::PUT, &["snippets", id.as_str()])
                .json(draft),
        )
        .await
    }

    async fn delete_snippet(&self, id: &SnippetId) -> Result<(), RequestFailed> {
        self.send(
            Operation::DeleteSnippet,
            self.request(Method::DELETE, &["snippets", id.as_str()]),
        )
        .await?;
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, RequestFailed> {
        self.send_json(Operation::ListTags, self.request(Method::GET, &["tags"]))
            .await
    }

    async fn create_tag(&self, tag: &NewTag) -> Result<Tag, RequestFailed> {
        self.send_json(
            Operation::CreateTag,
            self.request(Method::POST, &["tags"]).json(tag),
        )
        .await
    }

    async fn get_tag(&self, id: &TagId) -> Result<Tag, RequestFailed> {
        self.send_json(
            Operation::GetTag,
            self.request(Method::GET, &["tags", id.as_str()]),
        )
        .await
    }

    async fn rename_tag(&self, id: &TagId, tag: &NewTag) -> Result<Tag, RequestFailed> {
        self.send_json(
            Operation::RenameTag,
            self.request(Method::PUT, &["tags", id.as_str()]).json(tag),
        )
        .await
    }

    async fn delete_tag(&self, id: &TagId) -> Result<(), RequestFailed> {
        self.send(
            Operation::DeleteTag,
            self.request(Method::DELETE, &["tags", id.as_str()]),
        )
        .await?;
        Ok(())
    }

    async fn attach_tag(
        &self,
        snippet: &SnippetId,
        tag: &TagId,
    ) -> Result<Snippet, RequestFailed> {
        self.send_json(
            Operation::AttachTag,
            self.request(
                Method::POST,
                &["snippets", snippet.as_str(), "tags", tag.as_str()],
            ),
        )
        .await
    }

    async fn detach_tag(
        &self,
        snippet: &SnippetId,
        tag: &TagId,
    ) -> Result<Snippet, RequestFailed> {
        self.send_json(
            Operation::DetachTag,
            self.request(
                Method::DELETE,
                &["snippets", snippet.as_str(), "tags", tag.as_str()],
            ),
        )
        .await
    }
}
