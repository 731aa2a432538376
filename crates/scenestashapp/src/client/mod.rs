//! # API Client
//!
//! One async operation per backend capability. Each resolves to the parsed payload or
//! to an [`ApiError`] holding a single normalized message; transport error shapes never
//! leak past this module.
//!
//! ## Endpoints
//!
//! | Operation              | Request                                        |
//! |------------------------|------------------------------------------------|
//! | `list_scripts`         | `GET /scripts?page&limit[&search][&sortBy][&sortOrder]` |
//! | `get_script`           | `GET /scripts/{id}`                            |
//! | `get_random_script`    | `GET /scripts/random?t={millis}`               |
//! | `get_random_scripts`   | `GET /scripts/random-multiple?count[&excludeIds=a,b]` |
//! | `get_scripts_by_ids`   | `POST /scripts/batch` with `{"ids": [...]}`    |
//! | `create_script`        | `POST /scripts`                                |
//! | `update_script`        | `PUT /scripts/{id}`                            |
//! | `delete_script`        | `DELETE /scripts/{id}`                         |
//!
//! Paths are appended to the configured base URL, so a base of
//! `http://localhost:3000/api` yields `http://localhost:3000/api/scripts`.
//!
//! ## Behavior Worth Knowing
//!
//! - Optional parameters that are unset are left out of the query entirely.
//! - `get_random_script` adds a millisecond timestamp so intermediate caches do not
//!   replay the same script.
//! - `get_scripts_by_ids(&[])` returns immediately without touching the network.
//! - `update_script` sends only title, characters and lines; `create_script` sends the
//!   form as given.
//! - No retries, no timeouts beyond the transport default, no cancellation. Dropping the
//!   future is the only way to stop waiting.
//!
//! ## Seams
//!
//! [`ScriptsApi`] is the trait the command layer is written against; [`HttpClient`] is
//! the production implementation. Tests swap in a fake.

use crate::error::ApiError;
use crate::model::{
    ListQuery, PaginatedScriptsResponse, ScriptFormData, ScriptPayload, ScriptSnip,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

mod errors;

pub use errors::{
    format_error, FailedResponse, Failure, ResponseBody, FALLBACK_MESSAGE, MESSAGE_FIELDS,
};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Everything the backend can do for us.
#[async_trait]
pub trait ScriptsApi: Send + Sync {
    async fn list_scripts(&self, query: &ListQuery) -> ApiResult<PaginatedScriptsResponse>;

    async fn get_script(&self, id: &str) -> ApiResult<ScriptSnip>;

    async fn get_random_script(&self) -> ApiResult<ScriptSnip>;

    /// `exclude_ids` may be empty, in which case nothing is excluded.
    async fn get_random_scripts(
        &self,
        count: u32,
        exclude_ids: &[String],
    ) -> ApiResult<Vec<ScriptSnip>>;

    async fn get_scripts_by_ids(&self, ids: &[String]) -> ApiResult<Vec<ScriptSnip>>;

    async fn create_script(&self, form: &ScriptFormData) -> ApiResult<ScriptSnip>;

    async fn update_script(&self, id: &str, form: &ScriptFormData) -> ApiResult<ScriptSnip>;

    async fn delete_script(&self, id: &str) -> ApiResult<()>;
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    ids: &'a [String],
}

/// [`ScriptsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::new(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::new(format!(
                "Invalid API base URL '{}': not an http(s) location",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::new(format_error(&Failure::Client(e.to_string()))))?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send and decode a JSON success body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.execute(operation, request).await?;
        serde_json::from_str(&body).map_err(|e| failed(operation, Failure::Client(e.to_string())))
    }

    /// Send and return the raw success body. Every failure path goes through
    /// [`format_error`].
    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await.map_err(|e| {
            failed(
                operation,
                Failure::Transport {
                    message: e.to_string(),
                    response: None,
                },
            )
        })?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "response received");

        let status_error = response.error_for_status_ref().err();
        if let Some(err) = status_error {
            let raw = response.text().await.unwrap_or_default();
            return Err(failed(
                operation,
                Failure::Transport {
                    message: err.to_string(),
                    response: Some(FailedResponse {
                        status: status.as_u16(),
                        status_text: status.canonical_reason().map(str::to_string),
                        body: ResponseBody::from_raw(&raw),
                    }),
                },
            ));
        }

        response.text().await.map_err(|e| {
            failed(
                operation,
                Failure::Transport {
                    message: e.to_string(),
                    response: None,
                },
            )
        })
    }
}

fn failed(operation: &'static str, failure: Failure) -> ApiError {
    let message = format_error(&failure);
    tracing::warn!(operation, error = %message, "request failed");
    ApiError::new(message)
}

fn require_id(operation: &'static str, id: &str) -> ApiResult<()> {
    if id.is_empty() {
        return Err(failed(
            operation,
            Failure::Client("Script id is required".to_string()),
        ));
    }
    Ok(())
}

#[async_trait]
impl ScriptsApi for HttpClient {
    async fn list_scripts(&self, query: &ListQuery) -> ApiResult<PaginatedScriptsResponse> {
        let url = self.endpoint(&["scripts"]);
        tracing::debug!(%url, page = query.page, limit = query.limit, "listing scripts");
        let request = self.client.get(url).query(&query.to_pairs());
        self.fetch("list_scripts", request).await
    }

    async fn get_script(&self, id: &str) -> ApiResult<ScriptSnip> {
        require_id("get_script", id)?;
        let url = self.endpoint(&["scripts", id]);
        tracing::debug!(%url, "fetching script");
        self.fetch("get_script", self.client.get(url)).await
    }

    async fn get_random_script(&self) -> ApiResult<ScriptSnip> {
        let url = self.endpoint(&["scripts", "random"]);
        let stamp = chrono::Utc::now().timestamp_millis();
        tracing::debug!(%url, stamp, "fetching random script");
        let request = self.client.get(url).query(&[("t", stamp.to_string())]);
        self.fetch("get_random_script", request).await
    }

    async fn get_random_scripts(
        &self,
        count: u32,
        exclude_ids: &[String],
    ) -> ApiResult<Vec<ScriptSnip>> {
        let url = self.endpoint(&["scripts", "random-multiple"]);
        let mut params = vec![("count", count.to_string())];
        if !exclude_ids.is_empty() {
            params.push(("excludeIds", exclude_ids.join(",")));
        }
        tracing::debug!(%url, count, excluded = exclude_ids.len(), "fetching random scripts");
        let request = self.client.get(url).query(&params);
        self.fetch("get_random_scripts", request).await
    }

    async fn get_scripts_by_ids(&self, ids: &[String]) -> ApiResult<Vec<ScriptSnip>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.endpoint(&["scripts", "batch"]);
        tracing::debug!(%url, count = ids.len(), "fetching scripts by id");
        let request = self.client.post(url).json(&BatchRequest { ids });
        self.fetch("get_scripts_by_ids", request).await
    }

    async fn create_script(&self, form: &ScriptFormData) -> ApiResult<ScriptSnip> {
        let url = self.endpoint(&["scripts"]);
        tracing::debug!(%url, "creating script");
        self.fetch("create_script", self.client.post(url).json(form))
            .await
    }

    async fn update_script(&self, id: &str, form: &ScriptFormData) -> ApiResult<ScriptSnip> {
        require_id("update_script", id)?;
        let url = self.endpoint(&["scripts", id]);
        tracing::debug!(%url, "updating script");
        let request = self.client.put(url).json(&ScriptPayload::from(form));
        self.fetch("update_script", request).await
    }

    async fn delete_script(&self, id: &str) -> ApiResult<()> {
        require_id("delete_script", id)?;
        let url = self.endpoint(&["scripts", id]);
        tracing::debug!(%url, "deleting script");
        self.execute("delete_script", self.client.delete(url))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let client = HttpClient::new("http://localhost:3000/api").unwrap();
        assert_eq!(
            client.endpoint(&["scripts", "random"]).as_str(),
            "http://localhost:3000/api/scripts/random"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = HttpClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            client.endpoint(&["scripts"]).as_str(),
            "http://localhost:3000/api/scripts"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = HttpClient::new("http://localhost:3000/api").unwrap();
        assert_eq!(
            client.endpoint(&["scripts", "a b/c"]).as_str(),
            "http://localhost:3000/api/scripts/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert!(err.message().contains("Invalid API base URL"));

        assert!(HttpClient::new("mailto:someone@example.com").is_err());
    }
}
