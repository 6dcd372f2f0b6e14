//! HTTP implementation of the sales API client.
//!
//! Responses are decoded in two steps: the status decides between success
//! and failure, then the `{ success, message, data }` envelope is checked,
//! because the API sometimes reports failures with a 2xx status and
//! `success: false`.

use super::SalesApi;
use crate::{
    config::{ApiConfig, ClientProfile},
    entities::{ApiResponse, JenisKelamin, Page, PageRequest, Resource},
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Header that makes ngrok skip its interstitial browser warning page.
const TUNNEL_HEADER: &str = "ngrok-skip-browser-warning";

/// Payload field whose casing differs between the two servers.
const GENDER_FIELD: &str = "jenis_kelamin";

/// Message used when a failure body carries no message of its own.
const FALLBACK_FAILURE: &str = "Request failed";

/// REST client for the sales API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    profile: ClientProfile,
}

impl ApiClient {
    /// Builds a client with the headers and timeout implied by `config`.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the TLS backend fails to initialise.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let mut builder = Client::builder().default_headers(default_headers(config.profile));
        if let Some(timeout) = config.effective_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        info!(%base_url, profile = %config.profile, "API client ready");
        Ok(Self::with_client(base_url, http, config.profile))
    }

    /// Builds a client around an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(base_url: Url, http: Client, profile: ClientProfile) -> Self {
        Self {
            http,
            base_url,
            profile,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/{PATH}[/{key segments}]`, each segment percent-encoded.
    fn resource_url<R: Resource>(&self, key: Option<&R::Key>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| Error::Config {
                message: format!("API base URL '{}' cannot carry a path", self.base_url),
            })?;
            segments.pop_if_empty().push("api").push(R::PATH);
            if let Some(key) = key {
                segments.extend(R::key_segments(key));
            }
        }
        Ok(url)
    }

    /// Serializes a request body in the dialect of this client's server.
    fn body<T: Serialize>(&self, payload: &T) -> Result<Value> {
        let mut body = serde_json::to_value(payload)?;
        let jenis_kelamin = body
            .get(GENDER_FIELD)
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<JenisKelamin>().ok());
        if let Some(jenis_kelamin) = jenis_kelamin {
            body[GENDER_FIELD] = Value::from(self.profile.jenis_kelamin_wire(jenis_kelamin));
        }
        Ok(body)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = request
            .send()
            .await
            .inspect_err(|e| warn!("Request could not be completed: {e}"))?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "Response received");

        if !status.is_success() {
            let err = error_from_body(status, &body);
            warn!(%status, "API reported failure: {err}");
            return Err(err);
        }
        decode_envelope(status, &body)
    }
}

fn default_headers(profile: ClientProfile) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if profile.sends_tunnel_headers() {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(TUNNEL_HEADER),
            HeaderValue::from_static("true"),
        );
    }
    headers
}

/// Reads `message` from a failure body, or synthesizes `HTTP {status}: {reason}`.
fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .and_then(body_message)
        .map_or_else(
            || {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                )
            },
            str::to_string,
        );

    Error::Api {
        status: status.as_u16(),
        message,
        code: parsed.as_ref().and_then(error_code),
    }
}

fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<ApiResponse<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse {
            success: true,
            message: String::new(),
            data: None,
        });
    }

    let value: Value = serde_json::from_slice(body)?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(Error::Api {
            status: status.as_u16(),
            message: body_message(&value).unwrap_or(FALLBACK_FAILURE).to_string(),
            code: error_code(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn body_message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
}

/// `error_code` or `code`, as a string whether the server sent text or a number.
fn error_code(body: &Value) -> Option<String> {
    ["error_code", "code"]
        .iter()
        .find_map(|field| match body.get(field)? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        })
}

#[async_trait]
impl SalesApi for ApiClient {
    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let url = self.resource_url::<R>(None)?;
        debug!(resource = R::PATH, %url, "GET list");
        let response: ApiResponse<Page<R>> = self.execute(self.http.get(url)).await?;
        Ok(response.data.map(|page| page.data).unwrap_or_default())
    }

    async fn list_page<R: Resource>(&self, page: PageRequest) -> Result<Page<R>> {
        let url = self.resource_url::<R>(None)?;
        debug!(resource = R::PATH, %url, page = page.page, limit = page.limit, "GET page");
        let request = self.http.get(url).query(&page.query_pairs());
        let response: ApiResponse<Page<R>> = self.execute(request).await?;
        Ok(response.data.unwrap_or_else(Page::empty))
    }

    async fn get<R: Resource>(&self, key: &R::Key) -> Result<R> {
        let url = self.resource_url::<R>(Some(key))?;
        debug!(resource = R::PATH, %url, "GET one");
        let response: ApiResponse<R> = self.execute(self.http.get(url)).await?;
        response.data.ok_or_else(|| Error::NotFound {
            resource: R::LABEL,
            key: key.to_string(),
        })
    }

    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<Option<R>> {
        let url = self.resource_url::<R>(None)?;
        debug!(resource = R::PATH, %url, ?payload, "POST");
        let body = self.body(payload)?;
        let response: ApiResponse<R> = self.execute(self.http.post(url).json(&body)).await?;
        Ok(response.data)
    }

    async fn update<R: Resource>(&self, key: &R::Key, payload: &R::Update) -> Result<Option<R>> {
        let url = self.resource_url::<R>(Some(key))?;
        debug!(resource = R::PATH, %url, ?payload, "PUT");
        let body = self.body(payload)?;
        let response: ApiResponse<R> = self.execute(self.http.put(url).json(&body)).await?;
        Ok(response.data)
    }

    async fn delete<R: Resource>(&self, key: &R::Key) -> Result<String> {
        let url = self.resource_url::<R>(Some(key))?;
        debug!(resource = R::PATH, %url, "DELETE");
        let response: ApiResponse<Value> = self.execute(self.http.delete(url)).await?;
        Ok(response.message)
    }
}
