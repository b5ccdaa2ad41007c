//! Shared request plumbing for both authorities

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::EndpointConfig;
use crate::error::{SdkError, SdkResult};

/// A pre-configured client bound to one base address
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    base_url: Url,
    client: Client,
}

/// Error payload shape shared by both services
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(config: &EndpointConfig) -> SdkResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| SdkError::Config(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| SdkError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    /// Send a request and decode a JSON success body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> SdkResult<T> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!(%method, %path, "Sending request");

        let response = self.client.execute(request).await.map_err(|err| {
            tracing::warn!(%method, %path, error = %err, "Request failed without response");
            SdkError::Network(err)
        })?;

        let response = check_status(response, &method, &path).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn check_status(response: Response, method: &Method, path: &str) -> SdkResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
        .and_then(|body| body.message);

    tracing::warn!(%method, path, status = status.as_u16(), "Service returned error status");
    Err(SdkError::Api {
        status: status.as_u16(),
        message,
    })
}
