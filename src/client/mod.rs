//! Thin Gitea REST transport.
//!
//! One shared `reqwest::Client` handle plus the credentials captured at
//! construction; no mutable state between calls. Failures map into
//! [`ProviderError`] values and surface immediately — the transport never
//! retries on its own.

use crate::api::ErrorResponse;
use crate::config::GiteaConfig;
use crate::errors::{ProviderError, ProviderErrorKind, ProviderResult};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};

/// Gitea REST client over `{server}/api/v1`.
pub struct GiteaClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: GiteaConfig,
    /// API base URL.
    api_base: String,
}

impl GiteaClient {
    /// Creates a new Gitea client.
    pub fn new(config: GiteaConfig) -> ProviderResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                ProviderError::new(
                    ProviderErrorKind::InvalidConfiguration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        let api_base = config.api_base();
        Ok(Self {
            http,
            config,
            api_base,
        })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GiteaConfig {
        &self.config
    }

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ProviderResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize>(
        &self,
        path: &str,
        params: &P,
    ) -> ProviderResult<T> {
        let query = serde_urlencoded::to_string(params).map_err(|e| {
            ProviderError::new(
                ProviderErrorKind::ValidationError,
                format!("Failed to serialize query parameters: {}", e),
            )
        })?;

        let path = if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        };
        self.request(Method::GET, &path, Option::<&()>::None).await
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ProviderResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Makes a POST request, discarding the response body.
    pub async fn post_no_response<B: Serialize>(&self, path: &str, body: &B) -> ProviderResult<()> {
        self.execute(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Makes a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ProviderResult<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> ProviderResult<()> {
        self.execute(Method::DELETE, path, Option::<&()>::None)
            .await?;
        Ok(())
    }

    /// Uploads binary content as a multipart attachment.
    pub async fn post_attachment<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        content: Bytes,
    ) -> ProviderResult<T> {
        let part = reqwest::multipart::Part::bytes(content.to_vec())
            .file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("attachment", part);

        let request = self
            .http
            .request(Method::POST, self.build_url(path))
            .headers(self.default_headers()?)
            .multipart(form);

        let response = self.send(request).await?;
        Self::decode(response).await
    }

    // Internal methods

    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ProviderResult<T> {
        let response = self.execute(method, path, body).await?;
        Self::decode(response).await
    }

    async fn execute<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ProviderResult<Response> {
        let mut request = self
            .http
            .request(method, self.build_url(path))
            .headers(self.default_headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> ProviderResult<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::timeout(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                ProviderError::new(
                    ProviderErrorKind::ConnectionFailed,
                    format!("Connection failed: {}", e),
                )
            } else {
                ProviderError::new(ProviderErrorKind::Unknown, format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(response, status).await);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
        response.json().await.map_err(|e| {
            ProviderError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }

    async fn handle_error_response(response: Response, status: StatusCode) -> ProviderError {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {} error", status.as_u16()));

        ProviderError::from_response(status.as_u16(), message)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn default_headers(&self) -> ProviderResult<HeaderMap> {
        let token = self.config.token.as_ref().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingToken, "API token is required")
        })?;

        let mut headers = HeaderMap::new();
        let auth = format!("token {}", token.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|e| {
                ProviderError::new(
                    ProviderErrorKind::InvalidConfiguration,
                    format!("Invalid API token: {}", e),
                )
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent).map_err(|e| {
                ProviderError::new(
                    ProviderErrorKind::InvalidConfiguration,
                    format!("Invalid User-Agent: {}", e),
                )
            })?,
        );
        Ok(headers)
    }
}
