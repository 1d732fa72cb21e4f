//! The ACD API client
//!
//! [`AcdClient`] maps one method to one REST endpoint. Operations live in the
//! per-resource submodules; this module holds the shared request plumbing.

/// Adds a `with_header` builder to options types carrying a `headers` map.
macro_rules! impl_with_headers {
    ($($ty:ty),+ $(,)?) => {
        $(impl $ty {
            /// Adds a header sent with this call only.
            pub fn with_header(
                mut self,
                name: ::reqwest::header::HeaderName,
                value: ::reqwest::header::HeaderValue,
            ) -> Self {
                self.headers.insert(name, value);
                self
            }
        })+
    };
}

mod analyze;
mod annotators;
mod cartridges;
mod flows;
mod profiles;
mod status;
mod user_data;

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{
    Method, RequestBuilder,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

pub use analyze::{AnalyzeOptions, AnalyzeWithFlowOptions};
pub use annotators::{GetAnnotatorOptions, ListAnnotatorsOptions};
pub use cartridges::{
    DEFAULT_ARCHIVE_CONTENT_TYPE, DeployCartridgeOptions, DeployCartridgeResponse, DeployOutcome,
    GetCartridgeOptions, ListCartridgesOptions,
};
pub use flows::{
    CreateFlowOptions, DeleteFlowOptions, GetFlowOptions, ListFlowsOptions, UpdateFlowOptions,
};
pub use profiles::{
    CreateProfileOptions, DeleteProfileOptions, GetProfileOptions, ListProfilesOptions,
    UpdateProfileOptions,
};
pub use status::HealthCheckOptions;
pub use user_data::DeleteUserDataOptions;

use crate::{
    auth::{Authenticator, authenticator_from_settings},
    config::AcdConfig,
    error::{AcdError, Result},
};

/// Status, headers and parsed body of a successful call.
///
/// `result` is `None` when the service sent an empty body (for example 204
/// from deletes, or 202 from some cartridge uploads).
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status: u16,
    pub headers: HeaderMap,
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the body, failing with [`AcdError::Decode`] when it was empty.
    pub fn into_result(self) -> Result<T> {
        self.result.ok_or_else(|| {
            AcdError::Decode(format!("status {} response had no body", self.status))
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status: self.status,
            headers: self.headers,
            result: self.result.map(f),
        }
    }
}

/// Client for the Annotator for Clinical Data REST API.
///
/// Cheap to clone; clones share the connection pool. Nothing mutable is
/// shared between calls.
#[derive(Clone)]
pub struct AcdClient {
    client: Arc<reqwest::Client>,
    base_url: Arc<String>,
    version: Arc<String>,
    authenticator: Arc<dyn Authenticator>,
    default_headers: Arc<HeaderMap>,
}

impl std::fmt::Debug for AcdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcdClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("authenticator", &self.authenticator)
            .finish()
    }
}

impl AcdClient {
    pub fn new(config: &AcdConfig, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        config.validate()?;

        if config.disable_ssl_verification {
            tracing::warn!("TLS certificate verification is disabled for {}", config.service_url);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .danger_accept_invalid_certs(config.disable_ssl_verification)
            .build()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: Arc::new(client),
            base_url: Arc::new(config.service_url.trim().to_string()),
            version: Arc::new(config.version.trim().to_string()),
            authenticator,
            default_headers: Arc::new(default_headers),
        })
    }

    /// Builds the client with the authenticator described by `config.auth`.
    pub fn from_config(config: &AcdConfig) -> Result<Self> {
        let authenticator = authenticator_from_settings(&config.auth)?;
        Self::new(config, authenticator)
    }

    /// Headers sent with every request. Per-call headers override these.
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        let mut merged = (*self.default_headers).clone();
        for (name, value) in headers.iter() {
            merged.insert(name.clone(), value.clone());
        }
        self.default_headers = Arc::new(merged);
        self
    }

    pub fn service_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Starts a request with the version query, default and caller headers,
    /// and credentials applied.
    pub(crate) fn request(&self, method: Method, path: &str, headers: &HeaderMap) -> RequestBuilder {
        let rb = self
            .client
            .request(method, self.url(path))
            .query(&[("version", self.version.as_str())])
            .headers((*self.default_headers).clone())
            .headers(headers.clone());
        self.authenticator.authenticate(rb)
    }

    async fn send(&self, rb: RequestBuilder) -> Result<(u16, HeaderMap, Bytes)> {
        let request = rb.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        tracing::debug!("Sending ACD request: {} {}", method, path);

        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let err = AcdError::from_response_body(status, &body);
            tracing::warn!("ACD request {} {} failed: {}", method, path, err);
            return Err(err);
        }

        tracing::debug!("ACD request {} {} returned {}", method, path, status);
        Ok((status.as_u16(), headers, body))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        rb: RequestBuilder,
    ) -> Result<DetailedResponse<T>> {
        let (status, headers, body) = self.send(rb).await?;

        let result = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice::<T>(&body).map_err(|e| {
                AcdError::Decode(format!("status {} body did not parse: {}", status, e))
            })?)
        };

        Ok(DetailedResponse {
            status,
            headers,
            result,
        })
    }

    /// Sends a request whose response body, if any, is not needed.
    pub(crate) async fn send_no_data(&self, rb: RequestBuilder) -> Result<DetailedResponse<()>> {
        let (status, headers, _) = self.send(rb).await?;
        Ok(DetailedResponse {
            status,
            headers,
            result: None,
        })
    }
}

/// Percent-encodes a value for use as one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
