use std::path::{Path, PathBuf};

use reqwest::{
    Body, Method,
    header::HeaderMap,
    multipart::{Form, Part},
};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::{AcdClient, DetailedResponse, segment};
use crate::{
    error::{AcdError, Result, require},
    models::{AcdCartridge, CartridgeList, ServiceMessage},
};

/// Content type sent for the archive part when the caller does not set one.
pub const DEFAULT_ARCHIVE_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Default)]
pub struct ListCartridgesOptions {
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, Default)]
pub struct GetCartridgeOptions {
    pub cartridge_id: Option<String>,
    pub headers: HeaderMap,
}

impl GetCartridgeOptions {
    pub fn new(cartridge_id: impl Into<String>) -> Self {
        Self {
            cartridge_id: Some(cartridge_id.into()),
            ..Default::default()
        }
    }
}

/// Uploads a cartridge archive.
///
/// With `update` unset or false the upload is a create (`POST`) and the
/// service answers 409 when the cartridge already exists. With `update` true
/// it replaces the deployed cartridge (`PUT`).
#[derive(Debug, Clone, Default)]
pub struct DeployCartridgeOptions {
    pub archive_file: Option<PathBuf>,
    pub archive_file_content_type: Option<String>,
    pub update: Option<bool>,
    pub headers: HeaderMap,
}

impl DeployCartridgeOptions {
    pub fn new(archive_file: impl Into<PathBuf>) -> Self {
        Self {
            archive_file: Some(archive_file.into()),
            ..Default::default()
        }
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.archive_file_content_type = Some(content_type.into());
        self
    }

    fn is_update(&self) -> bool {
        self.update.unwrap_or(false)
    }
}

impl_with_headers!(ListCartridgesOptions, GetCartridgeOptions, DeployCartridgeOptions);

/// Acknowledgement of a cartridge upload. Accepted uploads usually carry only
/// a status location to poll; rejected artifacts are listed in
/// `artifact_response`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployCartridgeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifact_response: Vec<ServiceMessage>,
}

/// Result of [`AcdClient::deploy_cartridge_or_existing`].
#[derive(Debug, Clone)]
pub enum DeployOutcome {
    /// The service accepted the upload (2xx).
    Accepted(DetailedResponse<DeployCartridgeResponse>),
    /// A create was rejected with 409 because the cartridge is already deployed.
    AlreadyExists { message: String },
}

impl DeployOutcome {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

async fn archive_part(path: &Path, content_type: &str) -> Result<Part> {
    let file = File::open(path).await?;
    let len = file.metadata().await?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());

    Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
        .file_name(file_name)
        .mime_str(content_type)
        .map_err(|e| AcdError::InvalidParameter(format!("archive content type: {}", e)))
}

impl AcdClient {
    /// `GET /v1/cartridges`
    pub async fn list_cartridges(
        &self,
        options: &ListCartridgesOptions,
    ) -> Result<DetailedResponse<CartridgeList>> {
        self.send_json(self.request(Method::GET, "/v1/cartridges", &options.headers))
            .await
    }

    /// `GET /v1/cartridges/{id}`: the deployment record, including progress
    /// of an asynchronous deploy.
    pub async fn get_cartridge(
        &self,
        options: &GetCartridgeOptions,
    ) -> Result<DetailedResponse<AcdCartridge>> {
        let cartridge_id = require(options.cartridge_id.as_deref(), "cartridge_id")?;
        let path = format!("/v1/cartridges/{}", segment(cartridge_id));
        self.send_json(self.request(Method::GET, &path, &options.headers))
            .await
    }

    /// Streams the archive as the `archive_file` multipart field.
    pub async fn deploy_cartridge(
        &self,
        options: &DeployCartridgeOptions,
    ) -> Result<DetailedResponse<DeployCartridgeResponse>> {
        let archive = options
            .archive_file
            .as_deref()
            .ok_or(AcdError::MissingParameter("archive_file"))?;
        let content_type = options
            .archive_file_content_type
            .as_deref()
            .unwrap_or(DEFAULT_ARCHIVE_CONTENT_TYPE);

        let part = archive_part(archive, content_type).await?;
        let form = Form::new().part("archive_file", part);
        let method = if options.is_update() {
            Method::PUT
        } else {
            Method::POST
        };

        tracing::info!(
            "Deploying cartridge archive {} ({})",
            archive.display(),
            if options.is_update() { "update" } else { "create" }
        );
        self.send_json(
            self.request(method, "/v1/cartridges", &options.headers)
                .multipart(form),
        )
        .await
    }

    /// Like [`AcdClient::deploy_cartridge`], but reports a 409 on create as
    /// [`DeployOutcome::AlreadyExists`] instead of an error.
    pub async fn deploy_cartridge_or_existing(
        &self,
        options: &DeployCartridgeOptions,
    ) -> Result<DeployOutcome> {
        match self.deploy_cartridge(options).await {
            Ok(response) => Ok(DeployOutcome::Accepted(response)),
            Err(AcdError::Api {
                status: 409,
                message,
                ..
            }) if !options.is_update() => {
                tracing::info!("Cartridge already deployed: {}", message);
                Ok(DeployOutcome::AlreadyExists { message })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_flag_defaults_to_create() {
        assert!(!DeployCartridgeOptions::new("c.zip").is_update());
        assert!(DeployCartridgeOptions::new("c.zip").with_update(true).is_update());
    }

    #[tokio::test]
    async fn test_archive_part_missing_file_is_io_error() {
        let err = archive_part(Path::new("/nonexistent/cartridge.zip"), DEFAULT_ARCHIVE_CONTENT_TYPE)
            .await
            .unwrap_err();
        assert!(matches!(err, AcdError::Io(_)));
    }
}
