//! Typed client for the Annotator for Clinical Data (ACD) REST API.
//!
//! Build an [`AcdClient`] from an [`AcdConfig`] and an [`Authenticator`],
//! then call one async method per endpoint:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use acd_client::{AcdClient, AcdConfig, NoAuthAuthenticator};
//!
//! # async fn run() -> acd_client::Result<()> {
//! let config = AcdConfig::new("https://acd.example.com/services/clinical_data_annotator/api", "2023-01-01");
//! let client = AcdClient::new(&config, Arc::new(NoAuthAuthenticator))?;
//! let health = client.health_check(&Default::default()).await?;
//! println!("{:?}", health.result);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use auth::{
    Authenticator, BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator,
    authenticator_from_settings,
};
pub use client::{AcdClient, DetailedResponse};
pub use config::AcdConfig;
pub use error::{AcdError, Result};
