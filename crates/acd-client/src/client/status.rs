use reqwest::{Method, header::HeaderMap};

use super::{AcdClient, DetailedResponse};
use crate::{error::Result, models::ServiceStatus};

#[derive(Debug, Clone, Default)]
pub struct HealthCheckOptions {
    pub headers: HeaderMap,
}

impl_with_headers!(HealthCheckOptions);

impl AcdClient {
    /// `GET /v1/status/health_check`. A healthy service reports
    /// `serviceState == "OK"`; see [`ServiceStatus::is_ok`].
    pub async fn health_check(
        &self,
        options: &HealthCheckOptions,
    ) -> Result<DetailedResponse<ServiceStatus>> {
        let response: DetailedResponse<ServiceStatus> = self
            .send_json(self.request(Method::GET, "/v1/status/health_check", &options.headers))
            .await?;
        if let Some(status) = response.result.as_ref().filter(|s| !s.is_ok()) {
            tracing::warn!(
                "ACD service at {} reports state {}",
                self.service_url(),
                status.service_state
            );
        }
        Ok(response)
    }
}
