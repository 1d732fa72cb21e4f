use reqwest::{Method, header::HeaderMap};

use super::{AcdClient, DetailedResponse};
use crate::error::Result;

/// Tenant scoping comes from the credentials or a caller-supplied header.
#[derive(Debug, Clone, Default)]
pub struct DeleteUserDataOptions {
    pub headers: HeaderMap,
}

impl_with_headers!(DeleteUserDataOptions);

impl AcdClient {
    /// `DELETE /v1/user_data`: removes every artifact the caller's tenant
    /// has stored on the service.
    pub async fn delete_user_data(
        &self,
        options: &DeleteUserDataOptions,
    ) -> Result<DetailedResponse<()>> {
        tracing::info!("Deleting tenant user data on {}", self.service_url());
        self.send_no_data(self.request(Method::DELETE, "/v1/user_data", &options.headers))
            .await
    }
}
