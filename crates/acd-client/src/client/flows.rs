use std::collections::BTreeMap;

use reqwest::{Method, header::HeaderMap};

use super::{AcdClient, DetailedResponse, segment};
use crate::{
    error::{AcdError, Result, require},
    models::{AcdFlow, ServiceMessage},
};

#[derive(Debug, Clone, Default)]
pub struct ListFlowsOptions {
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, Default)]
pub struct GetFlowOptions {
    pub flow_id: Option<String>,
    pub headers: HeaderMap,
}

impl GetFlowOptions {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }
}

/// The flow's `id` is required and at least one annotator flow must be given.
#[derive(Debug, Clone, Default)]
pub struct CreateFlowOptions {
    pub flow: AcdFlow,
    pub headers: HeaderMap,
}

impl CreateFlowOptions {
    pub fn new(flow: AcdFlow) -> Self {
        Self {
            flow,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFlowOptions {
    pub flow_id: Option<String>,
    pub flow: AcdFlow,
    pub headers: HeaderMap,
}

impl UpdateFlowOptions {
    pub fn new(flow_id: impl Into<String>, flow: AcdFlow) -> Self {
        Self {
            flow_id: Some(flow_id.into()),
            flow,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteFlowOptions {
    pub flow_id: Option<String>,
    pub headers: HeaderMap,
}

impl DeleteFlowOptions {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }
}

impl_with_headers!(
    ListFlowsOptions,
    GetFlowOptions,
    CreateFlowOptions,
    UpdateFlowOptions,
    DeleteFlowOptions,
);

fn require_annotator_flows(flow: &AcdFlow) -> Result<()> {
    if flow.annotator_flows.is_empty() {
        return Err(AcdError::MissingParameter("flow.annotator_flows"));
    }
    Ok(())
}

impl AcdClient {
    /// `GET /v1/flows`: every stored flow, keyed by id.
    pub async fn list_flows(
        &self,
        options: &ListFlowsOptions,
    ) -> Result<DetailedResponse<BTreeMap<String, AcdFlow>>> {
        self.send_json(self.request(Method::GET, "/v1/flows", &options.headers))
            .await
    }

    pub async fn get_flow(&self, options: &GetFlowOptions) -> Result<DetailedResponse<AcdFlow>> {
        let flow_id = require(options.flow_id.as_deref(), "flow_id")?;
        let path = format!("/v1/flows/{}", segment(flow_id));
        self.send_json(self.request(Method::GET, &path, &options.headers))
            .await
    }

    pub async fn create_flow(
        &self,
        options: &CreateFlowOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        require(options.flow.id.as_deref(), "flow.id")?;
        require_annotator_flows(&options.flow)?;
        self.send_json(
            self.request(Method::POST, "/v1/flows", &options.headers)
                .json(&options.flow),
        )
        .await
    }

    pub async fn update_flow(
        &self,
        options: &UpdateFlowOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        let flow_id = require(options.flow_id.as_deref(), "flow_id")?;
        require_annotator_flows(&options.flow)?;
        let mut flow = options.flow.clone();
        match flow.id.as_deref() {
            None => flow.id = Some(flow_id.to_string()),
            Some(body_id) if body_id != flow_id => {
                return Err(AcdError::InvalidParameter(format!(
                    "flow body id '{}' does not match path id '{}'",
                    body_id, flow_id
                )));
            }
            Some(_) => {}
        }

        let path = format!("/v1/flows/{}", segment(flow_id));
        self.send_json(self.request(Method::PUT, &path, &options.headers).json(&flow))
            .await
    }

    pub async fn delete_flow(
        &self,
        options: &DeleteFlowOptions,
    ) -> Result<DetailedResponse<ServiceMessage>> {
        let flow_id = require(options.flow_id.as_deref(), "flow_id")?;
        let path = format!("/v1/flows/{}", segment(flow_id));
        self.send_json(self.request(Method::DELETE, &path, &options.headers))
            .await
    }
}
