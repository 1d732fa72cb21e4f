use reqwest::{Method, RequestBuilder, header::HeaderMap};

use super::{AcdClient, DetailedResponse, segment};
use crate::{
    error::{AcdError, Result, require},
    models::{AnalyzeRequest, AnalyzeResponse, AnnotatorFlow, UnstructuredContainer},
};

/// Runs the pipeline described by `annotator_flows` over the given input.
///
/// Input is either `text` (wrapped into a single container) or explicit
/// `unstructured` containers; containers win when both are set.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub text: Option<String>,
    pub unstructured: Vec<UnstructuredContainer>,
    pub annotator_flows: Vec<AnnotatorFlow>,
    /// Ask the service to echo the analyzed text back in each container.
    pub return_analyzed_text: Option<bool>,
    pub headers: HeaderMap,
}

impl AnalyzeOptions {
    pub fn new(text: impl Into<String>, annotator_flows: Vec<AnnotatorFlow>) -> Self {
        Self {
            text: Some(text.into()),
            annotator_flows,
            ..Default::default()
        }
    }

    pub fn with_return_analyzed_text(mut self, enabled: bool) -> Self {
        self.return_analyzed_text = Some(enabled);
        self
    }
}

/// Runs the stored flow `flow_id` over the given input.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeWithFlowOptions {
    pub flow_id: Option<String>,
    pub text: Option<String>,
    pub unstructured: Vec<UnstructuredContainer>,
    pub return_analyzed_text: Option<bool>,
    pub headers: HeaderMap,
}

impl AnalyzeWithFlowOptions {
    pub fn new(flow_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            flow_id: Some(flow_id.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_return_analyzed_text(mut self, enabled: bool) -> Self {
        self.return_analyzed_text = Some(enabled);
        self
    }
}

impl_with_headers!(AnalyzeOptions, AnalyzeWithFlowOptions);

fn containers(
    text: Option<&str>,
    unstructured: &[UnstructuredContainer],
) -> Result<Vec<UnstructuredContainer>> {
    if !unstructured.is_empty() {
        return Ok(unstructured.to_vec());
    }
    let text = require(text, "text")?;
    Ok(vec![UnstructuredContainer::from_text(text)])
}

fn with_analyzed_text_flag(rb: RequestBuilder, flag: Option<bool>) -> RequestBuilder {
    match flag {
        Some(enabled) => rb.query(&[("return_analyzed_text", enabled)]),
        None => rb,
    }
}

impl AcdClient {
    /// `POST /v1/analyze` with an inline flow.
    pub async fn analyze(
        &self,
        options: &AnalyzeOptions,
    ) -> Result<DetailedResponse<AnalyzeResponse>> {
        if options.annotator_flows.is_empty() {
            return Err(AcdError::MissingParameter("annotator_flows"));
        }
        let body = AnalyzeRequest {
            annotator_flows: options.annotator_flows.clone(),
            unstructured: containers(options.text.as_deref(), &options.unstructured)?,
        };

        let rb = self
            .request(Method::POST, "/v1/analyze", &options.headers)
            .json(&body);
        self.send_json(with_analyzed_text_flag(rb, options.return_analyzed_text))
            .await
    }

    /// `POST /v1/analyze/{flow_id}` against a flow stored on the service.
    pub async fn analyze_with_flow(
        &self,
        options: &AnalyzeWithFlowOptions,
    ) -> Result<DetailedResponse<AnalyzeResponse>> {
        let flow_id = require(options.flow_id.as_deref(), "flow_id")?;
        let body = AnalyzeRequest {
            annotator_flows: Vec::new(),
            unstructured: containers(options.text.as_deref(), &options.unstructured)?,
        };

        let path = format!("/v1/analyze/{}", segment(flow_id));
        let rb = self
            .request(Method::POST, &path, &options.headers)
            .json(&body);
        self.send_json(with_analyzed_text_flag(rb, options.return_analyzed_text))
            .await
    }
}
