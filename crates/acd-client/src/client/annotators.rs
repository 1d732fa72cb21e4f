use std::collections::BTreeMap;

use reqwest::{Method, header::HeaderMap};

use super::{AcdClient, DetailedResponse, segment};
use crate::{
    error::{Result, require},
    models::{AnnotatorDescriptor, annotator::descriptors_from_map},
};

#[derive(Debug, Clone, Default)]
pub struct ListAnnotatorsOptions {
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, Default)]
pub struct GetAnnotatorOptions {
    pub annotator_id: Option<String>,
    pub headers: HeaderMap,
}

impl GetAnnotatorOptions {
    pub fn new(annotator_id: impl Into<String>) -> Self {
        Self {
            annotator_id: Some(annotator_id.into()),
            ..Default::default()
        }
    }
}

impl_with_headers!(ListAnnotatorsOptions, GetAnnotatorOptions);

impl AcdClient {
    /// `GET /v1/annotators`, sorted by annotator name.
    pub async fn list_annotators(
        &self,
        options: &ListAnnotatorsOptions,
    ) -> Result<DetailedResponse<Vec<AnnotatorDescriptor>>> {
        let response: DetailedResponse<BTreeMap<String, AnnotatorDescriptor>> = self
            .send_json(self.request(Method::GET, "/v1/annotators", &options.headers))
            .await?;
        Ok(response.map(descriptors_from_map))
    }

    pub async fn get_annotator(
        &self,
        options: &GetAnnotatorOptions,
    ) -> Result<DetailedResponse<AnnotatorDescriptor>> {
        let annotator_id = require(options.annotator_id.as_deref(), "annotator_id")?;
        let path = format!("/v1/annotators/{}", segment(annotator_id));
        let response: DetailedResponse<AnnotatorDescriptor> = self
            .send_json(self.request(Method::GET, &path, &options.headers))
            .await?;
        Ok(response.map(|mut descriptor| {
            if descriptor.name.is_empty() {
                descriptor.name = annotator_id.to_string();
            }
            descriptor
        }))
    }
}
