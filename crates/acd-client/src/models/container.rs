use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::flow::AnnotatorFlow;

/// Input text plus the annotations the service attaches to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnstructuredContainer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContainerAnnotation>,
}

impl UnstructuredContainer {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            data: None,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        self.data.as_ref().map(|d| d.concepts.as_slice()).unwrap_or(&[])
    }
}

/// Annotations produced by a pipeline run.
///
/// The typed lists cover the annotators this client works with directly;
/// every other annotation type is kept as raw JSON in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerAnnotation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<Concept>,
    #[serde(
        default,
        rename = "SymptomDiseaseInd",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub symptom_disease_ind: Vec<SymptomDisease>,
    #[serde(
        default,
        rename = "attributeValues",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Span of the input text an annotation covers.
pub trait Span {
    fn begin(&self) -> Option<i64>;
    fn end(&self) -> Option<i64>;
    fn covered_text(&self) -> Option<&str>;

    /// True when both offsets and the covered text are present and `begin <= end`.
    fn has_valid_span(&self) -> bool {
        matches!((self.begin(), self.end()), (Some(b), Some(e)) if b <= e)
            && self.covered_text().is_some()
    }
}

macro_rules! impl_span {
    ($($ty:ty),+) => {
        $(impl Span for $ty {
            fn begin(&self) -> Option<i64> {
                self.begin
            }
            fn end(&self) -> Option<i64> {
                self.end
            }
            fn covered_text(&self) -> Option<&str> {
                self.covered_text.as_deref()
            }
        })+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub concept_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothetical: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomDisease {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snomed_concept_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl_span!(Concept, SymptomDisease, AttributeValue);

/// Body of `POST /v1/analyze` and `POST /v1/analyze/{flow_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotator_flows: Vec<AnnotatorFlow>,
    pub unstructured: Vec<UnstructuredContainer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub unstructured: Vec<UnstructuredContainer>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AnalyzeResponse {
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.unstructured.iter().flat_map(|c| c.concepts().iter())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_response_keeps_unknown_annotation_types() {
        let raw = json!({
            "unstructured": [{
                "data": {
                    "concepts": [{
                        "cui": "C0018787",
                        "preferredName": "Heart",
                        "type": "umls.BodyPartOrgan",
                        "begin": 25,
                        "end": 30,
                        "coveredText": "heart",
                        "vocabs": "MTH,CHV"
                    }],
                    "SymptomDiseaseInd": [{
                        "type": "aci.SymptomDiseaseInd",
                        "begin": 0,
                        "end": 16,
                        "coveredText": "Patient has pain",
                        "icd10Code": "R52"
                    }],
                    "NegatedSpan": [{ "begin": 40, "end": 43 }]
                }
            }]
        });

        let response: AnalyzeResponse = serde_json::from_value(raw).unwrap();
        let concepts: Vec<&Concept> = response.concepts().collect();
        assert_eq!(concepts.len(), 1);
        assert!(concepts[0].has_valid_span());
        assert_eq!(concepts[0].extra["vocabs"], "MTH,CHV");

        let data = response.unstructured[0].data.as_ref().unwrap();
        assert_eq!(data.symptom_disease_ind[0].icd10_code.as_deref(), Some("R52"));
        assert!(data.other.contains_key("NegatedSpan"));
    }

    #[test]
    fn test_span_validation() {
        let inverted = Concept {
            begin: Some(10),
            end: Some(4),
            covered_text: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!inverted.has_valid_span());

        let no_text = Concept {
            begin: Some(1),
            end: Some(4),
            ..Default::default()
        };
        assert!(!no_text.has_valid_span());
    }

    #[test]
    fn test_request_omits_empty_flows() {
        let request = AnalyzeRequest {
            annotator_flows: vec![],
            unstructured: vec![UnstructuredContainer::from_text("Patient has diabetes")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "unstructured": [{ "text": "Patient has diabetes" }] })
        );
    }
}
