use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only description of an annotator offered by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorDescriptor {
    /// Filled in by the client from the map key or the requested id; the
    /// service does not repeat it in the body.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// `GET /v1/annotators` answers with a map keyed by annotator name.
pub(crate) fn descriptors_from_map(
    map: BTreeMap<String, AnnotatorDescriptor>,
) -> Vec<AnnotatorDescriptor> {
    map.into_iter()
        .map(|(name, mut descriptor)| {
            descriptor.name = name;
            descriptor
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_come_from_map_keys() {
        let raw = r#"{
            "concept_detection": { "description": "Detects UMLS concepts" },
            "negation": { "description": "Detects negated spans", "version": "2023-01-01" }
        }"#;
        let map: BTreeMap<String, AnnotatorDescriptor> = serde_json::from_str(raw).unwrap();
        let descriptors = descriptors_from_map(map);

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "concept_detection");
        assert_eq!(descriptors[1].name, "negation");
        assert_eq!(descriptors[1].version.as_deref(), Some("2023-01-01"));
    }
}
