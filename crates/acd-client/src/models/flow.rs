use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single annotator stage, referenced by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<ConfigurationEntity>>,
}

impl Annotator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a parameter value, appending when the key already exists.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .get_or_insert_with(BTreeMap::new)
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn with_configuration(mut self, configuration: ConfigurationEntity) -> Self {
        self.configurations
            .get_or_insert_with(Vec::new)
            .push(configuration);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mergeid: Option<i64>,
}

/// One element of a flow: either an annotator stage or a nested sub-flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlowEntry {
    Annotator { annotator: Annotator },
    Flow { flow: Flow },
}

impl FlowEntry {
    pub fn annotator(annotator: Annotator) -> Self {
        Self::Annotator { annotator }
    }

    pub fn flow(flow: Flow) -> Self {
        Self::Flow { flow }
    }
}

/// Ordered sequence of stages executed by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default)]
    pub elements: Vec<FlowEntry>,
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

impl Flow {
    pub fn new(elements: Vec<FlowEntry>) -> Self {
        Self {
            elements,
            is_async: false,
        }
    }

    /// A flow running each named annotator in order.
    pub fn of_annotators<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|name| FlowEntry::annotator(Annotator::new(name)))
                .collect(),
        )
    }

    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    /// Names of every annotator in the flow, nested flows included, in order.
    pub fn annotator_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for element in &self.elements {
            match element {
                FlowEntry::Annotator { annotator } => names.push(annotator.name.as_str()),
                FlowEntry::Flow { flow } => names.extend(flow.annotator_names()),
            }
        }
        names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub flow: Flow,
}

impl AnnotatorFlow {
    pub fn new(flow: Flow) -> Self {
        Self {
            profile: None,
            flow,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

/// A stored, versioned flow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcdFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cartridge_id: Option<String>,
    #[serde(default)]
    pub annotator_flows: Vec<AnnotatorFlow>,
}
