use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// metadata attached to generated and retrieved objects
///
/// Only the fields the engine writes or reads are modeled; anything else a
/// cluster returns is ignored on deserialization.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

impl ObjectMeta {
    pub fn new<S>(name: S, namespace: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            labels: None,
        }
    }

    /// builder pattern setter for the single `app` label
    pub fn with_app_label(mut self, app: &str) -> Self {
        let mut labels = HashMap::new();
        labels.insert("app".to_owned(), app.to_owned());
        self.labels = Some(labels);
        self
    }
}

/// metadata for a pod template, where a name is not required
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: HashMap<String, String>,
}

impl TemplateMeta {
    pub fn app_labeled(app: &str) -> Self {
        let mut labels = HashMap::new();
        labels.insert("app".to_owned(), app.to_owned());
        Self { name: None, labels }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSelector {
    pub match_labels: HashMap<String, String>,
}

impl LabelSelector {
    pub fn app(name: &str) -> Self {
        let mut match_labels = HashMap::new();
        match_labels.insert("app".to_owned(), name.to_owned());
        LabelSelector { match_labels }
    }
}

/// wrapper for `get --output json` list responses
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub items: Vec<T>,
}

#[cfg(test)]
mod test {

    use super::{LabelSelector, ObjectMeta, SearchResult, TemplateMeta};

    #[test]
    fn test_app_label() {
        let metadata = ObjectMeta::new("myapp", "azure-functions").with_app_label("myapp");

        let labels = metadata.labels.expect("labels");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get("app").unwrap(), "myapp");
    }

    #[test]
    fn test_selector_matches_template_labels() {
        let selector = LabelSelector::app("myapp");
        let template = TemplateMeta::app_labeled("myapp");
        assert_eq!(selector.match_labels, template.labels);
    }

    #[test]
    fn test_metadata_omits_unset_fields() {
        let metadata = ObjectMeta {
            name: "myapp".to_owned(),
            ..Default::default()
        };
        let json = serde_json::to_string(&metadata).expect("serialized");
        assert_eq!(json, r#"{"name":"myapp"}"#);
    }

    #[test]
    fn test_search_result_tolerates_missing_items() {
        let result: SearchResult<ObjectMeta> =
            serde_json::from_str(r#"{"apiVersion":"v1"}"#).expect("parsed");
        assert!(result.items.is_empty());
    }
}
