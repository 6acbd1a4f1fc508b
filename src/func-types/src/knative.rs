use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Api;
use crate::ApiNames;
use crate::ObjectMeta;
use crate::Resource;

const KNATIVE_SERVICE_API: Api = Api {
    group: "serving.knative.dev",
    version: "v1alpha1",
    names: ApiNames {
        kind: "Service",
        plural: "services",
        singular: "service",
    },
};

/// annotation that pins a minimum instance count, opting out of scale-to-zero
pub const MIN_SCALE_ANNOTATION: &str = "autoscaling.knative.dev/minScale";

impl Resource for KnativeService {
    fn api() -> &'static Api {
        &KNATIVE_SERVICE_API
    }
}

/// A single deployable revision on the serverless-ingress platform.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KnativeService {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: KnativeServiceSpec,
}

impl KnativeService {
    pub fn new<S>(name: S, namespace: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_version: KnativeService::api_version(),
            kind: KnativeService::kind(),
            metadata: ObjectMeta::new(name, namespace),
            spec: KnativeServiceSpec::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct KnativeServiceSpec {
    pub run_latest: RunLatest,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RunLatest {
    pub configuration: Configuration,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub revision_template: RevisionTemplate,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RevisionTemplate {
    pub metadata: RevisionTemplateMeta,
    pub spec: RevisionSpec,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RevisionTemplateMeta {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RevisionSpec {
    pub container: RevisionContainer,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RevisionContainer {
    pub image: String,
}
