use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Api;
use crate::ApiNames;
use crate::ObjectMeta;
use crate::Resource;

const SCALED_OBJECT_API: Api = Api {
    group: "kore.k8s.io",
    version: "v1alpha1",
    names: ApiNames {
        kind: "ScaledObject",
        plural: "scaledobjects",
        singular: "scaledobject",
    },
};

/// how often the controller polls trigger sources, in seconds
pub const DEFAULT_POLLING_INTERVAL: i32 = 30;
/// how long the controller waits after the last trigger before scaling down, in seconds
pub const DEFAULT_COOLDOWN_PERIOD: i32 = 300;

impl Resource for ScaledObject {
    fn api() -> &'static Api {
        &SCALED_OBJECT_API
    }
}

/// A scaling policy binding a list of triggers to a deployment.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaledObject {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ScaledObjectSpec,
}

impl ScaledObject {
    pub fn new<S>(name: S, namespace: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_version: ScaledObject::api_version(),
            kind: ScaledObject::kind(),
            metadata: ObjectMeta::new(name, namespace),
            spec: ScaledObjectSpec::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaledObjectSpec {
    pub scale_target_ref: ScaleTargetRef,
    pub polling_interval: i32,
    pub cooldown_period: i32,
    pub triggers: Vec<ScaledObjectTrigger>,
}

/// Must name an already-built deployment.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleTargetRef {
    pub deployment_name: String,
}

/// One autoscaling signal, normalized from a function binding.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaledObjectTrigger {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub metadata: BTreeMap<String, String>,
}
