//! Read-back model for custom resource definitions, used by the capability
//! probe. Only the name matters.

use serde::Deserialize;

use crate::ObjectMeta;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomResourceDefinition {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
}
