use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Api;
use crate::ApiNames;
use crate::ObjectMeta;
use crate::Resource;

//
// Secret Object
const SECRET_API: Api = Api {
    group: "core",
    version: "v1",
    names: ApiNames {
        kind: "Secret",
        plural: "secrets",
        singular: "secret",
    },
};

impl Resource for Secret {
    fn api() -> &'static Api {
        &SECRET_API
    }
}

/// Opaque credentials for a function app.
///
/// `data` values are base64-encoded before they land here; keys keep the
/// original secret names.
#[derive(Deserialize, Serialize, Debug, PartialEq, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub data: BTreeMap<String, String>,
}

impl Secret {
    pub fn new<S>(name: S, namespace: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_version: Secret::api_version(),
            kind: Secret::kind(),
            metadata: ObjectMeta::new(name, namespace),
            data: BTreeMap::new(),
        }
    }
}
