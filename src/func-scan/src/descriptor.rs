use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use func_types::ScaledObjectTrigger;

/// file name every function directory is expected to carry
pub const DESCRIPTOR_FILE: &str = "function.json";

const TRIGGER_SUFFIX: &str = "Trigger";
const HTTP_TRIGGER: &str = "httpTrigger";
const QUEUE_TRIGGER: &str = "queueTrigger";
const QUEUE_SCALER: &str = "azure-queue";

/// On-disk trigger metadata for one function. Unknown top-level fields are
/// ignored; a descriptor without a `bindings` array does not parse.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    #[serde(default)]
    pub disabled: bool,
    pub bindings: Vec<Binding>,
    #[serde(default)]
    pub script_file: Option<String>,
}

impl FunctionDescriptor {
    pub fn has_http_trigger(&self) -> bool {
        self.bindings.iter().any(Binding::is_http_trigger)
    }

    /// normalized scaling signals declared by this function
    pub fn scaling_triggers(&self) -> impl Iterator<Item = ScaledObjectTrigger> + '_ {
        self.bindings.iter().filter_map(Binding::scaling_trigger)
    }
}

/// One binding entry. Engine-specific fields beyond the known set are kept
/// verbatim in `extra` so they can travel into trigger metadata.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub auth_level: Option<String>,
    #[serde(default)]
    pub methods: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Binding {
    pub fn is_http_trigger(&self) -> bool {
        self.ty.as_deref() == Some(HTTP_TRIGGER)
    }

    /// Normalize this binding into an autoscaling trigger. A binding with no
    /// `type`, or whose type is not a trigger, carries no signal.
    pub fn scaling_trigger(&self) -> Option<ScaledObjectTrigger> {
        let ty = self.ty.as_deref()?;
        if !ty.ends_with(TRIGGER_SUFFIX) {
            return None;
        }
        let scaler = if ty == QUEUE_TRIGGER { QUEUE_SCALER } else { ty };
        Some(ScaledObjectTrigger {
            ty: scaler.to_owned(),
            name: None,
            metadata: self.metadata_map(),
        })
    }

    /// Every binding field as a string map. Scalars pass through verbatim;
    /// composite values keep their compact json form so the mapping is total.
    fn metadata_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        if let Some(ty) = &self.ty {
            map.insert("type".to_owned(), ty.clone());
        }
        if let Some(direction) = &self.direction {
            map.insert("direction".to_owned(), direction.clone());
        }
        if let Some(name) = &self.name {
            map.insert("name".to_owned(), name.clone());
        }
        if let Some(auth_level) = &self.auth_level {
            map.insert("authLevel".to_owned(), auth_level.clone());
        }
        if let Some(methods) = &self.methods {
            map.insert("methods".to_owned(), Value::from(methods.clone()).to_string());
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), scalar_string(value));
        }
        map
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
