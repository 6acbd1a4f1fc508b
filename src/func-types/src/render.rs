use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Output encoding for serialized deployments.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// separator emitted between rendered documents; only yaml has one
    pub fn separator(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Json => "",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(RenderError::UnknownFormat(other.to_owned())),
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown serialization format: {0}. Valid options are: json,yaml")]
    UnknownFormat(String),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Render one manifest in the requested format. Json output is indented and
/// omits unset fields; yaml output never uses anchors.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}
