use thiserror::Error;

use func_kubectl::CommandError;
use func_scan::ScanError;
use func_types::RenderError;

#[derive(Error, Debug)]
pub enum DeployError {
    /// unknown platform name from the user
    #[error("platform {0} is not supported. Valid options are: kubernetes,knative")]
    UnsupportedPlatform(String),

    /// required external tool is not on the path
    #[error("{tool} is required for deploying. Please make sure to install {tool} and try again.")]
    MissingTool { tool: &'static str },

    /// the chosen platform variant cannot perform this operation
    #[error("{operation} is not implemented for the {platform} platform")]
    UnsupportedOperation {
        platform: &'static str,
        operation: &'static str,
    },

    #[error("command error: {0}")]
    Command(#[from] CommandError),

    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
