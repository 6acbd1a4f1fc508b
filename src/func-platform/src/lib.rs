//!
//! # Hosting platforms
//!
//! Turns a built image plus a directory of function descriptors into a
//! running deployment on one of two backends: a cluster orchestrator
//! (Secret + Deployment + optional ScaledObject) or a serverless ingress
//! (one Knative service). Both satisfy the same two-operation contract.
//!
mod error;
mod knative;
mod kubernetes;
pub mod probe;

pub use self::error::DeployError;
pub use self::knative::KnativePlatform;
pub use self::kubernetes::KubernetesPlatform;

use std::collections::BTreeMap;
use std::path::PathBuf;

use func_kubectl::Kubectl;
use func_types::OutputFormat;

/// namespace every function app lands in
pub const FUNCTIONS_NAMESPACE: &str = "azure-functions";

/// Per-invocation wiring shared by both variants. Replaces any process-wide
/// client handle or working-directory state; nothing here outlives the call.
#[derive(Debug, Clone, Default)]
pub struct DeployContext {
    /// control-plane command handle
    pub kubectl: Kubectl,
    /// directory containing one sub-directory per function
    pub root: PathBuf,
    /// already-resolved plaintext secrets for the app
    pub secrets: BTreeMap<String, String>,
}

/// The contract every hosting platform satisfies.
pub trait HostingPlatform {
    /// Deploy the app `name` running `image` to the live cluster.
    fn deploy(&self, name: &str, image: &str) -> Result<(), DeployError>;

    /// Render the deployment's manifests without touching the cluster.
    fn serialize_deployment(
        &self,
        name: &str,
        image: &str,
        format: OutputFormat,
    ) -> Result<String, DeployError>;
}

/// Enum-dispatched platform. Adding a backend means a new variant plus a
/// selector arm, nothing else.
pub enum Platform {
    Kubernetes(KubernetesPlatform),
    Knative(KnativePlatform),
}

impl Platform {
    /// Resolve a user-chosen platform name. Fails up front when the
    /// control-plane binary cannot be found, before any variant runs.
    pub fn for_name(name: &str, context: DeployContext) -> Result<Self, DeployError> {
        if !context.kubectl.available() {
            return Err(DeployError::MissingTool { tool: "kubectl" });
        }
        match name {
            "kubernetes" => Ok(Self::Kubernetes(KubernetesPlatform::new(context))),
            "knative" => Ok(Self::Knative(KnativePlatform::new(context))),
            other => Err(DeployError::UnsupportedPlatform(other.to_owned())),
        }
    }
}

impl HostingPlatform for Platform {
    fn deploy(&self, name: &str, image: &str) -> Result<(), DeployError> {
        match self {
            Self::Kubernetes(platform) => platform.deploy(name, image),
            Self::Knative(platform) => platform.deploy(name, image),
        }
    }

    fn serialize_deployment(
        &self,
        name: &str,
        image: &str,
        format: OutputFormat,
    ) -> Result<String, DeployError> {
        match self {
            Self::Kubernetes(platform) => platform.serialize_deployment(name, image, format),
            Self::Knative(platform) => platform.serialize_deployment(name, image, format),
        }
    }
}
