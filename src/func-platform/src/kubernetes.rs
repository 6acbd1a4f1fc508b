use tracing::{info, warn};

use func_types::generate;
use func_types::{render, Deployment, OutputFormat, Resource, ScaledObject, Secret};

use crate::probe;
use crate::DeployContext;
use crate::DeployError;
use crate::HostingPlatform;
use crate::FUNCTIONS_NAMESPACE;

const DEFAULT_REPLICAS: i32 = 1;

/// Cluster-orchestrator hosting: a function app becomes a Secret plus a
/// Deployment, and a ScaledObject when the scale controller is installed.
pub struct KubernetesPlatform {
    context: DeployContext,
}

impl KubernetesPlatform {
    pub fn new(context: DeployContext) -> Self {
        Self { context }
    }

    fn build(&self, name: &str, image: &str) -> Result<(Secret, Deployment, ScaledObject), DeployError> {
        let secret = generate::secrets(
            &format!("{name}-secrets"),
            FUNCTIONS_NAMESPACE,
            &self.context.secrets,
        );
        let deployment = generate::deployment(
            &format!("{name}-deployment"),
            FUNCTIONS_NAMESPACE,
            &secret,
            image,
            DEFAULT_REPLICAS,
        );
        let triggers = func_scan::scaling_triggers(&self.context.root)?;
        let scaled_object = generate::scaled_object(
            &format!("{name}-scaledobject"),
            FUNCTIONS_NAMESPACE,
            &deployment,
            triggers,
        );
        Ok((secret, deployment, scaled_object))
    }

    /// Remove a previously deployed app. Each object is deleted best-effort
    /// so a missing resource does not abort the rest.
    pub fn remove(&self, name: &str) -> Result<(), DeployError> {
        let kubectl = &self.context.kubectl;
        kubectl.delete(
            ScaledObject::singular(),
            &format!("{name}-scaledobject"),
            Some(FUNCTIONS_NAMESPACE),
            true,
        )?;
        kubectl.delete(
            Deployment::singular(),
            &format!("{name}-deployment"),
            Some(FUNCTIONS_NAMESPACE),
            true,
        )?;
        kubectl.delete(
            Secret::singular(),
            &format!("{name}-secrets"),
            Some(FUNCTIONS_NAMESPACE),
            true,
        )?;
        Ok(())
    }
}

impl HostingPlatform for KubernetesPlatform {
    fn deploy(&self, name: &str, image: &str) -> Result<(), DeployError> {
        let kubectl = &self.context.kubectl;

        // idempotent on re-deploys; an existing namespace is not an error here
        kubectl.create_namespace(FUNCTIONS_NAMESPACE, true)?;

        let (secret, deployment, scaled_object) = self.build(name, image)?;
        let scaling_available =
            probe::has_scaled_object_crd(kubectl)? && probe::has_scale_controller(kubectl)?;

        info!(app = name, image, "deploying function app");
        kubectl.create_from_manifest(&secret, true)?;
        kubectl.create_from_manifest(&deployment, true)?;

        if scaling_available {
            kubectl.create_from_manifest(&scaled_object, true)?;
        } else {
            warn!("the scale controller is not installed on this cluster; skipping the autoscaling object");
            warn!("install the controller and deploy again to scale on your triggers");
        }
        Ok(())
    }

    fn serialize_deployment(
        &self,
        name: &str,
        image: &str,
        format: OutputFormat,
    ) -> Result<String, DeployError> {
        let (secret, deployment, scaled_object) = self.build(name, image)?;
        let documents = [
            render(&secret, format)?,
            render(&deployment, format)?,
            render(&scaled_object, format)?,
        ];
        let separator = format!("\n{}\n", format.separator());
        Ok(documents.join(separator.as_str()))
    }
}
