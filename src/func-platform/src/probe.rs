//!
//! # Capability probes
//!
//! Read-only checks for the optional autoscaling infrastructure. An empty
//! result set is `false`; a failing query propagates, since a reachable
//! cluster is a precondition of deploying at all.
//!
use func_kubectl::{CommandError, Kubectl};
use func_types::{CustomResourceDefinition, Deployment, SearchResult};

/// name the ScaledObject custom resource definition is registered under
pub const SCALED_OBJECT_CRD_NAME: &str = "scaledobjects.kore.k8s.io";

/// label selector of the scale controller deployment
pub const CONTROLLER_SELECTOR: &str = "app=kore";

/// selector older controller releases were shipped with
pub const LEGACY_CONTROLLER_SELECTOR: &str = "app=kore-edge";

/// True when the ScaledObject CRD is registered on the cluster.
pub fn has_scaled_object_crd(kubectl: &Kubectl) -> Result<bool, CommandError> {
    let crds: SearchResult<CustomResourceDefinition> = kubectl.get("crd")?;
    Ok(crds
        .items
        .iter()
        .any(|crd| crd.metadata.name == SCALED_OBJECT_CRD_NAME))
}

/// True when a controller deployment answers either the current or the
/// legacy selector, in any namespace.
pub fn has_scale_controller(kubectl: &Kubectl) -> Result<bool, CommandError> {
    for selector in [CONTROLLER_SELECTOR, LEGACY_CONTROLLER_SELECTOR] {
        let query = format!("deployments --selector={selector} --all-namespaces");
        let found: SearchResult<Deployment> = kubectl.get(&query)?;
        if !found.items.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}
