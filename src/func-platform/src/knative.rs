use tracing::{info, warn};

use func_types::generate;
use func_types::{OutputFormat, Service};

use crate::DeployContext;
use crate::DeployError;
use crate::HostingPlatform;
use crate::FUNCTIONS_NAMESPACE;

const INGRESS_SERVICE_QUERY: &str = "service istio-ingressgateway --namespace istio-system";
const HOST_SUFFIX: &str = "example.com";

/// Serverless-ingress hosting: a single function becomes one Knative service
/// revision behind the cluster's ingress gateway.
pub struct KnativePlatform {
    context: DeployContext,
}

impl KnativePlatform {
    pub fn new(context: DeployContext) -> Self {
        Self { context }
    }

    fn function_host(name: &str, namespace: &str) -> String {
        format!("{name}.{namespace}.{HOST_SUFFIX}")
    }

    /// External address of the ingress gateway, when one is assigned. A
    /// failing lookup is only worth a warning; the service itself is already
    /// rolled out.
    fn ingress_address(&self) -> Option<String> {
        match self.context.kubectl.get::<Service>(INGRESS_SERVICE_QUERY) {
            Ok(service) => service
                .status
                .load_balancer
                .find_any_ip_or_host()
                .map(str::to_owned),
            Err(err) => {
                warn!(%err, "unable to query the ingress gateway");
                None
            }
        }
    }
}

impl HostingPlatform for KnativePlatform {
    fn deploy(&self, name: &str, image: &str) -> Result<(), DeployError> {
        let is_http = func_scan::has_http_trigger(&self.context.root.join(name))?;

        // unlike the kubernetes variant, a namespace failure is fatal here
        self.context
            .kubectl
            .create_namespace(FUNCTIONS_NAMESPACE, false)?;

        info!(app = name, image, "deploying function to knative");
        let service = generate::knative_service(name, FUNCTIONS_NAMESPACE, image, is_http);
        self.context.kubectl.apply_manifest(&service)?;

        match self.ingress_address() {
            Some(address) => {
                info!("function deployed successfully");
                info!(url = %format!("http://{address}"), "function URL");
                info!(host = %Self::function_host(name, FUNCTIONS_NAMESPACE), "function host");
                info!("it may take a few minutes for the service to become reachable");
            }
            None => warn!("the ingress load balancer has no external address yet"),
        }
        Ok(())
    }

    fn serialize_deployment(
        &self,
        _name: &str,
        _image: &str,
        _format: OutputFormat,
    ) -> Result<String, DeployError> {
        Err(DeployError::UnsupportedOperation {
            platform: "knative",
            operation: "serializing a deployment",
        })
    }
}
