//!
//! # Manifest builders
//!
//! Pure construction of the per-app object graph. No I/O here; every object
//! is built fresh per call and never mutated afterwards.
//!

use std::collections::BTreeMap;

use crate::Container;
use crate::Deployment;
use crate::EnvVar;
use crate::KnativeService;
use crate::LabelSelector;
use crate::ScaleTargetRef;
use crate::ScaledObject;
use crate::ScaledObjectTrigger;
use crate::Secret;
use crate::TemplateMeta;
use crate::MIN_SCALE_ANNOTATION;
use crate::{DEFAULT_COOLDOWN_PERIOD, DEFAULT_POLLING_INTERVAL};

/// Build the secret set for an app. Every value is base64-encoded; keys keep
/// their original names. An empty map yields a secret with empty data.
pub fn secrets(name: &str, namespace: &str, data: &BTreeMap<String, String>) -> Secret {
    let mut secret = Secret::new(name, namespace);
    secret.data = data
        .iter()
        .map(|(key, value)| (key.clone(), base64::encode(value)))
        .collect();
    secret
}

/// Build the workload deployment. One env var per secret key, each sourced by
/// reference; the decoded value is never inlined.
pub fn deployment(
    name: &str,
    namespace: &str,
    secret: &Secret,
    image: &str,
    replicas: i32,
) -> Deployment {
    let env = secret
        .data
        .keys()
        .map(|key| EnvVar::from_secret(key, &secret.metadata.name, key))
        .collect();

    let mut deployment = Deployment::new(name, namespace);
    deployment.metadata = deployment.metadata.with_app_label(name);
    deployment.spec.replicas = replicas;
    deployment.spec.selector = LabelSelector::app(name);
    deployment.spec.template.metadata = TemplateMeta::app_labeled(name);
    deployment.spec.template.spec.containers = vec![Container {
        name: name.to_owned(),
        image: image.to_owned(),
        env,
    }];
    deployment
}

/// Build the autoscaling object targeting `deployment`. An empty trigger list
/// is a valid object; whether to apply it is the caller's call.
pub fn scaled_object(
    name: &str,
    namespace: &str,
    deployment: &Deployment,
    triggers: Vec<ScaledObjectTrigger>,
) -> ScaledObject {
    let mut scaled_object = ScaledObject::new(name, namespace);
    scaled_object.spec.scale_target_ref = ScaleTargetRef {
        deployment_name: deployment.metadata.name.clone(),
    };
    scaled_object.spec.polling_interval = DEFAULT_POLLING_INTERVAL;
    scaled_object.spec.cooldown_period = DEFAULT_COOLDOWN_PERIOD;
    scaled_object.spec.triggers = triggers;
    scaled_object
}

/// Build the serverless service revision. Apps without an HTTP trigger opt
/// out of scale-to-zero by pinning one instance.
pub fn knative_service(name: &str, namespace: &str, image: &str, is_http: bool) -> KnativeService {
    let mut service = KnativeService::new(name, namespace);
    let revision = &mut service.spec.run_latest.configuration.revision_template;
    revision.spec.container.image = image.to_owned();
    if !is_http {
        revision
            .metadata
            .annotations
            .insert(MIN_SCALE_ANNOTATION.to_owned(), "1".to_owned());
    }
    service
}
