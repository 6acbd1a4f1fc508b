//! Dry-run serialization against an on-disk function app, no cluster needed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use func_kubectl::Kubectl;
use func_platform::{DeployContext, DeployError, HostingPlatform, KnativePlatform, KubernetesPlatform, Platform};
use func_types::OutputFormat;

fn write_function(root: &Path, name: &str, descriptor: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("function dir");
    fs::write(dir.join("function.json"), descriptor).expect("descriptor");
}

fn app_context(root: &TempDir) -> DeployContext {
    write_function(
        root.path(),
        "queue-worker",
        r#"{"bindings": [{"type": "queueTrigger", "direction": "in", "name": "item", "queueName": "orders"}]}"#,
    );

    let mut secrets = BTreeMap::new();
    secrets.insert("A".to_owned(), "b".to_owned());

    DeployContext {
        kubectl: Kubectl::new(),
        root: root.path().to_path_buf(),
        secrets,
    }
}

#[test]
fn test_json_serialization_names_and_omitted_nulls() {
    let root = TempDir::new().expect("tempdir");
    let platform = KubernetesPlatform::new(app_context(&root));

    let output = platform
        .serialize_deployment("myapp", "registry/myapp:1", OutputFormat::Json)
        .expect("serialized");

    let documents: Vec<serde_json::Value> = output
        .split("\n\n")
        .map(|doc| serde_json::from_str(doc).expect("valid json document"))
        .collect();
    assert_eq!(documents.len(), 3);

    assert_eq!(documents[0]["metadata"]["name"], "myapp-secrets");
    assert_eq!(documents[1]["metadata"]["name"], "myapp-deployment");
    assert_eq!(documents[2]["metadata"]["name"], "myapp-scaledobject");
    for document in &documents {
        assert_eq!(document["metadata"]["namespace"], "azure-functions");
    }

    // null fields are omitted, not emitted
    assert!(!output.contains("null"));

    // secret value is carried base64-encoded and referenced from the deployment
    assert_eq!(documents[0]["data"]["A"], base64::encode("b"));
    let env = &documents[1]["spec"]["template"]["spec"]["containers"][0]["env"];
    assert_eq!(env[0]["valueFrom"]["secretKeyRef"]["name"], "myapp-secrets");

    // the queue binding arrives renamed on the scaling object
    assert_eq!(documents[2]["spec"]["triggers"][0]["type"], "azure-queue");
    assert_eq!(
        documents[2]["spec"]["scaleTargetRef"]["deploymentName"],
        "myapp-deployment"
    );
}

#[test]
fn test_yaml_serialization_uses_document_separators() {
    let root = TempDir::new().expect("tempdir");
    let platform = KubernetesPlatform::new(app_context(&root));

    let output = platform
        .serialize_deployment("myapp", "registry/myapp:1", OutputFormat::Yaml)
        .expect("serialized");

    assert_eq!(output.matches("\n---\n").count(), 2);
    assert!(output.contains("kind: Secret"));
    assert!(output.contains("kind: Deployment"));
    assert!(output.contains("kind: ScaledObject"));
}

#[test]
fn test_serialization_without_any_triggers() {
    let root = TempDir::new().expect("tempdir");
    let context = DeployContext {
        kubectl: Kubectl::new(),
        root: root.path().to_path_buf(),
        secrets: BTreeMap::new(),
    };
    let platform = KubernetesPlatform::new(context);

    let output = platform
        .serialize_deployment("myapp", "registry/myapp:1", OutputFormat::Json)
        .expect("serialized");

    let scaled: serde_json::Value =
        serde_json::from_str(output.split("\n\n").nth(2).expect("third document"))
            .expect("valid json");
    assert_eq!(scaled["spec"]["triggers"], serde_json::json!([]));
}

#[test]
fn test_knative_serialization_is_unsupported() {
    let root = TempDir::new().expect("tempdir");
    let platform = KnativePlatform::new(app_context(&root));

    let err = platform
        .serialize_deployment("myapp", "registry/myapp:1", OutputFormat::Json)
        .expect_err("must fail");
    assert!(matches!(
        err,
        DeployError::UnsupportedOperation {
            platform: "knative",
            ..
        }
    ));
}

#[test]
fn test_platform_selection() {
    let root = TempDir::new().expect("tempdir");

    let mut context = app_context(&root);
    context.kubectl = Kubectl::with_program("/bin/sh");
    assert!(matches!(
        Platform::for_name("kubernetes", context.clone()),
        Ok(Platform::Kubernetes(_))
    ));
    assert!(matches!(
        Platform::for_name("knative", context.clone()),
        Ok(Platform::Knative(_))
    ));
    assert!(matches!(
        Platform::for_name("swarm", context.clone()),
        Err(DeployError::UnsupportedPlatform(_))
    ));

    context.kubectl = Kubectl::with_program("/does/not/exist");
    assert!(matches!(
        Platform::for_name("kubernetes", context),
        Err(DeployError::MissingTool { tool: "kubectl" })
    ));
}
