//!
//! # Function descriptor scanner
//!
//! Walks a function app directory (one sub-directory per function, each with
//! a `function.json`) and turns binding entries into autoscaling triggers.
//! Broken descriptors only cost that function its scaling signal.
//!
mod descriptor;
mod error;

pub use self::descriptor::{Binding, FunctionDescriptor, DESCRIPTOR_FILE};
pub use self::error::ScanError;

use std::fs;
use std::path::Path;

use tracing::debug;

use func_types::ScaledObjectTrigger;

/// Yield one `(name, descriptor)` pair per immediate sub-directory of `root`
/// with a readable descriptor. Directories without one, or with one that does
/// not parse, are skipped.
pub fn scan(
    root: &Path,
) -> Result<impl Iterator<Item = (String, FunctionDescriptor)>, ScanError> {
    let entries = fs::read_dir(root).map_err(|source| ScanError::ReadRoot {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let file = entry.path().join(DESCRIPTOR_FILE);
            let content = match fs::read_to_string(&file) {
                Ok(content) => content,
                Err(err) => {
                    debug!(path = %file.display(), %err, "no readable descriptor, skipping");
                    return None;
                }
            };
            match serde_json::from_str::<FunctionDescriptor>(&content) {
                Ok(descriptor) => Some((name, descriptor)),
                Err(err) => {
                    debug!(path = %file.display(), %err, "invalid descriptor, skipping");
                    None
                }
            }
        }))
}

/// Collect the normalized autoscaling triggers declared across every function
/// under `root`. Trigger order follows directory order and is not contract
/// significant.
pub fn scaling_triggers(root: &Path) -> Result<Vec<ScaledObjectTrigger>, ScanError> {
    Ok(scan(root)?
        .flat_map(|(_, descriptor)| descriptor.scaling_triggers().collect::<Vec<_>>())
        .collect())
}

/// Whether the single function in `function_dir` declares an HTTP trigger.
/// Unlike [`scan`], a missing or broken descriptor here is an error: the
/// serverless path has nothing to deploy without it.
pub fn has_http_trigger(function_dir: &Path) -> Result<bool, ScanError> {
    let file = function_dir.join(DESCRIPTOR_FILE);
    let content = fs::read_to_string(&file).map_err(|source| ScanError::ReadDescriptor {
        path: file.clone(),
        source,
    })?;
    let descriptor: FunctionDescriptor =
        serde_json::from_str(&content).map_err(|source| ScanError::ParseDescriptor {
            path: file,
            source,
        })?;
    Ok(descriptor.has_http_trigger())
}

#[cfg(test)]
mod test {

    use std::collections::HashSet;
    use std::path::Path;

    use super::{has_http_trigger, scaling_triggers, scan};

    #[test]
    fn test_scan_skips_broken_and_bare_directories() {
        let functions: Vec<_> = scan(Path::new("data")).expect("scan").collect();
        let names: HashSet<_> = functions.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(
            names,
            HashSet::from(["http-echo", "queue-worker", "timer-cleanup"])
        );
    }

    #[test]
    fn test_scan_missing_root_fails() {
        assert!(scan(Path::new("data/does-not-exist")).is_err());
    }

    #[test]
    fn test_triggers_across_functions() {
        let triggers = scaling_triggers(Path::new("data")).expect("triggers");

        // one per trigger binding; the plain http output binding is excluded
        assert_eq!(triggers.len(), 3);

        let types: HashSet<_> = triggers.iter().map(|t| t.ty.as_str()).collect();
        assert_eq!(
            types,
            HashSet::from(["azure-queue", "httpTrigger", "timerTrigger"])
        );

        let queue = triggers.iter().find(|t| t.ty == "azure-queue").unwrap();
        assert_eq!(queue.metadata.get("queueName").unwrap(), "orders");
        assert_eq!(queue.metadata.get("connection").unwrap(), "AzureWebJobsStorage");
    }

    #[test]
    fn test_http_check() {
        assert!(has_http_trigger(Path::new("data/http-echo")).expect("check"));
        assert!(!has_http_trigger(Path::new("data/queue-worker")).expect("check"));
        assert!(has_http_trigger(Path::new("data/broken")).is_err());
        assert!(has_http_trigger(Path::new("data/missing")).is_err());
    }
}
