//!
//! # API location constants
//!
//! Fixed group/version/kind coordinates for every object kind the engine
//! produces or reads back.
//!
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Api {
    pub group: &'static str,
    pub version: &'static str,
    pub names: ApiNames,
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ApiNames {
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
}

impl Api {
    pub fn api_version(&self) -> String {
        if self.group == "core" {
            return self.version.to_owned();
        }
        format!("{}/{}", self.group, self.version)
    }
}

/// A manifest kind with a fixed location in the API surface.
pub trait Resource {
    fn api() -> &'static Api;

    fn api_version() -> String {
        Self::api().api_version()
    }

    fn kind() -> String {
        Self::api().names.kind.to_owned()
    }

    /// singular name, the form `delete` targets take
    fn singular() -> &'static str {
        Self::api().names.singular
    }
}

#[cfg(test)]
mod test {

    use super::{Api, ApiNames};

    #[test]
    fn test_core_api_version_has_no_group() {
        let api = Api {
            group: "core",
            version: "v1",
            names: ApiNames {
                kind: "Secret",
                plural: "secrets",
                singular: "secret",
            },
        };
        assert_eq!(api.api_version(), "v1");
    }

    #[test]
    fn test_grouped_api_version() {
        let api = Api {
            group: "kore.k8s.io",
            version: "v1alpha1",
            names: ApiNames {
                kind: "ScaledObject",
                plural: "scaledobjects",
                singular: "scaledobject",
            },
        };
        assert_eq!(api.api_version(), "kore.k8s.io/v1alpha1");
    }
}
