//! Derivation of the fully qualified registry reference for the
//! published container image.

/// Every push uses the same mutable tag; redeploys overwrite it.
pub const IMAGE_TAG: &str = "latest";

const REGISTRY_SERVICE: &str = "dkr.ecr";
const REGISTRY_DOMAIN: &str = "amazonaws.com";

/// Fully qualified registry/repository/tag triple. Recomputed from the
/// configuration and caller account every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry_host: String,
    pub repository_name: String,
    pub tag: String,
}

impl ImageReference {
    pub fn derive(account_id: &str, region: &str, repository_name: &str) -> Self {
        Self {
            registry_host: format!("{account_id}.{REGISTRY_SERVICE}.{region}.{REGISTRY_DOMAIN}"),
            repository_name: repository_name.to_string(),
            tag: IMAGE_TAG.to_string(),
        }
    }

    /// Remote-addressable tag: `{host}/{repository}:{tag}`.
    pub fn uri(&self) -> String {
        format!("{}/{}:{}", self.registry_host, self.repository_name, self.tag)
    }

    /// Tag applied to the image built from the local context, before it
    /// is retagged under the remote registry host.
    pub fn local_tag(repository_name: &str, function_name: &str) -> String {
        format!("{repository_name}/{function_name}:{IMAGE_TAG}")
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri())
    }
}
