use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_FUNCTION_NAME: &str = "hello-world-lambda";
pub const DEFAULT_ROLE_NAME: &str = "hello-world-lambda-role";
pub const DEFAULT_REPOSITORY_NAME: &str = "hello-world-repo";

/// Resolved deployment configuration. Loaded once at startup and passed
/// by reference into every handler; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub region: String,
    pub profile: String,
    pub function_name: String,
    pub repository_name: String,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

/// On-disk document shape (`config.yaml`). Sections mirror the services
/// they configure; fields absent from the document fall back to the
/// built-in constants before validation.
#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    aws: AwsSection,
    #[serde(default)]
    lambda: LambdaSection,
    #[serde(default)]
    ecr: EcrSection,
}

#[derive(Debug, Default, Deserialize)]
struct AwsSection {
    region: Option<String>,
    profile: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LambdaSection {
    function_name: Option<String>,
    role_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EcrSection {
    repository_name: Option<String>,
}

impl DeployConfig {
    /// Loads configuration from `path`, or returns the built-in
    /// defaults when no path is given. Fails on an unreadable or
    /// unparsable file, and on any field resolving to an empty string.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            None => Self::builtin(),
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|error| {
                    ConfigError::new(format!(
                        "error reading config file '{}': {error}",
                        path.display()
                    ))
                })?;
                let document: ConfigDocument = serde_yaml::from_str(&raw).map_err(|error| {
                    ConfigError::new(format!(
                        "error parsing config file '{}': {error}",
                        path.display()
                    ))
                })?;
                Self::from_document(document)
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn builtin() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            repository_name: DEFAULT_REPOSITORY_NAME.to_string(),
            role_name: DEFAULT_ROLE_NAME.to_string(),
        }
    }

    fn from_document(document: ConfigDocument) -> Self {
        Self {
            region: document.aws.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            profile: document
                .aws
                .profile
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            function_name: document
                .lambda
                .function_name
                .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string()),
            repository_name: document
                .ecr
                .repository_name
                .unwrap_or_else(|| DEFAULT_REPOSITORY_NAME.to_string()),
            role_name: document
                .lambda
                .role_name
                .unwrap_or_else(|| DEFAULT_ROLE_NAME.to_string()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("aws.region", &self.region),
            ("aws.profile", &self.profile),
            ("lambda.function_name", &self.function_name),
            ("lambda.role_name", &self.role_name),
            ("ecr.repository_name", &self.repository_name),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::new(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
