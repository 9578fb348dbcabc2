//! Typed boundary to the remote control plane.
//!
//! Expected conditions are not errors here: a missing role surfaces as
//! `Ok(None)` from `get_identity`, and an idempotent re-create surfaces
//! as `Created::AlreadyExists`. The classification happens exactly once,
//! inside the implementation; handlers never inspect error text.

use lambda_deploy_core::contract::{Created, ExecutionIdentity, InvokeOutcome, RegistryAuth};

/// Trust policy granting the Lambda service permission to assume the
/// execution role.
pub const LAMBDA_TRUST_POLICY: &str = r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"Service":"lambda.amazonaws.com"},"Action":"sts:AssumeRole"}]}"#;

/// The single managed policy attached to a freshly created role.
pub const BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Unexpected control-plane failure. Fatal to the current run except in
/// teardown, where deletions are best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionError {
    operation: String,
    message: String,
}

impl ProvisionError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

impl std::error::Error for ProvisionError {}

pub trait ProvisioningApi {
    /// Looks up the execution role by name. `Ok(None)` means the role
    /// does not exist and a create should follow.
    fn get_identity(&self, name: &str) -> Result<Option<ExecutionIdentity>, ProvisionError>;

    fn create_identity(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> Result<ExecutionIdentity, ProvisionError>;

    fn attach_policy(&self, name: &str, policy_arn: &str) -> Result<(), ProvisionError>;

    fn create_repository(&self, name: &str) -> Result<Created, ProvisionError>;

    /// Force-deletes: the repository goes away even when it still holds
    /// images.
    fn delete_repository(&self, name: &str) -> Result<(), ProvisionError>;

    fn create_function(
        &self,
        name: &str,
        role_arn: &str,
        image_uri: &str,
    ) -> Result<Created, ProvisionError>;

    fn update_function_code(&self, name: &str, image_uri: &str) -> Result<(), ProvisionError>;

    fn delete_function(&self, name: &str) -> Result<(), ProvisionError>;

    fn caller_account_id(&self) -> Result<String, ProvisionError>;

    fn registry_auth(&self) -> Result<RegistryAuth, ProvisionError>;

    fn invoke_function(&self, name: &str, payload: &[u8]) -> Result<InvokeOutcome, ProvisionError>;
}
