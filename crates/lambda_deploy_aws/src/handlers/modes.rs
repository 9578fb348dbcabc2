//! The three top-level run modes plus the invocation entry point.
//!
//! Each mode is a single sequential pass; every step gates the next on
//! success, with the repository re-confirmation on deploy being the one
//! deliberate best-effort exception.

use std::path::Path;

use lambda_deploy_core::config::DeployConfig;
use lambda_deploy_core::contract::InvokeOutcome;
use serde_json::json;

use crate::adapters::image_builder::{ImageBuilder, PipelineError};
use crate::adapters::provisioning::{ProvisionError, ProvisioningApi};
use crate::handlers::function::{create_function, update_function_code};
use crate::handlers::identity::ensure_execution_identity;
use crate::handlers::pipeline::build_tag_push;
use crate::handlers::repository::{ensure_repository, RepositoryPolicy};

/// Fatal outcome of a provision or deploy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    Provision(ProvisionError),
    Pipeline(PipelineError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provision(error) => error.fmt(f),
            Self::Pipeline(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ProvisionError> for RunError {
    fn from(error: ProvisionError) -> Self {
        Self::Provision(error)
    }
}

impl From<PipelineError> for RunError {
    fn from(error: PipelineError) -> Self {
        Self::Pipeline(error)
    }
}

/// First-time setup: identity, repository, image, function create.
pub fn run_provision(
    api: &impl ProvisioningApi,
    builder: &impl ImageBuilder,
    config: &DeployConfig,
    context_dir: &Path,
) -> Result<(), RunError> {
    let identity = ensure_execution_identity(api, &config.role_name)?;
    ensure_repository(api, &config.repository_name, RepositoryPolicy::Required)?;
    let account_id = api.caller_account_id()?;
    let image = build_tag_push(api, builder, config, &account_id, context_dir)?;
    create_function(api, &config.function_name, &identity, &image)?;
    Ok(())
}

/// Subsequent deploys: rebuild and republish the image, then point the
/// existing function at it. Presupposes a prior provision; resolving
/// the caller account up front doubles as the credential preflight.
pub fn run_deploy(
    api: &impl ProvisioningApi,
    builder: &impl ImageBuilder,
    config: &DeployConfig,
    context_dir: &Path,
) -> Result<(), RunError> {
    let account_id = api.caller_account_id()?;
    ensure_repository(api, &config.repository_name, RepositoryPolicy::BestEffort)?;
    let image = build_tag_push(api, builder, config, &account_id, context_dir)?;
    update_function_code(api, &config.function_name, &image)?;
    Ok(())
}

/// Invokes the deployed function with `{"name": ...}` and returns the
/// raw outcome; the caller decides how to render payload and
/// function-error.
pub fn run_invoke(
    api: &impl ProvisioningApi,
    config: &DeployConfig,
    name: &str,
) -> Result<InvokeOutcome, RunError> {
    let payload =
        serde_json::to_vec(&json!({ "name": name })).expect("invoke payload should serialize");
    let outcome = api.invoke_function(&config.function_name, &payload)?;
    Ok(outcome)
}
