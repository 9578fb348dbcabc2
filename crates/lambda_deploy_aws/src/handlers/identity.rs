//! Ensures the function's execution role exists before anything
//! references its ARN.

use lambda_deploy_core::contract::ExecutionIdentity;
use serde_json::json;

use crate::adapters::provisioning::{
    ProvisionError, ProvisioningApi, BASIC_EXECUTION_POLICY_ARN, LAMBDA_TRUST_POLICY,
};
use crate::log::log_info;

/// Looks the role up by name and creates it (with the fixed trust
/// policy and the basic execution managed policy) only when the lookup
/// classifies as not-found. Re-running against existing state issues no
/// create call.
pub fn ensure_execution_identity(
    api: &impl ProvisioningApi,
    role_name: &str,
) -> Result<ExecutionIdentity, ProvisionError> {
    if let Some(identity) = api.get_identity(role_name)? {
        log_info(
            "identity",
            "execution_identity_reused",
            json!({"role_name": role_name, "arn": identity.arn}),
        );
        return Ok(identity);
    }

    let identity = api.create_identity(role_name, LAMBDA_TRUST_POLICY)?;
    api.attach_policy(role_name, BASIC_EXECUTION_POLICY_ARN)?;
    log_info(
        "identity",
        "execution_identity_created",
        json!({"role_name": role_name, "arn": identity.arn}),
    );
    Ok(identity)
}
