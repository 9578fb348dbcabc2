//! Best-effort deletion of the function and its image repository.

use lambda_deploy_core::config::DeployConfig;
use lambda_deploy_core::contract::{TeardownOutcome, TeardownReport};
use serde_json::json;

use crate::adapters::provisioning::ProvisioningApi;
use crate::log::{log_error, log_info};

/// Only a bare "y" (case-insensitive, surrounding whitespace ignored)
/// confirms the teardown.
pub fn confirmation_accepted(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// With `confirmed` false, returns `Cancelled` without issuing a single
/// deletion call. Otherwise both deletions are attempted independently;
/// a failure of one never prevents the other, and neither aborts the
/// run.
pub fn run_teardown(
    api: &impl ProvisioningApi,
    config: &DeployConfig,
    confirmed: bool,
) -> TeardownOutcome {
    if !confirmed {
        log_info("teardown", "teardown_cancelled", json!({}));
        return TeardownOutcome::Cancelled;
    }

    let mut report = TeardownReport::default();

    match api.delete_function(&config.function_name) {
        Ok(()) => log_info(
            "teardown",
            "function_deleted",
            json!({"name": config.function_name}),
        ),
        Err(error) => {
            log_error(
                "teardown",
                "function_delete_failed",
                json!({"name": config.function_name, "error": error.to_string()}),
            );
            report.function_error = Some(error.to_string());
        }
    }

    match api.delete_repository(&config.repository_name) {
        Ok(()) => log_info(
            "teardown",
            "repository_deleted",
            json!({"name": config.repository_name}),
        ),
        Err(error) => {
            log_error(
                "teardown",
                "repository_delete_failed",
                json!({"name": config.repository_name, "error": error.to_string()}),
            );
            report.repository_error = Some(error.to_string());
        }
    }

    TeardownOutcome::Completed(report)
}
