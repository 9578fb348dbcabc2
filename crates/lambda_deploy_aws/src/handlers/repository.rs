//! Idempotent image repository creation.

use lambda_deploy_core::contract::Created;
use serde_json::json;

use crate::adapters::provisioning::{ProvisionError, ProvisioningApi};
use crate::log::{log_info, log_warn};

/// Named fatality policy for repository creation. Provision requires the
/// repository and aborts on unexpected failure; Deploy only re-confirms
/// a repository that a prior Provision created, so there a failure is
/// logged and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryPolicy {
    Required,
    BestEffort,
}

pub fn ensure_repository(
    api: &impl ProvisioningApi,
    name: &str,
    policy: RepositoryPolicy,
) -> Result<(), ProvisionError> {
    match api.create_repository(name) {
        Ok(Created::New) => {
            log_info("repository", "repository_created", json!({"name": name}));
            Ok(())
        }
        Ok(Created::AlreadyExists) => {
            log_info(
                "repository",
                "repository_already_exists",
                json!({"name": name}),
            );
            Ok(())
        }
        Err(error) => match policy {
            RepositoryPolicy::Required => Err(error),
            RepositoryPolicy::BestEffort => {
                log_warn(
                    "repository",
                    "repository_create_failed",
                    json!({"name": name, "error": error.to_string()}),
                );
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::fakes::FakeApi;

    #[test]
    fn already_exists_is_success() {
        let api = FakeApi::new().with_repository_response(Ok(Created::AlreadyExists));
        ensure_repository(&api, "hello-world-repo", RepositoryPolicy::Required)
            .expect("already-exists should classify as success");
    }

    #[test]
    fn required_policy_propagates_unexpected_failure() {
        let api = FakeApi::new().with_repository_response(Err(ProvisionError::new(
            "create_repository",
            "limit exceeded",
        )));
        let error = ensure_repository(&api, "hello-world-repo", RepositoryPolicy::Required)
            .expect_err("required policy should abort");
        assert_eq!(error.operation(), "create_repository");
    }

    #[test]
    fn best_effort_policy_swallows_unexpected_failure() {
        let api = FakeApi::new().with_repository_response(Err(ProvisionError::new(
            "create_repository",
            "limit exceeded",
        )));
        ensure_repository(&api, "hello-world-repo", RepositoryPolicy::BestEffort)
            .expect("best-effort policy should continue");
    }
}
