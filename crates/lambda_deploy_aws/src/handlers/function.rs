//! Create-or-update of the remote function's container image code.

use lambda_deploy_core::contract::{Created, ExecutionIdentity};
use lambda_deploy_core::image::ImageReference;
use serde_json::json;

use crate::adapters::provisioning::{ProvisionError, ProvisioningApi};
use crate::log::log_info;

/// First-run creation with package type "container image". An
/// already-existing function classifies as success; the function keeps
/// whatever image it was created with until the next deploy updates it.
pub fn create_function(
    api: &impl ProvisioningApi,
    name: &str,
    identity: &ExecutionIdentity,
    image: &ImageReference,
) -> Result<(), ProvisionError> {
    match api.create_function(name, &identity.arn, &image.uri())? {
        Created::New => {
            log_info(
                "function",
                "function_created",
                json!({"name": name, "image_uri": image.uri()}),
            );
        }
        Created::AlreadyExists => {
            log_info("function", "function_already_exists", json!({"name": name}));
        }
    }
    Ok(())
}

/// Points the function's code at the freshly pushed image. Any failure
/// is fatal; the function stays on its previous image.
pub fn update_function_code(
    api: &impl ProvisioningApi,
    name: &str,
    image: &ImageReference,
) -> Result<(), ProvisionError> {
    api.update_function_code(name, &image.uri())?;
    log_info(
        "function",
        "function_code_updated",
        json!({"name": name, "image_uri": image.uri()}),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::fakes::FakeApi;

    fn image() -> ImageReference {
        ImageReference::derive("123456789012", "us-west-2", "hello-world-repo")
    }

    fn identity() -> ExecutionIdentity {
        ExecutionIdentity {
            arn: "arn:aws:iam::123456789012:role/hello-world-lambda-role".to_string(),
        }
    }

    #[test]
    fn create_twice_succeeds_both_times() {
        let api = FakeApi::new();
        create_function(&api, "hello-world-lambda", &identity(), &image())
            .expect("first create should succeed");

        let api_second = FakeApi::new().with_create_function_response(Ok(Created::AlreadyExists));
        create_function(&api_second, "hello-world-lambda", &identity(), &image())
            .expect("second create should classify as success");
        assert_eq!(api_second.call_count("create_function"), 1);
    }

    #[test]
    fn create_passes_role_and_image_uri() {
        let api = FakeApi::new();
        create_function(&api, "hello-world-lambda", &identity(), &image())
            .expect("create should succeed");

        let calls = api.calls();
        assert_eq!(
            calls[0],
            "create_function hello-world-lambda arn:aws:iam::123456789012:role/hello-world-lambda-role 123456789012.dkr.ecr.us-west-2.amazonaws.com/hello-world-repo:latest"
        );
    }

    #[test]
    fn unexpected_create_failure_is_fatal() {
        let api = FakeApi::new().with_create_function_response(Err(ProvisionError::new(
            "create_function",
            "invalid role",
        )));
        let error = create_function(&api, "hello-world-lambda", &identity(), &image())
            .expect_err("unexpected failure should propagate");
        assert_eq!(error.operation(), "create_function");
    }

    #[test]
    fn update_failure_is_fatal() {
        let api = FakeApi::new().with_update_function_response(Err(ProvisionError::new(
            "update_function_code",
            "function not found",
        )));
        let error = update_function_code(&api, "hello-world-lambda", &image())
            .expect_err("update failure should propagate");
        assert_eq!(error.operation(), "update_function_code");
    }
}
