//! `ProvisioningApi` implementation over the AWS SDK clients.
//!
//! All expected-condition classification lives here: SDK service errors
//! are matched by type (`NoSuchEntity`, `RepositoryAlreadyExists`,
//! `ResourceConflict`) and translated into `Option`/`Created` values so
//! the handlers never see raw control-plane errors.

use std::future::Future;

use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, PackageType};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lambda_deploy_core::contract::{Created, ExecutionIdentity, InvokeOutcome, RegistryAuth};

use crate::adapters::provisioning::{ProvisionError, ProvisioningApi};

pub struct AwsProvisioningApi {
    iam: aws_sdk_iam::Client,
    ecr: aws_sdk_ecr::Client,
    lambda: aws_sdk_lambda::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsProvisioningApi {
    /// Builds the SDK clients for the configured region and shared
    /// credentials profile.
    pub async fn connect(region: &str, profile: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .profile_name(profile)
            .load()
            .await;

        Self {
            iam: aws_sdk_iam::Client::new(&config),
            ecr: aws_sdk_ecr::Client::new(&config),
            lambda: aws_sdk_lambda::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
        }
    }
}

/// The handlers are synchronous; bridge each SDK call onto the ambient
/// multi-thread runtime.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

impl ProvisioningApi for AwsProvisioningApi {
    fn get_identity(&self, name: &str) -> Result<Option<ExecutionIdentity>, ProvisionError> {
        let result = block_on(self.iam.get_role().role_name(name).send());
        match result {
            Ok(output) => {
                let role = output
                    .role()
                    .ok_or_else(|| ProvisionError::new("get_identity", "response missing role"))?;
                Ok(Some(ExecutionIdentity {
                    arn: role.arn().to_string(),
                }))
            }
            Err(error) => {
                let service_error = error.into_service_error();
                if service_error.is_no_such_entity_exception() {
                    Ok(None)
                } else {
                    Err(ProvisionError::new("get_identity", service_error.to_string()))
                }
            }
        }
    }

    fn create_identity(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> Result<ExecutionIdentity, ProvisionError> {
        let output = block_on(
            self.iam
                .create_role()
                .role_name(name)
                .assume_role_policy_document(trust_policy)
                .send(),
        )
        .map_err(|error| {
            ProvisionError::new("create_identity", error.into_service_error().to_string())
        })?;

        let role = output
            .role()
            .ok_or_else(|| ProvisionError::new("create_identity", "response missing role"))?;
        Ok(ExecutionIdentity {
            arn: role.arn().to_string(),
        })
    }

    fn attach_policy(&self, name: &str, policy_arn: &str) -> Result<(), ProvisionError> {
        block_on(
            self.iam
                .attach_role_policy()
                .role_name(name)
                .policy_arn(policy_arn)
                .send(),
        )
        .map(|_| ())
        .map_err(|error| {
            ProvisionError::new("attach_policy", error.into_service_error().to_string())
        })
    }

    fn create_repository(&self, name: &str) -> Result<Created, ProvisionError> {
        let result = block_on(self.ecr.create_repository().repository_name(name).send());
        match result {
            Ok(_) => Ok(Created::New),
            Err(error) => {
                let service_error = error.into_service_error();
                if service_error.is_repository_already_exists_exception() {
                    Ok(Created::AlreadyExists)
                } else {
                    Err(ProvisionError::new(
                        "create_repository",
                        service_error.to_string(),
                    ))
                }
            }
        }
    }

    fn delete_repository(&self, name: &str) -> Result<(), ProvisionError> {
        block_on(
            self.ecr
                .delete_repository()
                .repository_name(name)
                .force(true)
                .send(),
        )
        .map(|_| ())
        .map_err(|error| {
            ProvisionError::new("delete_repository", error.into_service_error().to_string())
        })
    }

    fn create_function(
        &self,
        name: &str,
        role_arn: &str,
        image_uri: &str,
    ) -> Result<Created, ProvisionError> {
        let code = FunctionCode::builder().image_uri(image_uri).build();
        let result = block_on(
            self.lambda
                .create_function()
                .function_name(name)
                .package_type(PackageType::Image)
                .code(code)
                .role(role_arn)
                .send(),
        );
        match result {
            Ok(_) => Ok(Created::New),
            Err(error) => {
                let service_error = error.into_service_error();
                if service_error.is_resource_conflict_exception() {
                    Ok(Created::AlreadyExists)
                } else {
                    Err(ProvisionError::new(
                        "create_function",
                        service_error.to_string(),
                    ))
                }
            }
        }
    }

    fn update_function_code(&self, name: &str, image_uri: &str) -> Result<(), ProvisionError> {
        block_on(
            self.lambda
                .update_function_code()
                .function_name(name)
                .image_uri(image_uri)
                .send(),
        )
        .map(|_| ())
        .map_err(|error| {
            ProvisionError::new(
                "update_function_code",
                error.into_service_error().to_string(),
            )
        })
    }

    fn delete_function(&self, name: &str) -> Result<(), ProvisionError> {
        block_on(self.lambda.delete_function().function_name(name).send())
            .map(|_| ())
            .map_err(|error| {
                ProvisionError::new("delete_function", error.into_service_error().to_string())
            })
    }

    fn caller_account_id(&self) -> Result<String, ProvisionError> {
        let output = block_on(self.sts.get_caller_identity().send()).map_err(|error| {
            ProvisionError::new("caller_account_id", error.into_service_error().to_string())
        })?;

        output
            .account()
            .map(str::to_string)
            .ok_or_else(|| ProvisionError::new("caller_account_id", "response missing account id"))
    }

    fn registry_auth(&self) -> Result<RegistryAuth, ProvisionError> {
        let output = block_on(self.ecr.get_authorization_token().send()).map_err(|error| {
            ProvisionError::new("registry_auth", error.into_service_error().to_string())
        })?;

        let data = output
            .authorization_data()
            .first()
            .ok_or_else(|| ProvisionError::new("registry_auth", "no authorization data returned"))?;
        let token = data
            .authorization_token()
            .ok_or_else(|| ProvisionError::new("registry_auth", "authorization token missing"))?;
        let endpoint = data
            .proxy_endpoint()
            .ok_or_else(|| ProvisionError::new("registry_auth", "proxy endpoint missing"))?;

        decode_authorization_token(token, endpoint)
    }

    fn invoke_function(&self, name: &str, payload: &[u8]) -> Result<InvokeOutcome, ProvisionError> {
        let output = block_on(
            self.lambda
                .invoke()
                .function_name(name)
                .payload(Blob::new(payload.to_vec()))
                .send(),
        )
        .map_err(|error| {
            ProvisionError::new("invoke_function", error.into_service_error().to_string())
        })?;

        Ok(InvokeOutcome {
            payload: output
                .payload()
                .map(|blob| blob.clone().into_inner())
                .unwrap_or_default(),
            function_error: output.function_error().map(str::to_string),
        })
    }
}

/// The ECR token is base64 over `username:password`; the docker login
/// endpoint is the proxy endpoint without its scheme.
fn decode_authorization_token(token: &str, endpoint: &str) -> Result<RegistryAuth, ProvisionError> {
    let decoded = BASE64
        .decode(token)
        .map_err(|error| ProvisionError::new("registry_auth", format!("invalid token: {error}")))?;
    let decoded = String::from_utf8(decoded).map_err(|error| {
        ProvisionError::new("registry_auth", format!("invalid token encoding: {error}"))
    })?;
    let (username, password) = decoded.split_once(':').ok_or_else(|| {
        ProvisionError::new("registry_auth", "token is not in username:password form")
    })?;

    let registry_host = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .unwrap_or(endpoint);

    Ok(RegistryAuth {
        registry_host: registry_host.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    })
}
