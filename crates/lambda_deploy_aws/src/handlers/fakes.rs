//! Scriptable in-memory stand-ins for the external boundaries, used by
//! the handler tests. Every call is recorded so tests can assert on
//! exactly which side effects a run issued.

use std::path::Path;
use std::sync::Mutex;

use lambda_deploy_core::contract::{Created, ExecutionIdentity, InvokeOutcome, RegistryAuth};

use crate::adapters::image_builder::{ImageBuilder, PipelineStep};
use crate::adapters::provisioning::{ProvisionError, ProvisioningApi};

pub(crate) struct FakeApi {
    calls: Mutex<Vec<String>>,
    identity: Mutex<Option<ExecutionIdentity>>,
    get_identity_error: Option<ProvisionError>,
    repository_response: Result<Created, ProvisionError>,
    create_function_response: Result<Created, ProvisionError>,
    update_function_response: Result<(), ProvisionError>,
    delete_function_response: Result<(), ProvisionError>,
    delete_repository_response: Result<(), ProvisionError>,
    invoke_response: Result<InvokeOutcome, ProvisionError>,
    account_id: String,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            identity: Mutex::new(None),
            get_identity_error: None,
            repository_response: Ok(Created::New),
            create_function_response: Ok(Created::New),
            update_function_response: Ok(()),
            delete_function_response: Ok(()),
            delete_repository_response: Ok(()),
            invoke_response: Ok(InvokeOutcome {
                payload: b"\"Hello, World!\"".to_vec(),
                function_error: None,
            }),
            account_id: "123456789012".to_string(),
        }
    }

    pub(crate) fn with_existing_identity(self, arn: &str) -> Self {
        *self.identity.lock().expect("poisoned mutex") = Some(ExecutionIdentity {
            arn: arn.to_string(),
        });
        self
    }

    pub(crate) fn with_get_identity_error(mut self, error: ProvisionError) -> Self {
        self.get_identity_error = Some(error);
        self
    }

    pub(crate) fn with_repository_response(
        mut self,
        response: Result<Created, ProvisionError>,
    ) -> Self {
        self.repository_response = response;
        self
    }

    pub(crate) fn with_create_function_response(
        mut self,
        response: Result<Created, ProvisionError>,
    ) -> Self {
        self.create_function_response = response;
        self
    }

    pub(crate) fn with_update_function_response(
        mut self,
        response: Result<(), ProvisionError>,
    ) -> Self {
        self.update_function_response = response;
        self
    }

    pub(crate) fn with_delete_function_response(
        mut self,
        response: Result<(), ProvisionError>,
    ) -> Self {
        self.delete_function_response = response;
        self
    }

    pub(crate) fn with_delete_repository_response(
        mut self,
        response: Result<(), ProvisionError>,
    ) -> Self {
        self.delete_repository_response = response;
        self
    }

    pub(crate) fn with_invoke_response(
        mut self,
        response: Result<InvokeOutcome, ProvisionError>,
    ) -> Self {
        self.invoke_response = response;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub(crate) fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(operation))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("poisoned mutex").push(call.into());
    }
}

impl ProvisioningApi for FakeApi {
    fn get_identity(&self, name: &str) -> Result<Option<ExecutionIdentity>, ProvisionError> {
        self.record(format!("get_identity {name}"));
        if let Some(error) = &self.get_identity_error {
            return Err(error.clone());
        }
        Ok(self.identity.lock().expect("poisoned mutex").clone())
    }

    fn create_identity(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> Result<ExecutionIdentity, ProvisionError> {
        self.record(format!("create_identity {name} {trust_policy}"));
        let identity = ExecutionIdentity {
            arn: format!("arn:aws:iam::{}:role/{name}", self.account_id),
        };
        *self.identity.lock().expect("poisoned mutex") = Some(identity.clone());
        Ok(identity)
    }

    fn attach_policy(&self, name: &str, policy_arn: &str) -> Result<(), ProvisionError> {
        self.record(format!("attach_policy {name} {policy_arn}"));
        Ok(())
    }

    fn create_repository(&self, name: &str) -> Result<Created, ProvisionError> {
        self.record(format!("create_repository {name}"));
        self.repository_response.clone()
    }

    fn delete_repository(&self, name: &str) -> Result<(), ProvisionError> {
        self.record(format!("delete_repository {name}"));
        self.delete_repository_response.clone()
    }

    fn create_function(
        &self,
        name: &str,
        role_arn: &str,
        image_uri: &str,
    ) -> Result<Created, ProvisionError> {
        self.record(format!("create_function {name} {role_arn} {image_uri}"));
        self.create_function_response.clone()
    }

    fn update_function_code(&self, name: &str, image_uri: &str) -> Result<(), ProvisionError> {
        self.record(format!("update_function_code {name} {image_uri}"));
        self.update_function_response.clone()
    }

    fn delete_function(&self, name: &str) -> Result<(), ProvisionError> {
        self.record(format!("delete_function {name}"));
        self.delete_function_response.clone()
    }

    fn caller_account_id(&self) -> Result<String, ProvisionError> {
        self.record("caller_account_id");
        Ok(self.account_id.clone())
    }

    fn registry_auth(&self) -> Result<RegistryAuth, ProvisionError> {
        self.record("registry_auth");
        Ok(RegistryAuth {
            registry_host: format!("{}.dkr.ecr.us-west-2.amazonaws.com", self.account_id),
            username: "AWS".to_string(),
            password: "registry-token".to_string(),
        })
    }

    fn invoke_function(&self, name: &str, payload: &[u8]) -> Result<InvokeOutcome, ProvisionError> {
        self.record(format!(
            "invoke_function {name} {}",
            String::from_utf8_lossy(payload)
        ));
        self.invoke_response.clone()
    }
}

pub(crate) struct FakeBuilder {
    calls: Mutex<Vec<String>>,
    fail_step: Option<PipelineStep>,
}

impl FakeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_step: None,
        }
    }

    pub(crate) fn failing_at(step: PipelineStep) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_step: Some(step),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn step(&self, step: PipelineStep, call: String) -> Result<(), String> {
        self.calls.lock().expect("poisoned mutex").push(call);
        if self.fail_step == Some(step) {
            Err(format!("injected {} failure", step.name()))
        } else {
            Ok(())
        }
    }
}

impl ImageBuilder for FakeBuilder {
    fn login(&self, registry_host: &str, username: &str, _password: &str) -> Result<(), String> {
        self.step(
            PipelineStep::Auth,
            format!("login {registry_host} {username}"),
        )
    }

    fn build(&self, context_dir: &Path, tag: &str) -> Result<(), String> {
        self.step(
            PipelineStep::Build,
            format!("build {} {tag}", context_dir.display()),
        )
    }

    fn tag(&self, source: &str, dest: &str) -> Result<(), String> {
        self.step(PipelineStep::Tag, format!("tag {source} {dest}"))
    }

    fn push(&self, tag: &str) -> Result<(), String> {
        self.step(PipelineStep::Push, format!("push {tag}"))
    }
}
