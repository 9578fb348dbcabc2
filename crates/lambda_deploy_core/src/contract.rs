//! Record types shared between the mode handlers and their callers.

/// IAM role the deployed function assumes at runtime. Only the ARN is
/// ever consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionIdentity {
    pub arn: String,
}

/// Outcome of an idempotent create call, classified once at the
/// control-plane boundary. `AlreadyExists` is success, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    New,
    AlreadyExists,
}

/// Registry credential resolved from the control plane, ready for a
/// `docker login` against `registry_host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAuth {
    pub registry_host: String,
    pub username: String,
    pub password: String,
}

/// Response of a synchronous function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeOutcome {
    pub payload: Vec<u8>,
    pub function_error: Option<String>,
}

/// Per-resource results of a confirmed teardown. `None` means the
/// deletion succeeded; `Some` carries the failure message. Both
/// deletions are best-effort, so a populated error never aborts the
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub function_error: Option<String>,
    pub repository_error: Option<String>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.function_error.is_none() && self.repository_error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// The user declined; no deletion call was issued.
    Cancelled,
    /// Both deletions were attempted, successfully or not.
    Completed(TeardownReport),
}
