//! Typed boundary to the local container tooling.

use std::path::Path;

/// The four ordered sub-steps of the image pipeline. Each failure keeps
/// its step so diagnostics can name what broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Auth,
    Build,
    Tag,
    Push,
}

impl PipelineStep {
    pub fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Build => "build",
            Self::Tag => "tag",
            Self::Push => "push",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    step: PipelineStep,
    message: String,
}

impl PipelineError {
    pub fn new(step: PipelineStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }

    pub fn step(&self) -> PipelineStep {
        self.step
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "image {} failed: {}", self.step.name(), self.message)
    }
}

impl std::error::Error for PipelineError {}

pub trait ImageBuilder {
    fn login(&self, registry_host: &str, username: &str, password: &str) -> Result<(), String>;

    fn build(&self, context_dir: &Path, tag: &str) -> Result<(), String>;

    fn tag(&self, source: &str, dest: &str) -> Result<(), String>;

    fn push(&self, tag: &str) -> Result<(), String>;
}
