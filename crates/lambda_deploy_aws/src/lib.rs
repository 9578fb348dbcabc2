//! AWS and docker integration for the hello-world Lambda deployment
//! pipeline.
//!
//! This crate owns the external boundaries (control-plane client,
//! container tooling) behind the `ProvisioningApi` and `ImageBuilder`
//! traits, and the mode handlers (provision, deploy, teardown, invoke)
//! that orchestrate them. The handlers are synchronous and depend only
//! on the traits, so every policy decision is exercised against fakes
//! in the unit tests.

pub mod adapters;
pub mod handlers;

mod log;
