//! Deployment contract for the containerized hello-world Lambda.
//!
//! This crate owns the pure pieces of the deployment pipeline: the
//! resolved configuration, the derived image reference, and the record
//! types the mode handlers return. It performs no AWS or docker calls;
//! integration lives in `crates/lambda_deploy_aws`.

pub mod config;
pub mod contract;
pub mod image;
