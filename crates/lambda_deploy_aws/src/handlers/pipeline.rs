//! The authenticate → build → tag → push image pipeline.

use std::path::Path;

use lambda_deploy_core::config::DeployConfig;
use lambda_deploy_core::image::ImageReference;
use serde_json::json;

use crate::adapters::image_builder::{ImageBuilder, PipelineError, PipelineStep};
use crate::adapters::provisioning::ProvisioningApi;
use crate::log::log_info;

/// Runs the four sub-steps strictly in order; the first failure aborts
/// and no later step is attempted. Each step consumes the artifact of
/// the previous one: credential, local image, remote-addressable tag,
/// uploaded blob.
pub fn build_tag_push(
    api: &impl ProvisioningApi,
    builder: &impl ImageBuilder,
    config: &DeployConfig,
    account_id: &str,
    context_dir: &Path,
) -> Result<ImageReference, PipelineError> {
    let auth = api
        .registry_auth()
        .map_err(|error| PipelineError::new(PipelineStep::Auth, error.to_string()))?;
    builder
        .login(&auth.registry_host, &auth.username, &auth.password)
        .map_err(|message| PipelineError::new(PipelineStep::Auth, message))?;
    log_info(
        "pipeline",
        "registry_authenticated",
        json!({"registry_host": auth.registry_host}),
    );

    let local_tag = ImageReference::local_tag(&config.repository_name, &config.function_name);
    builder
        .build(context_dir, &local_tag)
        .map_err(|message| PipelineError::new(PipelineStep::Build, message))?;
    log_info("pipeline", "image_built", json!({"tag": local_tag}));

    let image = ImageReference::derive(account_id, &config.region, &config.repository_name);
    builder
        .tag(&local_tag, &image.uri())
        .map_err(|message| PipelineError::new(PipelineStep::Tag, message))?;

    builder
        .push(&image.uri())
        .map_err(|message| PipelineError::new(PipelineStep::Push, message))?;
    log_info("pipeline", "image_pushed", json!({"uri": image.uri()}));

    Ok(image)
}
