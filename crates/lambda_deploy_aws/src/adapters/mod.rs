pub mod aws;
pub mod docker;
pub mod image_builder;
pub mod provisioning;
