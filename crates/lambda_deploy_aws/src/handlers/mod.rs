pub mod function;
pub mod identity;
pub mod modes;
pub mod pipeline;
pub mod repository;
pub mod teardown;

#[cfg(test)]
pub(crate) mod fakes;
