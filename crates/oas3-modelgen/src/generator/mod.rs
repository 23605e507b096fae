pub mod attribute;
pub mod config;
pub mod dialect;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod naming;
pub mod orchestrator;
pub mod resolver;
pub mod route;

#[cfg(test)]
mod tests;
