pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_models};
pub use list::{list_models, list_routes};
