pub mod refs;
pub(crate) mod schema_ext;
pub mod spec;

pub use refs::{JsonPointer, extract_schema_ref_name, parse_schema_ref_path};
pub(crate) use schema_ext::SchemaExt;
