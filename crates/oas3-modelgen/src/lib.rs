//! Derives relational models and controller routes from OpenAPI v3 documents.
//!
//! [`document`] holds the typed input graph, [`utils::spec`] loads it from JSON
//! or YAML, and [`generator::orchestrator::Orchestrator`] runs the
//! transformation into serialisable [`generator::model::Model`] and
//! [`generator::route::Route`] values.
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod document;
pub mod generator;
pub mod utils;
