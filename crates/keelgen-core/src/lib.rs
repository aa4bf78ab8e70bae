//! keelgen Core Library
//!
//! This library turns an OpenAPI 3.0 document into a typed Rust client
//! built on `keelgen-runtime`: one models file, one module per tag and a
//! descriptor, argument struct, call function and cache key per operation.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod openapi;
pub mod output;
pub mod schema;
pub mod templates;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Error, Result},
    generate::{check, generate, render},
    openapi::OpenApiContext,
    output::{DriftReport, GeneratedFiles},
    schema::SchemaModel,
    templates::{TemplateDir, TemplateKind, TemplateManager},
};
