//! Context builder traits and adapters for language-specific codegen.
pub mod rust;

use crate::schema::{Operation, SchemaModel};
use crate::templates::TemplateKind;
use serde_json::Value as JsonValue;

/// Turns the Schema Model into the JSON contexts templates render from.
pub trait ContextBuilder: Send + Sync {
    /// Context shared by every generated file.
    fn base(&self, model: &SchemaModel, project_name: &str) -> crate::Result<JsonValue>;

    /// Context of one module file, merged over the base context as `module`.
    fn module(&self, model: &SchemaModel, module: &str) -> crate::Result<JsonValue>;

    /// Context of one operation, merged over the base context as `operation`.
    fn operation(&self, model: &SchemaModel, op: &Operation) -> crate::Result<JsonValue>;
}

/// The builder for a template kind. Custom templates receive the Rust
/// context, since they render the same model.
pub fn builder_for(kind: TemplateKind) -> Box<dyn ContextBuilder> {
    match kind {
        TemplateKind::RustReqwest | TemplateKind::Custom => Box::new(rust::RustContextBuilder),
    }
}
