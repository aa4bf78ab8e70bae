//! Template-facing context types.
//!
//! These mirror the Schema Model with everything a template needs already
//! spelled as Rust source: escaped identifiers, quoted literals and fully
//! written type expressions.

use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
pub struct FieldContext {
    pub ident: String,
    /// Wire name as a string literal
    pub wire_lit: String,
    /// The identifier differs from the wire name
    pub rename: bool,
    pub optional: bool,
    /// Absent values are left out when serializing
    pub skip_none: bool,
    pub ty: String,
    pub doc: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct VariantContext {
    pub ident: String,
    /// Wire value of an enum variant
    pub wire_lit: Option<String>,
    /// Payload type of a union variant
    pub ty: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct TypeContext {
    pub name: String,
    pub doc: Vec<String>,
    /// `struct`, `enum`, `union` or `alias`
    pub kind: &'static str,
    /// Every field is optional, so `Default` can be derived
    pub default: bool,
    pub fields: Vec<FieldContext>,
    pub variants: Vec<VariantContext>,
    pub target: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ParamContext {
    pub ident: String,
    pub wire_lit: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct OperationContext {
    pub operation_id: String,
    pub operation_id_lit: String,
    pub fn_name: String,
    /// Name of the `EndpointDescriptor` constant
    pub descriptor: String,
    pub method: String,
    /// `keelgen_runtime::Method` variant
    pub method_variant: String,
    pub path: String,
    pub path_lit: String,
    pub module_lit: String,
    pub doc: Vec<String>,
    pub deprecated: bool,
    pub path_params: Vec<ParamContext>,
    pub query_params: Vec<ParamContext>,
    pub path_type: Option<String>,
    pub query_type: Option<String>,
    pub body_type: Option<String>,
    pub body_required: bool,
    pub args_type: String,
    pub args_default: bool,
    pub needs_mut: bool,
    pub success_type: String,
    pub error_type: String,
    pub text_response: bool,
    /// `query` for reads, `mutation` for writes
    pub kind: &'static str,
    pub key_fn: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ModuleContext {
    /// File stem
    pub name: String,
    pub ident: String,
    pub types: Vec<TypeContext>,
    pub operations: Vec<OperationContext>,
}
