//! Rust context builder for the `rust_reqwest` templates.

use super::ContextBuilder;
use crate::schema::{Field, Operation, Param, SchemaModel, Scope, TypeDef, TypeKind};
use crate::templates::{
    FieldContext, ModuleContext, OperationContext, ParamContext, TypeContext, VariantContext,
};
use crate::utils::{
    doc_lines, escape_ident, string_literal, to_screaming_snake_case, to_upper_camel_case, unraw,
};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, Default)]
pub struct RustContextBuilder;

impl RustContextBuilder {
    pub fn type_context(def: &TypeDef) -> TypeContext {
        let base = TypeContext {
            name: def.name.clone(),
            doc: def.doc.as_deref().map(doc_lines).unwrap_or_default(),
            ..Default::default()
        };
        match &def.kind {
            TypeKind::Struct { fields } => TypeContext {
                kind: "struct",
                default: fields.iter().all(Field::is_optional),
                fields: fields.iter().map(field_context).collect(),
                ..base
            },
            TypeKind::Enum { variants } => TypeContext {
                kind: "enum",
                variants: variants
                    .iter()
                    .map(|v| VariantContext {
                        ident: v.ident.clone(),
                        wire_lit: Some(string_literal(&v.wire)),
                        ty: None,
                    })
                    .collect(),
                ..base
            },
            TypeKind::Union { variants } => TypeContext {
                kind: "union",
                variants: variants
                    .iter()
                    .map(|v| VariantContext {
                        ident: v.ident.clone(),
                        wire_lit: None,
                        ty: Some(v.ty.to_string()),
                    })
                    .collect(),
                ..base
            },
            TypeKind::Alias { target } => TypeContext {
                kind: "alias",
                target: Some(target.to_string()),
                ..base
            },
        }
    }

    pub fn operation_context(model: &SchemaModel, op: &Operation) -> OperationContext {
        let mut doc = Vec::new();
        if let Some(summary) = &op.summary {
            doc.extend(doc_lines(summary));
        }
        if let Some(description) = &op.description {
            if !doc.is_empty() {
                doc.push(String::new());
            }
            doc.extend(doc_lines(description));
        }
        if !doc.is_empty() {
            doc.push(String::new());
        }
        doc.push(format!("`{} {}`", op.method, op.path));

        let kind = if op.is_query() { "query" } else { "mutation" };
        let body_required = op.body.as_ref().is_some_and(|body| body.required);
        let query_default = op
            .query_type
            .as_deref()
            .map_or(true, |name| derives_default(model, name));

        OperationContext {
            operation_id: op.operation_id.clone(),
            operation_id_lit: string_literal(&op.operation_id),
            fn_name: op.fn_name.clone(),
            descriptor: format!("{}_ENDPOINT", to_screaming_snake_case(&op.operation_id)),
            method: op.method.clone(),
            method_variant: to_upper_camel_case(&op.method),
            path: op.path.clone(),
            path_lit: string_literal(&op.path),
            module_lit: string_literal(&op.module),
            doc,
            deprecated: op.deprecated,
            path_params: op.path_params.iter().map(param_context).collect(),
            query_params: op.query_params.iter().map(param_context).collect(),
            path_type: op.path_type.clone(),
            query_type: op.query_type.clone(),
            body_type: op.body.as_ref().map(|body| body.alias.clone()),
            body_required,
            args_type: format!("{}Args", op.type_prefix),
            args_default: op.path_type.is_none() && query_default && !body_required,
            needs_mut: op.path_type.is_some()
                || op.query_type.is_some()
                || op.body.is_some()
                || op.text_response,
            success_type: op.success_type.clone(),
            error_type: op.error_type.clone(),
            text_response: op.text_response,
            kind,
            key_fn: format!("{}_{}_key", unraw(&op.fn_name), kind),
        }
    }

    pub fn module_context(model: &SchemaModel, module: &str) -> ModuleContext {
        let scope = Scope::Module(module.to_string());
        ModuleContext {
            name: module.to_string(),
            ident: escape_ident(module),
            types: model.types_in(&scope).map(Self::type_context).collect(),
            operations: model
                .operations_in(module)
                .map(|op| Self::operation_context(model, op))
                .collect(),
        }
    }
}

impl ContextBuilder for RustContextBuilder {
    fn base(&self, model: &SchemaModel, project_name: &str) -> crate::Result<JsonValue> {
        let models: Vec<TypeContext> = model
            .types_in(&Scope::Models)
            .map(Self::type_context)
            .collect();
        let modules: Vec<ModuleContext> = model
            .modules()
            .into_iter()
            .map(|module| Self::module_context(model, module))
            .collect();

        let label = [model.title.as_deref(), model.version.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let mut api_label = doc_lines(&label).join(" ");
        if api_label.is_empty() {
            api_label = project_name.to_string();
        }

        Ok(json!({
            "project_name": project_name,
            "title": model.title,
            "version": model.version,
            "api_label": api_label,
            "default_base_url": model.default_base_url,
            "default_base_url_lit": model.default_base_url.as_deref().map(string_literal),
            "models": serde_json::to_value(models)?,
            "modules": serde_json::to_value(modules)?,
        }))
    }

    fn module(&self, model: &SchemaModel, module: &str) -> crate::Result<JsonValue> {
        Ok(serde_json::to_value(Self::module_context(model, module))?)
    }

    fn operation(&self, model: &SchemaModel, op: &Operation) -> crate::Result<JsonValue> {
        Ok(serde_json::to_value(Self::operation_context(model, op))?)
    }
}

fn field_context(field: &Field) -> FieldContext {
    FieldContext {
        ident: field.ident.clone(),
        wire_lit: string_literal(&field.wire),
        rename: unraw(&field.ident) != field.wire,
        optional: field.is_optional(),
        skip_none: field.is_optional() && !field.required,
        ty: field.ty.to_string(),
        doc: field.doc.as_deref().map(doc_lines).unwrap_or_default(),
    }
}

fn param_context(param: &Param) -> ParamContext {
    ParamContext {
        ident: param.ident.clone(),
        wire_lit: string_literal(&param.wire),
    }
}

fn derives_default(model: &SchemaModel, name: &str) -> bool {
    match model.get_type(name).map(|def| &def.kind) {
        Some(TypeKind::Struct { fields }) => fields.iter().all(Field::is_optional),
        _ => false,
    }
}
