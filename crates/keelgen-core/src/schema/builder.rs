//! Builds a [`SchemaModel`] from an OpenAPI document.
//!
//! Component schemas become named types in `models.rs`. Inline object, enum
//! and union schemas are hoisted into named types whose names are derived from
//! where they appear (`{Parent}{Property}`, `{Operation}{Status}`,
//! `{Operation}Body`, `{Union}{Index}`), and are emitted next to the
//! operation that first uses them. Two nodes that would produce the same name
//! are an error rather than a silent overwrite.

// Internal imports (std, crate)
use std::collections::{BTreeMap, BTreeSet};

use super::{
    Body, EnumVariant, Field, Operation, Param, Response, RustType, SchemaModel, Scope, TypeDef,
    TypeKind, UnionVariant,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::openapi::{pointer_segment, OpenApiContext, OpenApiOperation, OpenApiParameter};
use crate::utils::{to_snake_case, to_type_ident, to_value_ident, unraw};

// External imports (alphabetized)
use serde_json::Value as JsonValue;

const COMPONENT_PREFIX: &str = "#/components/schemas/";
const MAX_REF_DEPTH: usize = 32;
/// Module names taken by the generated files themselves.
const RESERVED_MODULES: &[&str] = &["mod", "models"];
/// Prelude types a glob-imported model must not shadow.
const PRELUDE_TYPES: &[&str] = &["Box", "Option", "Result", "String", "Vec"];

/// Build the model for every operation selected by `config`.
pub fn build_model(ctx: &OpenApiContext, config: &Config) -> Result<SchemaModel> {
    let mut builder = ModelBuilder::new(ctx);

    for (key, schema) in ctx.component_schemas() {
        let location = format!("{}{}", COMPONENT_PREFIX, pointer_segment(key));
        builder.define(&component_type_name(key), schema, &location)?;
    }

    let error_fallback = ctx
        .component_schemas()
        .iter()
        .find(|(key, _)| **key == config.error_schema)
        .map(|(key, _)| RustType::Named(component_type_name(key)))
        .unwrap_or(RustType::Value);

    let mut operations = Vec::new();
    for op in ctx.parse_operations()? {
        if !config.selects(&op.id) {
            log::debug!("Skipping operation {} ({} {})", op.id, op.method, op.path);
            continue;
        }
        operations.push(builder.operation(&op, &error_fallback)?);
    }
    operations.sort_by(|a, b| (&a.module, &a.fn_name).cmp(&(&b.module, &b.fn_name)));

    for pair in operations.windows(2) {
        if pair[0].module == pair[1].module && pair[0].fn_name == pair[1].fn_name {
            return Err(Error::unsupported(
                format!(
                    "operationIds '{}' and '{}' that map to the same function name",
                    pair[0].operation_id, pair[1].operation_id
                ),
                pair[1].location.clone(),
            ));
        }
    }

    box_recursive_references(&mut builder.types);

    log::debug!(
        "Built model with {} types and {} operations",
        builder.types.len(),
        operations.len()
    );

    Ok(SchemaModel {
        title: ctx.title().map(str::to_string),
        version: ctx.version().map(str::to_string),
        default_base_url: default_base_url(ctx, config),
        types: builder.types.into_values().collect(),
        operations,
    })
}

/// Type name of a component schema; prelude names get a `Model` suffix.
fn component_type_name(key: &str) -> String {
    let name = to_type_ident(key);
    if PRELUDE_TYPES.contains(&name.as_str()) {
        format!("{name}Model")
    } else {
        name
    }
}

/// Box every field or union arm that stores, by value, a type from its own
/// strongly connected component of the containment graph.
fn box_recursive_references(types: &mut BTreeMap<String, TypeDef>) {
    let graph: BTreeMap<&str, Vec<&str>> = types
        .iter()
        .map(|(name, def)| {
            let targets: Vec<&str> = match &def.kind {
                TypeKind::Struct { fields } => {
                    fields.iter().filter_map(|f| f.ty.inline_target()).collect()
                }
                TypeKind::Union { variants } => {
                    variants.iter().filter_map(|v| v.ty.inline_target()).collect()
                }
                TypeKind::Alias { target } => target.inline_target().into_iter().collect(),
                TypeKind::Enum { .. } => Vec::new(),
            };
            (name.as_str(), targets)
        })
        .collect();

    let components: Vec<BTreeSet<String>> = strongly_connected(&graph)
        .into_iter()
        .map(|members| members.into_iter().map(str::to_string).collect())
        .collect();

    for component in components {
        for name in &component {
            let Some(def) = types.get_mut(name) else {
                continue;
            };
            match &mut def.kind {
                TypeKind::Struct { fields } => {
                    for field in fields {
                        field.ty = std::mem::replace(&mut field.ty, RustType::Value)
                            .boxed_within(&component);
                    }
                }
                TypeKind::Union { variants } => {
                    for variant in variants {
                        variant.ty = std::mem::replace(&mut variant.ty, RustType::Value)
                            .boxed_within(&component);
                    }
                }
                TypeKind::Alias { .. } | TypeKind::Enum { .. } => {}
            }
        }
        if component.len() > 1 {
            log::debug!("Boxing references within recursive types {:?}", component);
        }
    }
}

/// Tarjan's strongly connected components, each listed once.
fn strongly_connected<'g>(graph: &BTreeMap<&'g str, Vec<&'g str>>) -> Vec<Vec<&'g str>> {
    let mut tarjan = Tarjan {
        graph,
        next_index: 0,
        index: BTreeMap::new(),
        lowlink: BTreeMap::new(),
        stack: Vec::new(),
        on_stack: BTreeSet::new(),
        components: Vec::new(),
    };
    for &node in graph.keys() {
        if !tarjan.index.contains_key(node) {
            tarjan.visit(node);
        }
    }
    tarjan.components
}

struct Tarjan<'a, 'g> {
    graph: &'a BTreeMap<&'g str, Vec<&'g str>>,
    next_index: usize,
    index: BTreeMap<&'g str, usize>,
    lowlink: BTreeMap<&'g str, usize>,
    stack: Vec<&'g str>,
    on_stack: BTreeSet<&'g str>,
    components: Vec<Vec<&'g str>>,
}

impl<'a, 'g> Tarjan<'a, 'g> {
    fn visit(&mut self, node: &'g str) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        let graph = self.graph;
        for &next in graph.get(node).into_iter().flatten() {
            if !graph.contains_key(next) {
                continue;
            }
            let low = match self.index.get(next) {
                None => {
                    self.visit(next);
                    self.lowlink[next]
                }
                Some(&index) if self.on_stack.contains(next) => index,
                Some(_) => continue,
            };
            if low < self.lowlink[node] {
                self.lowlink.insert(node, low);
            }
        }

        if self.lowlink[node] == self.index[node] {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.remove(member);
                component.push(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// The base URL baked into the generated module, if one can be determined.
fn default_base_url(ctx: &OpenApiContext, config: &Config) -> Option<String> {
    let configured = config
        .base_url
        .as_ref()
        .map(|url| url.as_str().trim_end_matches('/').to_string());
    match ctx.base_path() {
        Some(server) if server.starts_with("http://") || server.starts_with("https://") => {
            Some(server.trim_end_matches('/').to_string())
        }
        Some(server) => match configured {
            Some(base) => {
                let path = server.trim_matches('/');
                if path.is_empty() {
                    Some(base)
                } else {
                    Some(format!("{base}/{path}"))
                }
            }
            None => {
                log::warn!(
                    "Server URL '{}' is relative and no base URL is configured; DEFAULT_BASE_URL is omitted",
                    server
                );
                None
            }
        },
        None => configured,
    }
}

struct ModelBuilder<'a> {
    ctx: &'a OpenApiContext,
    types: BTreeMap<String, TypeDef>,
    scope: Scope,
    depth: usize,
}

impl<'a> ModelBuilder<'a> {
    fn new(ctx: &'a OpenApiContext) -> Self {
        Self {
            ctx,
            types: BTreeMap::new(),
            scope: Scope::Models,
            depth: 0,
        }
    }

    fn register(&mut self, name: &str, doc: Option<String>, kind: TypeKind, origin: &str) -> Result<()> {
        if let Some(existing) = self.types.get(name) {
            return Err(Error::DuplicateType {
                name: name.to_string(),
                first: existing.origin.clone(),
                second: origin.to_string(),
            });
        }
        self.types.insert(
            name.to_string(),
            TypeDef {
                name: name.to_string(),
                doc,
                kind,
                scope: self.scope.clone(),
                origin: origin.to_string(),
            },
        );
        Ok(())
    }

    /// Register `schema` under `name`.
    fn define(&mut self, name: &str, schema: &JsonValue, location: &str) -> Result<()> {
        reject_unsupported(schema, location)?;
        let doc = description(schema);

        if let Some(inner) = single_all_of(schema) {
            if inner.get("$ref").is_none() {
                return self.define(name, inner, &format!("{location}/allOf/0"));
            }
        }

        let kind = if schema.get("$ref").is_some() || single_all_of(schema).is_some() {
            TypeKind::Alias {
                target: self.type_of(schema, name, location)?,
            }
        } else if let Some(arms) = schema.get("oneOf").and_then(JsonValue::as_array) {
            TypeKind::Union {
                variants: self.union_variants(name, arms, location)?,
            }
        } else if let Some(values) = string_enum(schema, location)? {
            TypeKind::Enum {
                variants: enum_variants(&values, location)?,
            }
        } else if has_properties(schema) {
            TypeKind::Struct {
                fields: self.fields(name, schema, location)?,
            }
        } else {
            TypeKind::Alias {
                target: self.type_of(schema, name, location)?,
            }
        };
        self.register(name, doc, kind, location)
    }

    /// The type of `schema`, hoisting it into a type named `hint` when it
    /// needs a definition of its own.
    fn type_of(&mut self, schema: &JsonValue, hint: &str, location: &str) -> Result<RustType> {
        reject_unsupported(schema, location)?;

        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            return self.reference_type(reference, hint, location);
        }
        if let Some(inner) = single_all_of(schema) {
            let ty = self.type_of(inner, hint, &format!("{location}/allOf/0"))?;
            return Ok(if is_nullable(schema) { ty.optional() } else { ty });
        }

        let base = if needs_definition(schema, location)? {
            self.define(hint, schema, location)?;
            RustType::Named(hint.to_string())
        } else {
            let format = schema.get("format").and_then(JsonValue::as_str);
            match schema.get("type").and_then(JsonValue::as_str) {
                Some("string") => RustType::String,
                Some("integer") if format == Some("int32") => RustType::I32,
                Some("integer") => RustType::I64,
                Some("number") if format == Some("float") => RustType::F32,
                Some("number") => RustType::F64,
                Some("boolean") => RustType::Bool,
                Some("array") => match schema.get("items") {
                    Some(items) => RustType::Vec(Box::new(self.type_of(
                        items,
                        &format!("{hint}Item"),
                        &format!("{location}/items"),
                    )?)),
                    None => RustType::Vec(Box::new(RustType::Value)),
                },
                Some("object") | None => match schema.get("additionalProperties") {
                    Some(values) if values.as_object().is_some_and(|o| !o.is_empty()) => {
                        RustType::Map(Box::new(self.type_of(
                            values,
                            &format!("{hint}Value"),
                            &format!("{location}/additionalProperties"),
                        )?))
                    }
                    _ => RustType::Value,
                },
                Some(other) => {
                    return Err(Error::unsupported(format!("schema type '{other}'"), location))
                }
            }
        };

        Ok(if is_nullable(schema) { base.optional() } else { base })
    }

    fn reference_type(&mut self, reference: &str, hint: &str, location: &str) -> Result<RustType> {
        let target = self.ctx.lookup(reference, location)?;
        if let Some(name) = reference
            .strip_prefix(COMPONENT_PREFIX)
            .filter(|name| !name.contains('/'))
        {
            let name = name.replace("~1", "/").replace("~0", "~");
            return Ok(RustType::Named(component_type_name(&name)));
        }

        // A pointer into the middle of another schema is expanded in place.
        if self.depth >= MAX_REF_DEPTH {
            return Err(Error::unsupported("reference cycle", location));
        }
        self.depth += 1;
        let ty = self.type_of(target, hint, reference);
        self.depth -= 1;
        ty
    }

    fn fields(&mut self, parent: &str, schema: &JsonValue, location: &str) -> Result<Vec<Field>> {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        let mut properties: Vec<(&String, &JsonValue)> = schema
            .get("properties")
            .and_then(JsonValue::as_object)
            .map(|props| props.iter().collect())
            .unwrap_or_default();
        properties.sort_by(|a, b| a.0.cmp(b.0));

        let mut fields: Vec<Field> = Vec::with_capacity(properties.len());
        for (wire, property) in properties {
            let property_location = format!("{location}/properties/{}", pointer_segment(wire));
            let hint = format!("{parent}{}", to_type_ident(wire));
            let is_required = required.contains(&wire.as_str());

            let mut ty = self.type_of(property, &hint, &property_location)?;
            if !is_required {
                ty = ty.optional();
            }

            let ident = to_value_ident(wire);
            if let Some(clash) = fields.iter().find(|f| f.ident == ident) {
                return Err(Error::unsupported(
                    format!(
                        "properties '{}' and '{}' that map to the same field name",
                        clash.wire, wire
                    ),
                    location,
                ));
            }
            fields.push(Field {
                ident,
                wire: wire.clone(),
                ty,
                required: is_required,
                doc: description(property),
            });
        }
        Ok(fields)
    }

    fn union_variants(&mut self, name: &str, arms: &[JsonValue], location: &str) -> Result<Vec<UnionVariant>> {
        let mut variants: Vec<UnionVariant> = Vec::with_capacity(arms.len());
        for (index, arm) in arms.iter().enumerate() {
            let ty =
                self.type_of(arm, &format!("{name}{index}"), &format!("{location}/oneOf/{index}"))?;
            let mut ident = variant_ident(&ty);
            if variants.iter().any(|v| v.ident == ident) {
                ident = format!("{ident}{index}");
            }
            variants.push(UnionVariant { ident, ty });
        }
        Ok(variants)
    }

    fn operation(&mut self, op: &OpenApiOperation, error_fallback: &RustType) -> Result<Operation> {
        let type_prefix = to_type_ident(&op.id);
        let module = op
            .tags
            .first()
            .filter(|tag| !to_snake_case(tag).is_empty())
            .map(|tag| unraw(&to_value_ident(tag)).to_string())
            .unwrap_or_else(|| "default".to_string());
        if RESERVED_MODULES.contains(&module.as_str()) {
            return Err(Error::unsupported(
                format!("tag '{module}', which collides with a generated file"),
                op.location.clone(),
            ));
        }
        self.scope = Scope::Module(module.clone());

        let (path_params, query_params) = self.parameters(op, &type_prefix)?;
        let path_type = self.param_struct(op, &format!("{type_prefix}PathParams"), "Path", &path_params)?;
        let query_type =
            self.param_struct(op, &format!("{type_prefix}QueryParams"), "Query", &query_params)?;

        let body = self.request_body(op, &type_prefix)?;
        let responses = self.responses(op, &type_prefix)?;

        let success = responses.iter().find(|r| r.status.starts_with('2'));
        let success_type = format!("{type_prefix}Success");
        let success_target = success
            .map(|r| RustType::Named(r.alias.clone()))
            .unwrap_or(RustType::Empty);
        self.register(
            &success_type,
            None,
            TypeKind::Alias { target: success_target },
            &op.location,
        )?;
        let text_response = success.is_some_and(|r| r.text);

        let mut error_targets: Vec<&RustType> = Vec::new();
        for response in responses.iter().filter(|r| !r.status.starts_with('2')) {
            if response.ty != RustType::Empty && !error_targets.contains(&&response.ty) {
                error_targets.push(&response.ty);
            }
        }
        let error_target = match error_targets.as_slice() {
            [] => error_fallback.clone(),
            [single] => (*single).clone(),
            _ => RustType::Value,
        };
        let error_type = format!("{type_prefix}Error");
        self.register(
            &error_type,
            None,
            TypeKind::Alias { target: error_target },
            &op.location,
        )?;

        self.scope = Scope::Models;

        Ok(Operation {
            operation_id: op.id.clone(),
            fn_name: to_value_ident(&op.id),
            type_prefix,
            method: op.method.to_uppercase(),
            path: op.path.clone(),
            module,
            summary: op.summary.clone(),
            description: op.description.clone(),
            deprecated: op.deprecated,
            path_params,
            query_params,
            path_type,
            query_type,
            body,
            responses,
            success_type,
            error_type,
            text_response,
            location: op.location.clone(),
        })
    }

    fn parameters(&mut self, op: &OpenApiOperation, prefix: &str) -> Result<(Vec<Param>, Vec<Param>)> {
        let template = path_template_names(&op.path, &op.location)?;
        let declared: Vec<&OpenApiParameter> =
            op.parameters.iter().filter(|p| p.in_ == "path").collect();

        let mismatch = template.len() != declared.len()
            || template
                .iter()
                .any(|name| !declared.iter().any(|p| &p.name == name));
        if mismatch {
            return Err(Error::unsupported(
                format!(
                    "path template '{}' whose placeholders do not match its path parameters",
                    op.path
                ),
                op.location.clone(),
            ));
        }

        let mut path_params = Vec::with_capacity(template.len());
        for name in &template {
            if let Some(param) = declared.iter().find(|p| &p.name == name) {
                path_params.push(self.param(param, prefix, true, false)?);
            }
        }

        let mut query_params = Vec::new();
        for param in &op.parameters {
            match param.in_.as_str() {
                "path" => {}
                "query" => {
                    let required = param.required.unwrap_or(false);
                    query_params.push(self.param(param, prefix, required, true)?);
                }
                other => log::warn!(
                    "Skipping {} parameter '{}' of {}; send it through CallOptions headers",
                    other,
                    param.name,
                    op.id
                ),
            }
        }
        Ok((path_params, query_params))
    }

    fn param(&mut self, param: &OpenApiParameter, prefix: &str, required: bool, allow_list: bool) -> Result<Param> {
        let schema = match (&param.schema, &param.content) {
            (Some(schema), None) => schema,
            _ => {
                return Err(Error::unsupported(
                    format!("{} parameter '{}' without a plain schema", param.in_, param.name),
                    param.location.clone(),
                ))
            }
        };
        let hint = format!("{prefix}{}", to_type_ident(&param.name));
        let ty = self.type_of(schema, &hint, &format!("{}/schema", param.location))?;

        let scalar = match &ty {
            RustType::Vec(inner) if allow_list => self.is_scalar(inner),
            other => self.is_scalar(other),
        };
        if !scalar {
            return Err(Error::unsupported(
                format!("non-primitive {} parameter '{}'", param.in_, param.name),
                param.location.clone(),
            ));
        }

        Ok(Param {
            wire: param.name.clone(),
            ident: to_value_ident(&param.name),
            ty: if required { ty } else { ty.optional() },
            required,
            doc: param.description.clone(),
        })
    }

    /// Primitives and string enums serialize to a single path segment or query value.
    fn is_scalar(&self, ty: &RustType) -> bool {
        match ty {
            RustType::Option(inner) => self.is_scalar(inner),
            RustType::Named(name) => match self.types.get(name).map(|def| &def.kind) {
                Some(TypeKind::Enum { .. }) => true,
                Some(TypeKind::Alias { target }) => self.is_scalar(target),
                _ => false,
            },
            other => other.is_primitive(),
        }
    }

    fn param_struct(&mut self, op: &OpenApiOperation, name: &str, kind: &str, params: &[Param]) -> Result<Option<String>> {
        if params.is_empty() {
            return Ok(None);
        }
        let mut fields: Vec<Field> = Vec::with_capacity(params.len());
        for param in params {
            if let Some(clash) = fields.iter().find(|f| f.ident == param.ident) {
                return Err(Error::unsupported(
                    format!(
                        "parameters '{}' and '{}' that map to the same field name",
                        clash.wire, param.wire
                    ),
                    op.location.clone(),
                ));
            }
            fields.push(Field {
                ident: param.ident.clone(),
                wire: param.wire.clone(),
                ty: param.ty.clone(),
                required: param.required,
                doc: param.doc.clone(),
            });
        }
        self.register(
            name,
            Some(format!("{kind} parameters of `{}`.", op.id)),
            TypeKind::Struct { fields },
            &op.location,
        )?;
        Ok(Some(name.to_string()))
    }

    fn request_body(&mut self, op: &OpenApiOperation, prefix: &str) -> Result<Option<Body>> {
        let Some(body) = &op.request_body else {
            return Ok(None);
        };
        let location = format!("{}/requestBody", op.location);
        let (media, schema) = match json_media(body) {
            Some(found) => found,
            None => {
                log::warn!("Skipping non-JSON request body of {}", op.id);
                return Ok(None);
            }
        };

        let alias = format!("{prefix}Body");
        let ty = match schema {
            Some(schema) => self.type_of(
                schema,
                &alias,
                &format!("{location}/content/{}/schema", pointer_segment(media)),
            )?,
            None => RustType::Value,
        };
        if ty != RustType::Named(alias.clone()) {
            self.register(&alias, description(body), TypeKind::Alias { target: ty }, &location)?;
        }
        Ok(Some(Body {
            alias,
            required: body
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        }))
    }

    fn responses(&mut self, op: &OpenApiOperation, prefix: &str) -> Result<Vec<Response>> {
        let mut statuses: Vec<&String> = op.responses.keys().collect();
        statuses.sort_by_key(|status| status_rank(status));

        let mut responses = Vec::with_capacity(statuses.len());
        for status in statuses {
            let response = &op.responses[status];
            let location = format!("{}/responses/{}", op.location, pointer_segment(status));
            let suffix = if status == "default" {
                "Default".to_string()
            } else {
                status.to_uppercase()
            };
            let alias = format!("{prefix}{suffix}");

            let (ty, text) = match json_media(response) {
                Some((media, Some(schema))) => (
                    self.type_of(
                        schema,
                        &alias,
                        &format!("{location}/content/{}/schema", pointer_segment(media)),
                    )?,
                    false,
                ),
                Some((_, None)) => (RustType::Value, false),
                None if has_text_content(response) => (RustType::String, true),
                None => (RustType::Empty, false),
            };
            if ty != RustType::Named(alias.clone()) {
                self.register(
                    &alias,
                    description(response),
                    TypeKind::Alias { target: ty.clone() },
                    &location,
                )?;
            }
            responses.push(Response {
                status: status.clone(),
                alias,
                ty,
                text,
                description: description(response),
            });
        }
        Ok(responses)
    }
}

fn reject_unsupported(schema: &JsonValue, location: &str) -> Result<()> {
    if schema.get("anyOf").is_some() {
        return Err(Error::unsupported("anyOf", location));
    }
    if schema.get("not").is_some() {
        return Err(Error::unsupported("not", location));
    }
    if let Some(all_of) = schema.get("allOf") {
        if all_of.as_array().map_or(true, |arms| arms.len() != 1) {
            return Err(Error::unsupported("allOf with more than one schema", location));
        }
    }
    Ok(())
}

fn single_all_of(schema: &JsonValue) -> Option<&JsonValue> {
    match schema.get("allOf").and_then(JsonValue::as_array) {
        Some(arms) if arms.len() == 1 => arms.first(),
        _ => None,
    }
}

fn needs_definition(schema: &JsonValue, location: &str) -> Result<bool> {
    Ok(schema.get("oneOf").is_some() || string_enum(schema, location)?.is_some() || has_properties(schema))
}

fn has_properties(schema: &JsonValue) -> bool {
    schema
        .get("properties")
        .and_then(JsonValue::as_object)
        .is_some_and(|props| !props.is_empty())
}

fn is_nullable(schema: &JsonValue) -> bool {
    schema
        .get("nullable")
        .and_then(JsonValue::as_bool)
        .unwrap_or(false)
}

fn description(node: &JsonValue) -> Option<String> {
    node.get("description")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

/// The values of a string enum; numeric enums keep their numeric type.
fn string_enum(schema: &JsonValue, location: &str) -> Result<Option<Vec<String>>> {
    let Some(values) = schema.get("enum").and_then(JsonValue::as_array) else {
        return Ok(None);
    };
    let declared = schema.get("type").and_then(JsonValue::as_str);
    let all_strings = values.iter().all(|v| v.is_string() || v.is_null());
    let values = match declared {
        Some("string") if !all_strings => {
            return Err(Error::unsupported("non-string value in a string enum", location))
        }
        Some("string") => strings(values),
        None if all_strings => strings(values),
        _ => return Ok(None),
    };
    // An enum of only `null` carries no values worth a type.
    Ok(Some(values).filter(|values| !values.is_empty()))
}

fn strings(values: &[JsonValue]) -> Vec<String> {
    values
        .iter()
        .filter_map(JsonValue::as_str)
        .map(str::to_string)
        .collect()
}

fn enum_variants(values: &[String], location: &str) -> Result<Vec<EnumVariant>> {
    let mut variants: Vec<EnumVariant> = Vec::with_capacity(values.len());
    for wire in values {
        let ident = to_type_ident(wire);
        if variants.iter().any(|v| v.ident == ident) {
            return Err(Error::unsupported(
                format!("enum values that map to the same variant '{ident}'"),
                location,
            ));
        }
        variants.push(EnumVariant {
            ident,
            wire: wire.clone(),
        });
    }
    Ok(variants)
}

fn variant_ident(ty: &RustType) -> String {
    match ty {
        RustType::Named(name) => name.clone(),
        RustType::Boxed(inner) | RustType::Option(inner) => variant_ident(inner),
        RustType::String => "String".into(),
        RustType::I32 | RustType::I64 => "Integer".into(),
        RustType::F32 | RustType::F64 => "Number".into(),
        RustType::Bool => "Boolean".into(),
        RustType::Vec(_) => "Array".into(),
        RustType::Map(_) => "Map".into(),
        RustType::Value | RustType::Empty => "Any".into(),
    }
}

/// The JSON media type of a request body or response, with its schema.
fn json_media(container: &JsonValue) -> Option<(&str, Option<&JsonValue>)> {
    let content = container.get("content")?.as_object()?;
    let mut candidates: Vec<(&String, &JsonValue)> = content
        .iter()
        .filter(|(media, _)| media.contains("json") || media.as_str() == "*/*")
        .collect();
    candidates.sort_by(|a, b| {
        (a.0 != "application/json", a.0).cmp(&(b.0 != "application/json", b.0))
    });
    let (media, entry) = candidates.into_iter().next()?;
    Some((media.as_str(), entry.get("schema")))
}

fn has_text_content(container: &JsonValue) -> bool {
    container
        .get("content")
        .and_then(JsonValue::as_object)
        .is_some_and(|content| content.keys().any(|k| k.starts_with("text/")))
}

/// Explicit codes first in numeric order, then ranges, then `default`.
fn status_rank(status: &str) -> (u8, u8, String) {
    if status == "default" {
        return (2, 0, String::new());
    }
    let class = status.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(9) as u8;
    if status.chars().all(|c| c.is_ascii_digit()) {
        (0, class, status.to_string())
    } else {
        (1, class, status.to_uppercase())
    }
}

/// Placeholder names of a path template in order.
fn path_template_names(path: &str, location: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find(|c| c == '{' || c == '}') {
        if rest[start..].starts_with('}') {
            return Err(Error::unsupported(format!("malformed path template '{path}'"), location));
        }
        let after = &rest[start + 1..];
        let end = after
            .find(|c| c == '{' || c == '}')
            .filter(|&end| after[end..].starts_with('}'))
            .ok_or_else(|| Error::unsupported(format!("malformed path template '{path}'"), location))?;
        let name = &after[..end];
        if name.is_empty() || names.iter().any(|n| n == name) {
            return Err(Error::unsupported(format!("malformed path template '{path}'"), location));
        }
        names.push(name.to_string());
        rest = &after[end + 1..];
    }
    Ok(names)
}
