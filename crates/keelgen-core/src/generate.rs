//! Code generation entry points.
//!
//! Generation is a pure function of the document, the configuration and the
//! templates: [`render`] produces the files in memory, [`generate`] writes
//! them and [`check`] compares them with what is already on disk.

use std::{path::PathBuf, str::FromStr};

use crate::{
    config::Config,
    error::{Error, Result},
    openapi::OpenApiContext,
    output::{DriftReport, GeneratedFiles},
    schema::build_model,
    templates::{TemplateKind, TemplateManager},
    utils::to_snake_case,
};

use serde_json::json;

/// Render every output file without touching the output directory.
pub async fn render(config: &Config) -> Result<GeneratedFiles> {
    // 1. Load and check the OpenAPI document
    let schema = OpenApiContext::from_file_or_url(&config.openapi_schema_path).await?;
    schema.validate()?;
    schema.check_references()?;

    // 2. Build the type and operation model
    let model = build_model(&schema, config)?;
    log::debug!(
        "Model has {} types and {} operations",
        model.types.len(),
        model.operations.len()
    );

    // 3. Render through the selected templates
    let template_kind = TemplateKind::from_str(&config.template_kind).map_err(Error::config)?;
    let template_dir = config.template_dir.as_ref().map(PathBuf::from);
    let template_manager = TemplateManager::new(template_kind, template_dir).await?;
    let mut files = template_manager.render(&model, &config.project_name)?;
    files.format_rust()?;

    if config.emit_schemas {
        emit_schemas(&schema, config, &mut files)?;
    }
    Ok(files)
}

/// Main entry point for code generation
pub async fn generate(config: &Config) -> Result<GeneratedFiles> {
    let files = render(config).await?;
    files.write_all(&PathBuf::from(&config.output_dir)).await?;
    Ok(files)
}

/// Report how the output directory differs from a fresh render.
pub async fn check(config: &Config) -> Result<DriftReport> {
    let files = render(config).await?;
    files.diff(&PathBuf::from(&config.output_dir)).await
}

/// Add a dereferenced `schemas/{operation}.json` for each selected operation.
fn emit_schemas(schema: &OpenApiContext, config: &Config, files: &mut GeneratedFiles) -> Result<()> {
    for op in schema.parse_operations()? {
        if !config.selects(&op.id) {
            continue;
        }
        let parameters = schema.dereference(&serde_json::to_value(&op.parameters)?)?;
        let request_body = match &op.request_body {
            Some(body) => schema.dereference(body)?,
            None => serde_json::Value::Null,
        };
        let responses = schema.dereference(&serde_json::to_value(&op.responses)?)?;

        let document = json!({
            "operationId": op.id,
            "method": op.method.to_uppercase(),
            "path": op.path,
            "parameters": parameters,
            "requestBody": request_body,
            "responses": responses,
        });
        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');
        files.insert(format!("schemas/{}.json", to_snake_case(&op.id)), content)?;
    }
    Ok(())
}
