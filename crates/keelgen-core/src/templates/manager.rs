//! Template system for code generation

// Internal imports (std, crate)
use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    builders::{builder_for, ContextBuilder},
    error::{Error, Result},
    manifest::{ForEach, TemplateFile, TemplateManifest},
    output::GeneratedFiles,
    schema::SchemaModel,
    utils::{to_lower_camel_case, to_snake_case, to_upper_camel_case, unraw},
};

use super::{TemplateDir, TemplateKind};

// External imports (alphabetized)
use serde_json::{Map, Value as JsonValue};
use tera::{Context, Tera};

/// Templates compiled into the crate, as (name, source) pairs.
const BUILTIN_RUST_REQWEST: &[(&str, &str)] = &[
    (
        "manifest.yaml",
        include_str!("../../templates/rust_reqwest/manifest.yaml"),
    ),
    (
        "macros.tera",
        include_str!("../../templates/rust_reqwest/macros.tera"),
    ),
    (
        "mod.rs.tera",
        include_str!("../../templates/rust_reqwest/mod.rs.tera"),
    ),
    (
        "models.rs.tera",
        include_str!("../../templates/rust_reqwest/models.rs.tera"),
    ),
    (
        "module.rs.tera",
        include_str!("../../templates/rust_reqwest/module.rs.tera"),
    ),
];

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    kind: TemplateKind,
    /// `None` for the built-in templates
    template_dir: Option<TemplateDir>,
    manifest: TemplateManifest,
}

impl TemplateManager {
    /// Create a TemplateManager for the given template kind.
    ///
    /// The built-in kind renders from the embedded templates unless a
    /// directory is given. Other kinds need a directory, explicit or found by
    /// [`TemplateDir::discover`].
    pub async fn new(template_kind: TemplateKind, template_dir: Option<PathBuf>) -> Result<Self> {
        if template_kind.is_builtin() && template_dir.is_none() {
            return Self::builtin(template_kind);
        }
        let template_dir = TemplateDir::discover(template_kind, template_dir.as_deref())?;
        Self::from_dir(template_dir).await
    }

    /// The templates shipped with keelgen.
    pub fn builtin(template_kind: TemplateKind) -> Result<Self> {
        let sources = match template_kind {
            TemplateKind::RustReqwest => BUILTIN_RUST_REQWEST,
            TemplateKind::Custom => {
                return Err(Error::template(
                    "custom templates need a template directory",
                ))
            }
        };

        let mut manifest = None;
        let mut templates = Vec::new();
        for (name, source) in sources {
            if *name == "manifest.yaml" {
                manifest = Some(TemplateManifest::from_yaml_str(source)?);
            } else {
                templates.push((*name, *source));
            }
        }
        let manifest = manifest
            .ok_or_else(|| Error::template(format!("{} has no manifest", template_kind)))?;

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        register_filters(&mut tera);

        log::debug!("Loaded built-in '{}' templates", template_kind);
        Ok(Self {
            tera: Arc::new(tera),
            kind: template_kind,
            template_dir: None,
            manifest,
        })
    }

    /// Templates and manifest from a directory.
    pub async fn from_dir(template_dir: TemplateDir) -> Result<Self> {
        let template_path = template_dir.template_path();
        let template_dir_str = template_path
            .to_str()
            .ok_or_else(|| Error::template("Template path contains invalid UTF-8"))?;

        let manifest = TemplateManifest::load_from_dir(template_path).await?;

        let mut tera = Tera::new(&format!("{}/**/*.tera", template_dir_str))
            .map_err(|e| Error::template(format!("Failed to parse templates: {}", error_chain(&e))))?;
        register_filters(&mut tera);

        for file in &manifest.files {
            if tera.get_template(&file.source).is_err() {
                return Err(Error::template(format!(
                    "manifest lists '{}', which is not in {}",
                    file.source,
                    template_dir.display()
                )));
            }
        }

        log::debug!(
            "Loaded {} templates from {}",
            tera.get_template_names().count(),
            template_dir.display()
        );
        Ok(Self {
            tera: Arc::new(tera),
            kind: template_dir.kind(),
            template_dir: Some(template_dir),
            manifest,
        })
    }

    /// Get the template kind this template manager is configured for
    pub fn template_kind(&self) -> TemplateKind {
        self.kind
    }

    /// The template directory, or `None` for built-in templates
    pub fn template_dir(&self) -> Option<&TemplateDir> {
        self.template_dir.as_ref()
    }

    /// Get a reference to the template manifest
    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// (source, destination) of every manifest file
    pub fn list_templates(&self) -> Vec<(String, String)> {
        self.manifest
            .files
            .iter()
            .filter(|f| self.has_template(&f.source))
            .map(|f| (f.source.clone(), f.destination.clone()))
            .collect()
    }

    /// Render every manifest file against the model.
    ///
    /// Nothing touches the filesystem; the caller decides where the files go.
    pub fn render(&self, model: &SchemaModel, project_name: &str) -> Result<GeneratedFiles> {
        let builder: Box<dyn ContextBuilder> = builder_for(self.kind);
        let base = builder.base(model, project_name)?;
        let mut files = GeneratedFiles::new();

        for file in &self.manifest.files {
            match file.for_each {
                None => {
                    let context = self.create_file_context(&base, file, None)?;
                    let content = self.render_file(&file.source, context)?;
                    files.insert(file.destination.clone(), content)?;
                }
                Some(ForEach::Module) => {
                    for module in model.modules() {
                        let item = ("module", builder.module(model, module)?);
                        let context = self.create_file_context(&base, file, Some(item))?;
                        let destination = file.destination.replace("{module}", module);
                        files.insert(destination, self.render_file(&file.source, context)?)?;
                    }
                }
                Some(ForEach::Operation) => {
                    for op in &model.operations {
                        let item = ("operation", builder.operation(model, op)?);
                        let context = self.create_file_context(&base, file, Some(item))?;
                        let destination = file
                            .destination
                            .replace("{module}", &op.module)
                            .replace("{operation_id}", &op.operation_id)
                            .replace("{fn_name}", unraw(&op.fn_name));
                        files.insert(destination, self.render_file(&file.source, context)?)?;
                    }
                }
            }
        }

        log::debug!("Rendered {} files", files.len());
        Ok(files)
    }

    /// Merge base context with file context, giving precedence to file context keys
    pub fn create_file_context(
        &self,
        base_context: &JsonValue,
        file: &TemplateFile,
        item: Option<(&str, JsonValue)>,
    ) -> Result<Context> {
        let mut context = match &file.context {
            JsonValue::Object(file_ctx) => file_ctx.clone(),
            _ => Map::new(),
        };
        if let JsonValue::Object(base_map) = base_context {
            for (k, v) in base_map {
                if !context.contains_key(k) {
                    context.insert(k.clone(), v.clone());
                }
            }
        }
        if let Some((key, value)) = item {
            context.insert(key.to_string(), value);
        }
        Ok(Context::from_value(JsonValue::Object(context))?)
    }

    fn render_file(&self, template_name: &str, context: Context) -> Result<String> {
        log::debug!("Rendering template: {}", template_name);
        self.tera.render(template_name, &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", template_name, e);
            Error::template(format!(
                "Failed to render template '{}': {}",
                template_name,
                error_chain(&e)
            ))
        })
    }
}

/// Case conversion filters available to every template.
fn register_filters(tera: &mut Tera) {
    tera.register_filter("snake_case", case_filter(to_snake_case));
    tera.register_filter("pascal_case", case_filter(to_upper_camel_case));
    tera.register_filter("camel_case", case_filter(to_lower_camel_case));
}

fn case_filter(convert: fn(&str) -> String) -> impl tera::Filter {
    move |value: &JsonValue, _: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
        let text = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("case filters apply to strings"))?;
        Ok(JsonValue::String(convert(text)))
    }
}

/// Tera nests the useful message in the error's sources.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
