//! Manifest file format for keelgen templates.
//!
//! A manifest (`manifest.yaml` or `manifest.toml`) lists the files a template
//! renders and where each one lands in the output directory.
//!
//! ```yaml
//! name: rust_reqwest
//! description: Typed async client
//! version: 0.1.0
//! language: rust
//! files:
//!   - source: mod.rs.tera
//!     destination: mod.rs
//!   - source: module.rs.tera
//!     destination: "{module}.rs"
//!     for_each: module
//! ```

use serde::{Deserialize, Serialize};
use tokio::fs;

/// The root manifest structure for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// The name of the template
    pub name: String,

    /// A short description of what the template generates
    #[serde(default)]
    pub description: String,

    /// The version of the template (should follow semantic versioning)
    #[serde(default = "default_version")]
    pub version: String,

    /// The target programming language
    #[serde(default = "default_language")]
    pub language: String,

    /// List of files to generate
    #[serde(default)]
    pub files: Vec<TemplateFile>,
}

/// Describes a single file to be generated from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Path to the template file, relative to the template directory
    pub source: String,

    /// Destination path relative to the output directory. `{module}`,
    /// `{operation_id}` and `{fn_name}` are replaced per item when
    /// `for_each` is set.
    pub destination: String,

    /// Render once per module or once per operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_each: Option<ForEach>,

    /// Extra context; its keys win over the generated ones
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub context: serde_json::Value,
}

/// Repetition directive of a [`TemplateFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForEach {
    Module,
    Operation,
}

impl Default for TemplateManifest {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            description: String::from("Default template"),
            version: default_version(),
            language: default_language(),
            files: Vec::new(),
        }
    }
}

impl TemplateManifest {
    /// Parse a YAML manifest.
    pub fn from_yaml_str(content: &str) -> Result<Self, crate::Error> {
        serde_yaml::from_str(content)
            .map_err(|e| crate::Error::Template(format!("Invalid YAML in template manifest: {}", e)))
    }

    /// Load the manifest of a template directory, trying YAML then TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if neither file exists, can't be read, or doesn't parse.
    pub async fn load_from_dir(template_dir: &std::path::Path) -> Result<Self, crate::Error> {
        let yaml_path = template_dir.join("manifest.yaml");
        let toml_path = template_dir.join("manifest.toml");

        if fs::try_exists(&yaml_path).await? {
            log::debug!("Reading template manifest from {}", yaml_path.display());
            let content = fs::read_to_string(&yaml_path).await?;
            return serde_yaml::from_str(&content).map_err(|e| {
                crate::Error::Template(format!(
                    "Invalid YAML in template manifest at {}: {}",
                    yaml_path.display(),
                    e
                ))
            });
        }

        if fs::try_exists(&toml_path).await? {
            log::debug!("Reading template manifest from {}", toml_path.display());
            let content = fs::read_to_string(&toml_path).await?;
            return toml::from_str(&content).map_err(|e| {
                crate::Error::Template(format!(
                    "Invalid TOML in template manifest at {}: {}",
                    toml_path.display(),
                    e
                ))
            });
        }

        Err(crate::Error::Template(format!(
            "No manifest.yaml or manifest.toml in {}",
            template_dir.display()
        )))
    }
}

fn default_version() -> String {
    String::from("0.1.0")
}

fn default_language() -> String {
    String::from("rust")
}
