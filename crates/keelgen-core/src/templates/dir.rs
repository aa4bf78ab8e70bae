//! Unified handling of template directory resolution

use std::io;
use std::path::{Path, PathBuf};

use super::TemplateKind;

const MANIFEST_FILES: &[&str] = &["manifest.yaml", "manifest.toml"];

/// Represents a template directory with resolved paths and validation
#[derive(Debug, Clone)]
pub struct TemplateDir {
    /// Root directory containing the templates
    root_dir: PathBuf,
    /// Path to the specific template directory
    template_path: PathBuf,
    /// The template kind
    kind: TemplateKind,
}

impl TemplateDir {
    /// Create a new TemplateDir with explicit paths
    pub fn new(root_dir: PathBuf, template_path: PathBuf, kind: TemplateKind) -> Self {
        Self {
            root_dir,
            template_path,
            kind,
        }
    }

    /// Returns a displayable version of the template path
    pub fn display(&self) -> std::path::Display<'_> {
        self.template_path.display()
    }

    /// Resolve the template directory for `kind`.
    ///
    /// An explicit directory is used as is when it holds a manifest, and
    /// otherwise must contain a `{kind}` subdirectory. Without one the
    /// standard locations are searched.
    pub fn discover(kind: TemplateKind, custom_dir: Option<&Path>) -> io::Result<Self> {
        if let Some(dir) = custom_dir {
            if !dir.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Template directory not found: {}", dir.display()),
                ));
            }
            if has_manifest(dir) {
                let root_dir = dir.parent().map(Path::to_path_buf).unwrap_or_default();
                return Ok(Self::new(root_dir, dir.to_path_buf(), kind));
            }
        }

        let root_dir = match custom_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::find_template_base_dir(kind).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "Could not find a '{}' template directory in any standard location",
                        kind
                    ),
                )
            })?,
        };

        let template_path = root_dir.join(kind.as_str());
        if !template_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", template_path.display()),
            ));
        }

        Ok(Self::new(root_dir, template_path, kind))
    }

    /// Find a directory whose `{kind}` subdirectory holds templates
    fn find_template_base_dir(kind: TemplateKind) -> Option<PathBuf> {
        let mut candidates = Vec::new();

        // 1. Environment variable
        if let Ok(dir) = std::env::var("KEELGEN_TEMPLATE_DIR") {
            candidates.push(PathBuf::from(dir));
        }

        // 2. Project templates directory
        candidates.push(PathBuf::from("templates"));

        // 3. The user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(home_dir.join(".keelgen").join("templates"));
        }

        candidates
            .into_iter()
            .find(|dir| dir.join(kind.as_str()).is_dir())
    }

    /// Get the root directory containing the templates
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the template kind
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Get the path to the specific template directory
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Check if the template directory exists
    pub fn exists(&self) -> bool {
        self.template_path.exists()
    }
}

fn has_manifest(dir: &Path) -> bool {
    MANIFEST_FILES.iter().any(|name| dir.join(name).is_file())
}
