//! Rendered output: formatting, atomic writes and drift detection.
//!
//! [`GeneratedFiles`] holds every file of one generation run keyed by its
//! path relative to the output directory. Nothing touches the disk until
//! [`GeneratedFiles::write_all`], which swaps the whole directory at once so
//! a failed run never leaves a half-written client behind. Every written
//! directory carries a [`MARKER_FILE`]; a non-empty directory without one is
//! never replaced.

// Internal imports (std, crate)
use std::{
    collections::{btree_map, BTreeMap, BTreeSet},
    fmt,
    path::{Component, Path, PathBuf},
};

use crate::{Error, Result};

// External imports (alphabetized)
use tokio::fs;

/// Marks a directory as keelgen output that later runs may replace.
pub const MARKER_FILE: &str = ".keelgen";

/// Files produced by one generation run, sorted by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: BTreeMap<String, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Paths must be relative, stay inside the output directory
    /// and be unique within the run.
    pub fn insert(&mut self, path: String, content: String) -> Result<()> {
        let relative = Path::new(&path);
        if path.is_empty()
            || relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::template(format!(
                "output path '{}' must be relative to the output directory",
                path
            )));
        }
        if path == MARKER_FILE {
            return Err(Error::template(format!("output path '{}' is reserved", path)));
        }
        match self.files.entry(path) {
            btree_map::Entry::Occupied(entry) => Err(Error::template(format!(
                "more than one template renders '{}'",
                entry.key()
            ))),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(content);
                Ok(())
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parse every `.rs` file and print it back in canonical layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOutput`] naming the first file that does not
    /// parse.
    pub fn format_rust(&mut self) -> Result<()> {
        for (path, content) in self.files.iter_mut() {
            if !path.ends_with(".rs") {
                continue;
            }
            let file = syn::parse_file(content.as_str()).map_err(|e| Error::InvalidOutput {
                file: path.clone(),
                message: e.to_string(),
            })?;
            *content = prettyplease::unparse(&file);
        }
        Ok(())
    }

    /// Replace `output_dir` with exactly these files.
    ///
    /// The files are staged in a sibling directory first and swapped in with
    /// renames; if the swap fails the previous contents are restored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] without touching anything when `output_dir`
    /// is a file, or a non-empty directory that holds no [`MARKER_FILE`].
    pub async fn write_all(&self, output_dir: &Path) -> Result<()> {
        let (staging, backup) = sibling_dirs(output_dir)?;
        ensure_replaceable(output_dir).await?;

        if fs::try_exists(&staging).await? {
            fs::remove_dir_all(&staging).await?;
        }
        if let Err(e) = self.write_tree(&staging).await {
            discard(&staging).await;
            return Err(e);
        }

        let had_previous = fs::try_exists(output_dir).await?;
        if had_previous {
            if fs::try_exists(&backup).await? {
                fs::remove_dir_all(&backup).await?;
            }
            if let Err(e) = fs::rename(output_dir, &backup).await {
                discard(&staging).await;
                return Err(e.into());
            }
        }

        if let Err(e) = fs::rename(&staging, output_dir).await {
            if had_previous {
                if let Err(restore) = fs::rename(&backup, output_dir).await {
                    log::warn!(
                        "Could not restore {} from {}: {}",
                        output_dir.display(),
                        backup.display(),
                        restore
                    );
                }
            }
            discard(&staging).await;
            return Err(e.into());
        }

        if had_previous {
            discard(&backup).await;
        }
        log::info!("Wrote {} files to {}", self.len(), output_dir.display());
        Ok(())
    }

    async fn write_tree(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(root).await?;
        for (path, content) in &self.files {
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await?;
            }
            log::debug!("Writing {}", target.display());
            fs::write(&target, content).await?;
        }
        fs::write(root.join(MARKER_FILE), self.marker()).await?;
        Ok(())
    }

    fn marker(&self) -> String {
        let mut marker = String::from(
            "# Generated by keelgen. This directory is replaced on every run.\n",
        );
        for path in self.files.keys() {
            marker.push_str(path);
            marker.push('\n');
        }
        marker
    }

    /// Compare these files with what is on disk under `output_dir`.
    pub async fn diff(&self, output_dir: &Path) -> Result<DriftReport> {
        let mut report = DriftReport::default();

        for (path, content) in &self.files {
            match fs::read(output_dir.join(path)).await {
                Ok(existing) if existing == content.as_bytes() => {}
                Ok(_) => report.changed.push(path.clone()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    report.missing.push(path.clone())
                }
                Err(e) => return Err(e.into()),
            }
        }

        if fs::try_exists(output_dir).await? {
            let root = output_dir.to_path_buf();
            let on_disk = tokio::task::spawn_blocking(move || list_files(&root))
                .await
                .map_err(|e| Error::template(format!("Failed to list output files: {}", e)))??;
            report.extra = on_disk
                .into_iter()
                .filter(|path| path != MARKER_FILE && !self.files.contains_key(path))
                .collect();
        }

        Ok(report)
    }
}

/// Differences between a fresh render and an output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// Files the generator would create
    pub missing: Vec<String>,
    /// Files whose content differs
    pub changed: Vec<String>,
    /// Files the generator would delete
    pub extra: Vec<String>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.changed.is_empty() && self.extra.is_empty()
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "generated client is up to date");
        }
        let sections = [
            ("missing", &self.missing),
            ("changed", &self.changed),
            ("extra", &self.extra),
        ];
        let mut first = true;
        for (label, paths) in sections {
            for path in paths {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "{}: {}", label, path)?;
            }
        }
        Ok(())
    }
}

fn sibling_dirs(output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = output_dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::config(format!(
                "Output directory '{}' has no usable name",
                output_dir.display()
            ))
        })?;
    let parent = output_dir.parent().unwrap_or_else(|| Path::new(""));
    Ok((
        parent.join(format!(".{}.keelgen-staging", name)),
        parent.join(format!(".{}.keelgen-backup", name)),
    ))
}

/// Only a missing, empty or previously generated directory may be replaced.
async fn ensure_replaceable(output_dir: &Path) -> Result<()> {
    let metadata = match fs::metadata(output_dir).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Err(Error::config(format!(
            "Output path '{}' is not a directory",
            output_dir.display()
        )));
    }
    if fs::try_exists(output_dir.join(MARKER_FILE)).await? {
        return Ok(());
    }
    let mut entries = fs::read_dir(output_dir).await?;
    if entries.next_entry().await?.is_some() {
        return Err(Error::config(format!(
            "Output directory '{}' is not empty and has no {} marker; refusing to replace it",
            output_dir.display(),
            MARKER_FILE
        )));
    }
    Ok(())
}

async fn discard(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("Could not remove {}: {}", dir.display(), e);
        }
    }
}

/// Every file below `root` as a `/`-separated relative path, sorted.
fn list_files(root: &Path) -> std::io::Result<BTreeSet<String>> {
    let mut found = BTreeSet::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                found.insert(parts.join("/"));
            }
        }
    }
    Ok(found)
}
