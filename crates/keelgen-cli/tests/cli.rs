//! End-to-end tests for the keelgen binary

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// External imports (alphabetized)
use anyhow::{Context, Result};
use tempfile::tempdir;

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .context("Failed to determine project root directory")
}

fn fixture() -> Result<PathBuf> {
    Ok(project_root()?.join("tests/fixtures/openapi/keel.openapi.yaml"))
}

fn keelgen(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_keelgen"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .context("Failed to run keelgen")
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn command<'a>(name: &'a str, args: &[&'a str]) -> Vec<&'a str> {
    let mut full = vec![name];
    full.extend_from_slice(args);
    full
}

#[test]
fn test_generate_then_check() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("api");
    let schema = path_arg(&fixture()?);
    let output_arg = path_arg(&output);
    let args = ["--schema-path", schema.as_str(), "--output-dir", output_arg.as_str()];

    let run = keelgen(&command("generate", &args))?;
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
    assert!(String::from_utf8_lossy(&run.stdout).contains("Generated 4 files"));
    for file in ["mod.rs", "models.rs", "health.rs", "users.rs"] {
        assert!(output.join(file).is_file(), "missing {file}");
    }

    let clean = keelgen(&command("check", &args))?;
    assert!(clean.status.success());

    std::fs::write(output.join("users.rs"), "// edited\n")?;
    let drift = keelgen(&command("check", &args))?;
    assert_eq!(drift.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&drift.stdout).contains("changed: users.rs"));
    Ok(())
}

#[test]
fn test_config_file_with_flag_override() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("client");
    let config = dir.path().join("keelgen.yaml");
    std::fs::write(
        &config,
        format!(
            "project_name: keel\nopenapi_schema_path: {}\noutput_dir: {}\nexclude_operations: [healthCheck]\n",
            path_arg(&fixture()?),
            path_arg(&dir.path().join("unused"))
        ),
    )?;

    let run = keelgen(&[
        "generate",
        "--config",
        &path_arg(&config),
        "--output-dir",
        &path_arg(&output),
        "--emit-schemas",
    ])?;
    assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
    assert!(output.join("users.rs").is_file());
    assert!(output.join("schemas/list_users.json").is_file());
    assert!(!output.join("health.rs").exists());
    assert!(!dir.path().join("unused").exists());
    Ok(())
}

#[test]
fn test_schema_path_is_required() -> Result<()> {
    let run = keelgen(&["generate"])?;
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("--schema-path"));
    Ok(())
}

#[test]
fn test_invalid_template_kind() -> Result<()> {
    let dir = tempdir()?;
    let run = keelgen(&[
        "generate",
        "--schema-path",
        &path_arg(&fixture()?),
        "--output-dir",
        &path_arg(&dir.path().join("api")),
        "--template-kind",
        "rust_axum",
    ])?;
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("Invalid template 'rust_axum'"));
    assert!(!dir.path().join("api").exists());
    Ok(())
}
