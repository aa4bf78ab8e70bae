//! Renders the shared fixture document with the built-in `rust_reqwest`
//! templates and writes it to `$OUT_DIR/api.rs` as one inline `api` module.

// Internal imports (std, crate)
use std::error::Error;
use std::path::PathBuf;

// External imports (alphabetized)
use keelgen_core::{render, Config, GeneratedFiles};

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let document = manifest_dir.join("../../tests/fixtures/openapi/keel.openapi.yaml");
    println!("cargo:rerun-if-changed={}", document.display());
    println!("cargo:rerun-if-changed=../keelgen-core/templates");

    let config = Config::new(
        "keel",
        document.display().to_string(),
        out_dir.join("api").display().to_string(),
    );
    let files = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(render(&config))?;

    std::fs::write(out_dir.join("api.rs"), inline_modules(&files)?)?;
    Ok(())
}

/// `mod.rs` with every `pub mod x;` replaced by the body of `x.rs`, wrapped
/// in `pub mod api { .. }` so it can be pulled in with `include!`.
fn inline_modules(files: &GeneratedFiles) -> Result<String, Box<dyn Error>> {
    let root = files.get("mod.rs").ok_or("mod.rs was not rendered")?;
    let mut source = String::from("pub mod api {\n");
    for line in root.lines() {
        match line.strip_prefix("pub mod ").and_then(|rest| rest.strip_suffix(';')) {
            Some(module) => {
                let file = format!("{}.rs", module.trim_start_matches("r#"));
                let body = files
                    .get(&file)
                    .ok_or_else(|| format!("{file} was not rendered"))?;
                source.push_str(&format!("pub mod {module} {{\n{body}\n}}\n"));
            }
            None => {
                source.push_str(line);
                source.push('\n');
            }
        }
    }
    source.push_str("}\n");
    Ok(source)
}
