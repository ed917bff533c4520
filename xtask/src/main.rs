//! Developer tasks (schema generation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Project root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

/// Default output directory for emitted schemas.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_request_schema() -> schemars::Schema {
    schema_for!(attendguard_types::EligibilityRequest)
}

fn generate_result_schema() -> schemars::Schema {
    schema_for!(attendguard_types::EligibilityResult)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(attendguard_settings::AttendguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "attendguard.request.v1.json",
            generate: generate_request_schema,
        },
        SchemaSpec {
            filename: "attendguard.result.v1.json",
            generate: generate_result_schema,
        },
        SchemaSpec {
            filename: "attendguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Check that the schemas in `dir` match what would be generated.
fn validate_schemas(dir: &Path) -> anyhow::Result<()> {
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            _ => stale.push(spec.filename),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    eprintln!("Missing or out of date schemas:");
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo run -p xtask -- emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every reason code must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for code in attendguard_types::explain::all_codes() {
        match attendguard_types::lookup_explanation(code) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Code '{code}' has empty title"));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Code '{code}' has empty description"));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Code '{code}' has empty remediation"));
                }
            }
            None => errors.push(format!("Code '{code}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!(
            "All {} codes are explained.",
            attendguard_types::explain::all_codes().len()
        );
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("{} explain coverage error(s)", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                    Show this message");
    eprintln!("  emit-schemas [DIR]      Generate JSON schemas from Rust types (default: schemas/)");
    eprintln!("  validate-schemas [DIR]  Check that DIR matches generated output (for CI)");
    eprintln!("  print-schema-ids        Print known schema IDs");
    eprintln!("  explain-coverage        Validate all reason codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let dir = args.get(2).map(PathBuf::from).unwrap_or_else(schemas_dir);

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(&dir),
        "validate-schemas" => validate_schemas(&dir),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
