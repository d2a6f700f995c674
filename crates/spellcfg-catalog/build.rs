//! Build script for spellcfg-catalog.
//!
//! Generates Rust tables from catalog.json at compile time, so the mapping
//! from setting field to host key, scope and default never has to be
//! derived at runtime.

use std::env;
use std::fs;
use std::path::Path;

/// Maximum allowed file size for catalog.json (1 MB)
const MAX_CATALOG_FILE_SIZE: u64 = 1024 * 1024;

const KNOWN_SCOPES: &[&str] = &["application", "window", "resource", "language-overridable"];

// Escape special characters for a Rust string literal
fn escape_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn optional_literal(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("Some(\"{}\")", escape_str(s)),
        None => "None".to_string(),
    }
}

// Setting fields are camelCase identifiers, optionally dotted (experimental.enableRegexpView)
fn is_valid_field(field: &str) -> bool {
    !field.is_empty()
        && field.len() <= 64
        && field
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= 128 && !name.chars().any(|c| c.is_control())
}

fn required_str<'a>(entry: &'a serde_json::Value, key: &str, section: &str, idx: usize) -> &'a str {
    entry[key]
        .as_str()
        .unwrap_or_else(|| panic!("{}[{}] must have string '{}' field", section, idx, key))
}

fn generate_settings(catalog: &serde_json::Value, out: &mut String) {
    let settings = catalog["settings"]
        .as_array()
        .expect("catalog.json must have a 'settings' array");

    out.push_str("/// Setting descriptors in declaration order.\n");
    out.push_str("pub const SETTINGS_DATA: &[SettingData] = &[\n");

    let mut seen = std::collections::HashSet::new();
    for (idx, setting) in settings.iter().enumerate() {
        let field = required_str(setting, "field", "settings", idx);
        let scope = required_str(setting, "scope", "settings", idx);

        if !is_valid_field(field) {
            panic!("settings[{}] has invalid field '{}'", idx, field);
        }
        if !KNOWN_SCOPES.contains(&scope) {
            panic!(
                "settings[{}] '{}' has unknown scope '{}' (expected one of {:?})",
                idx, field, scope, KNOWN_SCOPES
            );
        }
        if !seen.insert(field.to_string()) {
            panic!("settings[{}] duplicates field '{}'", idx, field);
        }

        let default_json = setting
            .get("default")
            .map(|v| serde_json::to_string(v).expect("default must serialize"));
        let deprecation = setting.get("deprecation").and_then(|v| v.as_str());
        let hidden = setting
            .get("hidden")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        out.push_str(&format!(
            "    SettingData {{ field: \"{}\", scope: \"{}\", default_json: {}, deprecation: {}, hidden: {} }},\n",
            escape_str(field),
            scope,
            optional_literal(default_json.as_deref()),
            optional_literal(deprecation),
            hidden
        ));
    }

    out.push_str("];\n\n");
}

fn generate_dictionaries(catalog: &serde_json::Value, out: &mut String) {
    let dictionaries = catalog["dictionaries"]
        .as_array()
        .expect("catalog.json must have a 'dictionaries' array");

    out.push_str("/// Predefined dictionaries as (name, path, description) tuples.\n");
    out.push_str("pub const DICTIONARIES_DATA: &[(&str, &str, &str)] = &[\n");
    for (idx, dict) in dictionaries.iter().enumerate() {
        let name = required_str(dict, "name", "dictionaries", idx);
        let path = required_str(dict, "path", "dictionaries", idx);
        let description = dict["description"].as_str().unwrap_or("");
        if !is_valid_name(name) {
            panic!("dictionaries[{}] has invalid name '{}'", idx, name);
        }
        out.push_str(&format!(
            "    (\"{}\", \"{}\", \"{}\"),\n",
            escape_str(name),
            escape_str(path),
            escape_str(description)
        ));
    }
    out.push_str("];\n\n");
}

fn generate_patterns(catalog: &serde_json::Value, out: &mut String) {
    let patterns = catalog["patterns"]
        .as_array()
        .expect("catalog.json must have a 'patterns' array");

    out.push_str("/// Predefined regular expression patterns as (name, pattern) tuples.\n");
    out.push_str("pub const PATTERNS_DATA: &[(&str, &str)] = &[\n");
    for (idx, pattern) in patterns.iter().enumerate() {
        let name = required_str(pattern, "name", "patterns", idx);
        let body = required_str(pattern, "pattern", "patterns", idx);
        if !is_valid_name(name) {
            panic!("patterns[{}] has invalid name '{}'", idx, name);
        }
        out.push_str(&format!(
            "    (\"{}\", \"{}\"),\n",
            escape_str(name),
            escape_str(body)
        ));
    }
    out.push_str("];\n");
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let catalog_path = Path::new(&manifest_dir).join("catalog.json");
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let file_size = fs::metadata(&catalog_path)
        .unwrap_or_else(|e| panic!("Failed to get metadata for {}: {}", catalog_path.display(), e))
        .len();
    if file_size > MAX_CATALOG_FILE_SIZE {
        panic!(
            "catalog.json at {} is too large ({} bytes, max {} bytes)",
            catalog_path.display(),
            file_size,
            MAX_CATALOG_FILE_SIZE
        );
    }

    let catalog_json = fs::read_to_string(&catalog_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read catalog.json at {}: {}",
            catalog_path.display(),
            e
        )
    });
    let catalog: serde_json::Value = serde_json::from_str(&catalog_json).unwrap_or_else(|e| {
        panic!(
            "Failed to parse catalog.json at {}: {}",
            catalog_path.display(),
            e
        )
    });

    let namespace = catalog["namespace"]
        .as_str()
        .expect("catalog.json must have a string 'namespace'");

    let mut generated_code = String::new();
    generated_code.push_str("// Auto-generated from catalog.json by build.rs\n");
    generated_code.push_str("// Do not edit manually!\n\n");
    generated_code.push_str("/// Namespace prefix of every host settings key.\n");
    generated_code.push_str(&format!(
        "pub const NAMESPACE: &str = \"{}\";\n\n",
        escape_str(namespace)
    ));
    generate_settings(&catalog, &mut generated_code);
    generate_dictionaries(&catalog, &mut generated_code);
    generate_patterns(&catalog, &mut generated_code);

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("catalog_data.rs");
    fs::write(&dest_path, generated_code).expect("Failed to write generated catalog");
}
