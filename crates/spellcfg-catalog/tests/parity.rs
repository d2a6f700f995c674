//! Tests to ensure the compiled tables stay in sync with catalog.json.

use std::fs;
use std::path::Path;

fn load_catalog() -> serde_json::Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("catalog.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

#[test]
fn test_settings_parity() {
    let catalog = load_catalog();
    let settings = catalog["settings"].as_array().unwrap();

    assert_eq!(
        settings.len(),
        spellcfg_catalog::SETTINGS_DATA.len(),
        "catalog.json and SETTINGS_DATA differ in length; rebuild the crate"
    );

    for (json, data) in settings.iter().zip(spellcfg_catalog::SETTINGS_DATA) {
        assert_eq!(json["field"].as_str(), Some(data.field));
        assert_eq!(json["scope"].as_str(), Some(data.scope));
        match (json.get("default"), data.default_json) {
            (Some(expected), Some(actual)) => {
                let actual: serde_json::Value = serde_json::from_str(actual).unwrap();
                assert_eq!(expected, &actual, "default mismatch for {}", data.field);
            }
            (None, None) => {}
            other => panic!("default presence mismatch for {}: {:?}", data.field, other),
        }
    }
}

#[test]
fn test_pattern_parity() {
    let catalog = load_catalog();
    let patterns = catalog["patterns"].as_array().unwrap();
    assert_eq!(patterns.len(), spellcfg_catalog::PATTERNS_DATA.len());

    for (json, (name, body)) in patterns.iter().zip(spellcfg_catalog::PATTERNS_DATA) {
        assert_eq!(json["name"].as_str(), Some(*name));
        assert_eq!(json["pattern"].as_str(), Some(*body));
    }
}

#[test]
fn test_dictionary_parity() {
    let catalog = load_catalog();
    let dictionaries = catalog["dictionaries"].as_array().unwrap();
    assert_eq!(dictionaries.len(), spellcfg_catalog::DICTIONARIES_DATA.len());

    for (json, (name, path, _)) in dictionaries
        .iter()
        .zip(spellcfg_catalog::DICTIONARIES_DATA)
    {
        assert_eq!(json["name"].as_str(), Some(*name));
        assert_eq!(json["path"].as_str(), Some(*path));
    }
}
