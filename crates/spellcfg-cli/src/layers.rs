//! Loading settings layers from files.
//!
//! A layer file is JSON, or YAML when the extension is `.yaml`/`.yml`. Its
//! top level is either a raw settings object (`{"words": [...]}`) or host
//! storage entries (`{"cSpell.words": [...]}`), detected by the key prefix.
//! Fields with a malformed value are dropped and reported by the merge.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use spellcfg_core::{SETTINGS_NAMESPACE, SettingsLayer, SettingsTier};
use std::path::Path;

/// Parse layer text. `origin` names the source in error messages.
pub fn parse_layer(text: &str, origin: &Path, tier: SettingsTier) -> Result<SettingsLayer> {
    let value: Value = if is_yaml(origin) {
        serde_yaml::from_str(text)
            .with_context(|| format!("Failed to parse YAML settings: {}", origin.display()))?
    } else {
        serde_json::from_str(text)
            .with_context(|| format!("Failed to parse JSON settings: {}", origin.display()))?
    };

    let Value::Object(object) = value else {
        bail!("Settings file must contain an object: {}", origin.display());
    };

    let prefix = format!("{}.", SETTINGS_NAMESPACE);
    let layer = if object.keys().any(|key| key.starts_with(&prefix)) {
        tracing::debug!(origin = %origin.display(), "reading host storage entries");
        SettingsLayer::from_host_entries(tier, object.iter().map(|(k, v)| (k.as_str(), v)))
    } else {
        SettingsLayer::from_value(tier, Value::Object(object))
    };
    layer.with_context(|| format!("Invalid settings in {}", origin.display()))
}

/// Read and parse one layer file.
pub fn load_layer(path: &Path, tier: SettingsTier) -> Result<SettingsLayer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let layer = parse_layer(&text, path, tier)?;
    tracing::debug!(
        tier = %tier,
        path = %path.display(),
        dropped = layer.diagnostics.len(),
        "loaded settings layer"
    );
    Ok(layer)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json_layer() {
        let layer =
            parse_layer(r#"{"words": ["ferris"]}"#, Path::new("user.json"), SettingsTier::User)
                .unwrap();
        assert_eq!(layer.settings.words, Some(vec!["ferris".to_string()]));
        assert!(layer.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_yaml_layer() {
        let text = "words:\n  - ferris\ncustomDictionaries:\n  team-words: true\n";
        let layer = parse_layer(text, Path::new("workspace.yml"), SettingsTier::Workspace).unwrap();
        assert_eq!(layer.settings.words, Some(vec!["ferris".to_string()]));
        assert!(layer.settings.custom_dictionaries.is_some());
    }

    #[test]
    fn test_parse_host_entries_layer() {
        let text = r#"{"cSpell.words": ["ferris"], "editor.fontSize": 12}"#;
        let layer = parse_layer(text, Path::new("settings.json"), SettingsTier::User).unwrap();
        assert_eq!(layer.settings.words, Some(vec!["ferris".to_string()]));
    }

    #[test]
    fn test_parse_drops_malformed_fields() {
        let text = r#"{"cSpell.checkLimit": "big", "cSpell.words": ["ferris"]}"#;
        let layer = parse_layer(text, Path::new("settings.json"), SettingsTier::User).unwrap();
        assert_eq!(layer.settings.check_limit, None);
        assert_eq!(layer.settings.words, Some(vec!["ferris".to_string()]));
        assert_eq!(layer.diagnostics.len(), 1);
        assert_eq!(layer.diagnostics[0].subject, "checkLimit");
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_layer("[1, 2]", Path::new("bad.json"), SettingsTier::User).unwrap_err();
        assert!(err.to_string().contains("must contain an object"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_layer(Path::new("/nonexistent/user.json"), SettingsTier::User).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_load_layer_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"enabled: false\n").unwrap();
        file.flush().unwrap();

        let layer = load_layer(file.path(), SettingsTier::Folder).unwrap();
        assert_eq!(layer.tier, SettingsTier::Folder);
        assert_eq!(layer.settings.enabled, Some(false));
    }
}
