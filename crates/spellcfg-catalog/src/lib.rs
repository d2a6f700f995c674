//! Built-in data for spellcfg - spell-checker settings resolution.
//!
//! This crate carries the tables the engine treats as external collaborators:
//! the setting descriptor table (host key, scope, default, deprecation) and
//! the catalog of predefined dictionaries and regular expression patterns.
//! Everything is generated from `catalog.json` at build time.
//!
//! # Usage
//!
//! ```
//! use spellcfg_catalog::{SETTINGS_DATA, find_setting};
//!
//! for setting in SETTINGS_DATA {
//!     println!("{}.{} ({})", spellcfg_catalog::NAMESPACE, setting.field, setting.scope);
//! }
//! assert_eq!(find_setting("checkLimit").map(|s| s.scope), Some("resource"));
//! ```

/// One row of the setting descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingData {
    /// Canonical field name, without the namespace prefix.
    pub field: &'static str,
    /// One of `application`, `window`, `resource`, `language-overridable`.
    pub scope: &'static str,
    /// Default value as JSON text.
    pub default_json: Option<&'static str>,
    /// Deprecation message, set for legacy fields.
    pub deprecation: Option<&'static str>,
    /// Hidden fields are accepted but not advertised in the schema.
    pub hidden: bool,
}

// Include the auto-generated tables from build.rs
include!(concat!(env!("OUT_DIR"), "/catalog_data.rs"));

/// Returns the number of setting descriptors.
pub fn setting_count() -> usize {
    SETTINGS_DATA.len()
}

/// Looks up a setting descriptor by its canonical field name.
pub fn find_setting(field: &str) -> Option<&'static SettingData> {
    SETTINGS_DATA.iter().find(|setting| setting.field == field)
}

/// Looks up a predefined dictionary, returning `(path, description)`.
pub fn find_dictionary(name: &str) -> Option<(&'static str, &'static str)> {
    DICTIONARIES_DATA
        .iter()
        .find(|(dict_name, _, _)| *dict_name == name)
        .map(|(_, path, description)| (*path, *description))
}

/// Looks up a predefined pattern body by name.
pub fn find_pattern(name: &str) -> Option<&'static str> {
    PATTERNS_DATA
        .iter()
        .find(|(pattern_name, _)| *pattern_name == name)
        .map(|(_, pattern)| *pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_data_not_empty() {
        assert!(!SETTINGS_DATA.is_empty(), "SETTINGS_DATA should not be empty");
        assert_eq!(setting_count(), SETTINGS_DATA.len());
    }

    #[test]
    fn test_namespace() {
        assert_eq!(NAMESPACE, "cSpell");
    }

    #[test]
    fn test_find_setting_exists() {
        let setting = find_setting("checkLimit").expect("checkLimit should exist");
        assert_eq!(setting.scope, "resource");
        assert_eq!(setting.default_json, Some("500"));
        assert!(setting.deprecation.is_none());
    }

    #[test]
    fn test_find_setting_not_exists() {
        assert!(find_setting("noSuchSetting").is_none());
    }

    #[test]
    fn test_legacy_dictionary_fields_are_deprecated() {
        for field in [
            "customUserDictionaries",
            "customWorkspaceDictionaries",
            "customFolderDictionaries",
        ] {
            let setting = find_setting(field).unwrap();
            assert!(setting.deprecation.is_some(), "{} should be deprecated", field);
        }
        assert!(find_setting("customDictionaries").unwrap().deprecation.is_none());
    }

    #[test]
    fn test_defaults_are_valid_json() {
        for setting in SETTINGS_DATA {
            if let Some(default) = setting.default_json {
                assert!(
                    serde_json::from_str::<serde_json::Value>(default).is_ok(),
                    "default of {} should be valid JSON: {}",
                    setting.field,
                    default
                );
            }
        }
    }

    #[test]
    fn test_no_duplicate_dictionary_or_pattern_names() {
        let mut names: Vec<&str> = DICTIONARIES_DATA.iter().map(|(n, _, _)| *n).collect();
        let len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), len, "Should have no duplicate dictionary names");

        let mut names: Vec<&str> = PATTERNS_DATA.iter().map(|(n, _)| *n).collect();
        let len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), len, "Should have no duplicate pattern names");
    }

    #[test]
    fn test_find_dictionary_and_pattern() {
        let (path, _) = find_dictionary("typescript").expect("typescript should exist");
        assert!(path.ends_with("typescript.txt"));
        assert!(find_pattern("string").is_some());
        assert!(find_pattern("nope").is_none());
    }
}
