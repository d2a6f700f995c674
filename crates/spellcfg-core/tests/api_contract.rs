//! API contract tests for spellcfg-core.
//!
//! These tests catch accidental public API breakage by verifying that the
//! documented public types, functions, and trait implementations remain
//! importable and have the expected shape.

use std::collections::BTreeSet;

// ============================================================================
// Public type importability
// ============================================================================

#[test]
fn public_types_are_importable() {
    // Settings model
    let _ = std::any::type_name::<spellcfg_core::CSpellUserSettings>();
    let _ = std::any::type_name::<spellcfg_core::CanonicalSettings>();
    let _ = std::any::type_name::<spellcfg_core::SettingsLayer>();
    let _ = std::any::type_name::<spellcfg_core::SettingsTier>();
    let _ = std::any::type_name::<spellcfg_core::SettingScope>();
    let _ = std::any::type_name::<spellcfg_core::SettingDescriptor>();
    let _ = std::any::type_name::<spellcfg_core::CustomDictionary>();
    let _ = std::any::type_name::<spellcfg_core::CustomDictionaryEntry>();
    let _ = std::any::type_name::<spellcfg_core::CustomDictionaries>();
    let _ = std::any::type_name::<spellcfg_core::DictionarySourceEntry>();
    let _ = std::any::type_name::<spellcfg_core::DictionaryDefinition>();
    let _ = std::any::type_name::<spellcfg_core::GlobEntry>();
    let _ = std::any::type_name::<spellcfg_core::RegExpPatternDefinition>();

    // Resolution outputs
    let _ = std::any::type_name::<spellcfg_core::ResolvedSettings>();
    let _ = std::any::type_name::<spellcfg_core::Resolution>();
    let _ = std::any::type_name::<spellcfg_core::ResolvedDictionary>();
    let _ = std::any::type_name::<spellcfg_core::NormalizedPatterns>();
    let _ = std::any::type_name::<spellcfg_core::ResolveDiagnostic>();

    // Errors
    let _ = std::any::type_name::<spellcfg_core::SettingsError>();
    let _ = std::any::type_name::<spellcfg_core::SettingsResult<()>>();
    let _ = std::any::type_name::<spellcfg_core::AccessError>();
    let _ = std::any::type_name::<spellcfg_core::FsError>();

    // Trait objects
    fn _assert_accessor_trait(_: &dyn spellcfg_core::FileAccessor) {}
    fn _assert_folders_trait(_: &dyn spellcfg_core::WorkspaceFolders) {}

    // FileAccessor implementations
    let _ = std::any::type_name::<spellcfg_core::TokioFileAccessor>();
    let _ = std::any::type_name::<spellcfg_core::MemoryFileAccessor>();
}

// ============================================================================
// Public function signatures
// ============================================================================

#[test]
fn public_functions_compile_with_expected_signatures() {
    // normalize(settings) -> settings
    let _: fn(&spellcfg_core::CSpellUserSettings) -> spellcfg_core::CSpellUserSettings =
        spellcfg_core::normalize;

    // resolve_custom_dictionaries(settings, definitions) -> Resolution
    let _: fn(
        &spellcfg_core::CanonicalSettings,
        &[spellcfg_core::DictionaryDefinition],
    ) -> spellcfg_core::Resolution = spellcfg_core::resolve_custom_dictionaries;

    // normalize_patterns(settings, predefined) -> NormalizedPatterns
    let _: fn(
        &spellcfg_core::CSpellUserSettings,
        &[spellcfg_core::RegExpPatternDefinition],
    ) -> spellcfg_core::NormalizedPatterns = spellcfg_core::normalize_patterns;

    // resolve_settings(layers) -> SettingsResult<ResolvedSettings>
    let _: fn(
        Vec<spellcfg_core::SettingsLayer>,
    ) -> spellcfg_core::SettingsResult<spellcfg_core::ResolvedSettings> =
        spellcfg_core::resolve_settings::<Vec<spellcfg_core::SettingsLayer>>;

    let _: fn(&str) -> String = spellcfg_core::host_key;
    let _: fn() -> Vec<spellcfg_core::SettingDescriptor> = spellcfg_core::setting_descriptors;
    let _: fn() -> schemars::Schema = spellcfg_core::generate_schema;
    let _: fn() -> spellcfg_core::SettingsResult<serde_json::Value> =
        spellcfg_core::generate_configuration_schema;
}

// ============================================================================
// Key trait implementations
// ============================================================================

fn assert_serialize<T: serde::Serialize>() {}
fn assert_deserialize<T: serde::de::DeserializeOwned>() {}
fn assert_clone<T: Clone>() {}
fn assert_debug<T: std::fmt::Debug>() {}
fn assert_eq_trait<T: Eq>() {}
fn assert_copy<T: Copy>() {}
fn assert_hash<T: std::hash::Hash>() {}
fn assert_default<T: Default>() {}
fn assert_ord<T: Ord>() {}

#[test]
fn settings_types_round_trip_through_serde() {
    assert_serialize::<spellcfg_core::CSpellUserSettings>();
    assert_deserialize::<spellcfg_core::CSpellUserSettings>();
    assert_default::<spellcfg_core::CSpellUserSettings>();
    assert_clone::<spellcfg_core::CSpellUserSettings>();

    assert_serialize::<spellcfg_core::ResolvedDictionary>();
    assert_deserialize::<spellcfg_core::ResolvedDictionary>();
    assert_eq_trait::<spellcfg_core::ResolvedDictionary>();

    assert_serialize::<spellcfg_core::ResolveDiagnostic>();
    assert_debug::<spellcfg_core::ResolveDiagnostic>();
}

#[test]
fn enum_types_have_value_semantics() {
    assert_copy::<spellcfg_core::SettingsTier>();
    assert_hash::<spellcfg_core::SettingsTier>();
    assert_ord::<spellcfg_core::SettingsTier>();
    assert_copy::<spellcfg_core::CustomDictionaryScope>();
    assert_ord::<spellcfg_core::CustomDictionaryScope>();
    assert_copy::<spellcfg_core::SettingScope>();
    assert_copy::<spellcfg_core::DiagnosticCode>();
    assert_copy::<spellcfg_core::DefinitionSource>();
    assert_copy::<spellcfg_core::FsErrorKind>();

    // Tiers collect into an ordered set.
    let tiers: BTreeSet<_> = spellcfg_core::SettingsTier::ALL.into_iter().collect();
    assert_eq!(tiers.len(), 5);
}

#[test]
fn scope_names_are_stable() {
    use spellcfg_core::{CustomDictionaryScope, SettingScope};

    assert_eq!(
        serde_json::to_value(SettingScope::LanguageOverridable).unwrap(),
        "language-overridable"
    );
    assert_eq!(
        serde_json::to_value(CustomDictionaryScope::Workspace).unwrap(),
        "workspace"
    );
    assert_eq!(spellcfg_core::SETTINGS_NAMESPACE, "cSpell");
}
