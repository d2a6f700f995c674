//! # spellcfg-core
//!
//! Settings resolution engine for a spell checker embedded in an editor host.
//!
//! Takes raw, possibly deprecated, possibly partial settings from several
//! tiers (default < user < workspace < folder < file override) and produces:
//! - a canonical, de-deprecated settings object ([`CanonicalSettings`])
//! - the resolved list of custom dictionaries ([`Resolution`])
//! - the effective ignore globs and named regex patterns ([`NormalizedPatterns`])
//!
//! Dictionary word-list files are read and written through a host supplied
//! [`FileAccessor`]; the engine never touches the file system on its own.

// Allow common test patterns in test code
#![cfg_attr(
    test,
    allow(
        clippy::field_reassign_with_default,
        clippy::len_zero,
        clippy::useless_vec
    )
)]

rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod diagnostics;
pub mod fs;
pub mod normalize;
pub mod patterns;
pub mod resolve;
pub mod words;

pub use config::{
    CSpellUserSettings, CanonicalSettings, CustomDictionaries, CustomDictionariesValue,
    CustomDictionary, CustomDictionaryEntry, CustomDictionaryFields, CustomDictionaryScope,
    DiagnosticSeverity, DictionaryDefinition, DictionaryId, DictionarySourceEntry,
    DictionaryToggle, GlobDef, GlobEntry, LogLevel, OneOrMany, ParsedScopes, Pattern, PatternId,
    RegExpPatternDefinition, SETTINGS_NAMESPACE, SettingDescriptor, SettingScope, SettingsLayer,
    SettingsTier, StatusAlignment, field_from_host_key, generate_configuration_schema,
    generate_schema, host_key, setting_descriptors,
};
pub use diagnostics::{
    DiagnosticCode, DiagnosticLevel, ResolveDiagnostic, SettingsError, SettingsResult,
};
pub use fs::{
    AccessError, FileAccessor, FileKind, FsError, FsErrorKind, NotFoundCodes, TokioFileAccessor,
    mock::MemoryFileAccessor,
};
pub use normalize::normalize;
pub use patterns::{
    NormalizedPatterns, PathTemplate, StaticWorkspaceFolders, WorkspaceFolders, compile_pattern,
    normalize_patterns, predefined_patterns, resolve_glob_root, resolve_glob_roots,
};
pub use resolve::{
    DefinitionSource, DictionaryResolver, Resolution, ResolvedDictionary,
    resolve_custom_dictionaries,
};
pub use words::{
    AddWordsOutcome, add_words, format_word_list, parse_word_list, read_words,
    target_dictionary_for_words,
};

/// Everything a downstream consumer needs from one resolution pass.
///
/// Built from scratch on every settings change; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: CanonicalSettings,
    pub dictionaries: Resolution,
    pub patterns: NormalizedPatterns,
}

impl ResolvedSettings {
    /// All non-fatal diagnostics produced while merging and resolving, in
    /// pipeline order.
    pub fn diagnostics(&self) -> Vec<&ResolveDiagnostic> {
        self.settings
            .diagnostics()
            .iter()
            .chain(&self.dictionaries.diagnostics)
            .chain(&self.patterns.diagnostics)
            .collect()
    }
}

/// Run the full pipeline over a set of settings layers.
///
/// Layers are merged in tier order, legacy dictionary fields are folded into
/// `customDictionaries`, custom dictionaries are resolved against the built-in
/// catalog plus `dictionaryDefinitions`, and patterns are normalized against
/// the predefined patterns.
pub fn resolve_settings<I>(layers: I) -> SettingsResult<ResolvedSettings>
where
    I: IntoIterator<Item = SettingsLayer>,
{
    resolve_settings_with(layers, &DictionaryResolver::new())
}

/// Like [`resolve_settings`], with a caller supplied resolver (for example
/// one built from a host dictionary catalog).
pub fn resolve_settings_with<I>(
    layers: I,
    resolver: &DictionaryResolver,
) -> SettingsResult<ResolvedSettings>
where
    I: IntoIterator<Item = SettingsLayer>,
{
    let settings = CanonicalSettings::merge(layers)?;
    let dictionaries = resolver.resolve(&settings);
    let patterns = normalize_patterns(settings.settings(), &predefined_patterns());

    tracing::debug!(
        dictionaries = dictionaries.dictionaries.len(),
        patterns = patterns.patterns.len(),
        "settings resolved"
    );

    Ok(ResolvedSettings {
        settings,
        dictionaries,
        patterns,
    })
}
