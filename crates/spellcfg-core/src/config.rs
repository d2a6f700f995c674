//! Settings model
//!
//! [`CSpellUserSettings`] is the raw settings object as the host stores it
//! for one tier. [`CanonicalSettings`] is the merged, de-deprecated view built
//! from a stack of [`SettingsLayer`]s.

use crate::diagnostics::{DiagnosticCode, ResolveDiagnostic, SettingsError, SettingsResult};
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod dictionary;
mod globs;
mod merge;
mod schema;

pub use dictionary::{
    CustomDictionaries, CustomDictionariesValue, CustomDictionary, CustomDictionaryEntry,
    CustomDictionaryFields, CustomDictionaryScope, DictionaryDefinition, DictionaryId,
    DictionarySourceEntry, DictionaryToggle, ParsedScopes, ScopeList,
};
pub use globs::{GlobDef, GlobEntry, Pattern, PatternId, RegExpPatternDefinition};
pub use merge::CanonicalSettings;
pub use schema::{
    SETTINGS_NAMESPACE, SettingDescriptor, field_from_host_key, generate_configuration_schema,
    generate_schema, host_key, setting_descriptors,
};

/// A value that may be given either once or as a list.
///
/// Serialized untagged, so `"a"` and `["a", "b"]` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Severity used when reporting spelling issues in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LogLevel {
    None,
    Error,
    Warning,
    Information,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StatusAlignment {
    Left,
    Right,
}

/// Tier at which a setting may be overridden by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SettingScope {
    Application,
    Window,
    Resource,
    LanguageOverridable,
}

impl SettingScope {
    /// Parse the scope name used in the catalog table.
    pub fn from_catalog(name: &str) -> Option<Self> {
        match name {
            "application" => Some(SettingScope::Application),
            "window" => Some(SettingScope::Window),
            "resource" => Some(SettingScope::Resource),
            "language-overridable" => Some(SettingScope::LanguageOverridable),
            _ => None,
        }
    }

    /// Scope declared for a canonical field, if the field is known.
    pub fn for_field(field: &str) -> Option<Self> {
        spellcfg_catalog::find_setting(field).and_then(|setting| Self::from_catalog(setting.scope))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingScope::Application => "application",
            SettingScope::Window => "window",
            SettingScope::Resource => "resource",
            SettingScope::LanguageOverridable => "language-overridable",
        }
    }
}

impl std::fmt::Display for SettingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A settings source, ordered from least to most specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsTier {
    Default,
    User,
    Workspace,
    Folder,
    FileOverride,
}

impl SettingsTier {
    pub const ALL: [SettingsTier; 5] = [
        SettingsTier::Default,
        SettingsTier::User,
        SettingsTier::Workspace,
        SettingsTier::Folder,
        SettingsTier::FileOverride,
    ];

    /// Whether a field with `scope` may be set in this tier.
    ///
    /// Application fields are global and only honored in the default and
    /// user tiers; window fields additionally in the workspace tier.
    pub fn may_set(&self, scope: SettingScope) -> bool {
        match scope {
            SettingScope::Application => {
                matches!(self, SettingsTier::Default | SettingsTier::User)
            }
            SettingScope::Window => matches!(
                self,
                SettingsTier::Default | SettingsTier::User | SettingsTier::Workspace
            ),
            SettingScope::Resource | SettingScope::LanguageOverridable => true,
        }
    }

    /// The custom dictionary scope this tier puts in play.
    pub fn dictionary_scope(&self) -> Option<CustomDictionaryScope> {
        match self {
            SettingsTier::Default => None,
            SettingsTier::User => Some(CustomDictionaryScope::User),
            SettingsTier::Workspace => Some(CustomDictionaryScope::Workspace),
            SettingsTier::Folder | SettingsTier::FileOverride => {
                Some(CustomDictionaryScope::Folder)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsTier::Default => "default",
            SettingsTier::User => "user",
            SettingsTier::Workspace => "workspace",
            SettingsTier::Folder => "folder",
            SettingsTier::FileOverride => "file-override",
        }
    }
}

impl std::fmt::Display for SettingsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw spell checker settings for one tier.
///
/// Every field is optional; a missing field means "not set in this tier".
/// Keys are the canonical field names without the `cSpell.` prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CSpellUserSettings {
    /// The limit in K used to allow for checking a file. Larger files are skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_limit: Option<u64>,

    /// Severity used to report spelling issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_level: Option<DiagnosticSeverity>,

    /// URI schemes the spell checker is allowed to open documents for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_schemas: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Display the spell checker status on the status bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_status: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_status_alignment: Option<StatusAlignment>,

    /// Delay in milliseconds after a document changes before it is checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_check_delay_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_spelling_with_rename_provider: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_commands_in_editor_context_menu: Option<bool>,

    /// Language ids to enable, or disable with a leading `!`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_filetypes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root_path: Option<String>,

    /// Legacy: dictionaries active in user scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_user_dictionaries: Option<Vec<CustomDictionaryEntry>>,

    /// Legacy: dictionaries active in workspace scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_workspace_dictionaries: Option<Vec<CustomDictionaryEntry>>,

    /// Legacy: dictionaries active in folder scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_folder_dictionaries: Option<Vec<CustomDictionaryEntry>>,

    /// Enable or disable custom dictionaries by name, optionally declaring them inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dictionaries: Option<CustomDictionaries>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_check_only_workspace_files: Option<bool>,

    #[serde(
        rename = "experimental.enableRegexpView",
        skip_serializing_if = "Option::is_none"
    )]
    pub experimental_enable_regexp_view: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Current active spelling language, e.g. `"en-GB"` or `"en,fr"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_number_of_problems: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_suggestions: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_word_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duplicate_problems: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_language_ids: Option<Vec<String>>,

    /// Other settings files to import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<OneOrMany<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_words: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_words: Option<Vec<String>>,

    /// Globs of files to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_paths: Option<Vec<GlobEntry>>,

    /// Root used for relative globs; may be a `${workspaceFolder}` template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glob_root: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<GlobEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_words: Option<Vec<String>>,

    /// Named regular expressions usable in the include/ignore lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<RegExpPatternDefinition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_reg_exp_list: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_reg_exp_list: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_compound_words: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_settings: Option<Vec<Value>>,

    /// Names of dictionaries to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_definitions: Option<Vec<DictionaryDefinition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_config_search: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnp_files: Option<Vec<String>>,

    #[serde(rename = "usePnP", skip_serializing_if = "Option::is_none")]
    pub use_pnp: Option<bool>,
}

impl CSpellUserSettings {
    /// Parse settings from a JSON value keyed by canonical field names.
    pub fn from_value(value: Value) -> SettingsResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse settings, dropping fields whose value has the wrong type.
    ///
    /// Each dropped field, and each malformed `customDictionaries` entry,
    /// yields an `InvalidSetting` warning. Only a value that is not an
    /// object at all is an error.
    pub fn from_value_lenient(value: Value) -> SettingsResult<(Self, Vec<ResolveDiagnostic>)> {
        let Value::Object(fields) = value else {
            return Ok((Self::from_value(value)?, Vec::new()));
        };

        let mut kept = serde_json::Map::new();
        let mut diagnostics = Vec::new();
        for (field, value) in fields {
            let value = match (field == CUSTOM_DICTIONARIES_FIELD, value) {
                (true, Value::Object(entries)) => {
                    let mut valid = serde_json::Map::new();
                    for (name, entry) in entries {
                        match serde_json::from_value::<CustomDictionariesValue>(entry.clone()) {
                            Ok(_) => {
                                valid.insert(name, entry);
                            }
                            Err(err) => diagnostics.push(invalid_setting(
                                &format!("{}.{}", CUSTOM_DICTIONARIES_FIELD, name),
                                &err,
                            )),
                        }
                    }
                    kept.insert(field, Value::Object(valid));
                    continue;
                }
                (_, value) => value,
            };

            let single = serde_json::Map::from_iter([(field.clone(), value.clone())]);
            match serde_json::from_value::<Self>(Value::Object(single)) {
                Ok(_) => {
                    kept.insert(field, value);
                }
                Err(err) => diagnostics.push(invalid_setting(&field, &err)),
            }
        }
        Ok((Self::from_value(Value::Object(kept))?, diagnostics))
    }

    /// Parse settings from JSON text, naming `origin` in the error.
    pub fn from_json_str(text: &str, origin: &str) -> SettingsResult<Self> {
        serde_json::from_str(text).map_err(|source| SettingsError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    pub fn to_value(&self) -> SettingsResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Settings materialized from the default values in the descriptor table.
    pub fn defaults() -> SettingsResult<Self> {
        let mut object = serde_json::Map::new();
        for setting in spellcfg_catalog::SETTINGS_DATA {
            if let Some(default) = setting.default_json {
                object.insert(setting.field.to_string(), serde_json::from_str(default)?);
            }
        }
        Self::from_value(Value::Object(object))
    }

    /// Whether any of the legacy per-scope dictionary lists is set.
    pub fn has_legacy_dictionaries(&self) -> bool {
        self.custom_user_dictionaries.is_some()
            || self.custom_workspace_dictionaries.is_some()
            || self.custom_folder_dictionaries.is_some()
    }
}

fn invalid_setting(field: &str, err: &serde_json::Error) -> ResolveDiagnostic {
    tracing::debug!(field = %field, error = %err, "dropping malformed setting");
    ResolveDiagnostic::warning(
        DiagnosticCode::InvalidSetting,
        field,
        t!("core.merge.invalid_setting", field = field, error = err.to_string()),
    )
    .with_suggestion(t!("core.merge.invalid_setting_suggestion", field = field))
}

const CUSTOM_DICTIONARIES_FIELD: &str = "customDictionaries";

/// Settings supplied by one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsLayer {
    pub tier: SettingsTier,
    pub settings: CSpellUserSettings,
    /// Problems found while parsing this layer; reported by the merge.
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl SettingsLayer {
    pub fn new(tier: SettingsTier, settings: CSpellUserSettings) -> Self {
        Self {
            tier,
            settings,
            diagnostics: Vec::new(),
        }
    }

    /// Layer from a raw settings object, keeping every well-formed field.
    pub fn from_value(tier: SettingsTier, value: Value) -> SettingsResult<Self> {
        let (settings, diagnostics) = CSpellUserSettings::from_value_lenient(value)?;
        Ok(Self {
            tier,
            settings,
            diagnostics,
        })
    }

    /// Layer from host storage entries, keeping every well-formed field.
    pub fn from_host_entries<'a, I>(tier: SettingsTier, entries: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        Self::from_value(tier, Value::Object(schema::host_fields(entries)))
    }

    /// The default tier, built from the descriptor table.
    pub fn defaults() -> SettingsResult<Self> {
        Ok(Self::new(
            SettingsTier::Default,
            CSpellUserSettings::defaults()?,
        ))
    }
}
