use super::*;
use crate::diagnostics::{DiagnosticCode, ResolveDiagnostic};
use crate::normalize::normalize;
use indexmap::IndexMap;
use rust_i18n::t;
use serde_json::Map;
use std::collections::BTreeSet;

/// Fields whose lists accumulate across tiers instead of being replaced.
const CONCAT_FIELDS: &[&str] = &[
    "words",
    "userWords",
    "ignoreWords",
    "flagWords",
    "enableFiletypes",
    "ignorePaths",
    "patterns",
    "dictionaryDefinitions",
    "dictionaries",
    "import",
];

/// How a field combines with the same field from a less specific tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeStrategy {
    Replace,
    Concat,
    MergeMap,
}

impl MergeStrategy {
    fn for_field(field: &str) -> Self {
        if field == CUSTOM_DICTIONARIES_FIELD {
            MergeStrategy::MergeMap
        } else if CONCAT_FIELDS.contains(&field) {
            MergeStrategy::Concat
        } else {
            MergeStrategy::Replace
        }
    }
}

/// Merged, de-deprecated settings.
///
/// Never mutated after construction; a settings change builds a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSettings {
    settings: CSpellUserSettings,
    dictionaries: IndexMap<DictionaryId, DictionaryToggle>,
    tiers: BTreeSet<SettingsTier>,
    diagnostics: Vec<ResolveDiagnostic>,
}

impl CanonicalSettings {
    /// Canonical view of a single, already merged settings object.
    ///
    /// No tier is recorded, so every dictionary scope is in play.
    pub fn from_settings(settings: &CSpellUserSettings) -> Self {
        let settings = normalize(settings);
        let mut dictionaries = IndexMap::new();
        for (key, value) in settings.custom_dictionaries.iter().flatten() {
            dictionaries.insert(key.clone(), DictionaryToggle::from_value(key, value, None));
        }
        Self {
            settings,
            dictionaries,
            tiers: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Merge layers from least to most specific.
    ///
    /// Layers are ordered by tier (stable for equal tiers). In each layer,
    /// fields the tier may not set are dropped, legacy dictionary lists are
    /// folded into `customDictionaries`, and the result is combined with the
    /// accumulated settings field by field.
    pub fn merge<I>(layers: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = SettingsLayer>,
    {
        let mut layers: Vec<SettingsLayer> = layers.into_iter().collect();
        layers.sort_by_key(|layer| layer.tier);

        let mut merged = Map::new();
        let mut dictionaries: IndexMap<DictionaryId, DictionaryToggle> = IndexMap::new();
        let mut tiers = BTreeSet::new();
        let mut diagnostics = Vec::new();

        for layer in &layers {
            tiers.insert(layer.tier);
            diagnostics.extend(layer.diagnostics.iter().cloned());

            let permitted = Self::permitted_fields(layer, &mut diagnostics)?;
            for field in [
                "customUserDictionaries",
                "customWorkspaceDictionaries",
                "customFolderDictionaries",
            ] {
                if permitted.contains_key(field) {
                    diagnostics.push(deprecation_diagnostic(field));
                }
            }

            let layer_settings = CSpellUserSettings::from_value(Value::Object(permitted))?;
            let normalized = normalize(&layer_settings);
            for (key, value) in normalized.custom_dictionaries.iter().flatten() {
                match dictionaries.get_mut(key) {
                    Some(toggle) => toggle.apply(key, value, Some(layer.tier)),
                    None => {
                        dictionaries.insert(
                            key.clone(),
                            DictionaryToggle::from_value(key, value, Some(layer.tier)),
                        );
                    }
                }
            }

            let Value::Object(fields) = normalized.to_value()? else {
                continue;
            };
            for (field, value) in fields {
                merge_field(&mut merged, field, value);
            }
            tracing::debug!(tier = %layer.tier, "merged settings layer");
        }

        Ok(Self {
            settings: CSpellUserSettings::from_value(Value::Object(merged))?,
            dictionaries,
            tiers,
            diagnostics,
        })
    }

    /// Fields of `layer` its tier is allowed to set, as JSON.
    fn permitted_fields(
        layer: &SettingsLayer,
        diagnostics: &mut Vec<ResolveDiagnostic>,
    ) -> SettingsResult<Map<String, Value>> {
        let Value::Object(fields) = layer.settings.to_value()? else {
            return Ok(Map::new());
        };
        let mut permitted = Map::new();
        for (field, value) in fields {
            match SettingScope::for_field(&field) {
                Some(scope) if !layer.tier.may_set(scope) => {
                    tracing::debug!(field = %field, tier = %layer.tier, "setting ignored for tier");
                    diagnostics.push(
                        ResolveDiagnostic::warning(
                            DiagnosticCode::SettingIgnoredForTier,
                            field.as_str(),
                            t!(
                                "core.merge.ignored_for_tier",
                                field = field.as_str(),
                                scope = scope.as_str(),
                                tier = layer.tier.as_str()
                            ),
                        )
                        .with_suggestion(t!(
                            "core.merge.ignored_for_tier_suggestion",
                            field = field.as_str()
                        )),
                    );
                }
                _ => {
                    permitted.insert(field, value);
                }
            }
        }
        Ok(permitted)
    }

    /// The merged settings. Legacy dictionary fields are always unset.
    pub fn settings(&self) -> &CSpellUserSettings {
        &self.settings
    }

    pub fn into_settings(self) -> CSpellUserSettings {
        self.settings
    }

    /// Merged `customDictionaries` toggles, in first-seen order.
    pub fn custom_dictionaries(&self) -> &IndexMap<DictionaryId, DictionaryToggle> {
        &self.dictionaries
    }

    /// The merged toggles classified as source entries.
    pub fn source_entries(&self) -> Vec<DictionarySourceEntry> {
        self.dictionaries
            .iter()
            .map(|(key, toggle)| DictionarySourceEntry::from_map_entry(key, &toggle.to_value()))
            .collect()
    }

    /// Tiers that contributed to these settings.
    pub fn tiers(&self) -> &BTreeSet<SettingsTier> {
        &self.tiers
    }

    /// Non-fatal conditions found while merging.
    pub fn diagnostics(&self) -> &[ResolveDiagnostic] {
        &self.diagnostics
    }

    /// Dictionary scopes in play for this resolution.
    ///
    /// Derived from the contributing tiers. When no tier maps to a
    /// dictionary scope, every scope is in play.
    pub fn dictionary_scopes_in_play(&self) -> Vec<CustomDictionaryScope> {
        let in_play: BTreeSet<CustomDictionaryScope> = self
            .tiers
            .iter()
            .filter_map(|tier| tier.dictionary_scope())
            .collect();
        if in_play.is_empty() {
            CustomDictionaryScope::ALL.to_vec()
        } else {
            in_play.into_iter().collect()
        }
    }

    /// Whether spell checking is active for a language id.
    ///
    /// A `!`-negated entry in `enableFiletypes` always wins.
    pub fn is_language_enabled(&self, language_id: &str) -> bool {
        let filetypes = self.settings.enable_filetypes.as_deref().unwrap_or_default();
        let negated = filetypes
            .iter()
            .any(|entry| entry.strip_prefix('!') == Some(language_id));
        if negated {
            return false;
        }
        let listed = self
            .settings
            .enabled_language_ids
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|id| id == language_id);
        listed || filetypes.iter().any(|entry| entry == language_id)
    }

    /// All active language ids, in first-seen order.
    pub fn enabled_language_ids(&self) -> Vec<String> {
        let listed = self
            .settings
            .enabled_language_ids
            .iter()
            .flatten()
            .chain(self.settings.enable_filetypes.iter().flatten())
            .filter(|id| !id.starts_with('!'));

        let mut ids: Vec<String> = Vec::new();
        for id in listed {
            if !ids.contains(id) && self.is_language_enabled(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// `checkLimit` converted from kilobytes to characters.
    pub fn check_limit_chars(&self) -> Option<u64> {
        self.settings
            .check_limit
            .map(|limit| limit.saturating_mul(1024))
    }
}

fn deprecation_diagnostic(field: &str) -> ResolveDiagnostic {
    let diagnostic = ResolveDiagnostic::info(
        DiagnosticCode::DeprecatedSetting,
        field,
        t!("core.merge.deprecated_setting", field = field),
    );
    match spellcfg_catalog::find_setting(field).and_then(|setting| setting.deprecation) {
        Some(message) => diagnostic.with_suggestion(message),
        None => diagnostic,
    }
}

fn merge_field(merged: &mut Map<String, Value>, field: String, value: Value) {
    match MergeStrategy::for_field(&field) {
        MergeStrategy::Replace => {
            merged.insert(field, value);
        }
        MergeStrategy::Concat => {
            let mut items = into_list(merged.remove(&field));
            items.extend(into_list(Some(value)));
            merged.insert(field, Value::Array(items));
        }
        MergeStrategy::MergeMap => match value {
            Value::Object(incoming) => {
                let mut combined = match merged.remove(&field) {
                    Some(Value::Object(existing)) => existing,
                    _ => Map::new(),
                };
                for (key, entry) in incoming {
                    combined.insert(key, entry);
                }
                merged.insert(field, Value::Object(combined));
            }
            other => {
                merged.insert(field, other);
            }
        },
    }
}

/// A list field value as a vector; a lone value (as `import` allows) becomes one item.
fn into_list(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    }
}
