//! Deprecated field migration
//!
//! Folds the legacy per-scope dictionary lists (`customUserDictionaries`,
//! `customWorkspaceDictionaries`, `customFolderDictionaries`) into the
//! canonical `customDictionaries` map.

use crate::config::{
    CSpellUserSettings, CustomDictionariesValue, CustomDictionaryEntry, CustomDictionaryFields,
    CustomDictionaryScope,
};

/// Migrate legacy dictionary lists into `customDictionaries`.
///
/// Each legacy entry becomes a map entry tagged with the scope of its source
/// field: a bare name becomes `{ "scope": "<scope>" }`, a full declaration
/// keeps its own fields and only gains the source scope when it has none.
/// Keys already present in `customDictionaries` are never overwritten, and
/// among the legacy lists the first occurrence of a name wins (user, then
/// workspace, then folder).
///
/// The legacy fields are cleared, so normalizing twice is the same as
/// normalizing once.
pub fn normalize(settings: &CSpellUserSettings) -> CSpellUserSettings {
    let mut normalized = settings.clone();
    if !normalized.has_legacy_dictionaries() {
        return normalized;
    }

    let legacy = [
        (
            CustomDictionaryScope::User,
            normalized.custom_user_dictionaries.take(),
        ),
        (
            CustomDictionaryScope::Workspace,
            normalized.custom_workspace_dictionaries.take(),
        ),
        (
            CustomDictionaryScope::Folder,
            normalized.custom_folder_dictionaries.take(),
        ),
    ];

    let mut dictionaries = normalized.custom_dictionaries.take().unwrap_or_default();
    for (scope, entries) in legacy {
        for entry in entries.into_iter().flatten() {
            if dictionaries.contains_key(entry.name()) {
                tracing::debug!(name = entry.name(), %scope, "legacy entry shadowed");
                continue;
            }
            let name = entry.name().to_string();
            dictionaries.insert(name, legacy_entry_value(entry, scope));
        }
    }
    normalized.custom_dictionaries = Some(dictionaries);
    normalized
}

fn legacy_entry_value(
    entry: CustomDictionaryEntry,
    scope: CustomDictionaryScope,
) -> CustomDictionariesValue {
    let mut fields = match entry {
        CustomDictionaryEntry::Name(_) => CustomDictionaryFields::default(),
        CustomDictionaryEntry::Dictionary(decl) => CustomDictionaryFields {
            name: None,
            ..CustomDictionaryFields::from(decl)
        },
    };
    if fields.scope.is_none() {
        fields.scope = Some(scope.to_list());
    }
    CustomDictionariesValue::Dictionary(fields)
}
