use super::*;
use indexmap::IndexMap;

/// Name of a dictionary, unique within a resolved set.
pub type DictionaryId = String;

/// One scope name or a list of them, as written in settings.
///
/// Kept as strings so unknown values survive a round trip.
pub type ScopeList = OneOrMany<String>;

/// `customDictionaries` as written: name to toggle or partial declaration.
pub type CustomDictionaries = IndexMap<DictionaryId, CustomDictionariesValue>;

/// Where a custom dictionary is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CustomDictionaryScope {
    User,
    Workspace,
    Folder,
}

impl CustomDictionaryScope {
    pub const ALL: [CustomDictionaryScope; 3] = [
        CustomDictionaryScope::User,
        CustomDictionaryScope::Workspace,
        CustomDictionaryScope::Folder,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user" => Some(CustomDictionaryScope::User),
            "workspace" => Some(CustomDictionaryScope::Workspace),
            "folder" => Some(CustomDictionaryScope::Folder),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomDictionaryScope::User => "user",
            CustomDictionaryScope::Workspace => "workspace",
            CustomDictionaryScope::Folder => "folder",
        }
    }

    pub fn to_list(self) -> ScopeList {
        OneOrMany::One(self.as_str().to_string())
    }
}

impl std::fmt::Display for CustomDictionaryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scope list split into recognized scopes and leftovers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedScopes {
    pub known: Vec<CustomDictionaryScope>,
    pub unknown: Vec<String>,
}

impl ParsedScopes {
    pub fn parse(list: Option<&ScopeList>) -> Self {
        let mut parsed = ParsedScopes::default();
        for name in list.into_iter().flatten() {
            match CustomDictionaryScope::parse(name) {
                Some(scope) if !parsed.known.contains(&scope) => parsed.known.push(scope),
                Some(_) => {}
                None => parsed.unknown.push(name.clone()),
            }
        }
        parsed
    }

    /// Scopes the dictionary is active in. No recognized scope means all.
    pub fn effective(&self) -> Vec<CustomDictionaryScope> {
        if self.known.is_empty() {
            CustomDictionaryScope::ALL.to_vec()
        } else {
            self.known.clone()
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.known.is_empty()
    }
}

/// A full custom dictionary declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomDictionary {
    pub name: DictionaryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path to the word list; may reference a workspace folder template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// New words are added to this dictionary. Defaults to false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_words: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeList>,
}

/// A declaration inside the `customDictionaries` map. `name` is implied by the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomDictionaryFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<DictionaryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_words: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeList>,
}

impl CustomDictionaryFields {
    /// True when the object sets no declaration fields. `name` does not count.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.path.is_none()
            && self.add_words.is_none()
            && self.scope.is_none()
    }

    /// Complete the declaration with the map key as its name.
    pub fn into_declaration(self, key: &str) -> CustomDictionary {
        CustomDictionary {
            name: key.to_string(),
            description: self.description,
            path: self.path,
            add_words: self.add_words,
            scope: self.scope,
        }
    }
}

impl From<CustomDictionary> for CustomDictionaryFields {
    fn from(decl: CustomDictionary) -> Self {
        Self {
            name: Some(decl.name),
            description: decl.description,
            path: decl.path,
            add_words: decl.add_words,
            scope: decl.scope,
        }
    }
}

/// Entry of a legacy dictionary list: a bare name or a full declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CustomDictionaryEntry {
    Name(DictionaryId),
    Dictionary(CustomDictionary),
}

impl CustomDictionaryEntry {
    pub fn name(&self) -> &str {
        match self {
            CustomDictionaryEntry::Name(name) => name,
            CustomDictionaryEntry::Dictionary(decl) => &decl.name,
        }
    }
}

/// Value of a `customDictionaries` map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CustomDictionariesValue {
    Enabled(bool),
    Dictionary(CustomDictionaryFields),
}

/// A `customDictionaries` entry classified by what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySourceEntry {
    /// Enable a dictionary declared elsewhere.
    Enabled(DictionaryId),
    /// Explicitly disable a dictionary.
    Disabled(DictionaryId),
    /// Enable a dictionary with an inline declaration.
    FullDeclaration(CustomDictionary),
}

impl DictionarySourceEntry {
    /// Classify one map entry. An object that sets no fields disables.
    pub fn from_map_entry(key: &str, value: &CustomDictionariesValue) -> Self {
        match value {
            CustomDictionariesValue::Enabled(true) => Self::Enabled(key.to_string()),
            CustomDictionariesValue::Enabled(false) => Self::Disabled(key.to_string()),
            CustomDictionariesValue::Dictionary(fields) if fields.is_empty() => {
                Self::Disabled(key.to_string())
            }
            CustomDictionariesValue::Dictionary(fields) => {
                Self::FullDeclaration(fields.clone().into_declaration(key))
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Enabled(name) | Self::Disabled(name) => name,
            Self::FullDeclaration(decl) => &decl.name,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled(_))
    }

    pub fn declaration(&self) -> Option<&CustomDictionary> {
        match self {
            Self::FullDeclaration(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Entry of `dictionaryDefinitions`, also used for catalog built-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDefinition {
    pub name: DictionaryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_words: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeList>,
    /// Words are valid but never offered as suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_suggest: Option<bool>,
}

impl DictionaryDefinition {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// All dictionaries shipped in the catalog.
    pub fn predefined() -> Vec<Self> {
        spellcfg_catalog::DICTIONARIES_DATA
            .iter()
            .map(|(name, path, description)| Self {
                name: name.to_string(),
                path: Some(path.to_string()),
                description: Some(description.to_string()),
                ..Default::default()
            })
            .collect()
    }
}

/// Merged state of one `customDictionaries` key across tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryToggle {
    pub enabled: bool,
    /// Inline declaration, overlaid from every tier that supplied one.
    pub declaration: Option<CustomDictionary>,
    /// Tier of the last entry that touched this key.
    pub tier: Option<SettingsTier>,
}

impl DictionaryToggle {
    pub fn from_value(
        key: &str,
        value: &CustomDictionariesValue,
        tier: Option<SettingsTier>,
    ) -> Self {
        let entry = DictionarySourceEntry::from_map_entry(key, value);
        Self {
            enabled: entry.is_enabled(),
            declaration: entry.declaration().cloned(),
            tier,
        }
    }

    /// Apply an entry from a more specific tier.
    ///
    /// Booleans and empty objects only change `enabled`. An object overlays
    /// the fields it sets onto the earlier declaration.
    pub fn apply(
        &mut self,
        key: &str,
        value: &CustomDictionariesValue,
        tier: Option<SettingsTier>,
    ) {
        self.tier = tier;
        match DictionarySourceEntry::from_map_entry(key, value) {
            DictionarySourceEntry::Enabled(_) => self.enabled = true,
            DictionarySourceEntry::Disabled(_) => self.enabled = false,
            DictionarySourceEntry::FullDeclaration(decl) => {
                self.enabled = true;
                self.declaration = Some(match self.declaration.take() {
                    Some(earlier) => CustomDictionary {
                        name: decl.name,
                        description: decl.description.or(earlier.description),
                        path: decl.path.or(earlier.path),
                        add_words: decl.add_words.or(earlier.add_words),
                        scope: decl.scope.or(earlier.scope),
                    },
                    None => decl,
                });
            }
        }
    }

    /// The entry as it would be written back into `customDictionaries`.
    pub fn to_value(&self) -> CustomDictionariesValue {
        match (&self.declaration, self.enabled) {
            (Some(decl), true) => CustomDictionariesValue::Dictionary(CustomDictionaryFields {
                name: None,
                ..CustomDictionaryFields::from(decl.clone())
            }),
            (_, enabled) => CustomDictionariesValue::Enabled(enabled),
        }
    }
}
