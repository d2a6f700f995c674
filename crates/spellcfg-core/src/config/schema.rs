use super::*;
use serde_json::Map;

/// Prefix of every key in host settings storage.
pub const SETTINGS_NAMESPACE: &str = spellcfg_catalog::NAMESPACE;

/// Host storage key for a canonical field, e.g. `cSpell.checkLimit`.
pub fn host_key(field: &str) -> String {
    format!("{}.{}", SETTINGS_NAMESPACE, field)
}

/// Canonical field for a host storage key, if it carries the namespace.
pub fn field_from_host_key(key: &str) -> Option<&str> {
    key.strip_prefix(SETTINGS_NAMESPACE)?.strip_prefix('.')
}

/// One entry of the settings surface the host consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDescriptor {
    /// Prefixed host key.
    pub key: String,
    pub field: &'static str,
    pub scope: SettingScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<&'static str>,
    pub hidden: bool,
}

/// The descriptor table, in declaration order.
///
/// Rows with a scope or default the engine cannot read are skipped; the
/// catalog build script already rejects both, so this only matters for
/// hand-edited tables.
pub fn setting_descriptors() -> Vec<SettingDescriptor> {
    spellcfg_catalog::SETTINGS_DATA
        .iter()
        .filter_map(|setting| {
            let scope = SettingScope::from_catalog(setting.scope)?;
            let default = match setting.default_json {
                Some(text) => Some(serde_json::from_str(text).ok()?),
                None => None,
            };
            Some(SettingDescriptor {
                key: host_key(setting.field),
                field: setting.field,
                scope,
                default,
                deprecation_message: setting.deprecation,
                hidden: setting.hidden,
            })
        })
        .collect()
}

impl CSpellUserSettings {
    /// Flatten into host storage entries keyed by prefixed key.
    pub fn to_host_entries(&self) -> SettingsResult<Map<String, Value>> {
        let Value::Object(fields) = self.to_value()? else {
            return Ok(Map::new());
        };
        Ok(fields
            .into_iter()
            .map(|(field, value)| (host_key(&field), value))
            .collect())
    }

    /// Rebuild settings from host storage entries.
    ///
    /// Keys outside the namespace and unknown fields are ignored.
    pub fn from_host_entries<'a, I>(entries: I) -> SettingsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        Self::from_value(Value::Object(host_fields(entries)))
    }
}

/// Canonical fields of the catalog settings found among host entries.
pub(super) fn host_fields<'a, I>(entries: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut object = Map::new();
    for (key, value) in entries {
        let Some(field) = field_from_host_key(key) else {
            continue;
        };
        if spellcfg_catalog::find_setting(field).is_some() {
            object.insert(field.to_string(), value.clone());
        } else {
            tracing::debug!(key = %key, "ignoring unknown settings key");
        }
    }
    object
}

/// Generate a JSON Schema for the raw settings object.
///
/// # Example
///
/// ```rust
/// use spellcfg_core::config::generate_schema;
///
/// let schema = generate_schema();
/// let json = serde_json::to_string_pretty(&schema).unwrap();
/// assert!(json.contains("customDictionaries"));
/// ```
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(CSpellUserSettings)
}

/// Generate the host configuration contribution.
///
/// Every advertised field appears under its prefixed key with its JSON
/// schema plus `scope`, `default` and `deprecationMessage` metadata.
/// Hidden fields are left out.
pub fn generate_configuration_schema() -> SettingsResult<Value> {
    let mut root = serde_json::to_value(generate_schema())?;
    let properties = root
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .map(std::mem::take)
        .unwrap_or_default();
    let definitions = root
        .get_mut("$defs")
        .map(Value::take)
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut contributed = Map::new();
    for descriptor in setting_descriptors() {
        if descriptor.hidden {
            continue;
        }
        let mut property = match properties.get(descriptor.field) {
            Some(Value::Object(schema)) => schema.clone(),
            _ => Map::new(),
        };
        property.insert(
            "scope".to_string(),
            Value::String(descriptor.scope.as_str().to_string()),
        );
        if let Some(default) = descriptor.default {
            property.insert("default".to_string(), default);
        }
        if let Some(message) = descriptor.deprecation_message {
            property.insert(
                "deprecationMessage".to_string(),
                Value::String(message.to_string()),
            );
        }
        contributed.insert(descriptor.key, Value::Object(property));
    }

    Ok(serde_json::json!({
        "title": "Spell Checker Configuration",
        "type": "object",
        "properties": contributed,
        "$defs": definitions,
    }))
}
