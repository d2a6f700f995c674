//! Custom dictionary resolution
//!
//! Combines the merged `customDictionaries` toggles with the definitions the
//! engine knows about (catalog built-ins, then `dictionaryDefinitions`) into
//! the ordered list of dictionaries the spell checker should load.

use crate::config::{
    CanonicalSettings, CustomDictionary, CustomDictionaryScope, DictionaryDefinition,
    DictionaryId, DictionaryToggle, ParsedScopes,
};
use crate::diagnostics::{DiagnosticCode, ResolveDiagnostic};
use indexmap::IndexMap;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a resolved dictionary's declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionSource {
    /// The built-in catalog or a host supplied catalog.
    Predefined,
    /// A `dictionaryDefinitions` entry.
    Definition,
    /// An inline declaration in `customDictionaries`.
    Inline,
}

/// A dictionary ready for the spell checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDictionary {
    pub name: DictionaryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub add_words: bool,
    pub scope: Vec<CustomDictionaryScope>,
    pub enabled: bool,
    pub source: DefinitionSource,
}

impl ResolvedDictionary {
    pub fn has_scope(&self, scope: CustomDictionaryScope) -> bool {
        self.scope.contains(&scope)
    }
}

/// Output of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub dictionaries: Vec<ResolvedDictionary>,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl Resolution {
    /// Dictionaries that should be loaded.
    pub fn enabled(&self) -> impl Iterator<Item = &ResolvedDictionary> {
        self.dictionaries.iter().filter(|dict| dict.enabled)
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedDictionary> {
        self.dictionaries.iter().find(|dict| dict.name == name)
    }
}

/// Decides whether a scope-restricted dictionary takes part in a resolution.
trait ScopeFilter {
    fn in_play(&self, scopes: &ParsedScopes) -> bool;
}

/// Keeps dictionaries with at least one declared scope in play.
struct InPlayScopeFilter<'a> {
    in_play: &'a [CustomDictionaryScope],
}

impl<'a> InPlayScopeFilter<'a> {
    fn new(in_play: &'a [CustomDictionaryScope]) -> Self {
        Self { in_play }
    }
}

impl ScopeFilter for InPlayScopeFilter<'_> {
    fn in_play(&self, scopes: &ParsedScopes) -> bool {
        !scopes.is_restricted() || scopes.known.iter().any(|s| self.in_play.contains(s))
    }
}

/// Resolves custom dictionaries against a shared definition lookup.
///
/// The predefined table is built once and shared read-only between
/// resolutions, so a resolver can be cloned cheaply and used from several
/// threads.
#[derive(Debug, Clone)]
pub struct DictionaryResolver {
    predefined: Arc<IndexMap<DictionaryId, DictionaryDefinition>>,
}

impl Default for DictionaryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryResolver {
    /// Resolver backed by the built-in catalog.
    pub fn new() -> Self {
        Self::with_predefined(DictionaryDefinition::predefined())
    }

    /// Resolver with no predefined dictionaries.
    pub fn empty() -> Self {
        Self::with_predefined(Vec::new())
    }

    /// Resolver backed by a host supplied catalog. Later duplicates win.
    pub fn with_predefined<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = DictionaryDefinition>,
    {
        let predefined = definitions
            .into_iter()
            .map(|definition| (definition.name.clone(), definition))
            .collect();
        Self {
            predefined: Arc::new(predefined),
        }
    }

    pub fn predefined(&self) -> &IndexMap<DictionaryId, DictionaryDefinition> {
        &self.predefined
    }

    /// Resolve with the scopes in play derived from the settings' tiers.
    pub fn resolve(&self, settings: &CanonicalSettings) -> Resolution {
        self.resolve_with_scopes(settings, &settings.dictionary_scopes_in_play())
    }

    /// Resolve with an explicit set of scopes in play.
    pub fn resolve_with_scopes(
        &self,
        settings: &CanonicalSettings,
        in_play: &[CustomDictionaryScope],
    ) -> Resolution {
        self.resolve_inner(settings, &[], in_play)
    }

    fn resolve_inner(
        &self,
        settings: &CanonicalSettings,
        extra: &[DictionaryDefinition],
        in_play: &[CustomDictionaryScope],
    ) -> Resolution {
        let lookup = self.definition_lookup(settings, extra);
        let filter = InPlayScopeFilter::new(in_play);
        let mut resolution = Resolution::default();

        for (name, toggle) in settings.custom_dictionaries() {
            let Some(resolved) = resolve_entry(name, toggle, &lookup, &filter, &mut resolution)
            else {
                continue;
            };
            resolution.dictionaries.push(resolved);
        }

        tracing::debug!(
            resolved = resolution.dictionaries.len(),
            warnings = resolution.diagnostics.len(),
            "custom dictionaries resolved"
        );
        resolution
    }

    /// Predefined, then caller supplied, then `dictionaryDefinitions` in tier
    /// order. A later definition replaces an earlier one with the same name.
    fn definition_lookup<'a>(
        &'a self,
        settings: &'a CanonicalSettings,
        extra: &'a [DictionaryDefinition],
    ) -> IndexMap<&'a str, (&'a DictionaryDefinition, DefinitionSource)> {
        let mut lookup = IndexMap::new();
        for definition in self.predefined.values() {
            lookup.insert(
                definition.name.as_str(),
                (definition, DefinitionSource::Predefined),
            );
        }
        let declared = settings.settings().dictionary_definitions.iter().flatten();
        for definition in extra.iter().chain(declared) {
            lookup.insert(
                definition.name.as_str(),
                (definition, DefinitionSource::Definition),
            );
        }
        lookup
    }
}

fn resolve_entry(
    name: &str,
    toggle: &DictionaryToggle,
    lookup: &IndexMap<&str, (&DictionaryDefinition, DefinitionSource)>,
    filter: &dyn ScopeFilter,
    resolution: &mut Resolution,
) -> Option<ResolvedDictionary> {
    let declaration: Option<&CustomDictionary> = toggle.declaration.as_ref();
    let base = lookup.get(name).copied();

    // Fields the declaration sets win; the rest come from the definition.
    let path = declaration
        .and_then(|decl| decl.path.clone())
        .or_else(|| base.and_then(|(def, _)| def.path.clone()));
    let description = declaration
        .and_then(|decl| decl.description.clone())
        .or_else(|| base.and_then(|(def, _)| def.description.clone()));
    let add_words = declaration
        .and_then(|decl| decl.add_words)
        .or_else(|| base.and_then(|(def, _)| def.add_words))
        .unwrap_or(false);
    let scope_list = declaration
        .and_then(|decl| decl.scope.as_ref())
        .or_else(|| base.and_then(|(def, _)| def.scope.as_ref()));
    let source = match base {
        Some((_, source)) => source,
        None => DefinitionSource::Inline,
    };

    let scopes = ParsedScopes::parse(scope_list);

    let Some(path) = path else {
        if toggle.enabled {
            tracing::warn!(name = %name, "custom dictionary has no definition and no path");
            resolution.diagnostics.push(
                ResolveDiagnostic::warning(
                    DiagnosticCode::UnresolvedDictionary,
                    name,
                    t!("core.resolve.unresolved_dictionary", name = name),
                )
                .with_suggestion(t!(
                    "core.resolve.unresolved_dictionary_suggestion",
                    name = name
                )),
            );
        } else {
            tracing::debug!(name = %name, "disabled dictionary has no definition");
        }
        return None;
    };

    if !filter.in_play(&scopes) {
        tracing::debug!(name = %name, scopes = ?scopes.known, "dictionary scope not in play");
        return None;
    }

    for unknown in &scopes.unknown {
        resolution.diagnostics.push(
            ResolveDiagnostic::warning(
                DiagnosticCode::UnknownDictionaryScope,
                name,
                t!("core.resolve.unknown_scope", name = name, scope = unknown.as_str()),
            )
            .with_suggestion(t!("core.resolve.unknown_scope_suggestion")),
        );
    }

    Some(ResolvedDictionary {
        name: name.to_string(),
        path: Some(path),
        description,
        add_words,
        scope: scopes.effective(),
        enabled: toggle.enabled,
        source,
    })
}

/// Resolve custom dictionaries with additional definitions.
///
/// `definitions` sit between the built-in catalog and the settings' own
/// `dictionaryDefinitions`. Scopes in play come from the settings' tiers.
pub fn resolve_custom_dictionaries(
    settings: &CanonicalSettings,
    definitions: &[DictionaryDefinition],
) -> Resolution {
    DictionaryResolver::new().resolve_inner(
        settings,
        definitions,
        &settings.dictionary_scopes_in_play(),
    )
}
