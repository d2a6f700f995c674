//! Ignore globs and named regular expression patterns
//!
//! Patterns have identity (their name) and override each other; globs do
//! not and are concatenated. Glob matching itself happens elsewhere, this
//! module only assembles and checks the lists.

use crate::config::{CSpellUserSettings, GlobDef, GlobEntry, RegExpPatternDefinition};
use crate::diagnostics::{DiagnosticCode, ResolveDiagnostic};
use indexmap::IndexMap;
use regex::Regex;
use rust_i18n::t;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

static TEMPLATE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Output of pattern normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPatterns {
    /// `ignorePaths`, verbatim and in tier order.
    pub ignore: Vec<GlobEntry>,
    /// Predefined patterns overlaid with user patterns, by name.
    pub patterns: Vec<RegExpPatternDefinition>,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl NormalizedPatterns {
    pub fn get(&self, name: &str) -> Option<&RegExpPatternDefinition> {
        self.patterns.iter().find(|pattern| pattern.name == name)
    }
}

/// Patterns shipped in the catalog.
pub fn predefined_patterns() -> Vec<RegExpPatternDefinition> {
    spellcfg_catalog::PATTERNS_DATA
        .iter()
        .map(|(name, pattern)| RegExpPatternDefinition::new(*name, *pattern))
        .collect()
}

/// Assemble the effective ignore globs and named patterns.
///
/// Predefined patterns come first. A later pattern whose name equals an
/// earlier one (case-sensitive) replaces it entirely and takes over its
/// position. Every user glob and pattern is checked; failures are reported
/// as warnings and the entry is kept as written.
pub fn normalize_patterns(
    settings: &CSpellUserSettings,
    predefined: &[RegExpPatternDefinition],
) -> NormalizedPatterns {
    let mut diagnostics = Vec::new();

    let mut by_name: IndexMap<&str, &RegExpPatternDefinition> = IndexMap::new();
    for pattern in predefined {
        by_name.insert(pattern.name.as_str(), pattern);
    }
    for pattern in settings.patterns.iter().flatten() {
        for body in &pattern.pattern {
            if let Err(e) = compile_pattern(body) {
                diagnostics.push(
                    ResolveDiagnostic::warning(
                        DiagnosticCode::InvalidPattern,
                        pattern.name.as_str(),
                        t!(
                            "core.patterns.invalid_pattern",
                            name = pattern.name.as_str(),
                            error = e.to_string()
                        ),
                    )
                    .with_suggestion(t!("core.patterns.invalid_pattern_suggestion")),
                );
            }
        }
        if by_name.insert(pattern.name.as_str(), pattern).is_some() {
            tracing::debug!(name = %pattern.name, "pattern overridden");
        }
    }

    let ignore: Vec<GlobEntry> = settings.ignore_paths.clone().unwrap_or_default();
    for entry in &ignore {
        let normalized = entry.glob().replace('\\', "/");
        if let Err(e) = glob::Pattern::new(&normalized) {
            diagnostics.push(
                ResolveDiagnostic::warning(
                    DiagnosticCode::InvalidGlob,
                    entry.glob(),
                    t!(
                        "core.patterns.invalid_glob",
                        glob = entry.glob(),
                        error = e.to_string()
                    ),
                )
                .with_suggestion(t!("core.patterns.invalid_glob_suggestion")),
            );
        }
    }

    NormalizedPatterns {
        ignore,
        patterns: by_name.into_values().cloned().collect(),
        diagnostics,
    }
}

/// Compile a pattern written either as a `/body/flags` literal or a bare
/// expression.
///
/// Flags `i`, `m` and `s` map onto inline flags; `g`, `u` and `y` have no
/// meaning for a single match and are ignored.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&translate_pattern(pattern))
}

fn translate_pattern(pattern: &str) -> String {
    let literal = pattern
        .strip_prefix('/')
        .and_then(|rest| rest.rsplit_once('/'))
        .filter(|(_, flags)| flags.chars().all(|c| "gimsuy".contains(c)));
    let Some((body, flags)) = literal else {
        return pattern.to_string();
    };
    let inline: String = flags.chars().filter(|c| "ims".contains(*c)).collect();
    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", inline, body)
    }
}

/// Source of workspace folder locations for glob root templates.
pub trait WorkspaceFolders {
    /// The folder the current document belongs to.
    fn current(&self) -> Option<PathBuf>;

    /// A workspace folder by name.
    fn named(&self, name: &str) -> Option<PathBuf>;
}

/// Fixed set of workspace folders.
#[derive(Debug, Clone, Default)]
pub struct StaticWorkspaceFolders {
    pub current: Option<PathBuf>,
    pub folders: HashMap<String, PathBuf>,
}

impl StaticWorkspaceFolders {
    pub fn new(current: Option<PathBuf>) -> Self {
        Self {
            current,
            folders: HashMap::new(),
        }
    }

    pub fn with_folder(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.folders.insert(name.into(), path.into());
        self
    }
}

impl WorkspaceFolders for StaticWorkspaceFolders {
    fn current(&self) -> Option<PathBuf> {
        self.current.clone()
    }

    fn named(&self, name: &str) -> Option<PathBuf> {
        self.folders.get(name).cloned()
    }
}

/// A parsed glob root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTemplate {
    Literal(String),
    /// `${workspaceFolder}` or `${workspaceRoot}`, optionally followed by a sub-path.
    WorkspaceFolder { sub_path: String },
    /// `${workspaceFolder:<name>}`, optionally followed by a sub-path.
    NamedWorkspaceFolder { name: String, sub_path: String },
}

fn template_pattern() -> &'static Regex {
    TEMPLATE_PATTERN.get_or_init(|| {
        Regex::new(r"^\$\{(?:workspaceFolder|workspaceRoot)(?::([^}]*))?\}(.*)$").unwrap()
    })
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = template_pattern().captures(raw) else {
            return PathTemplate::Literal(raw.to_string());
        };
        let sub_path = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        match caps.get(1).map(|m| m.as_str().trim()) {
            Some(name) if !name.is_empty() => PathTemplate::NamedWorkspaceFolder {
                name: name.to_string(),
                sub_path,
            },
            _ => PathTemplate::WorkspaceFolder { sub_path },
        }
    }

    /// Resolve against the open workspace folders.
    ///
    /// Returns `None` when the folder the template refers to is not known.
    pub fn resolve(&self, folders: &dyn WorkspaceFolders) -> Option<PathBuf> {
        let (base, sub_path) = match self {
            PathTemplate::Literal(raw) => return Some(PathBuf::from(raw)),
            PathTemplate::WorkspaceFolder { sub_path } => (folders.current()?, sub_path),
            PathTemplate::NamedWorkspaceFolder { name, sub_path } => {
                (folders.named(name)?, sub_path)
            }
        };
        let relative = sub_path.trim_start_matches(['/', '\\']);
        if relative.is_empty() {
            Some(base)
        } else {
            Some(base.join(relative))
        }
    }
}

/// Resolve a glob root, keeping the raw text when it cannot be satisfied.
pub fn resolve_glob_root(raw: &str, folders: &dyn WorkspaceFolders) -> Option<String> {
    PathTemplate::parse(raw)
        .resolve(folders)
        .map(|path| path.to_string_lossy().into_owned())
}

/// Resolve the roots of structured ignore globs.
///
/// Roots that name an unknown workspace folder are kept raw and reported.
pub fn resolve_glob_roots(
    ignore: &[GlobEntry],
    folders: &dyn WorkspaceFolders,
) -> (Vec<GlobEntry>, Vec<ResolveDiagnostic>) {
    let mut diagnostics = Vec::new();
    let entries = ignore
        .iter()
        .map(|entry| match entry {
            GlobEntry::Def(GlobDef {
                glob,
                root: Some(root),
            }) => {
                let resolved = resolve_glob_root(root, folders).unwrap_or_else(|| {
                    diagnostics.push(
                        ResolveDiagnostic::info(
                            DiagnosticCode::UnresolvedGlobRoot,
                            root.as_str(),
                            t!("core.patterns.unresolved_root", root = root.as_str()),
                        )
                        .with_suggestion(t!("core.patterns.unresolved_root_suggestion")),
                    );
                    root.clone()
                });
                GlobEntry::Def(GlobDef {
                    glob: glob.clone(),
                    root: Some(resolved),
                })
            }
            other => other.clone(),
        })
        .collect();
    (entries, diagnostics)
}
