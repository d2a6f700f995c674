use super::*;

/// Name of a regular expression pattern.
pub type PatternId = String;

/// One expression or a list evaluated as a union.
pub type Pattern = OneOrMany<String>;

/// A glob with an explicit root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GlobDef {
    pub glob: String,
    /// Literal path or `${workspaceFolder}` / `${workspaceFolder:name}` template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// An ignore-path entry: a bare glob or a glob with a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum GlobEntry {
    Simple(String),
    Def(GlobDef),
}

impl GlobEntry {
    pub fn glob(&self) -> &str {
        match self {
            GlobEntry::Simple(glob) => glob,
            GlobEntry::Def(def) => &def.glob,
        }
    }

    pub fn root(&self) -> Option<&str> {
        match self {
            GlobEntry::Simple(_) => None,
            GlobEntry::Def(def) => def.root.as_deref(),
        }
    }
}

impl From<&str> for GlobEntry {
    fn from(glob: &str) -> Self {
        GlobEntry::Simple(glob.to_string())
    }
}

/// A named regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegExpPatternDefinition {
    pub name: PatternId,
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegExpPatternDefinition {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: OneOrMany::One(pattern.into()),
            description: None,
        }
    }
}
