//! Diagnostic types and error reporting

use crate::fs::AccessError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Info,
}

/// Machine readable kind of a non-fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// A custom dictionary is enabled but has no definition and no path.
    UnresolvedDictionary,
    /// A dictionary scope value is not one of user/workspace/folder.
    UnknownDictionaryScope,
    /// A setting was supplied in a tier that may not override it.
    SettingIgnoredForTier,
    /// A deprecated setting was used; its value was migrated.
    DeprecatedSetting,
    /// An ignore glob does not parse.
    InvalidGlob,
    /// A regex pattern definition does not compile.
    InvalidPattern,
    /// A glob root template names a workspace folder that is not open.
    UnresolvedGlobRoot,
    /// A setting value has the wrong type; the field was dropped.
    InvalidSetting,
}

/// A non-fatal condition found while merging or resolving settings.
///
/// Resolution never stops on these; the offending entry is skipped or
/// treated permissively and the diagnostic is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveDiagnostic {
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    /// What the diagnostic is about: a dictionary name, a setting field, a glob.
    pub subject: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ResolveDiagnostic {
    pub fn warning(
        code: DiagnosticCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code,
            subject: subject.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn info(
        code: DiagnosticCode,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            code,
            subject: subject.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Settings engine errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to parse settings from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings have an unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error(transparent)]
    Access(#[from] AccessError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_constructor() {
        let diag = ResolveDiagnostic::warning(
            DiagnosticCode::UnresolvedDictionary,
            "team-words",
            "no definition",
        );
        assert_eq!(diag.level, DiagnosticLevel::Warning);
        assert_eq!(diag.code, DiagnosticCode::UnresolvedDictionary);
        assert_eq!(diag.subject, "team-words");
        assert!(diag.suggestion.is_none());
    }

    #[test]
    fn test_info_with_suggestion() {
        let diag = ResolveDiagnostic::info(
            DiagnosticCode::DeprecatedSetting,
            "customUserDictionaries",
            "deprecated",
        )
        .with_suggestion("Use `customDictionaries` instead.");

        assert_eq!(diag.level, DiagnosticLevel::Info);
        assert_eq!(
            diag.suggestion.as_deref(),
            Some("Use `customDictionaries` instead.")
        );
    }

    #[test]
    fn test_diagnostic_level_ordering() {
        assert!(DiagnosticLevel::Warning < DiagnosticLevel::Info);
    }

    #[test]
    fn test_parse_error_display_names_origin() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SettingsError::Parse {
            origin: "settings.json".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "Failed to parse settings from settings.json");
    }

    #[test]
    fn test_diagnostic_serialization_roundtrip() {
        let original = ResolveDiagnostic::warning(DiagnosticCode::InvalidGlob, "[", "bad glob")
            .with_suggestion("fix it");
        let json = serde_json::to_string(&original).expect("serialization should succeed");
        let back: ResolveDiagnostic =
            serde_json::from_str(&json).expect("deserialization should succeed");
        assert_eq!(back, original);
    }
}
