//! Dictionary word-list files
//!
//! Plain text, one word per line. Case is preserved; surrounding whitespace
//! and blank lines are dropped.

use crate::config::CustomDictionaryScope;
use crate::fs::{AccessError, FileAccessor};
use crate::resolve::{Resolution, ResolvedDictionary};
use std::collections::HashSet;
use std::path::Path;

/// Parse word-list text into words.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render words as word-list text, newline terminated.
pub fn format_word_list<S: AsRef<str>>(words: &[S]) -> String {
    let mut text = String::new();
    for word in words {
        text.push_str(word.as_ref());
        text.push('\n');
    }
    text
}

/// Read a word list. A missing file is an empty list.
pub async fn read_words<A>(accessor: &A, path: &Path) -> Result<Vec<String>, AccessError>
where
    A: FileAccessor + ?Sized,
{
    match accessor.read_file(path).await {
        Ok(text) => Ok(parse_word_list(&text)),
        Err(err) if accessor.is_not_found_error(&err) => {
            tracing::debug!(path = %path.display(), "word list not found, starting empty");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Result of [`add_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddWordsOutcome {
    /// Words that were not in the file before, in the order given.
    pub added: Vec<String>,
    /// Number of words in the file afterwards.
    pub total: usize,
}

/// Append words to a word list, creating the file and its directory if needed.
///
/// Words already present (exact match after trimming) are skipped. The
/// directory is created before the file is written. Nothing is written when
/// no word is new.
pub async fn add_words<A, S>(
    accessor: &A,
    path: &Path,
    words: &[S],
) -> Result<AddWordsOutcome, AccessError>
where
    A: FileAccessor + ?Sized,
    S: AsRef<str>,
{
    let mut existing = read_words(accessor, path).await?;
    let mut seen: HashSet<String> = existing.iter().cloned().collect();

    let mut added = Vec::new();
    for word in words {
        let word = word.as_ref().trim();
        if !word.is_empty() && seen.insert(word.to_string()) {
            added.push(word.to_string());
        }
    }

    if added.is_empty() {
        return Ok(AddWordsOutcome {
            added,
            total: existing.len(),
        });
    }

    existing.extend(added.iter().cloned());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        accessor.create_directory(parent).await?;
    }
    accessor
        .write_file(path, &format_word_list(&existing))
        .await?;

    tracing::debug!(path = %path.display(), added = added.len(), "words added");
    Ok(AddWordsOutcome {
        added,
        total: existing.len(),
    })
}

/// The dictionary new words should go to for a scope.
///
/// First enabled dictionary, in resolution order, that accepts words, has a
/// path and is active in `scope`.
pub fn target_dictionary_for_words(
    resolution: &Resolution,
    scope: CustomDictionaryScope,
) -> Option<&ResolvedDictionary> {
    resolution
        .enabled()
        .find(|dict| dict.add_words && dict.path.is_some() && dict.has_scope(scope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::{InjectedFailure, MemoryFileAccessor};
    use crate::fs::FsErrorKind;
    use crate::resolve::DefinitionSource;

    #[test]
    fn test_parse_word_list_trims_and_drops_blanks() {
        let words = parse_word_list("  Alpha \n\nbeta\r\n   \n Gamma");
        assert_eq!(words, vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_format_word_list() {
        assert_eq!(format_word_list(&["a", "b"]), "a\nb\n");
        assert_eq!(format_word_list::<&str>(&[]), "");
    }

    #[tokio::test]
    async fn test_read_words_missing_is_empty() {
        let fs = MemoryFileAccessor::new();
        let words = read_words(&fs, Path::new("/dicts/none.txt")).await.unwrap();
        assert!(words.is_empty());
    }

    #[tokio::test]
    async fn test_read_words_propagates_other_errors() {
        let fs = MemoryFileAccessor::new();
        fs.fail_with("/dicts/locked.txt", InjectedFailure::Fs("EACCES".to_string()));
        let err = read_words(&fs, Path::new("/dicts/locked.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.fs_kind(), Some(FsErrorKind::PermissionDenied));

        fs.fail_with("/dicts/host.txt", InjectedFailure::Host("boom".to_string()));
        let err = read_words(&fs, Path::new("/dicts/host.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Other(_)));
    }

    #[tokio::test]
    async fn test_add_words_creates_directory_then_file() {
        let fs = MemoryFileAccessor::new();
        let outcome = add_words(&fs, Path::new("/new/dir/words.txt"), &["Alpha", "beta"])
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["Alpha", "beta"]);
        assert_eq!(outcome.total, 2);
        assert_eq!(
            fs.content("/new/dir/words.txt").as_deref(),
            Some("Alpha\nbeta\n")
        );
        assert_eq!(
            fs.operations(),
            vec![
                "create_directory /new/dir".to_string(),
                "write_file /new/dir/words.txt".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_add_words_skips_existing_and_duplicates() {
        let fs = MemoryFileAccessor::new();
        fs.add_file("/d/words.txt", "alpha\nBeta\n");

        let outcome = add_words(&fs, Path::new("/d/words.txt"), &["beta", "Beta", " gamma ", "gamma", ""])
            .await
            .unwrap();

        assert_eq!(outcome.added, vec!["beta", "gamma"]);
        assert_eq!(
            fs.content("/d/words.txt").as_deref(),
            Some("alpha\nBeta\nbeta\ngamma\n")
        );
    }

    #[tokio::test]
    async fn test_add_words_nothing_new_does_not_write() {
        let fs = MemoryFileAccessor::new();
        fs.add_file("/d/words.txt", "alpha\n");

        let outcome = add_words(&fs, Path::new("/d/words.txt"), &["alpha"])
            .await
            .unwrap();
        assert!(outcome.added.is_empty());
        assert_eq!(outcome.total, 1);
        assert!(fs.operations().is_empty());
    }

    #[tokio::test]
    async fn test_add_words_propagates_fs_failure() {
        let fs = MemoryFileAccessor::new();
        fs.add_dir("/d");
        fs.fail_with("/d/words.txt", InjectedFailure::Fs("EROFS".to_string()));

        let err = add_words(&fs, Path::new("/d/words.txt"), &["alpha"])
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("EROFS"));
    }

    fn resolved(name: &str, add_words: bool, scope: Vec<CustomDictionaryScope>) -> ResolvedDictionary {
        ResolvedDictionary {
            name: name.to_string(),
            path: Some(format!("/{}.txt", name)),
            description: None,
            add_words,
            scope,
            enabled: true,
            source: DefinitionSource::Inline,
        }
    }

    #[test]
    fn test_target_dictionary_for_words() {
        let resolution = Resolution {
            dictionaries: vec![
                resolved("read-only", false, CustomDictionaryScope::ALL.to_vec()),
                resolved("user-words", true, vec![CustomDictionaryScope::User]),
                resolved("team-words", true, vec![CustomDictionaryScope::Workspace]),
            ],
            diagnostics: Vec::new(),
        };

        assert_eq!(
            target_dictionary_for_words(&resolution, CustomDictionaryScope::User)
                .map(|d| d.name.as_str()),
            Some("user-words")
        );
        assert_eq!(
            target_dictionary_for_words(&resolution, CustomDictionaryScope::Workspace)
                .map(|d| d.name.as_str()),
            Some("team-words")
        );
        assert!(target_dictionary_for_words(&resolution, CustomDictionaryScope::Folder).is_none());
    }
}
