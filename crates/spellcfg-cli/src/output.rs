//! Rendering of resolution results.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use rust_i18n::t;
use serde::Serialize;
use spellcfg_core::{
    CSpellUserSettings, DefinitionSource, DiagnosticLevel, GlobEntry, RegExpPatternDefinition,
    ResolveDiagnostic, ResolvedDictionary, ResolvedSettings, SettingDescriptor, SettingsTier,
};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Machine readable form of one resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport<'a> {
    pub tiers: Vec<SettingsTier>,
    pub settings: &'a CSpellUserSettings,
    pub dictionaries: &'a [ResolvedDictionary],
    pub ignore_paths: &'a [GlobEntry],
    pub patterns: &'a [RegExpPatternDefinition],
    pub diagnostics: Vec<&'a ResolveDiagnostic>,
}

impl<'a> ResolveReport<'a> {
    pub fn new(resolved: &'a ResolvedSettings) -> Self {
        Self {
            tiers: resolved.settings.tiers().iter().copied().collect(),
            settings: resolved.settings.settings(),
            dictionaries: &resolved.dictionaries.dictionaries,
            ignore_paths: &resolved.patterns.ignore,
            patterns: &resolved.patterns.patterns,
            diagnostics: resolved.diagnostics(),
        }
    }
}

pub fn render_json(resolved: &ResolvedSettings) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ResolveReport::new(resolved))?)
}

pub fn render_text(resolved: &ResolvedSettings) -> String {
    let mut out = String::new();

    let tiers: Vec<&str> = resolved
        .settings
        .tiers()
        .iter()
        .map(SettingsTier::as_str)
        .collect();
    let _ = writeln!(out, "{}: {}", heading(&t!("cli.resolve.tiers")), tiers.join(", "));

    let _ = writeln!(out, "\n{}", heading(&t!("cli.resolve.dictionaries")));
    if resolved.dictionaries.dictionaries.is_empty() {
        let _ = writeln!(out, "  {}", t!("cli.resolve.none").dimmed());
    }
    for dict in &resolved.dictionaries.dictionaries {
        let _ = writeln!(out, "  {}", dictionary_line(dict));
    }

    let _ = writeln!(out, "\n{}", heading(&t!("cli.resolve.ignore_paths")));
    if resolved.patterns.ignore.is_empty() {
        let _ = writeln!(out, "  {}", t!("cli.resolve.none").dimmed());
    }
    for entry in &resolved.patterns.ignore {
        match entry.root() {
            Some(root) => {
                let _ = writeln!(out, "  {} {}", entry.glob(), format!("({})", root).dimmed());
            }
            None => {
                let _ = writeln!(out, "  {}", entry.glob());
            }
        }
    }

    let _ = writeln!(out, "\n{}", heading(&t!("cli.resolve.patterns")));
    for pattern in &resolved.patterns.patterns {
        let _ = writeln!(
            out,
            "  {:<24} {}",
            pattern.name.cyan(),
            pattern.pattern.to_vec().join(" | ")
        );
    }

    let diagnostics = resolved.diagnostics();
    if !diagnostics.is_empty() {
        let _ = writeln!(out, "\n{}", heading(&t!("cli.resolve.diagnostics")));
        for diagnostic in &diagnostics {
            out.push_str(&diagnostic_lines(diagnostic));
        }
    }

    let enabled = resolved.dictionaries.enabled().count();
    let _ = writeln!(
        out,
        "\n{}",
        t!(
            "cli.resolve.summary",
            enabled = enabled,
            total = resolved.dictionaries.dictionaries.len(),
            diagnostics = diagnostics.len()
        )
        .bold()
    );
    out
}

/// Table of prefixed host keys with their scope.
pub fn render_keys(descriptors: &[SettingDescriptor]) -> String {
    let width = descriptors
        .iter()
        .map(|d| d.key.len())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {}",
        t!("cli.schema.key").bold(),
        t!("cli.schema.scope").bold(),
        width = width
    );
    for descriptor in descriptors.iter().filter(|d| !d.hidden) {
        let mut line = format!(
            "{:<width$}  {}",
            descriptor.key,
            descriptor.scope.as_str(),
            width = width
        );
        if descriptor.deprecation_message.is_some() {
            let _ = write!(line, "  {}", t!("cli.schema.deprecated").yellow());
        }
        let _ = writeln!(out, "{}", line);
    }
    out
}

fn heading(text: &str) -> ColoredString {
    text.bold().underline()
}

fn dictionary_line(dict: &ResolvedDictionary) -> String {
    let state = if dict.enabled {
        t!("cli.resolve.enabled").green()
    } else {
        t!("cli.resolve.disabled").red()
    };
    let scopes: Vec<&str> = dict.scope.iter().map(|s| s.as_str()).collect();
    let source = match dict.source {
        DefinitionSource::Predefined => "predefined",
        DefinitionSource::Definition => "definition",
        DefinitionSource::Inline => "inline",
    };

    let mut line = format!("{:<12} {}", state, dict.name.bold());
    if let Some(path) = &dict.path {
        let _ = write!(line, "  {}", path);
    }
    let _ = write!(line, "  [{}]  {}", scopes.join(", "), source.dimmed());
    if dict.add_words {
        line.push_str("  +words");
    }
    line
}

fn diagnostic_lines(diagnostic: &ResolveDiagnostic) -> String {
    let level = match diagnostic.level {
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Info => "info".blue().bold(),
    };
    let mut out = format!(
        "  {}[{:?}] {}: {}\n",
        level, diagnostic.code, diagnostic.subject, diagnostic.message
    );
    if let Some(suggestion) = &diagnostic.suggestion {
        let _ = writeln!(out, "    {}: {}", t!("cli.resolve.help").cyan(), suggestion);
    }
    out
}
