//! spellcfg CLI - resolve layered spell checker settings

rust_i18n::i18n!("locales", fallback = "en");

mod layers;
mod locale;
mod output;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rust_i18n::t;
use spellcfg_core::{
    CanonicalSettings, CustomDictionaryScope, DictionaryResolver, ResolvedSettings,
    SettingsLayer, SettingsTier, StaticWorkspaceFolders, TokioFileAccessor, add_words,
    generate_configuration_schema, normalize_patterns, predefined_patterns, resolve_glob_roots,
    setting_descriptors, target_dictionary_for_words,
};
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "spellcfg")]
#[command(author, version, about = "Resolve layered spell checker settings", long_about = None)]
struct Cli {
    /// Output language (en, es). Defaults to SPELLCFG_LOCALE or the system locale
    #[arg(long, global = true)]
    locale: Option<String>,

    /// List supported locales and exit
    #[arg(long)]
    list_locales: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge settings layers and resolve dictionaries and patterns
    Resolve {
        #[command(flatten)]
        layers: LayerArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the host configuration schema
    Schema {
        /// Print the settings key table instead of the JSON schema
        #[arg(long)]
        keys: bool,
    },

    /// Add words to a custom dictionary word list
    AddWords {
        #[command(flatten)]
        layers: LayerArgs,

        /// Scope whose dictionary receives the words
        #[arg(long, value_parser = parse_scope, default_value = "user")]
        target: CustomDictionaryScope,

        /// Write to this word list instead of a resolved dictionary
        #[arg(long)]
        file: Option<PathBuf>,

        /// Words to add
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
struct LayerArgs {
    /// User settings file (JSON or YAML)
    #[arg(long)]
    user: Option<PathBuf>,

    /// Workspace settings file
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Workspace folder settings file
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Per-file override settings file
    #[arg(long)]
    file_override: Option<PathBuf>,

    /// Leave out the built-in default tier
    #[arg(long)]
    no_defaults: bool,

    /// Dictionary scopes in play (repeatable). Defaults to the tiers given
    #[arg(long = "scope", value_parser = parse_scope)]
    scopes: Vec<CustomDictionaryScope>,

    /// Folder substituted for ${workspaceFolder} in glob roots
    #[arg(long)]
    workspace_folder: Option<PathBuf>,

    /// Named workspace folder for ${workspaceFolder:NAME}, as NAME=PATH (repeatable)
    #[arg(long = "named-folder", value_parser = parse_named_folder)]
    named_folders: Vec<(String, PathBuf)>,
}

fn parse_scope(value: &str) -> Result<CustomDictionaryScope, String> {
    CustomDictionaryScope::parse(value)
        .ok_or_else(|| format!("unknown scope '{}' (expected user, workspace or folder)", value))
}

fn parse_named_folder(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", value)),
    }
}

impl LayerArgs {
    fn load(&self) -> Result<Vec<SettingsLayer>> {
        let mut loaded = Vec::new();
        if !self.no_defaults {
            loaded.push(SettingsLayer::defaults()?);
        }
        let files = [
            (SettingsTier::User, &self.user),
            (SettingsTier::Workspace, &self.workspace),
            (SettingsTier::Folder, &self.folder),
            (SettingsTier::FileOverride, &self.file_override),
        ];
        for (tier, path) in files {
            if let Some(path) = path {
                loaded.push(layers::load_layer(path, tier)?);
            }
        }
        Ok(loaded)
    }

    fn resolve(&self) -> Result<ResolvedSettings> {
        let settings = CanonicalSettings::merge(self.load()?)?;

        let resolver = DictionaryResolver::new();
        let dictionaries = if self.scopes.is_empty() {
            resolver.resolve(&settings)
        } else {
            resolver.resolve_with_scopes(&settings, &self.scopes)
        };

        let mut patterns = normalize_patterns(settings.settings(), &predefined_patterns());
        if self.workspace_folder.is_some() || !self.named_folders.is_empty() {
            let folders = self.named_folders.iter().fold(
                StaticWorkspaceFolders::new(self.workspace_folder.clone()),
                |folders, (name, path)| folders.with_folder(name.clone(), path.clone()),
            );
            let (ignore, diagnostics) = resolve_glob_roots(&patterns.ignore, &folders);
            patterns.ignore = ignore;
            patterns.diagnostics.extend(diagnostics);
        }

        Ok(ResolvedSettings {
            settings,
            dictionaries,
            patterns,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    locale::init(cli.locale.as_deref());

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.list_locales {
        locale::print_supported_locales();
        return Ok(());
    }

    match cli.command {
        Some(Commands::Resolve { layers, format }) => {
            let resolved = layers.resolve()?;
            match format {
                OutputFormat::Text => print!("{}", output::render_text(&resolved)),
                OutputFormat::Json => println!("{}", output::render_json(&resolved)?),
            }
        }
        Some(Commands::Schema { keys }) => {
            if keys {
                print!("{}", output::render_keys(&setting_descriptors()));
            } else {
                let schema = generate_configuration_schema()?;
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
        }
        Some(Commands::AddWords {
            layers,
            target,
            file,
            words,
        }) => add_words_command(&layers, target, file, &words).await?,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

async fn add_words_command(
    layers: &LayerArgs,
    target: CustomDictionaryScope,
    file: Option<PathBuf>,
    words: &[String],
) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => {
            let resolved = layers.resolve()?;
            let Some(path) = target_dictionary_for_words(&resolved.dictionaries, target)
                .and_then(|dict| dict.path.clone())
            else {
                eprintln!("{}", t!("cli.add_words.no_target_suggestion").dimmed());
                bail!("{}", t!("cli.add_words.no_target", scope = target.as_str()));
            };
            PathBuf::from(path)
        }
    };

    let accessor = TokioFileAccessor::new();
    let outcome = add_words(&accessor, &path, words).await?;
    let shown = path.display().to_string();
    if outcome.added.is_empty() {
        println!("{}", t!("cli.add_words.nothing_new", path = shown.as_str()));
    } else {
        println!(
            "{}",
            t!(
                "cli.add_words.added",
                count = outcome.added.len(),
                path = shown.as_str(),
                total = outcome.total
            )
            .green()
        );
    }
    Ok(())
}
