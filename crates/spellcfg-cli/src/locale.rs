//! Locale detection and initialization for the spellcfg CLI.
//!
//! Locale resolution order:
//! 1. `--locale` CLI flag (highest priority)
//! 2. `SPELLCFG_LOCALE` environment variable
//! 3. `LC_ALL` / `LANG` environment variable
//! 4. System locale detection via `sys-locale`
//! 5. Fallback to "en" (English)
//!
//! The locale is process wide, so messages produced by `spellcfg-core`
//! follow it as well.

use rust_i18n::set_locale;

/// Supported locales with their display names.
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("en", "English"), ("es", "Spanish / Espanol")];

const LOCALE_ENV: &str = "SPELLCFG_LOCALE";

/// Detect the best locale from the environment.
pub fn detect_locale() -> String {
    let candidates = [
        std::env::var(LOCALE_ENV).ok(),
        std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .ok(),
        sys_locale::get_locale(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|locale| normalize_locale(&locale))
        .find(|locale| is_supported(locale))
        .unwrap_or_else(|| "en".to_string())
}

/// Initialize the locale. An explicit but unsupported locale falls back to
/// English with a warning.
pub fn init(cli_locale: Option<&str>) {
    let locale = match cli_locale {
        Some(requested) => {
            let normalized = normalize_locale(requested);
            if is_supported(&normalized) {
                normalized
            } else {
                tracing::warn!(locale = %requested, "unsupported locale, falling back to 'en'");
                "en".to_string()
            }
        }
        None => detect_locale(),
    };

    set_locale(&locale);
}

/// Map an environment locale string onto a supported code.
///
/// - "en_US.UTF-8" -> "en"
/// - "es_ES" -> "es"
/// - "fr_FR" -> "fr" (unsupported, returned for the caller to reject)
fn normalize_locale(locale: &str) -> String {
    let base = locale.split(['.', '@']).next().unwrap_or(locale);

    for &(code, _) in SUPPORTED_LOCALES {
        if base.eq_ignore_ascii_case(code) {
            return code.to_string();
        }
    }

    let lang = base.split(['_', '-']).next().unwrap_or(base);
    for &(code, _) in SUPPORTED_LOCALES {
        if lang.eq_ignore_ascii_case(code) {
            return code.to_string();
        }
    }

    lang.to_lowercase()
}

fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.iter().any(|&(code, _)| code == locale)
}

/// Print the list of supported locales.
pub fn print_supported_locales() {
    println!("{}", rust_i18n::t!("cli.locales.header"));
    for &(code, name) in SUPPORTED_LOCALES {
        println!("  {:<8} {}", code, name);
    }
}
