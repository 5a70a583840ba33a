//! Storefront translation catalog.
//!
//! One immutable key/value table per language, built on first use and shared
//! for the life of the process. Lookups never fail: unknown languages fall
//! back to English and unknown keys render as the key itself.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

mod en;
mod uk;

pub const DEFAULT_LANGUAGE: &str = "en";

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

/// A language and its translations.
#[derive(Debug)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    aliases: &'static [&'static str],
    entries: HashMap<&'static str, &'static str>,
}

impl Language {
    fn new(
        code: &'static str,
        name: &'static str,
        native_name: &'static str,
        aliases: &'static [&'static str],
        entries: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            code,
            name,
            native_name,
            aliases,
            entries: entries.iter().copied().collect(),
        }
    }

    fn answers_to(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(code))
    }

    /// Look up `key` and substitute `{{name}}` placeholders from `params`.
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self
            .entries
            .get(key)
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string());

        for (name, value) in params {
            text = text.replace(&format!("{{{{{}}}}}", name), value);
        }

        text
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> BTreeMap<&'static str, &'static str> {
        self.entries.iter().map(|(k, v)| (*k, *v)).collect()
    }

    pub fn info(&self) -> LanguageInfo {
        LanguageInfo {
            code: self.code,
            name: self.name,
            native_name: self.native_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

#[derive(Debug)]
pub struct Catalog {
    languages: Vec<Language>,
}

impl Catalog {
    fn builtin() -> Self {
        Self {
            languages: vec![
                Language::new("en", "English", "English", &["english"], en::ENTRIES),
                Language::new(
                    "uk",
                    "Ukrainian",
                    "Українська",
                    &["ua", "ukrainian"],
                    uk::ENTRIES,
                ),
            ],
        }
    }

    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    /// Resolve a language code or alias, falling back to English.
    pub fn language(&self, code: &str) -> &Language {
        if let Some(language) = self.languages.iter().find(|l| l.answers_to(code)) {
            return language;
        }

        tracing::warn!(code = %code, "Language not supported, falling back to English");
        self.default_language()
    }

    fn default_language(&self) -> &Language {
        self.languages
            .iter()
            .find(|l| l.code == DEFAULT_LANGUAGE)
            .unwrap_or(&self.languages[0])
    }

    pub fn translate(&self, code: &str, key: &str, params: &[(&str, &str)]) -> String {
        self.language(code).translate(key, params)
    }

    pub fn supported_languages(&self) -> Vec<LanguageInfo> {
        self.languages.iter().map(Language::info).collect()
    }
}
