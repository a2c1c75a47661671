//! Static label translation.
//!
//! Catalogs are flat TOML tables embedded at build time. Lookups fall back
//! from the active locale to English and finally to the key itself, so a
//! missing entry degrades to readable text. Computed values never pass
//! through here.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_LOCALE: &str = "en";

const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.toml")),
    ("zh-HK", include_str!("../locales/zh-HK.toml")),
];

#[derive(Debug, Error)]
#[error("catalog '{locale}' is malformed: {source}")]
pub struct CatalogError {
    locale: &'static str,
    #[source]
    source: toml::de::Error,
}

#[derive(Debug, Clone)]
pub struct Translator {
    locale: &'static str,
    active: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

fn parse_catalog(
    locale: &'static str,
    content: &str,
) -> Result<HashMap<String, String>, CatalogError> {
    toml::from_str(content).map_err(|source| CatalogError { locale, source })
}

/// Locales with an embedded catalog.
pub fn available_locales() -> Vec<&'static str> {
    CATALOGS.iter().map(|(locale, _)| *locale).collect()
}

impl Translator {
    /// Build a translator for `locale`.
    ///
    /// An unknown locale logs a warning and uses English.
    pub fn new(locale: &str) -> Result<Self, CatalogError> {
        let (fallback_locale, fallback_src) = CATALOGS[0];
        let fallback = parse_catalog(fallback_locale, fallback_src)?;

        let Some((locale, source)) = CATALOGS
            .iter()
            .copied()
            .find(|(name, _)| name.eq_ignore_ascii_case(locale))
        else {
            warn!(locale, available = ?available_locales(), "unknown locale; using English");
            return Ok(Self {
                locale: fallback_locale,
                active: fallback.clone(),
                fallback,
            });
        };

        Ok(Self {
            locale,
            active: parse_catalog(locale, source)?,
            fallback,
        })
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// Translate a static label.
    pub fn t<'a>(
        &'a self,
        key: &'a str,
    ) -> &'a str {
        self.active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }
}

impl Default for Translator {
    fn default() -> Self {
        let fallback = parse_catalog(CATALOGS[0].0, CATALOGS[0].1).unwrap_or_default();
        Self {
            locale: DEFAULT_LOCALE,
            active: fallback.clone(),
            fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_embedded_catalog_parses() {
        for &(locale, content) in CATALOGS {
            parse_catalog(locale, content).unwrap();
        }
    }

    #[test]
    fn every_locale_covers_english_keys() {
        let english = parse_catalog("en", CATALOGS[0].1).unwrap();
        for &(locale, content) in CATALOGS {
            let catalog = parse_catalog(locale, content).unwrap();
            for key in english.keys() {
                assert!(catalog.contains_key(key), "{locale} is missing '{key}'");
            }
        }
    }

    #[test]
    fn translates_known_key() {
        let t = Translator::new("zh-HK").unwrap();

        assert_eq!(t.locale(), "zh-HK");
        assert_eq!(t.t("Medical Financial Calculator"), "醫療財務計算器");
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        let t = Translator::new("en").unwrap();

        assert_eq!(t.t("premium_total"), "premium_total");
    }

    #[test]
    fn unknown_locale_uses_english() {
        let t = Translator::new("tlh").unwrap();

        assert_eq!(t.locale(), "en");
        assert_eq!(t.t("value"), "Cost");
    }

    #[test]
    fn locale_match_is_case_insensitive() {
        assert_eq!(Translator::new("ZH-hk").unwrap().locale(), "zh-HK");
    }
}
