use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Zh,
    Es,
    Fr,
    De,
    Uz,
    It,
    Tr,
    Pt,
    Fa,
    Ar,
    Ko,
    Ja,
    Id,
    Vi,
    Kz,
    Kg,
    Tk,
    Tg,
    Ps,
}

/// Text direction of the interface for a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl Language {
    /// Language used when a requested code is unsupported or fails to load.
    pub const DEFAULT: Language = Language::En;

    /// All supported languages, in selector order.
    pub const ALL: [Language; 21] = [
        Language::En,
        Language::Ru,
        Language::Zh,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Uz,
        Language::It,
        Language::Tr,
        Language::Pt,
        Language::Fa,
        Language::Ar,
        Language::Ko,
        Language::Ja,
        Language::Id,
        Language::Vi,
        Language::Kz,
        Language::Kg,
        Language::Tk,
        Language::Tg,
        Language::Ps,
    ];

    /// Application language code (also the translation resource name).
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Uz => "uz",
            Language::It => "it",
            Language::Tr => "tr",
            Language::Pt => "pt",
            Language::Fa => "fa",
            Language::Ar => "ar",
            Language::Ko => "ko",
            Language::Ja => "ja",
            Language::Id => "id",
            Language::Vi => "vi",
            Language::Kz => "kz",
            Language::Kg => "kg",
            Language::Tk => "tk",
            Language::Tg => "tg",
            Language::Ps => "ps",
        }
    }

    /// Native name shown in the language selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
            Language::Zh => "中文",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Uz => "Oʻzbekcha",
            Language::It => "Italiano",
            Language::Tr => "Türkçe",
            Language::Pt => "Português",
            Language::Fa => "فارسی",
            Language::Ar => "العربية",
            Language::Ko => "한국어",
            Language::Ja => "日本語",
            Language::Id => "Bahasa Indonesia",
            Language::Vi => "Tiếng Việt",
            Language::Kz => "Қазақша",
            Language::Kg => "Кыргызча",
            Language::Tk => "Türkmençe",
            Language::Tg => "Тоҷикӣ",
            Language::Ps => "پښتو",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Language::Ar | Language::Fa | Language::Ps => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// Parse a supported code. Only the primary subtag is considered, so
    /// `"pt-BR"` and `"zh_CN"` resolve to `pt` and `zh`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    /// Like [`Language::from_code`], substituting the default for anything unsupported.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::debug!("Unsupported language code {:?}, using {}", code, Self::DEFAULT);
            Self::DEFAULT
        })
    }

    /// Primary language of the operating system locale, if supported.
    pub fn from_system() -> Option<Self> {
        let locale = sys_locale::get_locale()?;
        Self::from_code(&locale)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextDirection::Ltr => f.write_str("ltr"),
            TextDirection::Rtl => f.write_str("rtl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_parse_back() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        let mut codes: Vec<_> = Language::ALL.iter().map(Language::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 21);
    }

    #[test]
    fn test_unsupported_resolves_to_default() {
        assert_eq!(Language::resolve("xx"), Language::En);
        assert_eq!(Language::resolve(""), Language::En);
        assert_eq!(Language::resolve("   "), Language::En);
        assert_eq!(Language::resolve("../etc/passwd"), Language::En);
    }

    #[test]
    fn test_region_and_case_are_ignored() {
        assert_eq!(Language::resolve("pt-BR"), Language::Pt);
        assert_eq!(Language::resolve("zh_CN"), Language::Zh);
        assert_eq!(Language::resolve(" DE "), Language::De);
    }

    #[test]
    fn test_rtl_languages() {
        let rtl: Vec<_> = Language::ALL
            .into_iter()
            .filter(|l| l.direction() == TextDirection::Rtl)
            .collect();
        assert_eq!(rtl, vec![Language::Fa, Language::Ar, Language::Ps]);
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(Language::Ko.to_string(), "ko");
    }
}
