//! Translation resources compiled into the binary.

use crate::language::Language;

/// JSON resource for `language`.
pub fn resource(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../lang/en.json"),
        Language::Ru => include_str!("../lang/ru.json"),
        Language::Zh => include_str!("../lang/zh.json"),
        Language::Es => include_str!("../lang/es.json"),
        Language::Fr => include_str!("../lang/fr.json"),
        Language::De => include_str!("../lang/de.json"),
        Language::Uz => include_str!("../lang/uz.json"),
        Language::It => include_str!("../lang/it.json"),
        Language::Tr => include_str!("../lang/tr.json"),
        Language::Pt => include_str!("../lang/pt.json"),
        Language::Fa => include_str!("../lang/fa.json"),
        Language::Ar => include_str!("../lang/ar.json"),
        Language::Ko => include_str!("../lang/ko.json"),
        Language::Ja => include_str!("../lang/ja.json"),
        Language::Id => include_str!("../lang/id.json"),
        Language::Vi => include_str!("../lang/vi.json"),
        Language::Kz => include_str!("../lang/kz.json"),
        Language::Kg => include_str!("../lang/kg.json"),
        Language::Tk => include_str!("../lang/tk.json"),
        Language::Tg => include_str!("../lang/tg.json"),
        Language::Ps => include_str!("../lang/ps.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{TextKey, TranslationBundle};

    #[test]
    fn test_every_embedded_resource_parses_with_all_keys() {
        for lang in Language::ALL {
            let bundle = TranslationBundle::from_json(lang, resource(lang)).unwrap();
            for key in TextKey::ALL {
                assert!(bundle.get(key.key()).is_some(), "{} is missing {}", lang, key.key());
            }
        }
    }

    #[test]
    fn test_not_found_messages_keep_placeholder() {
        for lang in Language::ALL {
            let bundle = TranslationBundle::from_json(lang, resource(lang)).unwrap();
            assert!(bundle.city_not_found("Tashkent").contains("Tashkent"), "{}", lang);
        }
    }
}
