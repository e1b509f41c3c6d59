use anyhow::Context;
use yomu_config::dictionary::WebDictionary;
use yomu_types::{UiCommand, Word};

const QUERY_PLACEHOLDER: &str = "{query}";

/// Form looked up in dictionaries: the base form, else the surface
pub fn lookup_form(word: &Word) -> &str {
    if word.base_form.is_empty() {
        &word.surface
    } else {
        &word.base_form
    }
}

/// Detail view of a word; no definition means a web search is offered
pub fn word_detail(word: &Word) -> UiCommand {
    let definition = (!word.definition.trim().is_empty()).then(|| word.definition.clone());
    UiCommand::WordDetail {
        title: lookup_form(word).to_string(),
        reading: word.reading.clone(),
        part_of_speech: word.part_of_speech.clone(),
        definition,
    }
}

pub fn dictionary_menu(word: &Word, dictionaries: &[WebDictionary]) -> UiCommand {
    UiCommand::DictionaryMenu {
        word: lookup_form(word).to_string(),
        providers: dictionaries.iter().map(|d| d.name.clone()).collect(),
    }
}

/// Fill a dictionary template with the percent-encoded word
pub fn dictionary_url(dictionary: &WebDictionary, word: &str) -> anyhow::Result<reqwest::Url> {
    let raw = dictionary
        .url_template
        .replace(QUERY_PLACEHOLDER, &encode_component(word));
    reqwest::Url::parse(&raw)
        .with_context(|| format!("Invalid URL for dictionary {}", dictionary.name))
}

/// RFC 3986 unreserved characters pass, everything else is `%XX` per UTF-8 byte
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use yomu_config::dictionary::default_dictionaries;

    use super::*;

    fn word(definition: &str) -> Word {
        Word {
            surface: "食べた".to_string(),
            base_form: "食べる".to_string(),
            part_of_speech: "動詞".to_string(),
            reading: "たべる".to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_detail_with_and_without_definition() {
        assert_eq!(
            word_detail(&word("to eat")),
            UiCommand::WordDetail {
                title: "食べる".to_string(),
                reading: "たべる".to_string(),
                part_of_speech: "動詞".to_string(),
                definition: Some("to eat".to_string()),
            }
        );

        let UiCommand::WordDetail { definition, .. } = word_detail(&word("  ")) else {
            panic!("expected WordDetail");
        };
        assert!(definition.is_none());
    }

    #[test]
    fn test_dictionary_urls_are_encoded() {
        let dictionaries = default_dictionaries();

        let jisho = dictionary_url(&dictionaries[2], "食べる").unwrap();
        assert_eq!(
            jisho.as_str(),
            "https://jisho.org/search/%E9%A3%9F%E3%81%B9%E3%82%8B"
        );

        let tricky = dictionary_url(&dictionaries[1], "a/b?c#d").unwrap();
        assert_eq!(tricky.as_str(), "https://kotobank.jp/word/a%2Fb%3Fc%23d");
        assert_eq!(tricky.fragment(), None);

        let google = dictionary_url(&dictionaries[4], "猫").unwrap();
        assert!(google.as_str().starts_with("https://www.google.com/search?q=%E7%8C%AB+"));
    }

    #[test]
    fn test_menu_lists_providers_in_order() {
        let UiCommand::DictionaryMenu { word: title, providers } =
            dictionary_menu(&word(""), &default_dictionaries())
        else {
            panic!("expected DictionaryMenu");
        };
        assert_eq!(title, "食べる");
        assert_eq!(providers.len(), 5);
        assert!(providers[0].starts_with("Weblio"));
    }
}
