use serde::{Deserialize, Serialize};

/// A web dictionary; `{query}` in the template is replaced by the encoded word
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WebDictionary {
    pub name: String,
    pub url_template: String,
}

impl WebDictionary {
    fn new(name: &str, url_template: &str) -> Self {
        Self {
            name: name.to_string(),
            url_template: url_template.to_string(),
        }
    }
}

pub fn default_dictionaries() -> Vec<WebDictionary> {
    vec![
        WebDictionary::new("Weblio (ja-zh)", "https://cjjc.weblio.jp/content/{query}"),
        WebDictionary::new("Kotobank (ja-ja)", "https://kotobank.jp/word/{query}"),
        WebDictionary::new("Jisho (ja-en)", "https://jisho.org/search/{query}"),
        WebDictionary::new("Massif (examples)", "https://massif.la/ja/search?q={query}"),
        WebDictionary::new("Google", "https://www.google.com/search?q={query}+意味"),
    ]
}
