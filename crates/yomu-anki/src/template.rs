use serde::{Deserialize, Serialize};

/// Note type used for exported words, created in Anki when missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub fields: Vec<String>,
    pub card_name: String,
    pub front: String,
    pub back: String,
    pub css: String,
}

impl CardTemplate {
    pub const WORD: &'static str = "Word";

    /// Word on the front; reading, sentence, source and definition on the back
    pub fn vocabulary() -> Self {
        Self {
            fields: ["Word", "Reading", "Definition", "Sentence", "Source"]
                .map(String::from)
                .to_vec(),
            card_name: "Card 1".to_string(),
            front: "<div class='word'>{{Word}}</div>".to_string(),
            back: concat!(
                "<div class='word'>{{Word}}</div>\n",
                "<div class='reading'>【{{Reading}}】</div>\n",
                "<hr>\n",
                "<div class='sentence'><b>Sentence:</b><br><i>{{Sentence}}</i></div>\n",
                "<div class='source'>{{Source}}</div>\n",
                "<div class='definition'><b>Definition:</b><br>{{Definition}}</div>"
            )
            .to_string(),
            css: concat!(
                ".card { font-family: sans-serif; text-align: center; }\n",
                ".word { font-size: 35px; color: #3581b2; font-weight: bold; }\n",
                ".reading { font-size: 20px; color: #252743; }\n",
                ".sentence, .definition { text-align: left; font-size: 16px; margin: 12px 10px; }\n",
                ".source { text-align: right; font-size: 13px; color: #252743; }\n",
                ".definition { background: #f9f9f9; padding: 12px; border-left: 4px solid #D81B60; }"
            )
            .to_string(),
        }
    }
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self::vocabulary()
    }
}
