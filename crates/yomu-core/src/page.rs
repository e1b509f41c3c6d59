//! Structured line metadata for a page, as served by the recognition server.
//!
//! Boxes arrive as `[x, y, width, height]` and are stored as edges.

use serde::{Deserialize, Deserializer};
use yomu_types::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoxRect {
    pub fn from_xywh(values: &[i32]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0);
        let (x, y, w, h) = (at(0), at(1), at(2), at(3));
        Self {
            left: x,
            top: y,
            right: x.saturating_add(w),
            bottom: y.saturating_add(h),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Right and bottom edges are exclusive
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub id: String,
    pub bounds: BoxRect,
    pub text: String,
    pub translation: String,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterData {
    pub manga_id: i64,
    pub chapter: i64,
    pub page: i64,
    pub img_width: i64,
    pub img_height: i64,
    pub items: Vec<PageLine>,
}

impl ChapterData {
    /// `None` unless the payload parses and reports `"status": "success"`
    pub fn parse(json: &str) -> Option<Self> {
        let raw: RawChapter = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Page metadata rejected: {}", e);
                return None;
            }
        };
        if raw.status != "success" {
            return None;
        }

        Some(Self {
            manga_id: raw.manga_id,
            chapter: raw.chapter,
            page: raw.page,
            img_width: raw.img_width,
            img_height: raw.img_height,
            items: raw
                .items
                .into_iter()
                .map(|item| PageLine {
                    id: item.id,
                    bounds: BoxRect::from_xywh(&item.bounds),
                    text: item.text,
                    translation: item.translation,
                    words: item.words,
                })
                .collect(),
        })
    }

    pub fn cache_key(&self) -> String {
        cache_key(self.manga_id, self.chapter, self.page)
    }

    /// First line whose box holds the point, in image coordinates
    pub fn line_at(&self, x: i32, y: i32) -> Option<&PageLine> {
        self.items.iter().find(|line| line.bounds.contains(x, y))
    }
}

pub fn cache_key(manga_id: i64, chapter: i64, page: i64) -> String {
    format!("{manga_id}_{chapter}_{page}")
}

/// Holds the metadata of the page currently on screen
#[derive(Debug, Default)]
pub struct PageDataCache {
    key: String,
    data: Option<ChapterData>,
}

impl PageDataCache {
    pub fn update(&mut self, key: String, data: ChapterData) {
        tracing::debug!("Page metadata updated: {}, {} lines", key, data.items.len());
        self.key = key;
        self.data = Some(data);
    }

    pub fn get(&self, key: &str) -> Option<&ChapterData> {
        if self.key == key {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Forget the metadata, e.g. once the reader has moved on
    pub fn clear(&mut self) {
        if self.data.take().is_some() {
            tracing::debug!("Page metadata cleared: {}", self.key);
        }
        self.key.clear();
    }
}

#[derive(Deserialize)]
struct RawChapter {
    #[serde(default)]
    status: String,
    #[serde(default)]
    manga_id: i64,
    #[serde(default)]
    chapter: i64,
    #[serde(default)]
    page: i64,
    #[serde(default)]
    img_width: i64,
    #[serde(default)]
    img_height: i64,
    #[serde(default, deserialize_with = "null_default")]
    items: Vec<RawLine>,
}

#[derive(Deserialize)]
struct RawLine {
    #[serde(default, deserialize_with = "string_like")]
    id: String,
    #[serde(rename = "box", default, deserialize_with = "null_default")]
    bounds: Vec<i32>,
    #[serde(default, deserialize_with = "string_like")]
    text: String,
    #[serde(default, deserialize_with = "string_like")]
    translation: String,
    #[serde(default, deserialize_with = "null_default")]
    words: Vec<Word>,
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings stay as they are, numbers and booleans are rendered, null is ""
fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "status": "success",
        "manga_id": 12,
        "chapter": 3,
        "page": 7,
        "img_width": 1200,
        "img_height": 1800,
        "items": [
            {"id": 1, "box": [100, 200, 50, 300], "text": "おはよう", "translation": "Good morning",
             "words": [{"s": "おはよう", "b": "おはよう", "p": "感動詞"}]},
            {"id": "b", "box": [90, 190, 400, 400], "text": "外側"},
            {"id": "c", "text": "no box"}
        ]
    }"#;

    #[test]
    fn test_parse_converts_boxes() {
        let data = ChapterData::parse(PAGE).unwrap();
        assert_eq!(data.cache_key(), "12_3_7");
        assert_eq!(data.items.len(), 3);

        let first = &data.items[0];
        assert_eq!(first.id, "1");
        assert_eq!(
            first.bounds,
            BoxRect {
                left: 100,
                top: 200,
                right: 150,
                bottom: 500
            }
        );
        assert_eq!(first.words[0].part_of_speech, "感動詞");
        assert_eq!(data.items[2].bounds, BoxRect::default());
        assert_eq!(data.items[1].translation, "");
    }

    #[test]
    fn test_huge_box_saturates() {
        let rect = BoxRect::from_xywh(&[i32::MAX - 10, 0, 1000, 10]);
        assert_eq!(rect.right, i32::MAX);
        assert!(rect.contains(i32::MAX - 1, 5));

        let json = r#"{"status": "success", "items": [{"id": 1, "box": [2147483000, 0, 1000, 10]}]}"#;
        let data = ChapterData::parse(json).unwrap();
        assert_eq!(data.items[0].bounds.left, 2147483000);
        assert_eq!(data.items[0].bounds.right, i32::MAX);
    }

    #[test]
    fn test_parse_rejects_failures() {
        assert!(ChapterData::parse(r#"{"status": "pending", "items": []}"#).is_none());
        assert!(ChapterData::parse("not json").is_none());
    }

    #[test]
    fn test_line_at_uses_first_match_and_exclusive_edges() {
        let mut cache = PageDataCache::default();
        assert!(cache.get("12_3_7").is_none());

        let data = ChapterData::parse(PAGE).unwrap();
        cache.update(data.cache_key(), data);
        let page = cache.get("12_3_7").unwrap();

        assert_eq!(page.line_at(120, 250).unwrap().id, "1");
        assert_eq!(page.line_at(150, 250).unwrap().id, "b");
        assert_eq!(page.line_at(95, 195).unwrap().id, "b");
        assert!(page.line_at(490, 590).is_none());
        assert!(page.line_at(0, 0).is_none());
    }

    #[test]
    fn test_get_requires_matching_key() {
        let mut cache = PageDataCache::default();
        let data = ChapterData::parse(PAGE).unwrap();
        cache.update(data.cache_key(), data);

        assert!(cache.get("12_3_7").is_some());
        assert!(cache.get("12_3_8").is_none());

        cache.clear();
        assert!(cache.get("12_3_7").is_none());
        assert!(cache.get("").is_none());
    }
}
