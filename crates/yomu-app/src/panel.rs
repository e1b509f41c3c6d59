//! Result panel: content, natural size, placement and drag state.

use yomu_config::panel::PanelConfig;
use yomu_core::placement::{PanelDrag, place_panel};
use yomu_types::{
    LookupId, LookupResult, PanelPlacement, PosCategory, TouchAction, TouchPoint, UiCommand,
    Viewport, Word, WordChip,
};

pub fn pos_category(part_of_speech: &str) -> PosCategory {
    if part_of_speech.contains('名') {
        PosCategory::Noun
    } else if part_of_speech.contains('動') {
        PosCategory::Verb
    } else if part_of_speech.contains("形容") {
        PosCategory::Adjective
    } else if part_of_speech.contains('感') {
        PosCategory::Interjection
    } else {
        PosCategory::Other
    }
}

/// `surface`, with the dictionary form underneath when it differs
pub fn chip_label(word: &Word) -> String {
    if word.base_form.is_empty() || word.surface == word.base_form {
        word.surface.clone()
    } else {
        format!("{}\n[{}]", word.surface, word.base_form)
    }
}

pub fn word_chips(words: &[Word]) -> Vec<WordChip> {
    words
        .iter()
        .map(|word| WordChip {
            label: chip_label(word),
            category: pos_category(&word.part_of_speech),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub source_text: String,
    pub translation: String,
    pub chips: Vec<WordChip>,
}

/// Natural size of the panel content when laid out at most `max_width` wide
pub trait PanelMeasurer: Send + Sync {
    fn measure(&self, content: &PanelContent, max_width: i32) -> (i32, i32);
}

/// Fixed-pitch estimate of the rendered panel
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub char_width: i32,
    pub line_height: i32,
    pub padding: i32,
    pub chip_height: i32,
}

impl TextMetrics {
    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            char_width: config.char_width_px.max(1) as i32,
            line_height: config.line_height_px as i32,
            padding: config.padding_px as i32,
            chip_height: config.chip_height_px as i32,
        }
    }

    fn text_extent(&self, text: &str, inner: i32) -> (i32, i32) {
        let mut width = 0;
        let mut lines = 0;
        for line in text.lines() {
            let line_width = line.chars().count() as i32 * self.char_width;
            width = width.max(line_width.min(inner));
            lines += (line_width + inner - 1).max(inner) / inner;
        }
        (width, lines)
    }
}

impl PanelMeasurer for TextMetrics {
    fn measure(&self, content: &PanelContent, max_width: i32) -> (i32, i32) {
        let inner = (max_width - 2 * self.padding).max(self.char_width);

        let (source_width, source_lines) = self.text_extent(&content.source_text, inner);
        let (translation_width, translation_lines) = self.text_extent(&content.translation, inner);

        // Chips flow left to right and wrap
        let gap = self.padding / 2;
        let mut rows = 0;
        let mut row_width = 0;
        let mut chips_width = 0;
        for chip in &content.chips {
            let longest = chip.label.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            let chip_width = (longest as i32 * self.char_width + self.padding).min(inner);
            if rows == 0 || row_width + gap + chip_width > inner {
                rows += 1;
                row_width = chip_width;
            } else {
                row_width += gap + chip_width;
            }
            chips_width = chips_width.max(row_width);
        }

        let width = source_width.max(translation_width).max(chips_width) + 2 * self.padding;
        let height = 2 * self.padding
            + (source_lines + translation_lines) * self.line_height
            + rows * self.chip_height;
        (width.min(max_width), height)
    }
}

#[derive(Debug, Clone)]
pub struct OpenPanel {
    pub id: LookupId,
    pub placement: PanelPlacement,
    pub content: PanelContent,
    pub words: Vec<Word>,
    /// Context name at the time of the lookup, used as the card source
    pub context_name: String,
    drag: Option<PanelDrag>,
}

/// Owns the panel on screen, at most one at a time
pub struct PanelHost {
    panel: Option<OpenPanel>,
    measurer: Box<dyn PanelMeasurer>,
    safe_zone_divisor: u32,
    translation_pending: String,
    translation_failed: String,
}

impl PanelHost {
    pub fn new(config: &PanelConfig, measurer: Box<dyn PanelMeasurer>) -> Self {
        Self {
            panel: None,
            measurer,
            safe_zone_divisor: config.safe_zone_divisor,
            translation_pending: config.translation_pending.clone(),
            translation_failed: config.translation_failed.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn current(&self) -> Option<&OpenPanel> {
        self.panel.as_ref()
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.panel.as_ref()?.words.get(index)
    }

    /// Replace whatever is open with the result of lookup `id`.
    ///
    /// With `translation` set the panel is final; otherwise it shows the
    /// pending placeholder until [`Self::apply_translation`].
    pub fn open(
        &mut self,
        id: LookupId,
        result: LookupResult,
        translation: Option<String>,
        context_name: String,
        anchor_y: i32,
        screen: Viewport,
    ) -> UiCommand {
        let content = PanelContent {
            source_text: result.source_text,
            translation: translation.unwrap_or_else(|| self.translation_pending.clone()),
            chips: word_chips(&result.words),
        };

        let (screen_width, screen_height) = (screen.width as i32, screen.height as i32);
        let (width, height) = self.measurer.measure(&content, screen_width);
        let placement = place_panel(
            anchor_y,
            width,
            height,
            screen_width,
            screen_height,
            self.safe_zone_divisor,
        );
        tracing::debug!(%id, ?placement, anchor_y, "Panel opened");

        let command = UiCommand::ShowPanel {
            id,
            placement,
            source_text: content.source_text.clone(),
            translation: content.translation.clone(),
            words: content.chips.clone(),
        };

        self.panel = Some(OpenPanel {
            id,
            placement,
            content,
            words: result.words,
            context_name,
            drag: None,
        });
        command
    }

    /// `None` when the panel for `id` is no longer open
    pub fn apply_translation(&mut self, id: LookupId, text: Option<String>) -> Option<UiCommand> {
        let panel = self.panel.as_mut().filter(|p| p.id == id)?;
        panel.content.translation = text.unwrap_or_else(|| self.translation_failed.clone());

        Some(UiCommand::UpdateTranslation {
            id,
            text: panel.content.translation.clone(),
        })
    }

    /// Drag-handle input in raw screen coordinates
    pub fn drag(&mut self, action: TouchAction, point: TouchPoint) -> Option<UiCommand> {
        let panel = self.panel.as_mut()?;
        match action {
            TouchAction::Down => {
                panel.drag = Some(PanelDrag::begin(&panel.placement, point));
                None
            }
            TouchAction::Move => {
                let drag = panel.drag?;
                drag.update(&mut panel.placement, point);
                Some(UiCommand::MovePanel {
                    placement: panel.placement,
                })
            }
            TouchAction::Up | TouchAction::Cancel => {
                panel.drag = None;
                None
            }
        }
    }

    /// Returns whether a panel was open
    pub fn dismiss(&mut self) -> bool {
        let was_open = self.panel.take().is_some();
        if was_open {
            tracing::debug!("Panel dismissed");
        }
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(surface: &str, base: &str, pos: &str) -> Word {
        Word {
            surface: surface.to_string(),
            base_form: base.to_string(),
            part_of_speech: pos.to_string(),
            ..Word::default()
        }
    }

    fn screen() -> Viewport {
        Viewport {
            width: 1000,
            height: 2000,
            density: 1.0,
        }
    }

    fn host() -> PanelHost {
        PanelHost::new(
            &PanelConfig::default(),
            Box::new(TextMetrics::from_config(&PanelConfig::default())),
        )
    }

    fn result() -> LookupResult {
        LookupResult {
            source_text: "ご飯を食べた".to_string(),
            translation: String::new(),
            words: vec![word("ご飯", "ご飯", "名詞"), word("食べた", "食べる", "動詞")],
        }
    }

    #[test]
    fn test_pos_categories() {
        assert_eq!(pos_category("名詞"), PosCategory::Noun);
        assert_eq!(pos_category("動詞"), PosCategory::Verb);
        assert_eq!(pos_category("形容詞"), PosCategory::Adjective);
        assert_eq!(pos_category("感動詞"), PosCategory::Verb);
        assert_eq!(pos_category("感嘆"), PosCategory::Interjection);
        assert_eq!(pos_category("助詞"), PosCategory::Other);
        assert_eq!(pos_category(""), PosCategory::Other);
    }

    #[test]
    fn test_chip_labels() {
        assert_eq!(chip_label(&word("ご飯", "ご飯", "")), "ご飯");
        assert_eq!(chip_label(&word("食べた", "食べる", "")), "食べた\n[食べる]");
        assert_eq!(chip_label(&word("が", "", "")), "が");
    }

    #[test]
    fn test_measure_caps_width_and_wraps() {
        let metrics = TextMetrics {
            char_width: 10,
            line_height: 20,
            padding: 5,
            chip_height: 30,
        };
        let content = PanelContent {
            source_text: "a".repeat(25),
            translation: "bb".to_string(),
            chips: vec![],
        };
        // 250px of text in a 90px inner width wraps to three lines
        assert_eq!(metrics.measure(&content, 100), (100, 10 + 4 * 20));

        let content = PanelContent {
            source_text: "abc".to_string(),
            translation: String::new(),
            chips: vec![
                WordChip {
                    label: "ab\n[abcd]".to_string(),
                    category: PosCategory::Other,
                },
                WordChip {
                    label: "x".to_string(),
                    category: PosCategory::Other,
                },
            ],
        };
        // chips: 65 + 2 + 15 on one row
        assert_eq!(metrics.measure(&content, 500), (82 + 10, 10 + 20 + 30));
    }

    #[test]
    fn test_open_places_panel_clear_of_anchor() {
        let mut host = host();
        let id = LookupId::new();
        let command = host.open(id, result(), None, "よつばと!".to_string(), 1500, screen());

        let UiCommand::ShowPanel {
            placement,
            translation,
            words,
            ..
        } = command
        else {
            panic!("expected ShowPanel");
        };
        assert_eq!(placement.y + placement.height, 1500 - 125);
        assert_eq!(placement.x, (1000 - placement.width) / 2);
        assert_eq!(translation, "Translating...");
        assert_eq!(words[1].label, "食べた\n[食べる]");
        assert_eq!(words[1].category, PosCategory::Verb);
        assert_eq!(host.word(1).unwrap().base_form, "食べる");
        assert!(host.word(2).is_none());
    }

    #[test]
    fn test_translation_applies_only_to_matching_panel() {
        let mut host = host();
        let id = LookupId::new();
        host.open(id, result(), None, String::new(), 1500, screen());

        assert!(host.apply_translation(LookupId::new(), Some("stale".into())).is_none());
        assert_eq!(
            host.apply_translation(id, Some("I ate rice".into())),
            Some(UiCommand::UpdateTranslation {
                id,
                text: "I ate rice".to_string()
            })
        );
        assert_eq!(
            host.apply_translation(id, None),
            Some(UiCommand::UpdateTranslation {
                id,
                text: "Translation failed to load".to_string()
            })
        );

        host.dismiss();
        assert!(host.apply_translation(id, Some("late".into())).is_none());
    }

    #[test]
    fn test_drag_moves_panel() {
        let mut host = host();
        assert!(host.drag(TouchAction::Move, TouchPoint::new(0.0, 0.0)).is_none());

        host.open(LookupId::new(), result(), None, String::new(), 1500, screen());
        let start = host.current().unwrap().placement;

        assert!(host.drag(TouchAction::Move, TouchPoint::new(50.0, 50.0)).is_none());
        assert!(host.drag(TouchAction::Down, TouchPoint::new(500.0, 100.0)).is_none());
        let moved = host.drag(TouchAction::Move, TouchPoint::new(450.0, -900.0));
        assert_eq!(
            moved,
            Some(UiCommand::MovePanel {
                placement: PanelPlacement {
                    x: start.x - 50,
                    y: start.y - 1000,
                    ..start
                }
            })
        );

        host.drag(TouchAction::Up, TouchPoint::new(450.0, -900.0));
        assert!(host.drag(TouchAction::Move, TouchPoint::new(0.0, 0.0)).is_none());
        assert!(host.dismiss());
        assert!(!host.dismiss());
    }
}
