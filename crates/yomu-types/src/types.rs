use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Screen-space touch sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &TouchPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel rectangle inside a rendered surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Coordinate of interest relative to a region's origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: i32,
    pub y: i32,
}

/// Tag carried by every in-flight lookup and its completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupId(Uuid);

impl LookupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LookupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON body of the recognition endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupRequest {
    #[serde(rename = "image")]
    pub image_base64: String,
    #[serde(rename = "x")]
    pub rel_x: i32,
    #[serde(rename = "y")]
    pub rel_y: i32,
    #[serde(rename = "mangaName")]
    pub context_name: String,
}

/// One token of a recognized line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename(deserialize = "s"), default, deserialize_with = "lenient_string")]
    pub surface: String,
    #[serde(rename(deserialize = "b"), default, deserialize_with = "lenient_string")]
    pub base_form: String,
    #[serde(rename(deserialize = "p"), default, deserialize_with = "lenient_string")]
    pub part_of_speech: String,
    #[serde(rename(deserialize = "r"), default, deserialize_with = "lenient_string")]
    pub reading: String,
    #[serde(rename(deserialize = "d"), default, deserialize_with = "lenient_string")]
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(rename(deserialize = "text"), default, deserialize_with = "lenient_string")]
    pub source_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub translation: String,
    pub words: Vec<Word>,
}

/// Missing and `null` string fields both become ""
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Display density (physical pixels per device-independent pixel)
    pub density: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            density: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    /// DOM key name of the synthetic key event that turns the page
    pub fn key_name(&self) -> &'static str {
        match self {
            PageDirection::Previous => "ArrowLeft",
            PageDirection::Next => "ArrowRight",
        }
    }

    pub fn key_code(&self) -> u32 {
        match self {
            PageDirection::Previous => 37,
            PageDirection::Next => 39,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareKey {
    VolumeUp,
    VolumeDown,
    Back,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Down,
    LongPress,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleSignal {
    LoadStarted,
    ProgressComplete,
    Verified { ok: bool },
    AuthFailed,
    LoadError,
}

/// Outcome of a flashcard export, each one shown differently to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExportOutcome {
    Added { note_id: u64 },
    PermissionNotGranted,
    Duplicate,
    HostUnavailable,
    Failed { reason: String },
}

/// Toast-style user notices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    TooFast,
    ServerNotConfigured,
    LookupModeEnabled,
    LookupModeDisabled,
    NextChapter,
    Copied,
    CopyFailed,
    ExportDisabled,
    Export(ExportOutcome),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::TooFast => "Too fast, try again in a moment",
            Notice::ServerNotConfigured => "Configure the OCR server address first",
            Notice::LookupModeEnabled => "Lookup mode on",
            Notice::LookupModeDisabled => "Lookup mode off",
            Notice::NextChapter => "Next chapter",
            Notice::Copied => "Copied",
            Notice::CopyFailed => "Copy failed",
            Notice::ExportDisabled => "Flashcard export is disabled",
            Notice::Export(ExportOutcome::Added { .. }) => "Exported to Anki",
            Notice::Export(ExportOutcome::PermissionNotGranted) => {
                "Allow access in Anki, then try again"
            }
            Notice::Export(ExportOutcome::Duplicate) => "Already in Anki, nothing exported",
            Notice::Export(ExportOutcome::HostUnavailable) => {
                "Export failed, make sure Anki is running"
            }
            Notice::Export(ExportOutcome::Failed { .. }) => "Export failed",
        };
        f.write_str(text)
    }
}

/// Colour class of a word chip, derived from its part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosCategory {
    Noun,
    Verb,
    Adjective,
    Interjection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordChip {
    pub label: String,
    pub category: PosCategory,
}

/// Events the host delivers to the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Touch {
        action: TouchAction,
        x: f32,
        y: f32,
    },
    Key {
        key: HardwareKey,
        action: KeyAction,
    },
    Navigated {
        url: String,
        title: String,
    },
    Viewport {
        width: u32,
        height: u32,
        density: f32,
    },
    /// Raw screen coordinates on the panel's drag handle
    Drag {
        action: TouchAction,
        x: f32,
        y: f32,
    },
    SelectWord {
        index: usize,
    },
    ExportWord {
        index: usize,
    },
    SearchWord {
        index: usize,
        provider: usize,
    },
    CopyText,
    Lifecycle {
        signal: LifecycleSignal,
    },
    /// Precomputed line metadata of the page on screen, raw JSON
    PageData {
        json: String,
    },
}

/// Everything the event loop consumes: host input plus worker completions
#[derive(Debug, Clone)]
pub enum AppEvent {
    Host(HostEvent),
    LookupCompleted {
        id: LookupId,
        result: LookupResult,
        anchor_y: i32,
    },
    /// `None` when the companion fetch failed
    TranslationReady {
        id: LookupId,
        text: Option<String>,
    },
    ExportFinished(ExportOutcome),
    Shutdown,
}

/// Commands the app sends back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiCommand {
    ShowPanel {
        id: LookupId,
        placement: PanelPlacement,
        source_text: String,
        translation: String,
        words: Vec<WordChip>,
    },
    UpdateTranslation {
        id: LookupId,
        text: String,
    },
    MovePanel {
        placement: PanelPlacement,
    },
    DismissPanel,
    Notice {
        notice: Notice,
        message: String,
    },
    TurnPage {
        key: String,
        key_code: u32,
    },
    OpenUrl {
        url: String,
    },
    LookupMode {
        enabled: bool,
    },
    WordDetail {
        title: String,
        reading: String,
        part_of_speech: String,
        definition: Option<String>,
    },
    DictionaryMenu {
        word: String,
        providers: Vec<String>,
    },
    ContentVisible {
        visible: bool,
    },
}

impl UiCommand {
    pub fn notice(notice: Notice) -> Self {
        let message = notice.to_string();
        UiCommand::Notice { notice, message }
    }

    pub fn turn_page(direction: PageDirection) -> Self {
        UiCommand::TurnPage {
            key: direction.key_name().to_string(),
            key_code: direction.key_code(),
        }
    }
}
