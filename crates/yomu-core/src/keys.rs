use yomu_types::{HardwareKey, KeyAction, PageDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    PassThrough,
    Swallow,
    TurnPage(PageDirection),
    ToggleLookupMode,
    NextChapter,
    DismissPanel,
}

/// Volume keys page through a reading location; long presses run shortcuts
#[derive(Debug, Default)]
pub struct KeyRouter {
    long_press_handled: bool,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        &mut self,
        key: HardwareKey,
        action: KeyAction,
        reading: bool,
        panel_open: bool,
    ) -> KeyCommand {
        let is_volume = matches!(key, HardwareKey::VolumeUp | HardwareKey::VolumeDown);
        if !is_volume {
            return KeyCommand::PassThrough;
        }

        if panel_open {
            return match action {
                KeyAction::Up => {
                    self.long_press_handled = false;
                    KeyCommand::DismissPanel
                }
                _ => KeyCommand::Swallow,
            };
        }

        if !reading {
            return KeyCommand::PassThrough;
        }

        match action {
            KeyAction::Down => KeyCommand::Swallow,
            KeyAction::LongPress => {
                self.long_press_handled = true;
                match key {
                    HardwareKey::VolumeUp => KeyCommand::ToggleLookupMode,
                    _ => KeyCommand::NextChapter,
                }
            }
            KeyAction::Up => {
                if std::mem::take(&mut self.long_press_handled) {
                    return KeyCommand::Swallow;
                }
                match key {
                    HardwareKey::VolumeDown => KeyCommand::TurnPage(PageDirection::Next),
                    _ => KeyCommand::TurnPage(PageDirection::Previous),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_pages() {
        let mut router = KeyRouter::new();
        assert_eq!(
            router.route(HardwareKey::VolumeDown, KeyAction::Down, true, false),
            KeyCommand::Swallow
        );
        assert_eq!(
            router.route(HardwareKey::VolumeDown, KeyAction::Up, true, false),
            KeyCommand::TurnPage(PageDirection::Next)
        );
        assert_eq!(
            router.route(HardwareKey::VolumeUp, KeyAction::Up, true, false),
            KeyCommand::TurnPage(PageDirection::Previous)
        );
    }

    #[test]
    fn test_long_press_suppresses_following_page_turn() {
        let mut router = KeyRouter::new();
        router.route(HardwareKey::VolumeUp, KeyAction::Down, true, false);
        assert_eq!(
            router.route(HardwareKey::VolumeUp, KeyAction::LongPress, true, false),
            KeyCommand::ToggleLookupMode
        );
        assert_eq!(
            router.route(HardwareKey::VolumeUp, KeyAction::Up, true, false),
            KeyCommand::Swallow
        );
        assert_eq!(
            router.route(HardwareKey::VolumeUp, KeyAction::Up, true, false),
            KeyCommand::TurnPage(PageDirection::Previous)
        );

        assert_eq!(
            router.route(HardwareKey::VolumeDown, KeyAction::LongPress, true, false),
            KeyCommand::NextChapter
        );
    }

    #[test]
    fn test_outside_reading_keys_pass_through() {
        let mut router = KeyRouter::new();
        assert_eq!(
            router.route(HardwareKey::VolumeDown, KeyAction::Up, false, false),
            KeyCommand::PassThrough
        );
        assert_eq!(
            router.route(HardwareKey::Back, KeyAction::Up, true, false),
            KeyCommand::PassThrough
        );
    }

    #[test]
    fn test_open_panel_swallows_and_dismisses_on_release() {
        let mut router = KeyRouter::new();
        for key in [HardwareKey::VolumeUp, HardwareKey::VolumeDown] {
            assert_eq!(
                router.route(key, KeyAction::Down, true, true),
                KeyCommand::Swallow
            );
            assert_eq!(
                router.route(key, KeyAction::LongPress, false, true),
                KeyCommand::Swallow
            );
            assert_eq!(
                router.route(key, KeyAction::Up, false, true),
                KeyCommand::DismissPanel
            );
        }
        assert_eq!(
            router.route(HardwareKey::Back, KeyAction::Up, true, true),
            KeyCommand::PassThrough
        );
    }
}
