//! Default keybindings for the drawer.
//!
//! Maps crossterm key events to [`DrawerCommand`]s. Plain characters are
//! handled separately so every printable key reaches the draft.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;

use super::command::DrawerCommand;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub const fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }
}

impl From<&KeyEvent> for KeyCombo {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

#[derive(Debug, Clone)]
pub struct Keybindings {
    bindings: HashMap<KeyCombo, DrawerCommand>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new()
    }
}

impl Keybindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(KeyCombo::plain(KeyCode::Enter), DrawerCommand::Send);
        bindings.insert(KeyCombo::shift(KeyCode::Enter), DrawerCommand::InsertNewline);
        bindings.insert(KeyCombo::alt(KeyCode::Enter), DrawerCommand::InsertNewline);
        bindings.insert(KeyCombo::ctrl(KeyCode::Enter), DrawerCommand::InsertNewline);
        // Terminals without keyboard enhancement report Ctrl+J for Ctrl+Enter
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('j')), DrawerCommand::InsertNewline);

        bindings.insert(KeyCombo::plain(KeyCode::Esc), DrawerCommand::Close);
        bindings.insert(KeyCombo::plain(KeyCode::Backspace), DrawerCommand::Backspace);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('u')), DrawerCommand::ClearDraft);
        bindings.insert(KeyCombo::ctrl(KeyCode::Char('r')), DrawerCommand::Refresh);
        bindings.insert(KeyCombo::plain(KeyCode::Tab), DrawerCommand::NextTab);
        bindings.insert(KeyCombo::shift(KeyCode::BackTab), DrawerCommand::PreviousTab);
        bindings.insert(KeyCombo::plain(KeyCode::BackTab), DrawerCommand::PreviousTab);

        Self { bindings }
    }

    pub fn get(&self, combo: &KeyCombo) -> Option<&DrawerCommand> {
        self.bindings.get(combo)
    }

    /// Override or add a binding.
    pub fn bind(&mut self, combo: KeyCombo, command: DrawerCommand) {
        self.bindings.insert(combo, command);
    }

    /// Translate a key event. Release events are ignored.
    pub fn resolve(&self, key: KeyEvent) -> Option<DrawerCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Any modified Enter is a newline, including combinations such as Ctrl+Shift
        if key.code == KeyCode::Enter
            && key.modifiers.intersects(
                KeyModifiers::SHIFT
                    | KeyModifiers::ALT
                    | KeyModifiers::CONTROL
                    | KeyModifiers::SUPER,
            )
        {
            return Some(DrawerCommand::InsertNewline);
        }

        if let Some(cmd) = self.get(&KeyCombo::from(&key)) {
            return Some(cmd.clone());
        }

        if let KeyCode::Char(c) = key.code {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
            {
                return Some(DrawerCommand::InsertChar(c));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_enter_sends() {
        let keys = Keybindings::new();
        assert_eq!(
            keys.resolve(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(DrawerCommand::Send)
        );
    }

    #[test]
    fn test_modified_enter_inserts_newline() {
        let keys = Keybindings::new();
        for modifiers in [
            KeyModifiers::SHIFT,
            KeyModifiers::ALT,
            KeyModifiers::CONTROL,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            KeyModifiers::SUPER,
        ] {
            assert_eq!(
                keys.resolve(press(KeyCode::Enter, modifiers)),
                Some(DrawerCommand::InsertNewline)
            );
        }
    }

    #[test]
    fn test_escape_closes() {
        let keys = Keybindings::new();
        assert_eq!(
            keys.resolve(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(DrawerCommand::Close)
        );
    }

    #[test]
    fn test_characters_reach_the_draft() {
        let keys = Keybindings::new();
        assert_eq!(
            keys.resolve(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(DrawerCommand::InsertChar('A'))
        );
        assert_eq!(keys.resolve(press(KeyCode::Char('x'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let keys = Keybindings::new();
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(keys.resolve(key), None);
    }

    #[test]
    fn test_custom_binding() {
        let mut keys = Keybindings::new();
        keys.bind(KeyCombo::ctrl(KeyCode::Char('s')), DrawerCommand::Send);
        assert_eq!(
            keys.resolve(press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(DrawerCommand::Send)
        );
    }
}
