use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the screen receives plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusZone {
    #[default]
    Input,
    Deck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    InsertChar(char),
    InsertNewline,
    Backspace,
    ClearInput,
    Generate,
    SwitchZone,
    ToggleMode,
    Shuffle,
    Flip,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Ignore,
}

pub const INPUT_HINT: &str =
    "Enter: generate | Alt+Enter: new line | Ctrl+U: clear | Tab: cards | Ctrl+C: quit";
pub const DECK_HINT: &str =
    "Space: flip | ←/→: move | m: mode | s: shuffle | d: delete | Tab: input | q: quit";

pub fn map_key(key: KeyEvent, zone: FocusZone) -> UiAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => return UiAction::Quit,
        KeyCode::Tab | KeyCode::BackTab => return UiAction::SwitchZone,
        _ => {}
    }

    match zone {
        FocusZone::Input => match key.code {
            KeyCode::Enter if alt || key.modifiers.contains(KeyModifiers::SHIFT) => {
                UiAction::InsertNewline
            }
            KeyCode::Char('j') if ctrl => UiAction::InsertNewline,
            KeyCode::Char('u') if ctrl => UiAction::ClearInput,
            KeyCode::Enter => UiAction::Generate,
            KeyCode::Backspace => UiAction::Backspace,
            KeyCode::Esc => UiAction::SwitchZone,
            KeyCode::Char(c) if !ctrl && !alt => UiAction::InsertChar(c),
            _ => UiAction::Ignore,
        },
        FocusZone::Deck => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => UiAction::Flip,
            KeyCode::Char('m') => UiAction::ToggleMode,
            KeyCode::Char('s') => UiAction::Shuffle,
            KeyCode::Char('d') | KeyCode::Delete => UiAction::Delete,
            KeyCode::Char('i') | KeyCode::Char('/') => UiAction::SwitchZone,
            KeyCode::Left | KeyCode::Char('h') => UiAction::Left,
            KeyCode::Right | KeyCode::Char('l') => UiAction::Right,
            KeyCode::Up | KeyCode::Char('k') => UiAction::Up,
            KeyCode::Down | KeyCode::Char('j') => UiAction::Down,
            _ => UiAction::Ignore,
        },
    }
}
