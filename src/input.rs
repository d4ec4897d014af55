use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Select,
    Back,
    Quit,
}

/// Translate a terminal key event into an intent. Releases and repeats are
/// ignored, as is anything outside the binding table.
pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Intent::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::Down),
        KeyCode::Enter => Some(Intent::Select),
        KeyCode::Backspace | KeyCode::Char('h') => Some(Intent::Back),
        KeyCode::Home | KeyCode::Char('g') => Some(Intent::Home),
        KeyCode::End | KeyCode::Char('G') => Some(Intent::End),
        KeyCode::PageUp => Some(Intent::PageUp),
        KeyCode::PageDown => Some(Intent::PageDown),
        _ => None,
    }
}
