use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use fullpage_core::input::Key;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Key handed to the engine's keyboard channel
    Page(Key),
    PendingG, // First 'g' press, waiting for second 'g'
    /// Wheel notch; negative scrolls down
    Wheel(i32),
    /// Left button pressed, dragged or released over the stage
    TouchStart { col: u16, row: u16 },
    TouchMove { col: u16, row: u16 },
    TouchEnd,
    /// Pagination marker clicked (1-based section)
    ClickMarker(usize),
    OpenJumpPrompt,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events while the jump prompt has focus
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        // Still delivered to the keyboard channel, which ignores keys
        // while a text field is focused
        KeyCode::Up => Action::Page(Key::ArrowUp),
        KeyCode::Down => Action::Page(Key::ArrowDown),
        KeyCode::PageUp => Action::Page(Key::PageUp),
        KeyCode::PageDown => Action::Page(Key::PageDown),
        KeyCode::Home => Action::Page(Key::Home),
        KeyCode::End => Action::Page(Key::End),
        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Wheel(-1),
        MouseEventKind::ScrollUp => Action::Wheel(1),
        MouseEventKind::Down(MouseButton::Left) => match app.marker_at(col, row) {
            Some(section) => Action::ClickMarker(section),
            None => Action::TouchStart { col, row },
        },
        MouseEventKind::Drag(MouseButton::Left) => Action::TouchMove { col, row },
        MouseEventKind::Up(MouseButton::Left) => Action::TouchEnd,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = test_app(120);
        let keymap = Keymap::default();
        let g = press(KeyCode::Char('g'), KeyModifiers::NONE);

        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::Page(Key::Home));
    }

    #[test]
    fn test_prompt_captures_keys() {
        let mut app = test_app(120);
        let keymap = Keymap::default();
        app.apply_action(Action::OpenJumpPrompt);

        let q = press(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(q, &app, &keymap), Action::InputChar('q'));
        let enter = press(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(enter, &app, &keymap), Action::Confirm);
        let down = press(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(handle_key_event(down, &app, &keymap), Action::Page(Key::ArrowDown));
    }

    #[test]
    fn test_mouse_mapping() {
        let app = test_app(120);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 5, 5), &app),
            Action::Wheel(-1)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5), &app),
            Action::TouchStart { col: 5, row: 5 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5, 9), &app),
            Action::TouchEnd
        );
    }
}
