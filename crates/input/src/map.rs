//! Event mapping from terminal events to game input.

use crate::types::MenuKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Drag,
    Release,
}

/// A left-button pointer event at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermPointer {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

/// Map mouse input to pointer events. Only the left button drives gestures.
pub fn map_mouse_event(ev: MouseEvent) -> Option<TermPointer> {
    let kind = match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Press,
        MouseEventKind::Drag(MouseButton::Left) => PointerKind::Drag,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Release,
        _ => return None,
    };
    Some(TermPointer {
        kind,
        column: ev.column,
        row: ev.row,
    })
}

/// Map keyboard input to menu keys.
pub fn map_key_event(key: KeyEvent) -> Option<MenuKey> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(MenuKey::Confirm),
        KeyCode::Esc => Some(MenuKey::Back),
        KeyCode::Backspace => Some(MenuKey::Erase),
        KeyCode::Char(c) if !c.is_control() => Some(MenuKey::Char(c)),
        _ => None,
    }
}

/// Check if key should quit the game.
///
/// Plain letters are name input, so only Ctrl+C quits from anywhere.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
