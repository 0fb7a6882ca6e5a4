//! Log pane scrolling from keys and the mouse wheel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::state::ScrollState;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// Handles log navigation keys. Returns `true` if the key was consumed.
pub fn handle_scroll_key(scroll: &mut ScrollState, key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::PageUp => scroll.page_up(),
        KeyCode::PageDown => scroll.page_down(),
        KeyCode::Home if ctrl => scroll.scroll_to_top(),
        KeyCode::End if ctrl => scroll.scroll_to_bottom(),
        KeyCode::Up if shift => scroll.scroll_up(1),
        KeyCode::Down if shift => scroll.scroll_down(1),
        _ => return false,
    }
    true
}

pub fn handle_mouse(scroll: &mut ScrollState, mouse: &MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => scroll.scroll_up(WHEEL_LINES),
        MouseEventKind::ScrollDown => scroll.scroll_down(WHEEL_LINES),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arrows_are_not_scroll_keys() {
        let mut scroll = ScrollState::default();
        scroll.update_metrics(50, 10);
        assert!(!handle_scroll_key(
            &mut scroll,
            &KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)
        ));
        assert!(handle_scroll_key(
            &mut scroll,
            &KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT)
        ));
        assert!(!scroll.is_following());
    }
}
