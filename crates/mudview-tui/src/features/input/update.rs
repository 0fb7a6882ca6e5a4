//! Key handling for the input line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mudview_core::PromptMode;
use tracing::warn;

use crate::effects::{EffectSink, UiEffect};
use crate::state::{AppState, ConnectionStatus};

/// Handles a key press aimed at the input line.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let masked = app.view.prompt_mode() == PromptMode::Masked;

    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('d') if ctrl && app.input.is_empty() => return vec![UiEffect::Quit],
        KeyCode::Enter => return submit(app, masked),
        KeyCode::Char('u') if ctrl => app.input.clear(),
        KeyCode::Char('w') if ctrl => app.input.delete_word_back(),
        KeyCode::Char('a') if ctrl => app.input.move_home(),
        KeyCode::Char('e') if ctrl => app.input.move_end(),
        KeyCode::Char(ch) if !ctrl => app.input.insert_char(ch),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Up if !masked => app.input.recall_older(),
        KeyCode::Down if !masked => app.input.recall_newer(),
        KeyCode::Esc => {
            app.input.clear();
            app.input.history.reset();
        }
        _ => {}
    }
    vec![]
}

fn submit(app: &mut AppState, masked: bool) -> Vec<UiEffect> {
    if matches!(app.connection, ConnectionStatus::Disconnected { .. }) {
        if !app.input.text().trim().is_empty() {
            app.push_system_line("Not connected; command not sent.");
        }
        return vec![];
    }

    let mut effects = Vec::new();
    match app.input.submit(&mut EffectSink(&mut effects)) {
        Ok(Some(command)) => {
            if masked {
                app.input.history.reset();
            } else {
                app.input.history.record(&command);
            }
            app.scroll.scroll_to_bottom();
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "Failed to queue command"),
    }
    effects
}

/// Inserts pasted text into the input line.
pub fn handle_paste(app: &mut AppState, text: &str) {
    app.input.insert_str(text);
}
