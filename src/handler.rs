use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string edits
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits from any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Theme toggle
        KeyCode::Char('t') => app.toggle_theme(),

        // Focus the command input (scrolls the console into view)
        KeyCode::Char('i') | KeyCode::Char('/') => app.focus_command_input(),

        // Fire the launch endpoint
        KeyCode::Char('L') => app.launch(),

        // Nav links: Tab cycles, numbers jump directly
        KeyCode::Tab => app.next_nav(),
        KeyCode::BackTab => app.prev_nav(),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            app.activate_nav(idx);
        }

        // Scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_by(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_by(-1),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_by(app.viewport_height as i32 / 2);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_by(-(app.viewport_height as i32) / 2);
        }
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_to_bottom(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.submit_command();
        }
        KeyCode::Backspace => {
            if app.command_cursor > 0 {
                app.command_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.command_input, app.command_cursor);
                app.command_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.command_input.chars().count();
            if app.command_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.command_input, app.command_cursor);
                app.command_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.command_cursor = app.command_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.command_input.chars().count();
            app.command_cursor = (app.command_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.command_cursor = 0;
        }
        KeyCode::End => {
            app.command_cursor = app.command_input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.command_input, app.command_cursor);
            app.command_input.insert(byte_pos, c);
            app.command_cursor += 1;
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(3),
        MouseEventKind::ScrollUp => app.scroll_by(-3),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn enter_submits_empty_input_as_validation_error() {
        let mut app = App::new(&Config::default());
        app.input_mode = InputMode::Editing;

        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.status.text, "Please type a command.");
    }

    #[test]
    fn editing_handles_utf8_cursor_moves() {
        let mut app = App::new(&Config::default());
        app.input_mode = InputMode::Editing;

        for c in "héllo".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.command_input, "hélo");

        handle_key(&mut app, key(KeyCode::Home));
        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(app.command_input, "élo");
    }

    #[test]
    fn theme_key_toggles_and_restores() {
        let mut app = App::new(&Config::default());
        let original = app.theme;

        handle_key(&mut app, key(KeyCode::Char('t')));
        handle_key(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.theme, original);
    }

    #[test]
    fn number_keys_activate_nav_links() {
        let mut app = App::new(&Config::default());
        app.viewport_height = 10;

        handle_key(&mut app, key(KeyCode::Char('3')));
        assert!(app.scroll_target.is_some());
    }

    #[test]
    fn focus_key_enters_editing_mode() {
        let mut app = App::new(&Config::default());

        handle_key(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.scroll_target.is_some());
    }
}
