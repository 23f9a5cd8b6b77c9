use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, FocusPane, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Applies a line-editing key to `input`. Returns true when the text changed.
fn edit_line(input: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    let char_count = input.chars().count();
    let chorded = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        // Ctrl and Alt chords are commands, not text
        KeyCode::Char(_) if chorded => false,
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(input, *cursor);
            input.insert(byte_pos, c);
            *cursor += 1;
            true
        }
        KeyCode::Backspace if *cursor > 0 => {
            *cursor -= 1;
            let byte_pos = char_to_byte_index(input, *cursor);
            input.remove(byte_pos);
            true
        }
        KeyCode::Delete if *cursor < char_count => {
            let byte_pos = char_to_byte_index(input, *cursor);
            input.remove(byte_pos);
            true
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            false
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(char_count);
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = char_count;
            false
        }
        _ => false,
    }
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key).await?,
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse).await,
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::ChatReply { ticket, result } => app.handle_chat_reply(ticket, result),
    }
    Ok(())
}

async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys that work in any mode
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            return Ok(());
        }
        KeyCode::Char('r') if ctrl => {
            app.clear_status();
            app.generate_routine().await;
            return Ok(());
        }
        KeyCode::Char('x') if ctrl => {
            app.cancel_chat();
            return Ok(());
        }
        KeyCode::Tab => {
            app.set_focus(app.focus.next());
            return Ok(());
        }
        KeyCode::BackTab => {
            app.set_focus(app.focus.prev());
            return Ok(());
        }
        _ => {}
    }

    app.clear_status();
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key).await?,
        InputMode::Editing => handle_editing_mode(app, key).await?,
    }
    Ok(())
}

async fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    // Keys shared by every pane in normal mode
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.generate_routine().await;
            return Ok(());
        }
        KeyCode::Char('/') => {
            app.set_focus(FocusPane::Keyword);
            return Ok(());
        }
        KeyCode::Char('a') => {
            app.set_focus(FocusPane::Chat);
            return Ok(());
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Category => match key.code {
            KeyCode::Char('l')
            | KeyCode::Char('j')
            | KeyCode::Right
            | KeyCode::Down
            | KeyCode::Enter => app.next_category().await,
            KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                app.prev_category().await
            }
            _ => {}
        },
        FocusPane::Products => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.product_nav_down(),
            KeyCode::Char('k') | KeyCode::Up => app.product_nav_up(),
            KeyCode::Char('g') => app.product_nav_first(),
            KeyCode::Char('G') => app.product_nav_last(),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_highlighted_product().await,
            _ => {}
        },
        FocusPane::Tray => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.tray_nav_down(),
            KeyCode::Char('k') | KeyCode::Up => app.tray_nav_up(),
            KeyCode::Enter | KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                app.remove_selected_tray_item().await;
            }
            KeyCode::Char('O') => app.prune_orphans().await,
            _ => {}
        },
        FocusPane::Keyword | FocusPane::Chat => match key.code {
            KeyCode::Enter | KeyCode::Char('i') => app.input_mode = InputMode::Editing,
            KeyCode::Char('j') | KeyCode::Down if app.focus == FocusPane::Chat => {
                app.scroll_chat_down(1)
            }
            KeyCode::Char('k') | KeyCode::Up if app.focus == FocusPane::Chat => {
                app.scroll_chat_up(1)
            }
            _ => {}
        },
    }
    Ok(())
}

async fn handle_editing_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Esc {
        app.input_mode = InputMode::Normal;
        return Ok(());
    }

    match app.focus {
        FocusPane::Keyword => handle_keyword_editing(app, key).await,
        FocusPane::Chat => handle_chat_editing(app, key),
        _ => app.input_mode = InputMode::Normal,
    }
    Ok(())
}

async fn handle_keyword_editing(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter || key.code == KeyCode::Down {
        app.set_focus(FocusPane::Products);
        return;
    }

    // Every edit is a filter event
    if edit_line(&mut app.criteria.keyword, &mut app.keyword_cursor, key) {
        app.refresh_products().await;
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::PageUp => app.scroll_chat_up(app.chat_height.max(1)),
        KeyCode::PageDown => app.scroll_chat_down(app.chat_height.max(1)),
        _ => {
            edit_line(&mut app.chat_input, &mut app.chat_cursor, key);
        }
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

async fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;
    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_input = app.input_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        // Hovering a card shows its description
        MouseEventKind::Moved => {
            app.hovered_product = app.product_index_at(x, y);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.product_index_at(x, y) {
                app.toggle_product_at(index).await;
            } else if let Some(index) = app.tray_index_at(x, y) {
                app.remove_tray_item_at(index).await;
            } else if in_input {
                app.set_focus(FocusPane::Chat);
            }
        }
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.scroll_chat_down(3);
            } else if app.product_index_at(x, y).is_some() {
                app.product_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.scroll_chat_up(3);
            } else if app.product_index_at(x, y).is_some() {
                app.product_nav_up();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_line_handles_multibyte_text() {
        let mut input = "Oréal".to_string();
        let mut cursor = 3;
        assert!(edit_line(&mut input, &mut cursor, press(KeyCode::Backspace)));
        assert_eq!(input, "Oral");
        assert_eq!(cursor, 2);

        assert!(edit_line(&mut input, &mut cursor, press(KeyCode::Char('é'))));
        assert_eq!(input, "Oréal");
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_edit_line_cursor_moves_do_not_change_text() {
        let mut input = "spf".to_string();
        let mut cursor = 0;
        assert!(!edit_line(&mut input, &mut cursor, press(KeyCode::End)));
        assert_eq!(cursor, 3);
        assert!(!edit_line(&mut input, &mut cursor, press(KeyCode::Right)));
        assert_eq!(cursor, 3);
        assert!(!edit_line(&mut input, &mut cursor, press(KeyCode::Delete)));
        assert!(!edit_line(&mut input, &mut cursor, press(KeyCode::Home)));
        assert!(edit_line(&mut input, &mut cursor, press(KeyCode::Delete)));
        assert_eq!(input, "pf");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = "a".to_string();
        let mut cursor = 0;
        assert!(!edit_line(&mut input, &mut cursor, press(KeyCode::Backspace)));
        assert_eq!(input, "a");
    }

    #[test]
    fn test_chorded_letters_are_not_inserted() {
        let mut input = "spf".to_string();
        let mut cursor = 3;
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        assert!(!edit_line(&mut input, &mut cursor, ctrl_a));
        assert!(!edit_line(&mut input, &mut cursor, alt_b));
        assert_eq!(input, "spf");
        assert_eq!(cursor, 3);

        let shifted = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert!(edit_line(&mut input, &mut cursor, shifted));
        assert_eq!(input, "spfS");
    }
}
