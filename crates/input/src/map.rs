//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => Some(Command::Rotate),

        // No soft drop: down drops all the way, like space.
        KeyCode::Down | KeyCode::Char(' ' | 'j' | 'J' | 's' | 'S') => Some(Command::HardDrop),

        KeyCode::Char('r' | 'R') | KeyCode::Enter => Some(Command::NewGame),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(Command::MoveRight));
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('x')), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Down), Some(Command::HardDrop));
    }

    #[test]
    fn test_new_game_key() {
        assert_eq!(key(KeyCode::Char('r')), Some(Command::NewGame));
        assert_eq!(key(KeyCode::Enter), Some(Command::NewGame));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key(KeyCode::Char('c')), None);
        assert_eq!(key(KeyCode::Tab), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
