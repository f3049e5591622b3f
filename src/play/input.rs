use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::keyboard::KeyboardLayout;
use crate::wordle::session::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Command),
    /// Show or hide the rules.
    Rules,
    Quit,
}

/// Maps a terminal event to what the player meant, if anything.
pub fn action(event: &Event, keyboard: &KeyboardLayout) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => from_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => keyboard
            .hit(*column, *row)
            .map(|key| Action::Play(key.command())),
        _ => None,
    }
}

fn from_key(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let command = match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => return Some(Action::Rules),
        KeyCode::Char('n') if ctrl => Command::NewGame,
        KeyCode::F(2) => Command::NewGame,
        KeyCode::Enter => Command::Submit,
        KeyCode::Backspace | KeyCode::Delete => Command::Delete,
        KeyCode::Char(letter) if !ctrl && letter.is_ascii_alphabetic() => Command::Letter(letter),
        _ => return None,
    };

    Some(Action::Play(command))
}
