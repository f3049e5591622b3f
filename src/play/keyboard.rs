use ratatui::layout::{Position, Rect};

use crate::wordle::session::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Enter,
    Delete,
}

impl Key {
    pub fn label(self) -> String {
        match self {
            Self::Letter(letter) => letter.to_ascii_uppercase().to_string(),
            Self::Enter => "ENTER".to_owned(),
            Self::Delete => "DEL".to_owned(),
        }
    }

    pub fn command(self) -> Command {
        match self {
            Self::Letter(letter) => Command::Letter(letter),
            Self::Enter => Command::Submit,
            Self::Delete => Command::Delete,
        }
    }

    fn width(self) -> u16 {
        match self {
            Self::Letter(_) => 5,
            Self::Enter | Self::Delete => 7,
        }
    }
}

const ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const KEY_HEIGHT: u16 = 3;
const GAP: u16 = 1;

fn rows() -> impl Iterator<Item = Vec<Key>> {
    ROWS.into_iter().enumerate().map(|(i, letters)| {
        let letters = letters.chars().map(Key::Letter);

        if i + 1 == ROWS.len() {
            std::iter::once(Key::Enter)
                .chain(letters)
                .chain(std::iter::once(Key::Delete))
                .collect()
        } else {
            letters.collect()
        }
    })
}

/// Where each on-screen key was drawn, so clicks can be mapped back to keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardLayout {
    keys: Vec<(Key, Rect)>,
}

impl KeyboardLayout {
    pub const HEIGHT: u16 = KEY_HEIGHT * ROWS.len() as u16;

    /// Centers the rows in `area`. Keys that don't fit are clipped, or left
    /// out entirely.
    pub fn new(area: Rect) -> Self {
        let mut keys = Vec::new();

        for (i, row) in rows().enumerate() {
            let width = row.iter().map(|key| key.width() + GAP).sum::<u16>() - GAP;
            let mut x = area.x + area.width.saturating_sub(width) / 2;
            let y = area.y.saturating_add(i as u16 * KEY_HEIGHT);

            for key in row {
                let rect = Rect::new(x, y, key.width(), KEY_HEIGHT).intersection(area);
                if !rect.is_empty() {
                    keys.push((key, rect));
                }
                x = x.saturating_add(key.width() + GAP);
            }
        }

        Self { keys }
    }

    pub fn keys(&self) -> &[(Key, Rect)] {
        &self.keys
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Key> {
        self.keys
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(key, _)| *key)
    }
}
