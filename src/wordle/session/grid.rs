use crate::wordle::{
    core::{Guess, Verdict},
    Dimensions,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    /// Typed but not submitted yet.
    Letter(char),
    Scored(char, Verdict),
}

impl Cell {
    pub fn letter(&self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::Letter(letter) | Self::Scored(letter, _) => Some(*letter),
        }
    }
}

/// `attempts` rows of `word_length` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            rows: vec![vec![Cell::Empty; dimensions.word_length]; dimensions.attempts],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    pub(super) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    pub(super) fn clear_row(&mut self, row: usize) {
        self.rows[row].fill(Cell::Empty);
    }

    pub(super) fn score_row(&mut self, row: usize, guess: &Guess) {
        for (cell, &(letter, verdict)) in self.rows[row].iter_mut().zip(guess.iter()) {
            *cell = Cell::Scored(letter, verdict);
        }
    }

    /// The letters typed into `row`, skipping empty cells.
    pub fn word_in_row(&self, row: usize) -> String {
        self.rows[row].iter().filter_map(Cell::letter).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Grid};
    use crate::wordle::{core::Verdict, Dimensions};

    #[test]
    fn starts_empty() {
        let grid = Grid::new(Dimensions::CLASSIC);

        assert_eq!(grid.rows().count(), 6);
        assert!(grid
            .rows()
            .all(|row| row.len() == 5 && row.iter().all(|cell| *cell == Cell::Empty)));
    }

    #[test]
    fn row_word() {
        let mut grid = Grid::new(Dimensions::CLASSIC);
        grid.set(2, 0, Cell::Letter('a'));
        grid.set(2, 1, Cell::Scored('b', Verdict::Present));

        assert_eq!(grid.word_in_row(2), "ab");
        assert_eq!(grid.cell(2, 1), Cell::Scored('b', Verdict::Present));

        grid.clear_row(2);
        assert_eq!(grid.word_in_row(2), "");
    }
}
