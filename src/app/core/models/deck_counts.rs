// SPDX-License-Identifier: GPL-3.0

use std::ops::Add;

use cosmic::iced::Color;
use serde::{Deserialize, Serialize};

/// Number of new, learning and due cards of a deck
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub new: u32,
    pub learning: u32,
    pub due: u32,
}

impl DeckCounts {
    pub const fn new(new: u32, learning: u32, due: u32) -> Self {
        Self { new, learning, due }
    }

    /// Value shown in the given [`CountColumn`]
    pub fn get(&self, column: CountColumn) -> u32 {
        match column {
            CountColumn::New => self.new,
            CountColumn::Learning => self.learning,
            CountColumn::Due => self.due,
        }
    }
}

impl Add for DeckCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            new: self.new.saturating_add(other.new),
            learning: self.learning.saturating_add(other.learning),
            due: self.due.saturating_add(other.due),
        }
    }
}

impl From<(u32, u32, u32)> for DeckCounts {
    fn from((new, learning, due): (u32, u32, u32)) -> Self {
        Self::new(new, learning, due)
    }
}

/// The count columns of the decks table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountColumn {
    New,
    Learning,
    Due,
}

/// Gray used for every zero count
pub const NEUTRAL_COLOR: Color = Color {
    r: 158.0 / 255.0,
    g: 158.0 / 255.0,
    b: 158.0 / 255.0,
    a: 1.0,
};

impl CountColumn {
    pub const ALL: [Self; 3] = [Self::New, Self::Learning, Self::Due];

    /// Accent color of the column, used for nonzero counts
    pub fn accent_color(&self) -> Color {
        match self {
            CountColumn::New => Color {
                r: 78.0 / 255.0,
                g: 160.0 / 255.0,
                b: 255.0 / 255.0,
                a: 1.0,
            },
            CountColumn::Learning => Color {
                r: 255.0 / 255.0,
                g: 107.0 / 255.0,
                b: 107.0 / 255.0,
                a: 1.0,
            },
            CountColumn::Due => Color {
                r: 76.0 / 255.0,
                g: 217.0 / 255.0,
                b: 123.0 / 255.0,
                a: 1.0,
            },
        }
    }

    /// Color a count renders with in this column
    pub fn color_for(&self, value: u32) -> Color {
        if value == 0 {
            NEUTRAL_COLOR
        } else {
            self.accent_color()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_renders_neutral_in_every_column() {
        for column in CountColumn::ALL {
            assert_eq!(column.color_for(0), NEUTRAL_COLOR);
        }
    }

    #[test]
    fn nonzero_renders_column_accent_regardless_of_magnitude() {
        for column in CountColumn::ALL {
            for value in [1, 2, 30, 9_999, u32::MAX] {
                assert_eq!(column.color_for(value), column.accent_color());
            }
        }
    }

    #[test]
    fn accents_are_distinct_and_not_neutral() {
        let new = CountColumn::New.accent_color();
        let learning = CountColumn::Learning.accent_color();
        let due = CountColumn::Due.accent_color();

        assert_ne!(new, learning);
        assert_ne!(learning, due);
        assert_ne!(new, due);
        assert!(CountColumn::ALL.iter().all(|c| c.accent_color() != NEUTRAL_COLOR));
    }

    #[test]
    fn get_reads_the_matching_field() {
        let counts = DeckCounts::from((10, 1, 2));

        assert_eq!(counts.get(CountColumn::New), 10);
        assert_eq!(counts.get(CountColumn::Learning), 1);
        assert_eq!(counts.get(CountColumn::Due), 2);
    }

    #[test]
    fn adding_saturates_per_column() {
        let total = DeckCounts::new(3, u32::MAX, 1) + DeckCounts::new(2, 1, 0);

        assert_eq!(total, DeckCounts::new(5, u32::MAX, 1));
    }
}
