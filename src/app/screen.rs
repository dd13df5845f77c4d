// SPDX-License-Identifier: GPL-3.0-only

pub mod decks;
pub mod split_decks;

pub use decks::DecksScreen;
pub use split_decks::SplitDecksScreen;

use crate::app::core::models::deck_tree::DeckEntry;
use crate::config::DeckLayout;

pub enum Screen {
    Decks(DecksScreen),
    SplitDecks(SplitDecksScreen),
}

impl Screen {
    /// Decks screen for the given layout
    pub fn new(layout: DeckLayout, entries: &[DeckEntry]) -> Self {
        match layout {
            DeckLayout::Tree => Screen::Decks(DecksScreen::new(entries)),
            DeckLayout::Split => Screen::SplitDecks(SplitDecksScreen::new(entries)),
        }
    }
}
