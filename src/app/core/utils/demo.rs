// SPDX-License-Identifier: GPL-3.0

use crate::app::core::models::deck_tree::DeckEntry;

/// Decks shown while the database holds none
pub fn demo_entries() -> Vec<DeckEntry> {
    vec![
        DeckEntry::new(["Core 6000"], (0, 0, 0)),
        DeckEntry::new(
            ["Dictionaries of Grammar Sentences", "1 - Basic"],
            (10, 1, 2),
        ),
        DeckEntry::new(
            ["Dictionaries of Grammar Sentences", "2 - Intermediate"],
            (30, 1, 2),
        ),
        DeckEntry::new(
            ["Dictionaries of Grammar Sentences", "3 - Advanced"],
            (30, 0, 0),
        ),
        DeckEntry::new(["Sentence Vocab"], (30, 2, 1)),
        DeckEntry::new(["Misc"], (5, 4, 2)),
    ]
}

/// The given decks, or the demo decks when there are none
pub fn entries_or_demo(entries: Vec<DeckEntry>) -> Vec<DeckEntry> {
    if entries.is_empty() {
        demo_entries()
    } else {
        entries
    }
}
