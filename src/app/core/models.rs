// SPDX-License-Identifier: GPL-3.0

pub mod card;
pub mod card_type;
pub mod deck;
pub mod deck_counts;
pub mod deck_tree;
