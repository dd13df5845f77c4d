// SPDX-License-Identifier: GPL-3.0

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::TryStreamExt;
use serde::{Deserialize, Serialize};
use sqlx::{Connection, Row};

use crate::app::core::Database;

use super::deck_counts::DeckCounts;
use super::deck_tree::DeckEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub parent_deck_id: Option<i64>,
}

impl Deck {
    /// Add a [`Deck`] to the database, optionally nested under another one
    pub async fn add(
        database: Arc<Database>,
        name: String,
        parent_deck_id: Option<i64>,
    ) -> Result<(), anywho::Error> {
        database
            .insert(
                sqlx::query("INSERT INTO decks (name, parent_deck_id) VALUES (?, ?)")
                    .bind(name)
                    .bind(parent_deck_id),
            )
            .await?;

        Ok(())
    }

    /// Get all [`Deck`] from the database
    pub async fn get_all(database: Arc<Database>) -> Result<Vec<Deck>, anywho::Error> {
        let mut conn = database.connect().await?;
        let mut result = Vec::<Deck>::new();

        {
            let mut rows = sqlx::query("SELECT id, name, parent_deck_id FROM decks ORDER BY id ASC")
                .fetch(&mut conn);

            while let Some(row) = rows.try_next().await? {
                let id: i64 = row.try_get("id")?;
                let name: String = row.try_get("name")?;
                let parent_deck_id: Option<i64> = row.try_get("parent_deck_id")?;

                result.push(Deck {
                    id,
                    name,
                    parent_deck_id,
                });
            }
        }

        conn.close().await?;
        Ok(result)
    }

    /// Card counts of every deck holding active cards, as of `now` (epoch seconds)
    pub async fn get_counts(
        database: Arc<Database>,
        now: i64,
    ) -> Result<HashMap<i64, DeckCounts>, anywho::Error> {
        let mut conn = database.connect().await?;
        let mut result = HashMap::new();

        {
            let mut rows = sqlx::query(
                "SELECT deck_id,
                    SUM(CASE WHEN next_due > $1 THEN 1 ELSE 0 END) AS new_count,
                    SUM(CASE WHEN next_due <= $1 THEN 1 ELSE 0 END) AS due_count
                 FROM cards
                 WHERE is_active = 1 AND deck_id IS NOT NULL
                 GROUP BY deck_id",
            )
            .bind(now)
            .fetch(&mut conn);

            while let Some(row) = rows.try_next().await? {
                let deck_id: i64 = row.try_get("deck_id")?;
                let new: u32 = row.try_get("new_count")?;
                let due: u32 = row.try_get("due_count")?;

                result.insert(deck_id, DeckCounts::new(new, 0, due));
            }
        }

        conn.close().await?;
        Ok(result)
    }

    /// Full name path of every deck, resolved through the parent links.
    ///
    /// A parent that doesn't exist ends the walk. Decks whose parents form a cycle
    /// are cut at the member listed first, which becomes a root.
    pub fn paths(decks: &[Deck]) -> Vec<(i64, Vec<String>)> {
        let by_id: HashMap<i64, &Deck> = decks.iter().map(|deck| (deck.id, deck)).collect();
        let roots = Self::cycle_roots(decks, &by_id);

        decks
            .iter()
            .map(|deck| {
                let mut path = vec![deck.name.clone()];
                let mut current = deck;

                while !roots.contains(&current.id) {
                    let Some(parent) = current.parent_deck_id.and_then(|id| by_id.get(&id)) else {
                        break;
                    };
                    path.push(parent.name.clone());
                    current = parent;
                }

                path.reverse();
                (deck.id, path)
            })
            .collect()
    }

    /// One deck of every parent cycle, the first of its members in `decks`
    fn cycle_roots(decks: &[Deck], by_id: &HashMap<i64, &Deck>) -> HashSet<i64> {
        let order: HashMap<i64, usize> = decks
            .iter()
            .enumerate()
            .map(|(position, deck)| (deck.id, position))
            .collect();
        let mut roots = HashSet::new();

        for deck in decks {
            let mut chain = vec![deck.id];
            let mut current = deck;

            while !roots.contains(&current.id) {
                let Some(parent) = current.parent_deck_id.and_then(|id| by_id.get(&id)) else {
                    break;
                };

                if let Some(start) = chain.iter().position(|&id| id == parent.id) {
                    let cut = chain[start..]
                        .iter()
                        .copied()
                        .min_by_key(|id| order.get(id).copied().unwrap_or(usize::MAX));
                    if let Some(cut) = cut {
                        tracing::warn!(deck = cut, "cycle in deck parents, showing deck as a root");
                        roots.insert(cut);
                    }
                    break;
                }

                chain.push(parent.id);
                current = parent;
            }
        }

        roots
    }

    /// Entries for the decks screen, decks without active cards get zero counts
    pub fn entries(decks: &[Deck], counts: &HashMap<i64, DeckCounts>) -> Vec<DeckEntry> {
        Self::paths(decks)
            .into_iter()
            .map(|(id, path)| DeckEntry {
                path,
                counts: counts.get(&id).copied().unwrap_or_default(),
            })
            .collect()
    }

    /// Loads the stored decks as screen entries
    pub async fn load_entries(
        database: Arc<Database>,
        now: i64,
    ) -> Result<Vec<DeckEntry>, anywho::Error> {
        let decks = Self::get_all(Arc::clone(&database)).await?;
        let counts = Self::get_counts(database, now).await?;

        Ok(Self::entries(&decks, &counts))
    }
}
