// SPDX-License-Identifier: GPL-3.0

use std::sync::Arc;

use futures::stream::TryStreamExt;
use serde::{Deserialize, Serialize};
use sqlx::{Connection, Row};

use crate::app::core::{Database, utils::current_timestamp};

/// Seconds a new card waits before it's first due
pub const DEFAULT_DUE_DELAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub card_type_id: i64,
    pub deck_id: i64,
    /// Position among the cards generated from the same card type
    pub card_ord: i64,
    pub created_at: i64,
    pub next_due: i64,
    pub template_front: String,
    pub template_back: String,
    pub is_active: bool,
}

/// Data needed to insert a [`Card`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub card_type_id: i64,
    pub deck_id: i64,
    pub card_ord: i64,
    pub template_front: String,
    pub template_back: String,
    /// Defaults to one day after creation
    pub next_due: Option<i64>,
    /// Defaults to active
    pub is_active: Option<bool>,
}

impl NewCard {
    /// Due time for a card created at `created_at`
    pub fn due_time(&self, created_at: i64) -> i64 {
        self.next_due.unwrap_or(created_at + DEFAULT_DUE_DELAY)
    }
}

impl Card {
    /// Add a [`Card`] to the database
    pub async fn add(database: Arc<Database>, card: NewCard) -> Result<(), anywho::Error> {
        let created_at = current_timestamp();
        let next_due = card.due_time(created_at);

        database
            .insert(
                sqlx::query(
                    "INSERT INTO cards (
                        card_type_id, deck_id, card_ord,
                        created_at, next_due, template_front, template_back, is_active
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(card.card_type_id)
                .bind(card.deck_id)
                .bind(card.card_ord)
                .bind(created_at)
                .bind(next_due)
                .bind(card.template_front)
                .bind(card.template_back)
                .bind(card.is_active.unwrap_or(true)),
            )
            .await?;

        Ok(())
    }

    /// Get all cards of the given deck from the database
    pub async fn get_all(database: Arc<Database>, deck_id: i64) -> Result<Vec<Card>, anywho::Error> {
        let mut conn = database.connect().await?;
        let mut result = Vec::<Card>::new();

        {
            let mut rows = sqlx::query(
                "SELECT id, card_type_id, deck_id, card_ord, created_at, next_due,
                        template_front, template_back, is_active
                 FROM cards
                 WHERE deck_id = $1
                 ORDER BY id ASC",
            )
            .bind(deck_id)
            .fetch(&mut conn);

            while let Some(row) = rows.try_next().await? {
                result.push(Card {
                    id: row.try_get("id")?,
                    card_type_id: row.try_get("card_type_id")?,
                    deck_id: row.try_get("deck_id")?,
                    card_ord: row.try_get("card_ord")?,
                    created_at: row.try_get("created_at")?,
                    next_due: row.try_get("next_due")?,
                    template_front: row.try_get("template_front")?,
                    template_back: row.try_get("template_back")?,
                    is_active: row.try_get("is_active")?,
                });
            }
        }

        conn.close().await?;
        Ok(result)
    }
}
