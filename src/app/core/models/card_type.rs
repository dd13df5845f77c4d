// SPDX-License-Identifier: GPL-3.0

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::{Connection, Row};

use crate::app::core::{Database, utils::current_timestamp};

/// Field name to [`FieldDefinition`], stored serialized as ron
pub type CardFields = BTreeMap<String, FieldDefinition>;

/// What kind of content a card type field holds
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[default]
    Text,
    Image,
}

/// Definition of a single field of a [`CardType`]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Position of the field in editors and templates
    pub ord: u32,
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn new(ord: u32, kind: FieldKind) -> Self {
        Self { ord, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    pub id: i64,
    pub fields: CardFields,
    pub tags: Option<String>,
    /// Epoch seconds
    pub modified_at: i64,
}

impl CardType {
    /// Serialized ron of the given fields
    // The fields carry no version tag, readers have to agree on this shape.
    pub fn fields_to_ron(fields: &CardFields) -> Result<String, anywho::Error> {
        Ok(ron::to_string(fields)?)
    }

    /// Get the fields back from a ron string
    pub fn fields_from_ron(ron: &str) -> Result<CardFields, anywho::Error> {
        Ok(ron::from_str(ron)?)
    }

    /// Add a [`CardType`] to the database, returns it's id
    pub async fn add(
        database: Arc<Database>,
        fields: CardFields,
        tags: Option<String>,
    ) -> Result<i64, anywho::Error> {
        let fields = Self::fields_to_ron(&fields)?;
        let modified_at = current_timestamp();

        database
            .insert(
                sqlx::query("INSERT INTO card_types (fields, tags, modified_at) VALUES (?, ?, ?)")
                    .bind(fields)
                    .bind(tags)
                    .bind(modified_at),
            )
            .await
    }

    /// Get the [`CardType`] with the given id, if any
    pub async fn get(database: Arc<Database>, id: i64) -> Result<Option<CardType>, anywho::Error> {
        let mut conn = database.connect().await?;
        let row = sqlx::query("SELECT id, fields, tags, modified_at FROM card_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut conn)
            .await?;
        conn.close().await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let fields: String = row.try_get("fields")?;
        Ok(Some(CardType {
            id: row.try_get("id")?,
            fields: Self::fields_from_ron(&fields)?,
            tags: row.try_get("tags")?,
            modified_at: row.try_get("modified_at")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::core::database::tests::temp_database;

    fn basic_fields() -> CardFields {
        CardFields::from([
            ("Front".to_string(), FieldDefinition::new(0, FieldKind::Text)),
            ("Back".to_string(), FieldDefinition::new(1, FieldKind::Text)),
            ("Picture".to_string(), FieldDefinition::new(2, FieldKind::Image)),
        ])
    }

    #[tokio::test]
    async fn add_goes_to_the_card_types_table() {
        let (_dir, database) = temp_database();
        database.init_schema().await.unwrap();

        let before = current_timestamp();
        let id = CardType::add(
            Arc::clone(&database),
            basic_fields(),
            Some("vocab jlpt".into()),
        )
        .await
        .unwrap();
        let after = current_timestamp();

        let card_type = CardType::get(database, id).await.unwrap().unwrap();
        assert_eq!(card_type.id, id);
        assert_eq!(card_type.fields, basic_fields());
        assert_eq!(card_type.tags.as_deref(), Some("vocab jlpt"));
        assert!((before..=after).contains(&card_type.modified_at));
    }

    #[tokio::test]
    async fn add_returns_increasing_ids() {
        let (_dir, database) = temp_database();
        database.init_schema().await.unwrap();

        let first = CardType::add(Arc::clone(&database), basic_fields(), None)
            .await
            .unwrap();
        let second = CardType::add(Arc::clone(&database), CardFields::new(), None)
            .await
            .unwrap();

        assert!(second > first);
        let empty = CardType::get(database, second).await.unwrap().unwrap();
        assert!(empty.fields.is_empty());
        assert_eq!(empty.tags, None);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let (_dir, database) = temp_database();
        database.init_schema().await.unwrap();

        assert_eq!(CardType::get(database, 7).await.unwrap(), None);
    }

    #[test]
    fn malformed_fields_are_an_error() {
        assert!(CardType::fields_from_ron("{\"Front\": (ord: 0").is_err());
    }
}
