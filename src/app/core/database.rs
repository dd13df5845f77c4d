// SPDX-License-Identifier: GPL-3.0

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use sqlx::{
    Connection, Sqlite, SqliteConnection,
    query::Query,
    sqlite::{SqliteArguments, SqliteConnectOptions},
};

const DATABASE_FILE: &str = "deckhand.db";

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS decks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        parent_deck_id INTEGER,
        FOREIGN KEY (parent_deck_id) REFERENCES decks(id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS card_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        fields TEXT NOT NULL,
        tags TEXT,
        modified_at INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_type_id INTEGER,
        deck_id INTEGER,
        card_ord INTEGER,
        created_at INTEGER NOT NULL,
        next_due INTEGER,
        template_front TEXT,
        template_back TEXT,
        is_active BOOLEAN DEFAULT 1,
        FOREIGN KEY (card_type_id) REFERENCES card_types(id),
        FOREIGN KEY (deck_id) REFERENCES decks(id)
    );
    "#,
];

/// The file-backed deck store.
///
/// No connection is kept around: every operation opens its own, does its work
/// inside a single transaction and closes it again.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    foreign_keys: bool,
}

impl Database {
    /// Store backed by the given file, created on first connection if missing
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            foreign_keys: false,
        }
    }

    /// Store placed in the user data directory of the given application
    pub fn open(app_id: &str) -> Result<Self, anywho::Error> {
        let db_dir = dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no user data directory"))?
            .join(app_id)
            .join("database");
        fs::create_dir_all(&db_dir)?;

        Ok(Self::new(db_dir.join(DATABASE_FILE)))
    }

    /// Enforce the `REFERENCES` clauses of the schema (off by default)
    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection to the store
    pub async fn connect(&self) -> Result<SqliteConnection, anywho::Error> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .foreign_keys(self.foreign_keys);

        Ok(SqliteConnection::connect_with(&options).await?)
    }

    /// Creates the decks, card types and cards tables if they don't exist yet
    pub async fn init_schema(&self) -> Result<(), anywho::Error> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        conn.close().await?;

        tracing::info!(path = %self.path.display(), "deck schema ready");
        Ok(())
    }

    /// Runs a single insert on its own connection and commits it, returns the new rowid
    pub async fn insert<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<i64, anywho::Error> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;
        let rowid = query.execute(&mut *tx).await?.last_insert_rowid();
        tx.commit().await?;
        conn.close().await?;

        Ok(rowid)
    }
}

/// Init the application database
pub async fn init_database(app_id: &'static str) -> Result<Arc<Database>, anywho::Error> {
    let database = Database::open(app_id)?;
    database.init_schema().await?;
    Ok(Arc::new(database))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::Row;

    pub fn temp_database() -> (tempfile::TempDir, Arc<Database>) {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("test.db"));
        (dir, Arc::new(database))
    }

    async fn table_names(database: &Database) -> Vec<String> {
        let mut conn = database.connect().await.unwrap();
        let rows = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();
        conn.close().await.unwrap();

        rows.iter().map(|row| row.get::<String, _>("name")).collect()
    }

    #[tokio::test]
    async fn init_schema_creates_the_three_tables() {
        let (_dir, database) = temp_database();
        database.init_schema().await.unwrap();

        assert_eq!(table_names(&database).await, ["card_types", "cards", "decks"]);
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let (_dir, database) = temp_database();
        database.init_schema().await.unwrap();
        database.init_schema().await.unwrap();

        assert_eq!(table_names(&database).await, ["card_types", "cards", "decks"]);
    }

    #[tokio::test]
    async fn connecting_creates_the_file() {
        let (_dir, database) = temp_database();
        assert!(!database.path().exists());

        database.init_schema().await.unwrap();
        assert!(database.path().exists());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("missing").join("test.db"));

        assert!(database.init_schema().await.is_err());
    }
}
