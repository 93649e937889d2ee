use rusqlite::Connection;

use crate::models::{BoardRow, BoardSummaryRow, CardContext, CardRow, ListContext, ListRow, UserRow};
use crate::{Database, StoreError};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)",
                (username, email, password_hash),
            )
            .map_err(constraint_to_duplicate)?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        self.with_conn(|conn| query_user(conn, "username = ?1", &[&username]))
    }

    pub fn user_by_id(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        self.with_conn(|conn| query_user(conn, "id = ?1", &[&id]))
    }

    /// Delete a user and every board, list, and card they own, in one
    /// transaction. Returns the number of rows removed.
    pub fn delete_user(&self, id: i64) -> Result<usize, StoreError> {
        self.with_tx(|tx| {
            let mut removed = tx.execute(
                "DELETE FROM cards WHERE list_id IN (
                     SELECT l.id FROM lists l
                     JOIN boards b ON l.board_id = b.id
                     WHERE b.user_id = ?1)",
                [id],
            )?;
            removed += tx.execute(
                "DELETE FROM lists WHERE board_id IN (
                     SELECT id FROM boards WHERE user_id = ?1)",
                [id],
            )?;
            removed += tx.execute("DELETE FROM boards WHERE user_id = ?1", [id])?;
            removed += tx.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(removed)
        })
    }

    // -- Boards --

    pub fn create_board(&self, user_id: i64, title: &str) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO boards (title, user_id) VALUES (?1, ?2)",
                (title, user_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// A user's boards, most recent first, each with its list count.
    pub fn boards_for_user(&self, user_id: i64) -> Result<Vec<BoardSummaryRow>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT b.id, b.title, COUNT(l.id)
                 FROM boards b
                 LEFT JOIN lists l ON l.board_id = b.id
                 WHERE b.user_id = ?1
                 GROUP BY b.id, b.title
                 ORDER BY b.id DESC",
            )?;

            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(BoardSummaryRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        list_count: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn board_by_id(&self, id: i64) -> Result<Option<BoardRow>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, title, user_id FROM boards WHERE id = ?1")?;

            let row = stmt
                .query_row([id], |row| {
                    Ok(BoardRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        user_id: row.get(2)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    /// Delete a board with all of its lists and cards, children before
    /// parent, in one transaction. Returns the number of rows removed.
    pub fn delete_board(&self, id: i64) -> Result<usize, StoreError> {
        self.with_tx(|tx| {
            let mut removed = tx.execute(
                "DELETE FROM cards WHERE list_id IN (
                     SELECT id FROM lists WHERE board_id = ?1)",
                [id],
            )?;
            removed += tx.execute("DELETE FROM lists WHERE board_id = ?1", [id])?;
            removed += tx.execute("DELETE FROM boards WHERE id = ?1", [id])?;
            Ok(removed)
        })
    }

    // -- Lists --

    pub fn create_list(&self, board_id: i64, title: &str) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO lists (title, board_id) VALUES (?1, ?2)",
                (title, board_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// A board's lists in insertion order.
    pub fn lists_for_board(&self, board_id: i64) -> Result<Vec<ListRow>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, title, board_id FROM lists WHERE board_id = ?1 ORDER BY id")?;

            let rows = stmt
                .query_map([board_id], |row| {
                    Ok(ListRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        board_id: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Resolve a list up its ownership chain (List → Board → User).
    pub fn list_context(&self, id: i64) -> Result<Option<ListContext>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT l.id, l.title, l.board_id, b.user_id
                 FROM lists l
                 JOIN boards b ON l.board_id = b.id
                 WHERE l.id = ?1",
            )?;

            let row = stmt
                .query_row([id], |row| {
                    Ok(ListContext {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        board_id: row.get(2)?,
                        owner_id: row.get(3)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    /// Delete a list with all of its cards in one transaction.
    /// Returns the number of rows removed.
    pub fn delete_list(&self, id: i64) -> Result<usize, StoreError> {
        self.with_tx(|tx| {
            let mut removed = tx.execute("DELETE FROM cards WHERE list_id = ?1", [id])?;
            removed += tx.execute("DELETE FROM lists WHERE id = ?1", [id])?;
            Ok(removed)
        })
    }

    // -- Cards --

    pub fn create_card(&self, list_id: i64, content: &str) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO cards (content, list_id) VALUES (?1, ?2)",
                (content, list_id),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Batch-fetch the cards of a set of lists, in insertion order.
    pub fn cards_for_lists(&self, list_ids: &[i64]) -> Result<Vec<CardRow>, StoreError> {
        if list_ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> =
                (1..=list_ids.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT id, content, list_id, created_at FROM cards
                 WHERE list_id IN ({})
                 ORDER BY list_id, id",
                placeholders.join(", ")
            );

            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn rusqlite::types::ToSql> = list_ids
                .iter()
                .map(|id| id as &dyn rusqlite::types::ToSql)
                .collect();

            let rows = stmt
                .query_map(params.as_slice(), |row| {
                    Ok(CardRow {
                        id: row.get(0)?,
                        content: row.get(1)?,
                        list_id: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Resolve a card up its ownership chain (Card → List → Board → User).
    pub fn card_context(&self, id: i64) -> Result<Option<CardContext>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, l.board_id, b.user_id
                 FROM cards c
                 JOIN lists l ON c.list_id = l.id
                 JOIN boards b ON l.board_id = b.id
                 WHERE c.id = ?1",
            )?;

            let row = stmt
                .query_row([id], |row| {
                    Ok(CardContext {
                        id: row.get(0)?,
                        board_id: row.get(1)?,
                        owner_id: row.get(2)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    pub fn delete_card(&self, id: i64) -> Result<usize, StoreError> {
        self.with_tx(|tx| Ok(tx.execute("DELETE FROM cards WHERE id = ?1", [id])?))
    }
}

fn query_user(
    conn: &Connection,
    predicate: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Option<UserRow>, StoreError> {
    let sql = format!(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE {}",
        predicate
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row(params, |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// UNIQUE violations get their own variant so callers can distinguish a
/// duplicate identity from a broken database.
fn constraint_to_duplicate(e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Duplicate
        }
        other => StoreError::Sqlite(other),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
