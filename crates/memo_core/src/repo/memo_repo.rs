//! Memo store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/create/save/delete APIs over the `memos` table.
//! - Own the batch upsert used for reordering.
//!
//! # Invariants
//! - Memo lists are ordered `orderby ASC, id DESC`.
//! - `save_all` writes the whole batch in one transaction or nothing.

use super::{ensure_tables, RepoError, RepoResult};
use crate::model::memo::{GroupId, Memo, MemoId, MemoPatch, NewMemo};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMO_SELECT_SQL: &str = "SELECT
    id,
    content,
    orderby,
    color,
    group_id,
    created_at,
    updated_at
FROM memos";

/// Repository interface for memo CRUD operations.
pub trait MemoStore {
    /// Lists memos attached to one group in display order.
    fn find_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Memo>>;
    /// Loads one memo by id.
    fn find_one_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    /// Inserts a new memo and returns it with generated fields populated.
    fn create(&self, memo: &NewMemo) -> RepoResult<Memo>;
    /// Persists all mutable fields of an existing memo.
    fn save(&self, memo: &Memo) -> RepoResult<()>;
    /// Upserts a batch of partial memo records. Returns the number written.
    fn save_all(&self, patches: &[MemoPatch]) -> RepoResult<usize>;
    /// Deletes one memo by id.
    fn delete(&self, id: MemoId) -> RepoResult<()>;
}

/// SQLite-backed memo store.
pub struct SqliteMemoStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["memo_groups", "memos"])?;
        Ok(Self { conn })
    }
}

impl MemoStore for SqliteMemoStore<'_> {
    fn find_by_group(&self, group_id: GroupId) -> RepoResult<Vec<Memo>> {
        load_memos_for_group(self.conn, group_id)
    }

    fn find_one_by_id(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        load_memo(self.conn, id)
    }

    fn create(&self, memo: &NewMemo) -> RepoResult<Memo> {
        self.conn.execute(
            "INSERT INTO memos (content, group_id) VALUES (?1, ?2);",
            params![memo.content.as_str(), memo.group_id],
        )?;
        let id = self.conn.last_insert_rowid();
        load_memo(self.conn, id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("memo {id} missing after insert"))
        })
    }

    fn save(&self, memo: &Memo) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memos
             SET
                content = ?2,
                orderby = ?3,
                color = ?4,
                group_id = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                memo.id,
                memo.content.as_str(),
                memo.orderby,
                memo.color.as_deref(),
                memo.group_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "memos",
                id: memo.id,
            });
        }
        Ok(())
    }

    fn save_all(&self, patches: &[MemoPatch]) -> RepoResult<usize> {
        // Stores hold a shared borrow, so the batch uses an unchecked transaction.
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO memos (id, content, orderby, color, group_id)
                 VALUES (?1, COALESCE(?2, ''), COALESCE(?3, 0), ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    content = COALESCE(?2, content),
                    orderby = COALESCE(?3, orderby),
                    color = COALESCE(?4, color),
                    group_id = COALESCE(?5, group_id),
                    updated_at = (strftime('%s', 'now') * 1000);",
            )?;
            for patch in patches {
                stmt.execute(params![
                    patch.id,
                    patch.content.as_deref(),
                    patch.orderby,
                    patch.color.as_deref(),
                    patch.group_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(patches.len())
    }

    fn delete(&self, id: MemoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM memos WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { table: "memos", id });
        }
        Ok(())
    }
}

pub(crate) fn load_memos_for_group(conn: &Connection, group_id: GroupId) -> RepoResult<Vec<Memo>> {
    let mut stmt = conn.prepare(&format!(
        "{MEMO_SELECT_SQL}
         WHERE group_id = ?1
         ORDER BY orderby ASC, id DESC;"
    ))?;
    let mut rows = stmt.query([group_id])?;
    let mut memos = Vec::new();
    while let Some(row) = rows.next()? {
        memos.push(parse_memo_row(row)?);
    }
    Ok(memos)
}

fn load_memo(conn: &Connection, id: MemoId) -> RepoResult<Option<Memo>> {
    let memo = conn
        .query_row(
            &format!("{MEMO_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_memo_row,
        )
        .optional()?;
    Ok(memo)
}

fn parse_memo_row(row: &Row<'_>) -> rusqlite::Result<Memo> {
    Ok(Memo {
        id: row.get("id")?,
        content: row.get("content")?,
        orderby: row.get("orderby")?,
        color: row.get("color")?,
        group_id: row.get("group_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
