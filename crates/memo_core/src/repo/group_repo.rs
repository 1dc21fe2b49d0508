//! Memo group store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped find/create/save/delete APIs over `memo_groups`.
//! - Attach each group's memos on read.
//!
//! # Invariants
//! - Owner listings are ordered `id ASC`; attached memos `orderby ASC, id DESC`.
//! - Deleting a group relies on `ON DELETE CASCADE` to remove its memos.

use super::memo_repo::load_memos_for_group;
use super::{ensure_tables, RepoError, RepoResult};
use crate::model::memo::{GroupId, MemoGroup, NewMemoGroup, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Repository interface for memo group CRUD operations.
pub trait GroupStore {
    /// Lists every group owned by `owner_id`, memos attached.
    fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<MemoGroup>>;
    /// Loads one group by id, memos attached.
    fn find_one_by_id(&self, id: GroupId) -> RepoResult<Option<MemoGroup>>;
    /// Inserts a new group and returns it with generated fields populated.
    fn create(&self, group: &NewMemoGroup) -> RepoResult<MemoGroup>;
    /// Persists the mutable fields (title) of an existing group.
    fn save(&self, group: &MemoGroup) -> RepoResult<()>;
    /// Deletes one group by id.
    fn delete(&self, id: GroupId) -> RepoResult<()>;
}

/// SQLite-backed memo group store.
pub struct SqliteGroupStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGroupStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["memo_groups", "memos"])?;
        Ok(Self { conn })
    }

    fn load_group(&self, row: GroupRow) -> RepoResult<MemoGroup> {
        let owner_id = Uuid::parse_str(&row.owner_id).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid owner id `{}` in memo_groups.owner_id",
                row.owner_id
            ))
        })?;
        let memos = load_memos_for_group(self.conn, row.id)?;
        Ok(MemoGroup {
            id: row.id,
            title: row.title,
            owner_id,
            memos,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl GroupStore for SqliteGroupStore<'_> {
    fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<MemoGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, owner_id, created_at, updated_at
             FROM memo_groups
             WHERE owner_id = ?1
             ORDER BY id ASC;",
        )?;
        let rows = stmt
            .query_map([owner_id.to_string()], GroupRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(|row| self.load_group(row)).collect()
    }

    fn find_one_by_id(&self, id: GroupId) -> RepoResult<Option<MemoGroup>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, owner_id, created_at, updated_at
                 FROM memo_groups
                 WHERE id = ?1;",
                [id],
                GroupRow::from_row,
            )
            .optional()?;

        row.map(|row| self.load_group(row)).transpose()
    }

    fn create(&self, group: &NewMemoGroup) -> RepoResult<MemoGroup> {
        self.conn.execute(
            "INSERT INTO memo_groups (title, owner_id) VALUES (?1, ?2);",
            params![group.title.as_str(), group.owner_id.to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.find_one_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("memo group {id} missing after insert"))
        })
    }

    fn save(&self, group: &MemoGroup) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memo_groups
             SET
                title = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![group.id, group.title.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "memo_groups",
                id: group.id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: GroupId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM memo_groups WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "memo_groups",
                id,
            });
        }
        Ok(())
    }
}

struct GroupRow {
    id: GroupId,
    title: String,
    owner_id: String,
    created_at: i64,
    updated_at: i64,
}

impl GroupRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            owner_id: row.get("owner_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
