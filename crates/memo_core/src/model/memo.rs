//! Memo group and memo records.
//!
//! # Invariants
//! - `MemoGroup::memos` is ordered `orderby ASC, id DESC` when loaded by a store.
//! - A memo's `group_id` may be `None` only after an unchecked reassignment.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of an already-authenticated user. Only the id is consumed.
pub type UserId = Uuid;

/// Storage-generated memo group id.
pub type GroupId = i64;

/// Storage-generated memo id.
pub type MemoId = i64;

/// Named collection of memos owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoGroup {
    pub id: GroupId,
    pub title: String,
    pub owner_id: UserId,
    /// Attached memos, ordered for display.
    pub memos: Vec<Memo>,
    /// Epoch ms.
    pub created_at: i64,
    /// Epoch ms.
    pub updated_at: i64,
}

/// Single note inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    pub content: String,
    /// Display order inside the owning group.
    pub orderby: i64,
    /// Optional label color, stored verbatim.
    pub color: Option<String>,
    pub group_id: Option<GroupId>,
    /// Epoch ms.
    pub created_at: i64,
    /// Epoch ms.
    pub updated_at: i64,
}

/// Unsaved memo group. Storage assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemoGroup {
    pub title: String,
    pub owner_id: UserId,
}

impl NewMemoGroup {
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            owner_id,
        }
    }
}

/// Unsaved memo. `orderby` and `color` take storage defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemo {
    pub content: String,
    pub group_id: GroupId,
}

impl NewMemo {
    pub fn new(group_id: GroupId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            group_id,
        }
    }
}

/// Partial memo record written by batch upserts.
///
/// Fields left as `None` keep their stored value on update and fall back to
/// storage defaults on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoPatch {
    pub id: MemoId,
    pub content: Option<String>,
    pub orderby: Option<i64>,
    pub color: Option<String>,
    pub group_id: Option<GroupId>,
}

impl MemoPatch {
    /// Patch that only moves a memo to a new display position.
    pub fn reorder(id: MemoId, orderby: i64) -> Self {
        Self {
            id,
            orderby: Some(orderby),
            ..Self::default()
        }
    }
}
