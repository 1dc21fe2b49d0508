//! Memo use-case service.
//!
//! # Responsibility
//! - Orchestrate `GroupStore` and `MemoStore` into list/create/edit/delete/sort
//!   use-cases.
//! - Resolve group references before memo writes.
//! - Convert every outcome into an `{ok, ...}` output envelope.
//!
//! # Invariants
//! - Each operation runs its existence checks first, then exactly one write.
//! - `edit_memo` applies a field only when the provided value is truthy.
//! - No operation panics or returns `Err` to its caller.

use crate::model::memo::{GroupId, Memo, MemoGroup, MemoId, NewMemo, NewMemoGroup, UserId};
use crate::repo::group_repo::GroupStore;
use crate::repo::memo_repo::MemoStore;
use crate::repo::RepoError;
use crate::service::dto::{
    CoreOutput, CreateMemoInput, CreateMemoOutput, EditMemoGroupInput, EditMemoInput,
    MyMemosOutput, SortMemoInput,
};
use log::{debug, error, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type MemoServiceResult<T> = Result<T, MemoServiceError>;

/// Coarse failure category exposed to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Referenced group or memo does not exist.
    NotFound,
    /// Required input is missing or empty.
    Validation,
    /// Storage call failed.
    StoreFailure,
}

/// Service error for memo use-cases.
#[derive(Debug)]
pub enum MemoServiceError {
    GroupNotFound,
    MemoNotFound,
    /// Group title is empty on edit.
    TitleRequired,
    /// Memo id missing or zero on edit.
    IdRequired,
    /// Persistence-layer failure, message passed through verbatim.
    Store(RepoError),
}

impl MemoServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupNotFound | Self::MemoNotFound => ErrorKind::NotFound,
            Self::TitleRequired | Self::IdRequired => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::StoreFailure,
        }
    }

    /// Stable machine-readable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GroupNotFound => "group_not_found",
            Self::MemoNotFound => "memo_not_found",
            Self::TitleRequired => "title_required",
            Self::IdRequired => "id_required",
            Self::Store(_) => "store_failure",
        }
    }
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GroupNotFound => write!(f, "Group Not Found."),
            Self::MemoNotFound => write!(f, "Memo Not Found."),
            Self::TitleRequired => write!(f, "Title Not Found."),
            Self::IdRequired => write!(f, "id is required."),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            // Row vanished between the existence check and the write.
            RepoError::NotFound {
                table: "memo_groups",
                ..
            } => Self::GroupNotFound,
            RepoError::NotFound { table: "memos", .. } => Self::MemoNotFound,
            other => Self::Store(other),
        }
    }
}

/// Memo service facade over group and memo stores.
pub struct MemoService<G: GroupStore, M: MemoStore> {
    groups: G,
    memos: M,
}

impl<G: GroupStore, M: MemoStore> MemoService<G, M> {
    /// Creates a service from explicit store implementations.
    pub fn new(groups: G, memos: M) -> Self {
        Self { groups, memos }
    }

    /// Lists all groups owned by `user`, memos attached.
    ///
    /// Groups are ordered by id; memos by `orderby ASC, id DESC`.
    pub fn list_groups_for_user(&self, user: UserId) -> MyMemosOutput {
        observe("memo_groups_list", || {
            self.groups.find_by_owner(user).map_err(Into::into)
        })
        .into()
    }

    /// Creates a group owned by `user`. The title is not validated here.
    pub fn create_group(&self, user: UserId, title: impl Into<String>) -> CoreOutput {
        let draft = NewMemoGroup::new(user, title);
        observe("memo_group_create", || {
            self.groups.create(&draft)?;
            Ok(())
        })
        .into()
    }

    /// Renames an existing group.
    ///
    /// # Contract
    /// - Missing group -> `"Group Not Found."`, checked before the title.
    /// - Empty title -> `"Title Not Found."`.
    pub fn edit_group(&self, input: &EditMemoGroupInput) -> CoreOutput {
        observe("memo_group_edit", || {
            let mut group = self.require_group(input.id)?;
            if input.title.is_empty() {
                return Err(MemoServiceError::TitleRequired);
            }
            group.title = input.title.clone();
            self.groups.save(&group)?;
            Ok(())
        })
        .into()
    }

    /// Deletes a group. Its memos are removed by the store's cascade.
    pub fn delete_group(&self, id: GroupId) -> CoreOutput {
        observe("memo_group_delete", || {
            self.require_group(id)?;
            self.groups.delete(id)?;
            Ok(())
        })
        .into()
    }

    /// Creates a memo in an existing group and returns its id.
    pub fn create_memo(&self, input: &CreateMemoInput) -> CreateMemoOutput {
        observe("memo_create", || {
            self.require_group(input.group_id)?;
            let memo = self
                .memos
                .create(&NewMemo::new(input.group_id, input.content.as_str()))?;
            Ok(memo.id)
        })
        .into()
    }

    /// Deletes one memo.
    pub fn delete_memo(&self, id: MemoId) -> CoreOutput {
        observe("memo_delete", || {
            self.require_memo(id)?;
            self.memos.delete(id)?;
            Ok(())
        })
        .into()
    }

    /// Applies a partial update to one memo.
    ///
    /// # Contract
    /// - `id` missing or `0` -> `"id is required."`; unknown id -> `"Memo Not Found."`.
    /// - `content`, `orderby`, `color` are applied only when truthy, so a field
    ///   cannot be cleared to `""` or reset to `0` through this path.
    /// - A truthy `group_id` is looked up without an existence check; an
    ///   unknown group unsets the memo's group reference.
    pub fn edit_memo(&self, input: &EditMemoInput) -> CoreOutput {
        observe("memo_edit", || {
            let id = input
                .id
                .filter(|id| *id != 0)
                .ok_or(MemoServiceError::IdRequired)?;
            let mut memo = self.require_memo(id)?;

            if let Some(content) = truthy_text(input.content.as_deref()) {
                memo.content = content.to_string();
            }
            if let Some(orderby) = input.orderby.filter(|value| *value != 0) {
                memo.orderby = orderby;
            }
            if let Some(color) = truthy_text(input.color.as_deref()) {
                memo.color = Some(color.to_string());
            }
            if let Some(group_id) = input.group_id.filter(|id| *id != 0) {
                memo.group_id = self.groups.find_one_by_id(group_id)?.map(|group| group.id);
            }

            self.memos.save(&memo)?;
            Ok(())
        })
        .into()
    }

    /// Persists a batch of memo records (typically new `orderby` values).
    ///
    /// Ids that do not exist are inserted. The batch is committed before
    /// `{ok: true}` is returned; any store failure rolls back every record.
    pub fn sort_memo(&self, input: &SortMemoInput) -> CoreOutput {
        observe("memo_sort", || {
            let written = self.memos.save_all(&input.memos)?;
            debug!("event=memo_sort module=service status=written count={written}");
            Ok(())
        })
        .into()
    }

    fn require_group(&self, id: GroupId) -> MemoServiceResult<MemoGroup> {
        self.groups
            .find_one_by_id(id)?
            .ok_or(MemoServiceError::GroupNotFound)
    }

    fn require_memo(&self, id: MemoId) -> MemoServiceResult<Memo> {
        self.memos
            .find_one_by_id(id)?
            .ok_or(MemoServiceError::MemoNotFound)
    }
}

fn truthy_text(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

fn observe<T>(
    event: &'static str,
    operation: impl FnOnce() -> MemoServiceResult<T>,
) -> MemoServiceResult<T> {
    let started_at = Instant::now();
    let result = operation();
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err @ MemoServiceError::Store(_)) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
        Err(err) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error_code={}",
            err.code()
        ),
    }
    result
}
