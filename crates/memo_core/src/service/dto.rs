//! Input requests and output envelopes for `MemoService`.
//!
//! # Invariants
//! - Every output carries `ok`; failures carry `error` and `errorKind`.
//! - Success payload fields (`groups`, `id`) are present only when `ok`.

use crate::model::memo::{GroupId, MemoGroup, MemoId, MemoPatch};
use crate::service::memo_service::{ErrorKind, MemoServiceError};
use serde::{Deserialize, Serialize};

/// Request to create one memo inside an existing group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoInput {
    pub content: String,
    pub group_id: GroupId,
}

/// Request to rename one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMemoGroupInput {
    pub id: GroupId,
    pub title: String,
}

/// Partial memo update.
///
/// Each field is applied only when truthy: `None`, `Some("")` and `Some(0)`
/// all leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMemoInput {
    pub id: Option<MemoId>,
    pub content: Option<String>,
    pub orderby: Option<i64>,
    pub group_id: Option<GroupId>,
    pub color: Option<String>,
}

/// Batch of memo records persisted by `sort_memo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortMemoInput {
    pub memos: Vec<MemoPatch>,
}

/// Shared `{ok, error}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl CoreOutput {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
            error_kind: None,
        }
    }

    pub fn failure(err: &MemoServiceError) -> Self {
        Self {
            ok: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }
}

impl From<Result<(), MemoServiceError>> for CoreOutput {
    fn from(value: Result<(), MemoServiceError>) -> Self {
        match value {
            Ok(()) => Self::success(),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Envelope for `list_groups_for_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MyMemosOutput {
    #[serde(flatten)]
    pub status: CoreOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<MemoGroup>>,
}

impl From<Result<Vec<MemoGroup>, MemoServiceError>> for MyMemosOutput {
    fn from(value: Result<Vec<MemoGroup>, MemoServiceError>) -> Self {
        match value {
            Ok(groups) => Self {
                status: CoreOutput::success(),
                groups: Some(groups),
            },
            Err(err) => Self {
                status: CoreOutput::failure(&err),
                groups: None,
            },
        }
    }
}

/// Envelope for `create_memo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateMemoOutput {
    #[serde(flatten)]
    pub status: CoreOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MemoId>,
}

impl From<Result<MemoId, MemoServiceError>> for CreateMemoOutput {
    fn from(value: Result<MemoId, MemoServiceError>) -> Self {
        match value {
            Ok(id) => Self {
                status: CoreOutput::success(),
                id: Some(id),
            },
            Err(err) => Self {
                status: CoreOutput::failure(&err),
                id: None,
            },
        }
    }
}
