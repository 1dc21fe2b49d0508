//! Core domain logic for the memo service.
//! Users own memo groups; each group owns an ordered list of memos.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{
    GroupId, Memo, MemoGroup, MemoId, MemoPatch, NewMemo, NewMemoGroup, UserId,
};
pub use repo::group_repo::{GroupStore, SqliteGroupStore};
pub use repo::memo_repo::{MemoStore, SqliteMemoStore};
pub use repo::{RepoError, RepoResult};
pub use service::dto::{
    CoreOutput, CreateMemoInput, CreateMemoOutput, EditMemoGroupInput, EditMemoInput,
    MyMemosOutput, SortMemoInput,
};
pub use service::memo_service::{ErrorKind, MemoService, MemoServiceError, MemoServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
