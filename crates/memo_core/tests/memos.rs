use memo_core::db::open_db_in_memory;
use memo_core::{
    CreateMemoInput, EditMemoInput, ErrorKind, GroupId, Memo, MemoId, MemoPatch, MemoService,
    MemoStore, SortMemoInput, SqliteGroupStore, SqliteMemoStore,
};
use rusqlite::Connection;
use uuid::Uuid;

type SqliteMemoService<'conn> = MemoService<SqliteGroupStore<'conn>, SqliteMemoStore<'conn>>;

fn service(conn: &Connection) -> SqliteMemoService<'_> {
    MemoService::new(
        SqliteGroupStore::try_new(conn).unwrap(),
        SqliteMemoStore::try_new(conn).unwrap(),
    )
}

fn new_group(service: &SqliteMemoService<'_>, title: &str) -> GroupId {
    let user = Uuid::new_v4();
    assert!(service.create_group(user, title).ok);
    service.list_groups_for_user(user).groups.unwrap()[0].id
}

fn new_memo(service: &SqliteMemoService<'_>, group_id: GroupId, content: &str) -> MemoId {
    let output = service.create_memo(&CreateMemoInput {
        content: content.to_string(),
        group_id,
    });
    assert!(output.status.ok, "{:?}", output.status.error);
    output.id.unwrap()
}

fn load(conn: &Connection, id: MemoId) -> Option<Memo> {
    SqliteMemoStore::try_new(conn)
        .unwrap()
        .find_one_by_id(id)
        .unwrap()
}

fn memo_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM memos;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_memo_uses_store_defaults() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");

    let id = new_memo(&service, group_id, "hi");

    let memo = load(&conn, id).unwrap();
    assert_eq!(memo.content, "hi");
    assert_eq!(memo.group_id, Some(group_id));
    assert_eq!(memo.orderby, 0);
    assert_eq!(memo.color, None);
}

#[test]
fn create_memo_in_missing_group_creates_no_row() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let output = service.create_memo(&CreateMemoInput {
        content: "hi".to_string(),
        group_id: 404,
    });
    assert!(!output.status.ok);
    assert_eq!(output.status.error.as_deref(), Some("Group Not Found."));
    assert_eq!(output.status.error_kind, Some(ErrorKind::NotFound));
    assert_eq!(output.id, None);
    assert_eq!(memo_count(&conn), 0);
}

#[test]
fn delete_memo_twice_reports_not_found_on_second_call() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "short lived");

    let first = service.delete_memo(id);
    assert!(first.ok);
    assert!(load(&conn, id).is_none());

    let second = service.delete_memo(id);
    assert!(!second.ok);
    assert_eq!(second.error.as_deref(), Some("Memo Not Found."));
}

#[test]
fn edit_memo_round_trip_keeps_id_and_group() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "draft");

    let output = service.edit_memo(&EditMemoInput {
        id: Some(id),
        content: Some("final".to_string()),
        color: Some("#ffcc00".to_string()),
        orderby: Some(3),
        ..EditMemoInput::default()
    });
    assert!(output.ok);

    let memo = load(&conn, id).unwrap();
    assert_eq!(memo.id, id);
    assert_eq!(memo.group_id, Some(group_id));
    assert_eq!(memo.content, "final");
    assert_eq!(memo.color.as_deref(), Some("#ffcc00"));
    assert_eq!(memo.orderby, 3);
}

#[test]
fn edit_memo_skips_falsy_values() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "original");
    assert!(
        service
            .edit_memo(&EditMemoInput {
                id: Some(id),
                orderby: Some(7),
                color: Some("blue".to_string()),
                ..EditMemoInput::default()
            })
            .ok
    );

    let output = service.edit_memo(&EditMemoInput {
        id: Some(id),
        content: Some(String::new()),
        orderby: Some(0),
        color: Some(String::new()),
        group_id: Some(0),
    });
    assert!(output.ok);

    let memo = load(&conn, id).unwrap();
    assert_eq!(memo.content, "original");
    assert_eq!(memo.orderby, 7);
    assert_eq!(memo.color.as_deref(), Some("blue"));
    assert_eq!(memo.group_id, Some(group_id));
}

#[test]
fn edit_memo_requires_non_zero_id() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for id in [None, Some(0)] {
        let output = service.edit_memo(&EditMemoInput {
            id,
            content: Some("x".to_string()),
            ..EditMemoInput::default()
        });
        assert!(!output.ok);
        assert_eq!(output.error.as_deref(), Some("id is required."));
        assert_eq!(output.error_kind, Some(ErrorKind::Validation));
    }
}

#[test]
fn edit_missing_memo_reports_memo_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let output = service.edit_memo(&EditMemoInput {
        id: Some(404),
        ..EditMemoInput::default()
    });
    assert_eq!(output.error.as_deref(), Some("Memo Not Found."));
}

#[test]
fn edit_memo_moves_memo_to_another_group() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let from = new_group(&service, "from");
    let to = new_group(&service, "to");
    let id = new_memo(&service, from, "moving");

    let output = service.edit_memo(&EditMemoInput {
        id: Some(id),
        group_id: Some(to),
        ..EditMemoInput::default()
    });
    assert!(output.ok);
    assert_eq!(load(&conn, id).unwrap().group_id, Some(to));
}

#[test]
fn edit_memo_with_unknown_group_unsets_group_reference() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "adrift");

    let output = service.edit_memo(&EditMemoInput {
        id: Some(id),
        group_id: Some(404),
        ..EditMemoInput::default()
    });
    assert!(output.ok);

    let memo = load(&conn, id).unwrap();
    assert_eq!(memo.group_id, None);
    assert_eq!(memo.content, "adrift");
}

#[test]
fn sort_memo_persists_new_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let user = Uuid::new_v4();
    service.create_group(user, "sorted");
    let group_id = service.list_groups_for_user(user).groups.unwrap()[0].id;
    let a = new_memo(&service, group_id, "a");
    let b = new_memo(&service, group_id, "b");
    let c = new_memo(&service, group_id, "c");

    let output = service.sort_memo(&SortMemoInput {
        memos: vec![
            MemoPatch::reorder(a, 1),
            MemoPatch::reorder(b, 3),
            MemoPatch::reorder(c, 2),
        ],
    });
    assert!(output.ok);

    let memos = &service.list_groups_for_user(user).groups.unwrap()[0].memos;
    let ids: Vec<MemoId> = memos.iter().map(|memo| memo.id).collect();
    assert_eq!(ids, vec![a, c, b]);
    assert!(memos.iter().all(|memo| memo.content.len() == 1));
}

#[test]
fn sort_memo_allows_zero_orderby_and_inserts_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "existing");
    assert!(
        service
            .edit_memo(&EditMemoInput {
                id: Some(id),
                orderby: Some(9),
                ..EditMemoInput::default()
            })
            .ok
    );

    let output = service.sort_memo(&SortMemoInput {
        memos: vec![
            MemoPatch::reorder(id, 0),
            MemoPatch {
                id: 500,
                content: Some("inserted".to_string()),
                orderby: Some(1),
                group_id: Some(group_id),
                ..MemoPatch::default()
            },
        ],
    });
    assert!(output.ok);

    let existing = load(&conn, id).unwrap();
    assert_eq!(existing.orderby, 0);
    assert_eq!(existing.content, "existing");

    let inserted = load(&conn, 500).unwrap();
    assert_eq!(inserted.content, "inserted");
    assert_eq!(inserted.group_id, Some(group_id));
}

#[test]
fn sort_memo_failure_rolls_back_whole_batch() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let id = new_memo(&service, group_id, "stable");

    let output = service.sort_memo(&SortMemoInput {
        memos: vec![
            MemoPatch::reorder(id, 4),
            MemoPatch {
                id: 900,
                content: Some("bad group".to_string()),
                group_id: Some(404),
                ..MemoPatch::default()
            },
        ],
    });
    assert!(!output.ok);
    assert_eq!(output.error_kind, Some(ErrorKind::StoreFailure));
    assert!(output.error.is_some());

    assert_eq!(load(&conn, id).unwrap().orderby, 0);
    assert!(load(&conn, 900).is_none());
}

#[test]
fn store_find_by_group_matches_listing_order() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let group_id = new_group(&service, "g");
    let older = new_memo(&service, group_id, "older");
    let newer = new_memo(&service, group_id, "newer");

    let store = SqliteMemoStore::try_new(&conn).unwrap();
    let ids: Vec<MemoId> = store
        .find_by_group(group_id)
        .unwrap()
        .iter()
        .map(|memo| memo.id)
        .collect();
    assert_eq!(ids, vec![newer, older]);
}
