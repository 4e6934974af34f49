use chrono::{TimeZone, Utc};
use jotter_core::{JsonNoteStore, MemorySlot, Note, NoteStore, SaveRequest, StoreError};

fn store() -> JsonNoteStore<MemorySlot> {
    JsonNoteStore::new(MemorySlot::new())
}

fn imported(id: u64, title: &str, minute: u32) -> Note {
    Note {
        id,
        title: title.to_string(),
        body: "body".to_string(),
        updated: Utc.with_ymd_and_hms(2024, 2, 1, 9, minute, 0).unwrap(),
    }
}

#[test]
fn list_all_on_absent_storage_is_empty() {
    assert_eq!(store().list_all().unwrap(), Vec::new());
}

#[test]
fn corrupt_slot_content_reads_as_empty_collection() {
    let store = JsonNoteStore::new(MemorySlot::seeded("definitely not json {"));
    assert_eq!(store.list_all().unwrap(), Vec::new());
}

#[test]
fn list_all_sorts_by_updated_descending() {
    let store = store();
    store
        .import_batch(&[
            imported(1, "oldest", 0),
            imported(2, "newest", 30),
            imported(3, "middle", 15),
        ])
        .unwrap();

    let titles: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|note| note.title)
        .collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[test]
fn save_assigns_unique_ids_across_creates() {
    let store = store();
    for n in 0..5 {
        store
            .save(SaveRequest::Create {
                title: format!("note {n}"),
                body: "body".to_string(),
            })
            .unwrap();
    }

    let mut ids: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn update_preserves_id_and_advances_updated() {
    let store = store();
    let created = store
        .save(SaveRequest::Create {
            title: "before".to_string(),
            body: "body".to_string(),
        })
        .unwrap();

    let updated = store
        .save(SaveRequest::Update {
            id: created.id,
            title: "after".to_string(),
            body: "body".to_string(),
        })
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert!(updated.updated >= created.updated);

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "after");
}

#[test]
fn update_with_unmatched_id_appends_a_fresh_note() {
    let store = store();
    store
        .save(SaveRequest::Update {
            id: 999,
            title: "orphan edit".to_string(),
            body: "body".to_string(),
        })
        .unwrap();

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "orphan edit");
    // The caller-supplied id is not kept; the store assigns its own.
    assert_ne!(listed[0].id, 999);
}

#[test]
fn fresh_ids_never_collide_with_imported_ids() {
    let store = store();
    store.import_batch(&[imported(400, "imported", 0)]).unwrap();
    let created = store
        .save(SaveRequest::Create {
            title: "local".to_string(),
            body: "body".to_string(),
        })
        .unwrap();
    assert_ne!(created.id, 400);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn save_still_assigns_a_unique_id_when_an_import_took_the_top_of_the_range() {
    let store = store();
    store
        .import_batch(&[imported(u64::MAX, "ceiling", 0)])
        .unwrap();

    let created = store
        .save(SaveRequest::Create {
            title: "local".to_string(),
            body: "body".to_string(),
        })
        .unwrap();

    assert_ne!(created.id, u64::MAX);
    assert_eq!(store.list_all().unwrap().len(), 2);
}

#[test]
fn delete_is_idempotent() {
    let store = store();
    let created = store
        .save(SaveRequest::Create {
            title: "t".to_string(),
            body: "b".to_string(),
        })
        .unwrap();

    store.delete(created.id).unwrap();
    store.delete(created.id).unwrap();
    assert_eq!(store.list_all().unwrap(), Vec::new());
}

#[test]
fn delete_of_unknown_id_is_not_an_error() {
    store().delete(12345).unwrap();
}

#[test]
fn export_of_empty_collection_fails_distinctly() {
    match store().export_xml() {
        Err(StoreError::EmptyCollection) => {}
        other => panic!("expected EmptyCollection, got {other:?}"),
    }
}

#[test]
fn save_update_delete_scenario() {
    let store = store();

    let created = store
        .save(SaveRequest::Create {
            title: "T1".to_string(),
            body: "B1".to_string(),
        })
        .unwrap();

    let updated = store
        .save(SaveRequest::Update {
            id: created.id,
            title: "T1x".to_string(),
            body: "B1".to_string(),
        })
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "T1x");
    assert!(updated.updated >= created.updated);

    store.delete(created.id).unwrap();
    assert_eq!(store.list_all().unwrap(), Vec::new());
}

#[test]
fn store_survives_reopening_the_same_file_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let first = JsonNoteStore::new(jotter_core::FileSlot::new(&path));
    let created = first
        .save(SaveRequest::Create {
            title: "persisted".to_string(),
            body: "body".to_string(),
        })
        .unwrap();
    drop(first);

    let second = JsonNoteStore::new(jotter_core::FileSlot::new(&path));
    let listed = second.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "persisted");
}
