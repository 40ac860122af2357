use crate::*;

fn rec(id: &str, name: &str) -> StakeholderRecord {
    StakeholderRecord {
        id: id.to_string(),
        name: name.to_string(),
        ..StakeholderRecord::default()
    }
}

#[test]
fn upsert_appends_and_clamps() {
    let mut store = RecordStore::new();
    store
        .upsert(StakeholderRecord {
            importance: 150,
            proximity: -20,
            strength: -3.0,
            ..rec("a", "  Alice  ")
        })
        .unwrap();

    let list = store.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "a");
    assert_eq!(list[0].name, "Alice");
    assert_eq!(list[0].importance, 100);
    assert_eq!(list[0].proximity, 0);
    assert_eq!(list[0].strength, 0.0);
}

#[test]
fn upsert_same_id_replaces_in_place() {
    let mut store = RecordStore::new();
    store.upsert(rec("a", "Alice")).unwrap();
    store.upsert(rec("b", "Bob")).unwrap();
    store
        .upsert(StakeholderRecord {
            notes: "updated".to_string(),
            ..rec("a", "Alice 2")
        })
        .unwrap();

    let list = store.list();
    assert_eq!(list.len(), 2);
    // Editing must not re-sort: "a" keeps its slot.
    assert_eq!(list[0].id, "a");
    assert_eq!(list[0].name, "Alice 2");
    assert_eq!(list[0].notes, "updated");
    assert_eq!(list[1].id, "b");
}

#[test]
fn upsert_empty_name_is_rejected() {
    let mut store = RecordStore::new();
    store.upsert(rec("a", "Alice")).unwrap();

    let err = store.upsert(rec("b", "   ")).unwrap_err();
    assert!(matches!(err, Error::EmptyName));
    assert_eq!(store.len(), 1);

    let err = store.upsert(rec("c", "")).unwrap_err();
    assert!(matches!(err, Error::EmptyName));
    assert_eq!(store.len(), 1);
}

#[test]
fn blank_category_defaults_to_uncategorized() {
    let mut store = RecordStore::new();
    store
        .upsert(StakeholderRecord {
            category: "   ".to_string(),
            ..rec("a", "Alice")
        })
        .unwrap();
    assert_eq!(store.list()[0].category, "Uncategorized");
}

#[test]
fn remove_is_noop_for_unknown_id() {
    let mut store = RecordStore::new();
    store.upsert(rec("a", "Alice")).unwrap();
    store.remove("missing");
    assert_eq!(store.len(), 1);
    store.remove("a");
    assert!(store.is_empty());
}

#[test]
fn replace_all_is_permissive() {
    let mut store = RecordStore::new();
    store.upsert(rec("a", "Alice")).unwrap();

    // Out-of-range values and an empty name pass through untouched.
    let wild = StakeholderRecord {
        importance: 999,
        ..rec("x", "")
    };
    store.replace_all(vec![wild.clone()]);
    assert_eq!(store.list(), &[wild]);
}

#[test]
fn edit_target_follows_lifecycle() {
    let mut store = RecordStore::new();
    store.upsert(rec("a", "Alice")).unwrap();

    assert!(store.begin_edit("missing").is_err());
    assert_eq!(store.editing(), None);

    let target = store.begin_edit("a").unwrap();
    assert_eq!(target.name, "Alice");
    assert_eq!(store.editing(), Some("a"));

    // A successful upsert commits the edit and clears the target.
    store.upsert(rec("a", "Alice 2")).unwrap();
    assert_eq!(store.editing(), None);

    store.begin_edit("a").unwrap();
    store.remove("a");
    assert_eq!(store.editing(), None);
}

#[test]
fn fresh_records_get_unique_ids_and_form_defaults() {
    let a = StakeholderRecord::fresh("Alice");
    let b = StakeholderRecord::fresh("Bob");
    assert_ne!(a.id, b.id);
    assert_eq!(a.importance, 60);
    assert_eq!(a.proximity, 40);
    assert_eq!(a.strength, 6.0);
    assert_eq!(a.category, "Uncategorized");
}
