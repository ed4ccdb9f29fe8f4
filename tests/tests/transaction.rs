use tests::*;

#[test]
fn commit_keeps_changes() {
    let db = setup();

    db.begin().unwrap();
    assert!(db.in_transaction());
    seed_blogs(&db, &["kept"]);
    db.commit().unwrap();

    assert!(!db.in_transaction());
    assert_eq!(db.query(Blog::select()).unwrap().len(), 1);
}

#[test]
fn rollback_discards_changes() {
    let db = setup();

    db.begin().unwrap();
    seed_blogs(&db, &["dropped"]);
    db.rollback().unwrap();

    assert!(db.query(Blog::select()).unwrap().is_empty());
}
