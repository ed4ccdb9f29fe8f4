use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::Expr;

fn names(db: &sqlbridge::Db<LoggingConnection>) -> Vec<String> {
    db.query(Blog::select())
        .unwrap()
        .into_iter()
        .map(|blog| blog.name)
        .collect()
}

#[test]
fn delete_entity_by_key() {
    let db = setup();
    let blogs = seed_blogs(&db, &["a", "b", "c"]);

    assert_eq!(db.delete_entity::<Blog>(&blogs[1]).unwrap(), 1);
    assert_eq!(names(&db), ["a", "c"]);
}

#[test]
fn delete_with_predicate() {
    let db = setup();
    seed_blogs(&db, &["a", "b", "c"]);

    let count = db
        .delete::<Blog>(Some(Expr::col("Name").in_list(["a", "c"])))
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(names(&db), ["b"]);
}

#[test]
fn delete_without_predicate_matches_nothing() {
    let db = setup();
    seed_blogs(&db, &["a"]);
    db.connection().clear();

    assert_eq!(db.delete::<Blog>(None).unwrap(), 0);
    assert_eq!(
        db.connection().sql_log(),
        ["DELETE FROM \"blogs\" WHERE \"Id\" IS NULL;\n"]
    );
}

#[test]
fn delete_all_empties_the_table() {
    let db = setup();
    seed_blogs(&db, &["a", "b", "c"]);
    db.connection().clear();

    assert_eq!(db.delete_all::<Blog>().unwrap(), 3);
    assert_eq!(db.connection().sql_log(), ["DELETE FROM \"blogs\";\n"]);
    assert!(names(&db).is_empty());
}

#[test]
fn stale_token_deletes_nothing() {
    let db = setup();

    let mut post = Post {
        blog_id: 1,
        title: "t".into(),
        version: 3,
        ..Post::default()
    };
    db.insert::<Post>(&mut post).unwrap();

    let stale = Post {
        version: 2,
        ..post.clone()
    };
    assert_eq!(db.delete_entity::<Post>(&stale).unwrap(), 0);
    assert_eq!(db.delete_entity::<Post>(&post).unwrap(), 1);
}
