use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{record, Expr};

#[test]
fn update_by_key() {
    let db = setup();
    let mut blogs = seed_blogs(&db, &["a", "b"]);

    blogs[0].name = "changed".into();
    blogs[0].rating = 3;
    assert_eq!(db.update::<Blog>(&blogs[0], None).unwrap(), 1);

    let stored = db.query(Blog::select()).unwrap();
    assert_eq!(stored, blogs);
}

#[test]
fn update_with_predicate_touches_every_match() {
    let db = setup();
    seed_blogs(&db, &["alpha", "apex", "beta"]);
    db.connection().clear();

    let count = db
        .update::<Blog>(
            &record! { "Rating" => 5_i64 },
            Some(Expr::col("Name").like("a%")),
        )
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        db.connection().sql_log(),
        ["UPDATE \"blogs\" SET \"Rating\" = @p1\nWHERE \"Name\" LIKE @__p_0;\n"]
    );

    let ratings: Vec<i64> = db
        .query(Blog::select())
        .unwrap()
        .into_iter()
        .map(|blog| blog.rating)
        .collect();
    assert_eq!(ratings, [5, 5, 0]);
}

#[test]
fn update_with_nothing_to_write_is_rejected() {
    let db = setup();

    let err = db
        .update::<Blog>(&record! { "Id" => 1_i64 }, None)
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert!(db.connection().sql_log().is_empty());
}

#[test]
fn concurrency_token_guards_the_update() {
    let db = setup();

    let mut post = Post {
        blog_id: 1,
        title: "draft".into(),
        version: 1,
        ..Post::default()
    };
    db.insert::<Post>(&mut post).unwrap();

    let loaded = post.clone();
    post.title = "published".into();
    post.version = 2;

    // The stored version still matches what was loaded
    assert_eq!(
        db.update_with_original::<Post>(&post, &loaded, None)
            .unwrap(),
        1
    );

    // A second writer holding the same stale copy loses
    let mut stale = loaded.clone();
    stale.title = "overwritten".into();
    stale.version = 2;
    assert_eq!(
        db.update_with_original::<Post>(&stale, &loaded, None)
            .unwrap(),
        0
    );

    let stored = db.query(Post::select()).unwrap();
    assert_eq!(stored, [post]);
}

#[test]
fn token_defaults_to_the_current_value() {
    let db = setup();

    let mut post = Post {
        blog_id: 1,
        title: "t".into(),
        version: 7,
        ..Post::default()
    };
    db.insert::<Post>(&mut post).unwrap();

    post.title = "u".into();
    assert_eq!(db.update::<Post>(&post, None).unwrap(), 1);

    post.version = 8;
    assert_eq!(db.update::<Post>(&post, None).unwrap(), 0);
}
