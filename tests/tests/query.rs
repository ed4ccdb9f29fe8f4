use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{Direction, Expr};

fn seed(db: &sqlbridge::Db<LoggingConnection>) {
    let blogs = seed_blogs(db, &["rust", "go"]);

    let titles = [
        (&blogs[0], "ownership"),
        (&blogs[0], "traits"),
        (&blogs[1], "goroutines"),
    ];

    for (blog, title) in titles {
        let mut post = Post {
            blog_id: blog.id,
            title: title.into(),
            ..Post::default()
        };
        db.insert::<Post>(&mut post).unwrap();
    }

    db.batch_insert::<Tag>([
        Tag {
            id: 1,
            label: "memory".into(),
        },
        Tag {
            id: 3,
            label: "concurrency".into(),
        },
    ])
    .unwrap();
}

#[test]
fn filter_order_and_window() {
    let db = setup();
    seed(&db);

    let select = Post::select()
        .filter(Expr::col("BlogId").eq(1_i64))
        .order_by(Expr::col("Title"), Direction::Desc)
        .limit(1)
        .offset(1);
    let posts = db.query(select).unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "ownership");
}

#[test]
fn two_way_join() {
    let db = setup();
    seed(&db);

    let select = Post::select()
        .join::<Blog>(Expr::col("BlogId").eq(Expr::col_of(1, "Id")))
        .order_by(Expr::col("Id"), Direction::Asc);
    let rows = db
        .query2(select, |post: Post, blog: Blog| {
            format!("{}/{}", blog.name, post.title)
        })
        .unwrap();

    assert_eq!(rows, ["rust/ownership", "rust/traits", "go/goroutines"]);
}

#[test]
fn three_way_join() {
    let db = setup();
    seed(&db);

    let select = Post::select()
        .join::<Blog>(Expr::col("BlogId").eq(Expr::col_of(1, "Id")))
        .join::<Tag>(Expr::col("Id").eq(Expr::col_of(2, "Id")))
        .order_by(Expr::col("Id"), Direction::Asc);
    let rows = db
        .query3(select, |post: Post, blog: Blog, tag: Tag| {
            (blog.name, post.title, tag.label)
        })
        .unwrap();

    assert_eq!(
        rows,
        [
            ("rust".to_string(), "ownership".to_string(), "memory".to_string()),
            ("go".to_string(), "goroutines".to_string(), "concurrency".to_string()),
        ]
    );
}

#[test]
fn selector_arity_must_match() {
    let db = setup();
    seed(&db);
    db.connection().clear();

    let err = db
        .query2(Post::select(), |post: Post, blog: Blog| (post, blog))
        .unwrap_err();

    assert!(err.is_invalid_arity());
    assert!(db.connection().sql_log().is_empty());
}

#[test]
fn unknown_property_in_filter() {
    let db = setup();

    let err = db
        .query(Blog::select().filter(Expr::col("Missing").eq(1_i64)))
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument `predicate`: entity `Blog` has no property `Missing`"
    );
}

#[test]
fn column_mapping_is_installed_once() {
    let db = setup();

    assert!(db.set_column_mapping::<Blog>());
    assert!(!db.set_column_mapping::<Blog>());

    // Queries reuse the installed map
    seed_blogs(&db, &["mapped"]);
    assert_eq!(db.query(Blog::select()).unwrap()[0].name, "mapped");
    assert!(!db.set_column_mapping::<Blog>());
}
