use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{BatchOptions, CancellationToken, Direction, Expr, Value};

fn tags(n: i64) -> Vec<Tag> {
    (0..n)
        .map(|id| Tag {
            id,
            label: format!("t{id}"),
        })
        .collect()
}

#[tokio::test]
async fn insert_update_delete() {
    let db = setup();

    let mut blog = Blog {
        name: "async".into(),
        ..Blog::default()
    };
    assert_eq!(
        db.insert_async::<Blog>(&mut blog).await.unwrap(),
        Some(Value::I64(1))
    );
    assert_eq!(blog.id, 1);

    blog.rating = 9;
    assert_eq!(db.update_async::<Blog>(&blog, None).await.unwrap(), 1);
    assert_eq!(db.query_async(Blog::select()).await.unwrap(), [blog.clone()]);

    assert_eq!(db.delete_entity_async::<Blog>(&blog).await.unwrap(), 1);
    assert!(db.query_async(Blog::select()).await.unwrap().is_empty());
}

#[tokio::test]
async fn offloaded_compilation_gives_the_same_sql() {
    let db = setup_with(|builder| {
        builder.offload_compile(true);
    });

    seed_blogs(&db, &["a", "b"]);
    db.connection().clear();

    let count = db
        .delete_async::<Blog>(Some(Expr::col("Name").eq("a")))
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        db.connection().sql_log(),
        ["DELETE FROM \"blogs\"\nWHERE \"Name\" = @__p_0;\n"]
    );
    assert_eq!(db.delete_all_async::<Blog>().await.unwrap(), 1);
}

#[tokio::test]
async fn sequential_batches_run_in_order() {
    let db = setup_with(|builder| {
        builder.batch_size(4);
    });

    let count = db
        .batch_insert_async::<Tag>(tags(10), BatchOptions::default())
        .await
        .unwrap();

    assert_eq!(count, 10);
    assert_eq!(db.connection().sql_log().len(), 3);
}

#[tokio::test]
async fn concurrent_batches_sum_counts() {
    let db = setup_with(|builder| {
        builder.batch_size(3);
    });
    db.batch_insert::<Tag>(tags(10)).unwrap();

    let count = db
        .batch_update_async::<Tag>(tags(10), BatchOptions::concurrent())
        .await
        .unwrap();
    assert_eq!(count, 10);

    let count = db
        .batch_delete_async::<Tag>(tags(10), BatchOptions::concurrent())
        .await
        .unwrap();
    assert_eq!(count, 10);
}

#[tokio::test]
async fn cancelled_batch_reports_progress() {
    let db = setup_with(|builder| {
        builder.batch_size(2);
    });

    let token = CancellationToken::new();
    token.cancel();

    let err = db
        .batch_insert_async::<Tag>(tags(4), BatchOptions::default().cancel(token))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.to_string(), "operation cancelled after 0 affected rows");
    assert!(db.connection().sql_log().is_empty());
}

#[tokio::test]
async fn joined_query() {
    let db = setup();
    let blogs = seed_blogs(&db, &["rust"]);

    let mut post = Post {
        blog_id: blogs[0].id,
        title: "lifetimes".into(),
        ..Post::default()
    };
    db.insert_async::<Post>(&mut post).await.unwrap();

    let select = Blog::select()
        .left_join::<Post>(Expr::col_of(1, "BlogId").eq(Expr::col("Id")))
        .order_by(Expr::col("Name"), Direction::Asc);
    let rows = db
        .query2_async(select, |blog: Blog, post: Post| (blog.name, post.title))
        .await
        .unwrap();

    assert_eq!(rows, [("rust".to_string(), "lifetimes".to_string())]);
}

#[tokio::test]
async fn rollback_discards_changes() {
    let db = setup();

    db.begin_async().await.unwrap();
    seed_blogs(&db, &["temporary"]);
    db.rollback_async().await.unwrap();

    assert!(db.query_async(Blog::select()).await.unwrap().is_empty());
}
