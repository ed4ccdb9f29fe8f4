use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{Direction, Expr};

fn tags(ids: std::ops::Range<i64>) -> Vec<Tag> {
    ids.map(|id| Tag {
        id,
        label: format!("tag-{id}"),
    })
    .collect()
}

fn stored_tags(db: &sqlbridge::Db<LoggingConnection>) -> Vec<Tag> {
    db.query(Tag::select().order_by(Expr::col("Id"), Direction::Asc))
        .unwrap()
}

#[test]
fn partitions_sum_to_the_total() {
    let db = setup_with(|builder| {
        builder.batch_size(2);
    });

    assert_eq!(db.batch_insert::<Tag>(tags(0..5)).unwrap(), 5);

    // Two full windows and the remainder
    let log = db.connection().sql_log();
    assert_eq!(log.len(), 3);
    assert_eq!(
        log[2],
        "INSERT INTO \"tags\" (\"Id\", \"Label\") VALUES (@p0, @p1);\n"
    );

    assert_eq!(stored_tags(&db), tags(0..5));
}

#[test]
fn batch_update_and_delete() {
    let db = setup_with(|builder| {
        builder.batch_size(3);
    });
    db.batch_insert::<Tag>(tags(0..7)).unwrap();

    let renamed: Vec<Tag> = tags(0..7)
        .into_iter()
        .map(|tag| Tag {
            label: tag.label.to_uppercase(),
            ..tag
        })
        .collect();
    assert_eq!(db.batch_update::<Tag>(renamed.iter().cloned()).unwrap(), 7);
    assert_eq!(stored_tags(&db), renamed);

    assert_eq!(db.batch_delete::<Tag>(&renamed[..4]).unwrap(), 4);
    assert_eq!(stored_tags(&db), renamed[4..]);
}

#[test]
fn missing_rows_are_not_counted() {
    let db = setup();
    db.batch_insert::<Tag>(tags(0..2)).unwrap();

    assert_eq!(db.batch_delete::<Tag>(tags(1..4)).unwrap(), 1);
}

#[test]
fn generated_keys_are_not_read_back() {
    let db = setup();

    let blogs = vec![
        Blog {
            name: "a".into(),
            ..Blog::default()
        },
        Blog {
            name: "b".into(),
            ..Blog::default()
        },
    ];
    assert_eq!(db.batch_insert::<Blog>(&blogs).unwrap(), 2);
    assert!(blogs.iter().all(|blog| blog.id == 0));

    let ids: Vec<i64> = db
        .query(Blog::select())
        .unwrap()
        .into_iter()
        .map(|blog| blog.id)
        .collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn empty_input_does_nothing() {
    let db = setup();

    assert_eq!(db.batch_update::<Tag>(Vec::<Tag>::new()).unwrap(), 0);
    assert!(db.connection().sql_log().is_empty());
}
