use tests::*;

use pretty_assertions::assert_eq;
use sqlbridge::{record, InsertOptions, Record, Value};

#[test]
fn identity_is_returned_and_written_back() {
    let db = setup();

    let mut first = Blog {
        name: "first".into(),
        ..Blog::default()
    };
    let mut second = Blog {
        name: "second".into(),
        url: Some("https://example.com".into()),
        ..Blog::default()
    };

    assert_eq!(db.insert::<Blog>(&mut first).unwrap(), Some(Value::I64(1)));
    assert_eq!(db.insert::<Blog>(&mut second).unwrap(), Some(Value::I64(2)));
    assert_eq!((first.id, second.id), (1, 2));

    assert_eq!(
        db.connection().sql_log()[0],
        "INSERT INTO \"blogs\" (\"Name\", \"blog_url\", \"Rating\") \
         VALUES (@p0, @p1, @p2) RETURNING \"Id\";\n"
    );
}

#[test]
fn renamed_column_round_trips() {
    let db = setup();

    let mut blog = Blog {
        name: "renamed".into(),
        url: Some("https://example.com/feed".into()),
        rating: 4,
        ..Blog::default()
    };
    db.insert::<Blog>(&mut blog).unwrap();

    let blogs = db.query(Blog::select()).unwrap();
    assert_eq!(blogs, [blog]);
}

#[test]
fn write_back_can_be_turned_off() {
    let db = setup();

    let mut values: Record = record! { "Name" => "plain" };
    let id = db
        .insert_with::<Blog>(&mut values, InsertOptions::default().return_identity(false))
        .unwrap();

    assert_eq!(id, Some(Value::I64(1)));
    assert!(!values.contains("Id"));
}

#[test]
fn write_back_to_a_named_property() {
    let db = setup();

    let mut values: Record = record! { "Name" => "keyed" };
    db.insert_with::<Blog>(&mut values, InsertOptions::default().property_key("Id"))
        .unwrap();

    assert_eq!(values.get("Id"), Some(&Value::I64(1)));
}

#[test]
fn identity_is_returned_under_any_property_key() {
    let db = setup();

    let mut values: Record = record! { "Name" => "aliased" };
    let id = db
        .insert_with::<Blog>(&mut values, InsertOptions::default().property_key("BlogId"))
        .unwrap();

    assert_eq!(id, Some(Value::I64(1)));
    assert_eq!(values.get("BlogId"), Some(&Value::I64(1)));
}

#[test]
fn partial_values_insert_entity_defaults() {
    let db = setup();

    let mut values: Record = record! { "Name" => "partial" };
    db.insert::<Blog>(&mut values).unwrap();

    let blogs = db.query(Blog::select()).unwrap();
    assert_eq!(
        blogs,
        [Blog {
            id: 1,
            name: "partial".into(),
            ..Blog::default()
        }]
    );
    assert_eq!(blogs[0].rating, 0);
}

#[test]
fn client_assigned_keys_return_nothing() {
    let db = setup();

    let mut tag = Tag {
        id: 10,
        label: "rust".into(),
    };
    assert_eq!(db.insert::<Tag>(&mut tag).unwrap(), None);
    assert_eq!(
        db.connection().sql_log(),
        ["INSERT INTO \"tags\" (\"Id\", \"Label\") VALUES (@p0, @p1);\n"]
    );
}

#[test]
fn table_names_are_delimited() {
    let db = setup();

    assert_eq!(db.table_name::<Blog>().unwrap(), "\"blogs\"");
    assert_eq!(db.table_name::<Tag>().unwrap(), "\"tags\"");
}
