mod logging_connection;
pub use logging_connection::LoggingConnection;

mod models;
pub use models::{Blog, Post, Tag};

pub use sqlbridge::Entity;

use sqlbridge::{db::Builder, sqlite, Db};

/// Tables for every registered model.
const SCHEMA: &str = "
    CREATE TABLE blogs (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL,
        blog_url TEXT,
        Rating INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE posts (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        BlogId INTEGER NOT NULL,
        Title TEXT NOT NULL,
        Version INTEGER NOT NULL DEFAULT 0
    );
    CREATE TABLE tags (
        Id INTEGER PRIMARY KEY,
        Label TEXT NOT NULL
    );
";

/// A fresh in-memory database with every model registered.
pub fn setup() -> Db<LoggingConnection> {
    setup_with(|_| {})
}

/// Like [`setup`], letting the test adjust the builder first.
pub fn setup_with(configure: impl FnOnce(&mut Builder)) -> Db<LoggingConnection> {
    let connection = sqlite::Connection::in_memory().unwrap();
    connection.execute_batch(SCHEMA).unwrap();

    let mut builder = Db::builder();
    builder
        .register::<Blog>()
        .register::<Post>()
        .register::<Tag>();
    configure(&mut builder);

    builder.build(LoggingConnection::new(connection)).unwrap()
}

/// Inserts blogs with the given names, returning them with their ids.
pub fn seed_blogs(db: &Db<LoggingConnection>, names: &[&str]) -> Vec<Blog> {
    names
        .iter()
        .map(|name| {
            let mut blog = Blog {
                name: name.to_string(),
                ..Blog::default()
            };
            db.insert::<Blog>(&mut blog).unwrap();
            blog
        })
        .collect()
}
