mod value;
use value::Value;

use rusqlite::{Batch, Connection as RusqliteConnection, Statement};
use sqlbridge_core::{
    async_trait,
    driver::{self, ExecOptions, Response, Row, Transaction},
    Error, ParameterBag, Result,
};
use sqlbridge_sql::Serializer;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use url::Url;

/// Where a SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Parses a `sqlite:` URL; the path `:memory:` selects an in-memory
    /// database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_argument(
                "url",
                format!("connection URL does not have a `sqlite` scheme; url={url_str}"),
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

/// A single SQLite connection usable from several threads.
#[derive(Debug)]
pub struct Connection {
    connection: Mutex<RusqliteConnection>,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self::from(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self::from(connection))
    }

    /// Runs SQL with no parameters, e.g. to create tables.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock().execute_batch(sql).map_err(Error::driver)
    }

    fn lock(&self) -> MutexGuard<'_, RusqliteConnection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<RusqliteConnection> for Connection {
    fn from(connection: RusqliteConnection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }
}

impl driver::Connection for Connection {
    fn exec(&self, sql: &str, params: &ParameterBag, options: &ExecOptions) -> Result<Response> {
        let connection = self.lock();

        if let Some(timeout) = options.command_timeout {
            connection.busy_timeout(timeout).map_err(Error::driver)?;
        }

        tracing::trace!(sql, params = params.len(), "exec");

        let mut response = Response::default();
        let mut batch = Batch::new(&connection, sql);

        while let Some(mut stmt) = batch.next().map_err(Error::driver)? {
            bind(&mut stmt, params)?;

            if stmt.column_count() == 0 {
                let count = stmt.raw_execute().map_err(Error::driver)?;
                response.affected += count as u64;
                continue;
            }

            let columns: Arc<[String]> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();
            let readonly = stmt.readonly();

            let mut rows = stmt.raw_query();
            while let Some(row) = rows.next().map_err(Error::driver)? {
                let values = (0..columns.len())
                    .map(|index| Value::from_sql(row.get_ref(index).map_err(Error::driver)?))
                    .collect::<Result<Vec<_>>>()?;

                response.rows.push(Row::new(columns.clone(), values));
            }

            // `INSERT ... RETURNING` both changes and returns rows
            if !readonly {
                response.affected += connection.changes() as u64;
            }
        }

        Ok(response)
    }

    fn transaction(&self, op: Transaction) -> Result<()> {
        let sql = Serializer::sqlite().serialize_transaction(op);
        tracing::trace!(sql, "transaction");
        self.execute_batch(sql)
    }

    fn in_transaction(&self) -> bool {
        !self.lock().is_autocommit()
    }
}

#[async_trait]
impl driver::AsyncConnection for Connection {
    async fn exec(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<Response> {
        driver::Connection::exec(self, sql, params, options)
    }

    async fn transaction(&self, op: Transaction) -> Result<()> {
        driver::Connection::transaction(self, op)
    }

    fn in_transaction(&self) -> bool {
        driver::Connection::in_transaction(self)
    }
}

/// Binds every `@name` placeholder of `stmt` from `params`. Values in the
/// bag that the statement does not reference are ignored.
fn bind(stmt: &mut Statement<'_>, params: &ParameterBag) -> Result<()> {
    for index in 1..=stmt.parameter_count() {
        let Some(name) = stmt.parameter_name(index) else {
            return Err(Error::invalid_statement(format!(
                "parameter {index} has no name"
            )));
        };

        let key = name.trim_start_matches(['@', ':', '$']);
        let Some(value) = params.get(key) else {
            return Err(Error::invalid_argument(
                "params",
                format!("no value bound for `{name}`"),
            ));
        };

        stmt.raw_bind_parameter(index, Value(value))
            .map_err(Error::driver)?;
    }

    Ok(())
}
