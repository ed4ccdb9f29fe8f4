use sqlbridge::sqlite;
use sqlbridge_core::{
    async_trait,
    driver::{AsyncConnection, Connection, ExecOptions, Response, Transaction},
    ParameterBag, Result,
};
use std::sync::{Arc, Mutex};

/// A SQLite connection that keeps the SQL of every execution, for
/// assertions on what was sent.
#[derive(Debug)]
pub struct LoggingConnection {
    inner: sqlite::Connection,

    /// SQL text of every `exec`, in order
    sql_log: Arc<Mutex<Vec<String>>>,
}

impl LoggingConnection {
    pub fn new(inner: sqlite::Connection) -> Self {
        Self {
            inner,
            sql_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sql_log(&self) -> Vec<String> {
        self.sql_log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sql_log.lock().unwrap().clear();
    }
}

impl Connection for LoggingConnection {
    fn exec(&self, sql: &str, params: &ParameterBag, options: &ExecOptions) -> Result<Response> {
        self.sql_log.lock().unwrap().push(sql.to_string());
        Connection::exec(&self.inner, sql, params, options)
    }

    fn transaction(&self, op: Transaction) -> Result<()> {
        Connection::transaction(&self.inner, op)
    }

    fn in_transaction(&self) -> bool {
        Connection::in_transaction(&self.inner)
    }
}

#[async_trait]
impl AsyncConnection for LoggingConnection {
    async fn exec(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<Response> {
        self.sql_log.lock().unwrap().push(sql.to_string());
        AsyncConnection::exec(&self.inner, sql, params, options).await
    }

    async fn transaction(&self, op: Transaction) -> Result<()> {
        AsyncConnection::transaction(&self.inner, op).await
    }

    fn in_transaction(&self) -> bool {
        Connection::in_transaction(&self.inner)
    }
}
