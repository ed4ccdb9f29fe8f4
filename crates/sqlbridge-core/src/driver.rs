mod row;
pub use row::Row;

use crate::{async_trait, params::ParameterBag, stmt::Value, Result};

use std::{fmt::Debug, time::Duration};

/// Per-call settings passed through to the driver unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecOptions {
    /// How long the driver may wait on the database before giving up.
    pub command_timeout: Option<Duration>,
}

/// Transaction control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Start a transaction
    Start,

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,
}

/// Result of executing SQL text that may hold several statements.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Response {
    /// Rows changed, summed over every statement.
    pub affected: u64,

    /// Rows returned, in order, by every statement that returns rows.
    pub rows: Vec<Row>,
}

impl Response {
    pub fn count(affected: u64) -> Response {
        Response {
            affected,
            rows: vec![],
        }
    }

    /// First column of the first row, if any row came back.
    pub fn into_scalar(self) -> Option<Value> {
        self.rows
            .into_iter()
            .next()
            .and_then(|row| row.into_values().into_iter().next())
    }
}

/// A blocking database connection.
///
/// `sql` may hold several statements, each ending with `;`. Parameters are
/// referenced in the text as `@name`.
pub trait Connection: Debug + Send + Sync {
    fn exec(&self, sql: &str, params: &ParameterBag, options: &ExecOptions) -> Result<Response>;

    fn transaction(&self, op: Transaction) -> Result<()>;

    /// True while a transaction started through this connection is open.
    fn in_transaction(&self) -> bool;

    /// Rows changed by every statement in `sql`.
    fn execute(&self, sql: &str, params: &ParameterBag, options: &ExecOptions) -> Result<u64> {
        Ok(self.exec(sql, params, options)?.affected)
    }

    /// First column of the first returned row.
    fn execute_scalar(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<Option<Value>> {
        Ok(self.exec(sql, params, options)?.into_scalar())
    }

    fn query(&self, sql: &str, params: &ParameterBag, options: &ExecOptions) -> Result<Vec<Row>> {
        Ok(self.exec(sql, params, options)?.rows)
    }

    fn begin(&self) -> Result<()> {
        self.transaction(Transaction::Start)
    }

    fn commit(&self) -> Result<()> {
        self.transaction(Transaction::Commit)
    }

    fn rollback(&self) -> Result<()> {
        self.transaction(Transaction::Rollback)
    }
}

/// The asynchronous counterpart of [`Connection`].
#[async_trait]
pub trait AsyncConnection: Debug + Send + Sync {
    async fn exec(&self, sql: &str, params: &ParameterBag, options: &ExecOptions)
        -> Result<Response>;

    async fn transaction(&self, op: Transaction) -> Result<()>;

    fn in_transaction(&self) -> bool;

    async fn execute(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<u64> {
        Ok(self.exec(sql, params, options).await?.affected)
    }

    async fn execute_scalar(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<Option<Value>> {
        Ok(self.exec(sql, params, options).await?.into_scalar())
    }

    async fn query(
        &self,
        sql: &str,
        params: &ParameterBag,
        options: &ExecOptions,
    ) -> Result<Vec<Row>> {
        Ok(self.exec(sql, params, options).await?.rows)
    }

    async fn begin(&self) -> Result<()> {
        self.transaction(Transaction::Start).await
    }

    async fn commit(&self) -> Result<()> {
        self.transaction(Transaction::Commit).await
    }

    async fn rollback(&self) -> Result<()> {
        self.transaction(Transaction::Rollback).await
    }
}
