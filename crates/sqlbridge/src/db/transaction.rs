use super::Db;

use sqlbridge_core::{AsyncConnection, Connection, Result};

// Transactions belong to the connection; these only forward.

impl<C: Connection> Db<C> {
    pub fn begin(&self) -> Result<()> {
        self.connection.begin()
    }

    pub fn commit(&self) -> Result<()> {
        self.connection.commit()
    }

    pub fn rollback(&self) -> Result<()> {
        self.connection.rollback()
    }

    pub fn in_transaction(&self) -> bool {
        self.connection.in_transaction()
    }
}

impl<C: AsyncConnection> Db<C> {
    pub async fn begin_async(&self) -> Result<()> {
        self.connection.begin().await
    }

    pub async fn commit_async(&self) -> Result<()> {
        self.connection.commit().await
    }

    pub async fn rollback_async(&self) -> Result<()> {
        self.connection.rollback().await
    }
}
