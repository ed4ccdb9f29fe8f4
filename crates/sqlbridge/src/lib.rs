mod batch;
pub use batch::{BatchMode, BatchOptions, CancellationToken};

pub mod column_map;
pub use column_map::ColumnMap;

mod config;
pub use config::Config;

pub mod db;
pub use db::{Builder, Db, InsertOptions};

mod entity;
pub use entity::Entity;

pub mod log;
pub use log::{Logger, NoopLogger, Stopwatch, TracingLogger};

#[macro_use]
mod macros;

pub mod partition;
pub use partition::{partition, Partitions};

mod select;
pub use select::Select;

pub use sqlbridge_core::{
    driver, record, schema,
    schema::{EntityType, Property, SaveBehavior, ValueGenerated},
    stmt,
    stmt::{Direction, Expr, FromRecord, Record, Value, Values},
    AsyncConnection, Connection, Error, Result,
};
pub use sqlbridge_sql::Flavor;

#[cfg(feature = "sqlite")]
pub use sqlbridge_driver_sqlite as sqlite;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        stmt::{FromRecord, Record, Value, Values},
        Result,
    };
    pub use std::{convert::TryFrom, option::Option};
}
