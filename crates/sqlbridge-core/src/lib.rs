#[macro_use]
mod macros;

pub mod command;
pub use command::{
    ColumnModification, CommandSource, EntityState, ModificationCommand, ParameterNameGenerator,
};

pub mod driver;
pub use driver::{AsyncConnection, Connection, ExecOptions, Response, Row, Transaction};

mod error;
pub use error::{Error, IntoError};

pub mod params;
pub use params::ParameterBag;

pub mod schema;
pub use schema::{EntityType, Schema};

pub mod stmt;

/// A Result type alias that uses sqlbridge's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
