use crate::Select;

use sqlbridge_core::{
    schema::EntityType,
    stmt::{FromRecord, Values},
};

/// An application type mapped onto a table.
///
/// Entities are registered with [`Db::builder`](crate::Db::builder); the
/// `fields!` macro provides the [`Values`] and [`FromRecord`]
/// implementations for plain structs.
///
/// Inserts start from `Self::default()`, so properties the inserted values
/// do not supply are written with the entity's default rather than `NULL`.
pub trait Entity: Values + FromRecord + Default + Send + 'static {
    /// Table, columns, keys, and save behavior of the entity.
    fn entity_type() -> EntityType;

    /// Starts a query over this entity.
    fn select() -> Select<Self> {
        Select::new()
    }
}
