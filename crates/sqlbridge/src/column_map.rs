//! Maps result columns back to entity properties.
//!
//! Query rows come back keyed by physical column name. For entities whose
//! columns are renamed, every row is re-keyed by property name before it is
//! handed to [`FromRecord`](crate::FromRecord).

use sqlbridge_core::{driver::Row, schema::EntityType, stmt::Record};

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Physical column name to logical property name, for renamed columns only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<String, String>,
}

impl ColumnMap {
    /// Returns `None` when no column of `entity` is renamed, in which case
    /// rows need no re-keying at all.
    pub fn for_entity(entity: &EntityType) -> Option<ColumnMap> {
        let columns: HashMap<_, _> = entity
            .properties
            .iter()
            .filter(|property| property.is_renamed())
            .map(|property| (property.column.clone(), property.name.clone()))
            .collect();

        if columns.is_empty() {
            None
        } else {
            Some(ColumnMap { columns })
        }
    }

    /// Property for `column`; unmapped columns resolve to themselves.
    pub fn resolve<'a>(&'a self, column: &'a str) -> &'a str {
        self.columns
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column maps per result type, installed once and shared by every query.
#[derive(Debug, Default)]
pub(crate) struct TypeMaps {
    maps: RwLock<HashMap<TypeId, Option<Arc<ColumnMap>>>>,
}

impl TypeMaps {
    /// Installs the map for `ty` unless one is already installed. Returns
    /// `true` when this call installed it.
    pub(crate) fn install(&self, ty: TypeId, entity: &EntityType) -> bool {
        if self
            .maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&ty)
        {
            return false;
        }

        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have won the race for the write lock
        if maps.contains_key(&ty) {
            return false;
        }

        maps.insert(ty, ColumnMap::for_entity(entity).map(Arc::new));
        true
    }

    pub(crate) fn get(&self, ty: TypeId) -> Option<Arc<ColumnMap>> {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty)
            .cloned()
            .flatten()
    }

    /// Re-keys `row` by property name.
    pub(crate) fn materialize(&self, ty: TypeId, row: Row) -> Record {
        match self.get(ty) {
            Some(map) => {
                let columns = row.columns().to_vec();
                columns
                    .iter()
                    .map(|column| map.resolve(column).to_string())
                    .zip(row.into_values())
                    .collect()
            }
            None => row.into_record(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbridge_core::{schema::Property, stmt::Value};

    fn user() -> EntityType {
        EntityType::builder("User")
            .property(Property::new("Id").primary_key())
            .property(Property::new("Name1").column("usr_name"))
            .build()
    }

    #[test]
    fn resolves_renamed_and_plain_columns() {
        let map = ColumnMap::for_entity(&user()).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("usr_name"), "Name1");
        assert_eq!(map.resolve("Id"), "Id");
    }

    #[test]
    fn no_renamed_columns_means_no_map() {
        let entity = EntityType::builder("Tag")
            .property(Property::new("Id").primary_key())
            .property(Property::new("Label"))
            .build();

        assert_eq!(ColumnMap::for_entity(&entity), None);
    }

    #[test]
    fn install_is_idempotent() {
        let maps = TypeMaps::default();
        let ty = TypeId::of::<u8>();

        assert!(maps.install(ty, &user()));
        assert!(!maps.install(ty, &user()));
        assert!(maps.get(ty).is_some());
    }

    #[test]
    fn materialize_rekeys_rows() {
        let maps = TypeMaps::default();
        let ty = TypeId::of::<u8>();
        maps.install(ty, &user());

        let columns: Arc<[String]> = vec!["Id".to_string(), "usr_name".to_string()].into();
        let row = Row::new(columns, vec![Value::I64(1), Value::from("ann")]);
        let record = maps.materialize(ty, row);

        assert_eq!(record.get("Name1"), Some(&Value::from("ann")));
        assert_eq!(record.get("Id"), Some(&Value::I64(1)));
        assert!(!record.contains("usr_name"));
    }
}
