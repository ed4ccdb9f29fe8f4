mod entity;
pub use entity::{EntityType, EntityTypeBuilder};

mod property;
pub use property::{Property, SaveBehavior, ValueGenerated};

use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// The set of entity types known to a database context.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    entities: IndexMap<String, Arc<EntityType>>,
}

impl Schema {
    /// Adds an entity type, replacing any previous type with the same name.
    pub fn register(&mut self, entity: EntityType) -> Arc<EntityType> {
        let entity = Arc::new(entity);
        self.entities.insert(entity.name.clone(), entity.clone());
        entity
    }

    pub fn entity(&self, name: &str) -> Result<&Arc<EntityType>> {
        self.entities
            .get(name)
            .ok_or_else(|| Error::unknown_entity(name))
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Arc<EntityType>> + '_ {
        self.entities.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
