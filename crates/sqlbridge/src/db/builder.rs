use super::Db;
use crate::{column_map::TypeMaps, log::Logger, Config, Entity, TracingLogger};

use sqlbridge_core::{schema::EntityType, Error, Result, Schema};
use sqlbridge_sql::{Flavor, Serializer};

use std::{any::TypeId, collections::HashMap, sync::Arc, time::Duration};

#[derive(Default)]
pub struct Builder {
    /// Entity types in registration order
    entities: Vec<(TypeId, EntityType)>,

    config: Config,

    /// Defaults to [`TracingLogger`]
    logger: Option<Arc<dyn Logger>>,
}

impl Builder {
    pub fn register<E: Entity>(&mut self) -> &mut Self {
        self.entities.push((TypeId::of::<E>(), E::entity_type()));
        self
    }

    /// Replaces every setting at once.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.config.flavor = flavor;
        self
    }

    pub fn logger(&mut self, logger: Arc<dyn Logger>) -> &mut Self {
        self.logger = Some(logger);
        self
    }

    pub fn command_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.config.command_timeout = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Rows per execution for the batch operations.
    pub fn batch_size(&mut self, size: usize) -> &mut Self {
        self.config.batch_size = size;
        self
    }

    /// Compile SQL on the blocking pool in the async operations.
    pub fn offload_compile(&mut self, enabled: bool) -> &mut Self {
        self.config.offload_compile = enabled;
        self
    }

    pub fn build<C>(&mut self, connection: C) -> Result<Db<C>> {
        if self.config.batch_size == 0 {
            return Err(Error::invalid_argument(
                "batch_size",
                "must be greater than zero",
            ));
        }

        let mut schema = Schema::default();
        let mut entities = HashMap::with_capacity(self.entities.len());

        for (ty, entity) in &self.entities {
            if entity.properties.is_empty() {
                return Err(Error::invalid_argument(
                    "entity",
                    format!("entity `{}` has no properties", entity.name),
                ));
            }

            entities.insert(*ty, schema.register(entity.clone()));
        }

        Ok(Db {
            connection,
            entities,
            schema,
            type_maps: TypeMaps::default(),
            config: self.config.clone(),
            logger: self
                .logger
                .clone()
                .unwrap_or_else(|| Arc::new(TracingLogger)),
            serializer: Serializer::new(self.config.flavor),
        })
    }
}
