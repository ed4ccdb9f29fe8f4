mod batch;

mod builder;
pub use builder::Builder;

mod compile;

mod modify;
pub use modify::InsertOptions;

mod query;

mod transaction;

use crate::{column_map::TypeMaps, log::Logger, Config, Entity, Stopwatch};

use sqlbridge_core::{driver::ExecOptions, err, schema::EntityType, Error, Result, Schema};
use sqlbridge_sql::Serializer;

use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

/// Runs entity operations over a connection.
///
/// `Db` owns the connection, the registered entity types and the
/// configuration. Every operation generates its SQL from the entity
/// metadata, binds parameters, and hands both to the connection in a single
/// execution. Blocking operations are available when `C` implements
/// [`Connection`](crate::Connection), `_async` ones when it implements
/// [`AsyncConnection`](crate::AsyncConnection).
pub struct Db<C> {
    connection: C,

    /// Registered entity types, by Rust type
    entities: HashMap<TypeId, Arc<EntityType>>,

    schema: Schema,

    /// Column maps installed for query result types
    type_maps: TypeMaps,

    config: Config,

    logger: Arc<dyn Logger>,

    serializer: Serializer,
}

impl Db<()> {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<C> Db<C> {
    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn serializer(&self) -> Serializer {
        self.serializer
    }

    /// The delimited, schema qualified table name of `E` for the configured
    /// flavor.
    pub fn table_name<E: Entity>(&self) -> Result<String> {
        Ok(self.serializer.table_name(self.entity::<E>()?))
    }

    /// Installs the column map used to read query results into `E`.
    ///
    /// Queries install maps on first use, so calling this is only needed to
    /// warm up. Returns `false` when a map was already installed.
    pub fn set_column_mapping<E: Entity>(&self) -> bool {
        match self.entity::<E>() {
            Ok(entity) => self.type_maps.install(TypeId::of::<E>(), entity),
            Err(_) => self
                .type_maps
                .install(TypeId::of::<E>(), &E::entity_type()),
        }
    }

    fn entity<E: Entity>(&self) -> Result<&Arc<EntityType>> {
        self.entity_by_id(TypeId::of::<E>(), std::any::type_name::<E>())
    }

    fn entity_by_id(&self, ty: TypeId, type_name: &str) -> Result<&Arc<EntityType>> {
        self.entities
            .get(&ty)
            .ok_or_else(|| Error::unknown_entity(type_name))
    }

    fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            command_timeout: self.config.command_timeout(),
        }
    }

    fn stopwatch(&self, oper: &'static str, entity: &EntityType) -> Stopwatch {
        Stopwatch::start(&self.logger, oper, &entity.name)
    }

    /// Runs `compile`, on the blocking pool when compilation is offloaded.
    async fn compile_async<T, F>(&self, mut watch: Stopwatch, compile: F) -> Result<(T, Stopwatch)>
    where
        T: Send + 'static,
        F: FnOnce(&mut Stopwatch) -> Result<T> + Send + 'static,
    {
        if !self.config.offload_compile {
            let compiled = compile(&mut watch)?;
            return Ok((compiled, watch));
        }

        tokio::task::spawn_blocking(move || -> Result<(T, Stopwatch)> {
            let compiled = compile(&mut watch)?;
            Ok((compiled, watch))
        })
        .await
        .map_err(|err| err!("compile task failed: {err}"))?
    }
}

impl<C: fmt::Debug> fmt::Debug for Db<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("connection", &self.connection)
            .field("schema", &self.schema)
            .field("config", &self.config)
            .finish()
    }
}
