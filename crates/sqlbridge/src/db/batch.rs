use super::{compile, compile::BatchKind, Db};
use crate::{partition, BatchMode, BatchOptions, Entity};

use sqlbridge_core::{
    schema::EntityType,
    stmt::{Record, Values},
    AsyncConnection, Connection, Error, Result,
};

use futures::future::try_join_all;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

impl<C: Connection> Db<C> {
    /// Inserts every item, `batch_size` rows per execution. Generated values
    /// are not read back.
    pub fn batch_insert<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
    ) -> Result<u64> {
        self.batch::<E>(BatchKind::Insert, items)
    }

    pub fn batch_update<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
    ) -> Result<u64> {
        self.batch::<E>(BatchKind::Update, items)
    }

    pub fn batch_delete<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
    ) -> Result<u64> {
        self.batch::<E>(BatchKind::Delete, items)
    }

    fn batch<E: Entity>(
        &self,
        kind: BatchKind,
        items: impl IntoIterator<Item = impl Values>,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let defaults = defaults::<E>(kind, entity);
        let mut affected = 0;

        for window in partition(items, self.config.batch_size)? {
            let mut watch = self.stopwatch(kind.oper(), entity);
            let rows = snapshot_all(entity, defaults.as_ref(), &window);

            let compiled = compile::batch(kind, self.serializer, entity, &rows, &mut watch)?;
            affected += self.run(&compiled, &mut watch)?.affected;
        }

        Ok(affected)
    }
}

impl<C: AsyncConnection> Db<C> {
    pub async fn batch_insert_async<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
        options: BatchOptions,
    ) -> Result<u64> {
        self.batch_async::<E>(BatchKind::Insert, items, options)
            .await
    }

    pub async fn batch_update_async<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
        options: BatchOptions,
    ) -> Result<u64> {
        self.batch_async::<E>(BatchKind::Update, items, options)
            .await
    }

    pub async fn batch_delete_async<E: Entity>(
        &self,
        items: impl IntoIterator<Item = impl Values>,
        options: BatchOptions,
    ) -> Result<u64> {
        self.batch_async::<E>(BatchKind::Delete, items, options)
            .await
    }

    async fn batch_async<E: Entity>(
        &self,
        kind: BatchKind,
        items: impl IntoIterator<Item = impl Values>,
        options: BatchOptions,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let defaults = defaults::<E>(kind, &entity);
        let mut windows = partition(items, self.config.batch_size)?;

        match options.mode {
            BatchMode::Sequential => {
                let mut affected = 0;

                // One window is pulled from `items` per execution
                while let Some(rows) = windows
                    .next()
                    .map(|window| snapshot_all(&entity, defaults.as_ref(), &window))
                {
                    if options.is_cancelled() {
                        return Err(Error::cancelled(affected));
                    }

                    affected += self.partition_async(kind, &entity, rows).await?;
                }

                Ok(affected)
            }
            BatchMode::Concurrent => {
                let affected = AtomicU64::new(0);

                let windows: Vec<Vec<Record>> = windows
                    .map(|window| snapshot_all(&entity, defaults.as_ref(), &window))
                    .collect();

                let partitions = windows.into_iter().map(|rows| {
                    let (affected, options, entity) = (&affected, &options, &entity);

                    async move {
                        if options.is_cancelled() {
                            return Err(Error::cancelled(affected.load(Ordering::Acquire)));
                        }

                        let count = self.partition_async(kind, entity, rows).await?;
                        affected.fetch_add(count, Ordering::AcqRel);
                        Ok(count)
                    }
                });

                let counts = try_join_all(partitions).await?;
                Ok(counts.into_iter().sum())
            }
        }
    }

    async fn partition_async(
        &self,
        kind: BatchKind,
        entity: &Arc<EntityType>,
        rows: Vec<Record>,
    ) -> Result<u64> {
        let watch = self.stopwatch(kind.oper(), entity);
        let serializer = self.serializer;
        let target = entity.clone();

        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::batch(kind, serializer, &target, &rows, watch)
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }
}

/// Default values of `E`, filling the properties inserted rows leave out.
fn defaults<E: Entity>(kind: BatchKind, entity: &EntityType) -> Option<Record> {
    (kind == BatchKind::Insert).then(|| compile::snapshot(entity, &E::default()))
}

fn snapshot_all(
    entity: &EntityType,
    defaults: Option<&Record>,
    window: &[impl Values],
) -> Vec<Record> {
    window
        .iter()
        .map(|values| match defaults {
            Some(defaults) => compile::snapshot_over(entity, defaults, values),
            None => compile::snapshot(entity, values),
        })
        .collect()
}
