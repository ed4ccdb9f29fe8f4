use super::{compile, Db};
use crate::{Entity, Select};

use sqlbridge_core::{
    driver::Row,
    err,
    stmt::{Join, OrderByExpr, Query, Record, Source},
    AsyncConnection, Connection, Error, Result,
};

use std::any::TypeId;

impl<C> Db<C> {
    /// Resolves the sources of `select` against the registered entities,
    /// checking them against the selector's argument types.
    fn lower<E: Entity>(&self, select: Select<E>, types: &[TypeId]) -> Result<Query> {
        if select.arity() != types.len() {
            return Err(Error::invalid_arity(types.len(), select.arity()));
        }

        let mut sources = Vec::with_capacity(types.len());

        for (index, (source, ty)) in select.sources.into_iter().zip(types).enumerate() {
            if source.type_id != *ty {
                return Err(Error::invalid_argument(
                    "selector",
                    format!(
                        "argument {index} does not match source `{}`",
                        source.type_name
                    ),
                ));
            }

            let entity = self.entity_by_id(source.type_id, source.type_name)?.clone();
            self.type_maps.install(source.type_id, &entity);

            sources.push(Source {
                entity,
                join: source.join.map(|(kind, on)| Join { kind, on }),
            });
        }

        Ok(Query {
            sources,
            filter: select.filter,
            order_by: select
                .order_by
                .into_iter()
                .map(|(expr, direction)| OrderByExpr { expr, direction })
                .collect(),
            limit: select.limit,
            offset: select.offset,
        })
    }

    /// Splits every row into one record per source, keyed by property.
    fn materialize(
        &self,
        query: &Query,
        types: &[TypeId],
        rows: Vec<Row>,
    ) -> Result<Vec<Vec<Record>>> {
        let widths: Vec<usize> = query.widths().collect();
        let expected: usize = widths.iter().sum();

        rows.into_iter()
            .map(|row| {
                let len = row.len();
                let parts = row
                    .split(&widths)
                    .ok_or_else(|| err!("result row has {len} columns, expected {expected}"))?;

                Ok(types
                    .iter()
                    .zip(parts)
                    .map(|(ty, part)| self.type_maps.materialize(*ty, part))
                    .collect())
            })
            .collect()
    }
}

impl<C: Connection> Db<C> {
    /// Runs `select` and reads every row into `E`.
    pub fn query<E: Entity>(&self, select: Select<E>) -> Result<Vec<E>> {
        self.fetch(select, &[TypeId::of::<E>()])?
            .into_iter()
            .map(|records| E::from_record(records.into_iter().next().unwrap_or_default()))
            .collect()
    }

    fn fetch<E: Entity>(&self, select: Select<E>, types: &[TypeId]) -> Result<Vec<Vec<Record>>> {
        let query = self.lower(select, types)?;
        let mut watch = self.stopwatch("query", &query.sources[0].entity);

        let compiled = compile::query(self.serializer, &query, &mut watch)?;
        let rows = self.run(&compiled, &mut watch)?.rows;

        self.materialize(&query, types, rows)
    }
}

impl<C: AsyncConnection> Db<C> {
    pub async fn query_async<E: Entity>(&self, select: Select<E>) -> Result<Vec<E>> {
        self.fetch_async(select, &[TypeId::of::<E>()])
            .await?
            .into_iter()
            .map(|records| E::from_record(records.into_iter().next().unwrap_or_default()))
            .collect()
    }

    async fn fetch_async<E: Entity>(
        &self,
        select: Select<E>,
        types: &[TypeId],
    ) -> Result<Vec<Vec<Record>>> {
        let query = self.lower(select, types)?;
        let watch = self.stopwatch("query", &query.sources[0].entity);

        let serializer = self.serializer;
        let ((compiled, query), mut watch) = self
            .compile_async(watch, move |watch| {
                let compiled = compile::query(serializer, &query, watch)?;
                Ok((compiled, query))
            })
            .await?;

        let rows = self.run_async(&compiled, &mut watch).await?.rows;

        self.materialize(&query, types, rows)
    }
}

/// Multi-source queries, one method per selector arity.
macro_rules! multi_map {
    (
        $(
            $name:ident, $name_async:ident => $first:ident : $first_arg:ident $( , $ty:ident : $arg:ident )+;
        )+
    ) => {
        impl<C: Connection> Db<C> {
            $(
                /// Runs a joined query and maps each row through `selector`,
                /// one argument per source in join order.
                pub fn $name<$first: Entity, $( $ty: Entity, )+ R>(
                    &self,
                    select: Select<$first>,
                    mut selector: impl FnMut($first, $( $ty ),+) -> R,
                ) -> Result<Vec<R>> {
                    let types = [TypeId::of::<$first>(), $( TypeId::of::<$ty>() ),+];

                    self.fetch(select, &types)?
                        .into_iter()
                        .map(|records| {
                            let mut records = records.into_iter();
                            let $first_arg = $first::from_record(records.next().unwrap_or_default())?;
                            $( let $arg = $ty::from_record(records.next().unwrap_or_default())?; )+
                            Ok(selector($first_arg, $( $arg ),+))
                        })
                        .collect()
                }
            )+
        }

        impl<C: AsyncConnection> Db<C> {
            $(
                pub async fn $name_async<$first: Entity, $( $ty: Entity, )+ R>(
                    &self,
                    select: Select<$first>,
                    mut selector: impl FnMut($first, $( $ty ),+) -> R,
                ) -> Result<Vec<R>> {
                    let types = [TypeId::of::<$first>(), $( TypeId::of::<$ty>() ),+];

                    self.fetch_async(select, &types)
                        .await?
                        .into_iter()
                        .map(|records| {
                            let mut records = records.into_iter();
                            let $first_arg = $first::from_record(records.next().unwrap_or_default())?;
                            $( let $arg = $ty::from_record(records.next().unwrap_or_default())?; )+
                            Ok(selector($first_arg, $( $arg ),+))
                        })
                        .collect()
                }
            )+
        }
    };
}

multi_map! {
    query2, query2_async => T1: a, T2: b;
    query3, query3_async => T1: a, T2: b, T3: c;
    query4, query4_async => T1: a, T2: b, T3: c, T4: d;
    query5, query5_async => T1: a, T2: b, T3: c, T4: d, T5: e;
    query6, query6_async => T1: a, T2: b, T3: c, T4: d, T5: e, T6: f;
    query7, query7_async => T1: a, T2: b, T3: c, T4: d, T5: e, T6: f, T7: g;
}
