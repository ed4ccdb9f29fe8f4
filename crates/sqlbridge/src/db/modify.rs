use super::{compile, compile::Compiled, Db};
use crate::{Entity, Stopwatch};

use sqlbridge_core::{
    driver::Response,
    err,
    schema::EntityType,
    stmt::{Expr, Value, Values},
    AsyncConnection, Connection, Result,
};

/// Options for [`Db::insert_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOptions {
    /// Write the generated identity back into the inserted values.
    pub return_identity: bool,

    /// Property receiving the identity. Defaults to the identity property
    /// itself. The identity is returned either way.
    pub property_key: Option<String>,
}

impl Default for InsertOptions {
    fn default() -> Self {
        InsertOptions {
            return_identity: true,
            property_key: None,
        }
    }
}

impl InsertOptions {
    pub fn property_key(mut self, key: impl Into<String>) -> Self {
        self.property_key = Some(key.into());
        self
    }

    pub fn return_identity(mut self, enabled: bool) -> Self {
        self.return_identity = enabled;
        self
    }
}

impl<C: Connection> Db<C> {
    /// Inserts one row and returns the identity the store generated for it,
    /// also writing it back into `values`.
    pub fn insert<E: Entity>(&self, values: &mut (impl Values + ?Sized)) -> Result<Option<Value>> {
        self.insert_with::<E>(values, InsertOptions::default())
    }

    pub fn insert_with<E: Entity>(
        &self,
        values: &mut (impl Values + ?Sized),
        options: InsertOptions,
    ) -> Result<Option<Value>> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("insert", entity);

        let record = compile::snapshot_over(entity, &E::default(), &*values);
        let compiled = compile::insert(self.serializer, entity, &record, &mut watch)?;
        let response = self.run(&compiled, &mut watch)?;

        identity(entity, &compiled, response, values, &options, &mut watch)
    }

    /// Updates the row keyed by `values`, or every row matching `predicate`
    /// when one is given. Returns the number of rows changed.
    pub fn update<E: Entity>(
        &self,
        values: &(impl Values + ?Sized),
        predicate: Option<Expr>,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("update", entity);

        let record = compile::snapshot(entity, values);
        let compiled = compile::update(
            self.serializer,
            entity,
            &record,
            None,
            predicate.as_ref(),
            &mut watch,
        )?;

        Ok(self.run(&compiled, &mut watch)?.affected)
    }

    /// Like [`update`](Db::update), comparing concurrency tokens against
    /// `original` rather than the new values.
    pub fn update_with_original<E: Entity>(
        &self,
        values: &(impl Values + ?Sized),
        original: &(impl Values + ?Sized),
        predicate: Option<Expr>,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("update", entity);

        let record = compile::snapshot(entity, values);
        let original = compile::snapshot(entity, original);
        let compiled = compile::update(
            self.serializer,
            entity,
            &record,
            Some(&original),
            predicate.as_ref(),
            &mut watch,
        )?;

        Ok(self.run(&compiled, &mut watch)?.affected)
    }

    /// Deletes the rows matching `predicate`.
    ///
    /// Without a predicate the key conditions compare against `NULL`, which
    /// matches no row of a table with a non-null key.
    pub fn delete<E: Entity>(&self, predicate: Option<Expr>) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("delete", entity);

        let compiled = compile::delete(
            self.serializer,
            entity,
            None,
            predicate.as_ref(),
            &mut watch,
        )?;

        Ok(self.run(&compiled, &mut watch)?.affected)
    }

    /// Deletes the row whose key and concurrency tokens are in `values`.
    pub fn delete_entity<E: Entity>(&self, values: &(impl Values + ?Sized)) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("delete", entity);

        let record = compile::snapshot(entity, values);
        let compiled = compile::delete(self.serializer, entity, Some(&record), None, &mut watch)?;

        Ok(self.run(&compiled, &mut watch)?.affected)
    }

    /// Deletes every row of the table.
    pub fn delete_all<E: Entity>(&self) -> Result<u64> {
        let entity = self.entity::<E>()?;
        let mut watch = self.stopwatch("delete_all", entity);

        let compiled = compile::delete_all(self.serializer, entity, &mut watch)?;

        Ok(self.run(&compiled, &mut watch)?.affected)
    }

    pub(super) fn run(&self, compiled: &Compiled, watch: &mut Stopwatch) -> Result<Response> {
        let response = self
            .connection
            .exec(&compiled.sql, &compiled.params, &self.exec_options())?;

        watch.lap("executed");
        Ok(response)
    }
}

impl<C: AsyncConnection> Db<C> {
    pub async fn insert_async<E: Entity>(
        &self,
        values: &mut (impl Values + ?Sized),
    ) -> Result<Option<Value>> {
        self.insert_with_async::<E>(values, InsertOptions::default())
            .await
    }

    pub async fn insert_with_async<E: Entity>(
        &self,
        values: &mut (impl Values + ?Sized),
        options: InsertOptions,
    ) -> Result<Option<Value>> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("insert", &entity);

        let record = compile::snapshot_over(&entity, &E::default(), &*values);
        let serializer = self.serializer;
        let target = entity.clone();
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::insert(serializer, &target, &record, watch)
            })
            .await?;

        let response = self.run_async(&compiled, &mut watch).await?;

        identity(&entity, &compiled, response, values, &options, &mut watch)
    }

    pub async fn update_async<E: Entity>(
        &self,
        values: &(impl Values + ?Sized),
        predicate: Option<Expr>,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("update", &entity);

        let record = compile::snapshot(&entity, values);
        let serializer = self.serializer;
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::update(
                    serializer,
                    &entity,
                    &record,
                    None,
                    predicate.as_ref(),
                    watch,
                )
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }

    pub async fn update_with_original_async<E: Entity>(
        &self,
        values: &(impl Values + ?Sized),
        original: &(impl Values + ?Sized),
        predicate: Option<Expr>,
    ) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("update", &entity);

        let record = compile::snapshot(&entity, values);
        let original = compile::snapshot(&entity, original);
        let serializer = self.serializer;
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::update(
                    serializer,
                    &entity,
                    &record,
                    Some(&original),
                    predicate.as_ref(),
                    watch,
                )
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }

    pub async fn delete_async<E: Entity>(&self, predicate: Option<Expr>) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("delete", &entity);

        let serializer = self.serializer;
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::delete(serializer, &entity, None, predicate.as_ref(), watch)
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }

    pub async fn delete_entity_async<E: Entity>(
        &self,
        values: &(impl Values + ?Sized),
    ) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("delete", &entity);

        let record = compile::snapshot(&entity, values);
        let serializer = self.serializer;
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::delete(serializer, &entity, Some(&record), None, watch)
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }

    pub async fn delete_all_async<E: Entity>(&self) -> Result<u64> {
        let entity = self.entity::<E>()?.clone();
        let watch = self.stopwatch("delete_all", &entity);

        let serializer = self.serializer;
        let (compiled, mut watch) = self
            .compile_async(watch, move |watch| {
                compile::delete_all(serializer, &entity, watch)
            })
            .await?;

        Ok(self.run_async(&compiled, &mut watch).await?.affected)
    }

    pub(super) async fn run_async(
        &self,
        compiled: &Compiled,
        watch: &mut Stopwatch,
    ) -> Result<Response> {
        let response = self
            .connection
            .exec(&compiled.sql, &compiled.params, &self.exec_options())
            .await?;

        watch.lap("executed");
        Ok(response)
    }
}

/// Pulls the generated identity out of an insert response and writes it to
/// `options.property_key`, or to the identity property itself.
fn identity(
    entity: &EntityType,
    compiled: &Compiled,
    response: Response,
    values: &mut (impl Values + ?Sized),
    options: &InsertOptions,
    watch: &mut Stopwatch,
) -> Result<Option<Value>> {
    let identity = entity.identity().and_then(|identity| {
        compiled
            .read_back
            .iter()
            .position(|name| *name == identity.name)
    });

    // Without a generated key the first read back value stands in for it
    let index = match identity {
        Some(index) => index,
        None if !compiled.read_back.is_empty() => 0,
        None => return Ok(None),
    };

    let Some(row) = response.rows.into_iter().next() else {
        return Err(err!(
            "insert into `{}` returned no generated values",
            entity.table
        ));
    };

    let id = row.into_values().into_iter().nth(index).unwrap_or_default();

    if options.return_identity {
        let key = options
            .property_key
            .as_deref()
            .unwrap_or(compiled.read_back[index].as_str());
        values.set(key, id.clone())?;
    }

    watch.lap("retrieved identity");
    Ok(Some(id))
}
