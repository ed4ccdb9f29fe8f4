use crate::Entity;

use sqlbridge_core::stmt::{Direction, Expr, JoinKind};

use std::{any::TypeId, marker::PhantomData};

/// A typed query over `E`, optionally joined to further entities.
///
/// Sources are numbered in the order they are added, starting with `E` at
/// 0; use [`Expr::col_of`] to refer to a column of a joined source. Each
/// source contributes one argument to the selector of a multi-map query.
#[derive(Debug, Clone)]
pub struct Select<E> {
    pub(crate) sources: Vec<SelectSource>,
    pub(crate) filter: Option<Expr>,
    pub(crate) order_by: Vec<(Expr, Direction)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    _p: PhantomData<fn() -> E>,
}

#[derive(Debug, Clone)]
pub(crate) struct SelectSource {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) join: Option<(JoinKind, Expr)>,
}

impl SelectSource {
    fn of<T: Entity>(join: Option<(JoinKind, Expr)>) -> SelectSource {
        SelectSource {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            join,
        }
    }
}

impl<E: Entity> Select<E> {
    pub fn new() -> Select<E> {
        Select {
            sources: vec![SelectSource::of::<E>(None)],
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
            _p: PhantomData,
        }
    }

    pub fn join<J: Entity>(mut self, on: Expr) -> Self {
        self.sources
            .push(SelectSource::of::<J>(Some((JoinKind::Inner, on))));
        self
    }

    pub fn left_join<J: Entity>(mut self, on: Expr) -> Self {
        self.sources
            .push(SelectSource::of::<J>(Some((JoinKind::Left, on))));
        self
    }

    /// Adds a condition, combined with any previous one by `AND`.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(filter) => filter.and(expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Direction) -> Self {
        self.order_by.push((expr, direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Number of sources, which is the arity a selector must have.
    pub fn arity(&self) -> usize {
        self.sources.len()
    }
}

impl<E: Entity> Default for Select<E> {
    fn default() -> Self {
        Select::new()
    }
}
