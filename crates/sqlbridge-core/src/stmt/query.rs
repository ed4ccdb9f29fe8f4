use super::Expr;
use crate::schema::EntityType;

use std::sync::Arc;

/// A SELECT over one entity, optionally joined with more entities.
///
/// Every source contributes all of its mapped columns to the result, in
/// source order, which lets the caller split each row back into one record
/// per source.
#[derive(Debug, Clone)]
pub struct Query {
    pub sources: Vec<Source>,
    pub filter: Option<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Source {
    pub entity: Arc<EntityType>,

    /// `None` for the first source.
    pub join: Option<Join>,
}

#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub on: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Query {
    pub fn new(entity: Arc<EntityType>) -> Query {
        Query {
            sources: vec![Source { entity, join: None }],
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    pub fn join(mut self, kind: JoinKind, entity: Arc<EntityType>, on: Expr) -> Query {
        self.sources.push(Source {
            entity,
            join: Some(Join { kind, on }),
        });
        self
    }

    /// Adds a filter, AND-ed with any existing one.
    pub fn filter(mut self, expr: Expr) -> Query {
        self.filter = Some(match self.filter.take() {
            Some(filter) => filter.and(expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Direction) -> Query {
        self.order_by.push(OrderByExpr { expr, direction });
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = Some(offset);
        self
    }

    /// Number of columns each source contributes to a row.
    pub fn widths(&self) -> impl Iterator<Item = usize> + '_ {
        self.sources
            .iter()
            .map(|source| source.entity.properties.len())
    }
}
