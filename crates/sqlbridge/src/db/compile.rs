//! Turns one operation into SQL text and bound parameters.
//!
//! Nothing here touches a connection, so compilation can move to the
//! blocking pool for async callers.

use crate::Stopwatch;

use sqlbridge_core::{
    schema::EntityType,
    stmt::{Expr, Query, Record, Values},
    CommandSource, EntityState, Error, ModificationCommand, ParameterBag, ParameterNameGenerator,
    Result,
};
use sqlbridge_sql::{where_clause, Serializer};

#[derive(Debug)]
pub(super) struct Compiled {
    pub(super) sql: String,
    pub(super) params: ParameterBag,

    /// Properties of the store generated values in the first returned row.
    pub(super) read_back: Vec<String>,
}

impl Compiled {
    fn new(sql: String, params: ParameterBag) -> Compiled {
        Compiled {
            sql,
            params,
            read_back: vec![],
        }
    }
}

/// Row operations that run in partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BatchKind {
    Insert,
    Update,
    Delete,
}

impl BatchKind {
    pub(super) fn oper(self) -> &'static str {
        match self {
            BatchKind::Insert => "batch_insert",
            BatchKind::Update => "batch_update",
            BatchKind::Delete => "batch_delete",
        }
    }
}

/// Copies the values of every property of `entity` out of `values`.
///
/// Properties the source does not know stay absent, which keeps the
/// presence rule intact for the command built from the snapshot.
pub(super) fn snapshot(entity: &EntityType, values: &(impl Values + ?Sized)) -> Record {
    entity
        .properties
        .iter()
        .filter_map(|property| {
            values
                .get(&property.name)
                .map(|value| (property.name.clone(), value))
        })
        .collect()
}

/// Like [`snapshot`], falling back to `defaults` for every property the
/// source does not supply.
pub(super) fn snapshot_over(
    entity: &EntityType,
    defaults: &(impl Values + ?Sized),
    values: &(impl Values + ?Sized),
) -> Record {
    entity
        .properties
        .iter()
        .filter_map(|property| {
            values
                .get(&property.name)
                .or_else(|| defaults.get(&property.name))
                .map(|value| (property.name.clone(), value))
        })
        .collect()
}

pub(super) fn insert(
    serializer: Serializer,
    entity: &EntityType,
    values: &Record,
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let command = ModificationCommand::new(
        entity,
        EntityState::Added,
        CommandSource::values(values),
        &mut ParameterNameGenerator::new(),
    );

    let mut sql = String::new();
    let returns_row = serializer.append_insert_operation(&mut sql, &command)?;

    let mut params = ParameterBag::new();
    params.add_command(&command)?;

    let mut compiled = Compiled::new(sql, params);
    if returns_row {
        compiled.read_back = command
            .read_columns()
            .map(|column| column.property.clone())
            .collect();
    }

    watch.lap("compiled");
    Ok(compiled)
}

pub(super) fn update(
    serializer: Serializer,
    entity: &EntityType,
    values: &Record,
    original: Option<&Record>,
    predicate: Option<&Expr>,
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let mut source = CommandSource::values(values);
    if let Some(original) = original {
        source = source.original(original);
    }

    let command = ModificationCommand::new(
        entity,
        EntityState::Modified,
        source,
        &mut ParameterNameGenerator::new(),
    );
    ensure_writes(entity, &command)?;

    let mut sql = String::new();
    serializer.append_update_operation(&mut sql, &command)?;

    let mut params = ParameterBag::new();
    params.add_command(&command)?;
    watch.lap("compiled");

    let sql = match predicate {
        Some(predicate) => {
            let sql = splice(serializer, entity, &sql, "UPDATE", predicate, &mut params)?;
            watch.lap("processed WHERE");
            sql
        }
        None => sql,
    };

    Ok(Compiled::new(sql, params))
}

/// Deletes rows matching `predicate`, or the row whose key is in `values`.
pub(super) fn delete(
    serializer: Serializer,
    entity: &EntityType,
    values: Option<&Record>,
    predicate: Option<&Expr>,
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let source = match values {
        Some(values) => CommandSource::values(values),
        None => CommandSource::none(),
    };

    let command = ModificationCommand::new(
        entity,
        EntityState::Deleted,
        source,
        &mut ParameterNameGenerator::new(),
    );

    let mut sql = String::new();
    serializer.append_delete_operation(&mut sql, &command)?;

    let mut params = ParameterBag::new();
    params.add_command(&command)?;
    watch.lap("compiled");

    let sql = match predicate {
        Some(predicate) => {
            let sql = splice(serializer, entity, &sql, "DELETE", predicate, &mut params)?;
            watch.lap("processed WHERE");
            sql
        }
        None => sql,
    };

    Ok(Compiled::new(sql, params))
}

pub(super) fn delete_all(
    serializer: Serializer,
    entity: &EntityType,
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let command = ModificationCommand::new(
        entity,
        EntityState::Deleted,
        CommandSource::none(),
        &mut ParameterNameGenerator::new(),
    );

    let mut sql = String::new();
    serializer.append_delete_operation(&mut sql, &command)?;
    watch.lap("compiled");

    let sql = where_clause::strip(&sql, serializer.statement_terminator(), "DELETE")?;
    watch.lap("removed WHERE");

    // The key conditions are gone, and so are their parameters
    Ok(Compiled::new(sql, ParameterBag::new()))
}

/// One execution for every row of a partition.
pub(super) fn batch(
    kind: BatchKind,
    serializer: Serializer,
    entity: &EntityType,
    rows: &[Record],
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let (state, write_only) = match kind {
        BatchKind::Insert => (EntityState::Added, true),
        BatchKind::Update => (EntityState::Modified, false),
        BatchKind::Delete => (EntityState::Deleted, false),
    };

    let commands = ModificationCommand::batch(
        entity,
        state,
        rows.iter()
            .map(|row| CommandSource::values(row).write_only(write_only)),
        &mut ParameterNameGenerator::new(),
    );

    let mut sql = String::new();
    match kind {
        BatchKind::Insert => {
            serializer.append_bulk_insert_operation(&mut sql, &commands)?;
        }
        BatchKind::Update => {
            for command in &commands {
                ensure_writes(entity, command)?;
                serializer.append_update_operation(&mut sql, command)?;
            }
        }
        BatchKind::Delete => {
            for command in &commands {
                serializer.append_delete_operation(&mut sql, command)?;
            }
        }
    }

    let mut params = ParameterBag::new();
    params.add_commands(&commands)?;

    watch.lap("compiled");
    Ok(Compiled::new(sql, params))
}

pub(super) fn query(
    serializer: Serializer,
    query: &Query,
    watch: &mut Stopwatch,
) -> Result<Compiled> {
    let mut params = ParameterBag::new();
    let sql = serializer.serialize_query(query, &mut params)?;

    watch.lap("compiled");
    Ok(Compiled::new(sql, params))
}

fn ensure_writes(entity: &EntityType, command: &ModificationCommand) -> Result<()> {
    if command.write_columns().next().is_none() {
        return Err(Error::invalid_argument(
            "values",
            format!("no property of `{}` to update", entity.name),
        ));
    }

    Ok(())
}

fn splice(
    serializer: Serializer,
    entity: &EntityType,
    sql: &str,
    key: &str,
    predicate: &Expr,
    params: &mut ParameterBag,
) -> Result<String> {
    let where_sql = serializer.where_clause(entity, predicate, params)?;
    where_clause::splice(sql, serializer.statement_terminator(), key, &where_sql)
}
