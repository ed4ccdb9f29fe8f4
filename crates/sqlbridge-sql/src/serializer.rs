#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::{Ident, TableName};

mod params;
pub use params::{Bind, Params, Placeholder};

// Fragment serializers
mod delete;
mod expr;
mod insert;
mod query;
mod update;

use sqlbridge_core::{
    driver::Transaction,
    schema::EntityType,
    stmt::{Expr, Query},
    Error, ParameterBag, Result,
};

/// Terminates every generated statement.
pub const TERMINATOR: &str = ";";

/// Writes SQL text for one database flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, P> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters for constants found in expressions
    params: &'a mut P,

    /// Entities that column references resolve against, by source index.
    sources: Vec<&'a EntityType>,

    /// True when columns are qualified with their source alias.
    alias: bool,

    /// First error hit while writing. Fragments keep writing after an error;
    /// the text is thrown away.
    error: Option<Error>,
}

impl<'a, P: Params> Formatter<'a, P> {
    fn new(serializer: &'a Serializer, dst: &'a mut String, params: &'a mut P) -> Self {
        Formatter {
            serializer,
            dst,
            params,
            sources: vec![],
            alias: false,
            error: None,
        }
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Serializer {
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Separates the statements of generated SQL text.
    pub fn statement_terminator(&self) -> &'static str {
        TERMINATOR
    }

    /// Quoted, schema qualified table name of `entity`.
    pub fn table_name(&self, entity: &EntityType) -> String {
        let mut dst = String::new();
        let mut no_params = ();
        let mut f = Formatter::new(self, &mut dst, &mut no_params);
        fmt!(&mut f, TableName(&entity.table, entity.schema.as_deref()));
        dst
    }

    /// Serializes `expr` as a `WHERE` clause over `entity`, binding its
    /// constants into `params` under fresh names.
    pub fn where_clause(
        &self,
        entity: &EntityType,
        expr: &Expr,
        params: &mut ParameterBag,
    ) -> Result<String> {
        let mut ret = String::new();
        let mut bind = Bind::new(params);
        let mut f = Formatter::new(self, &mut ret, &mut bind);
        f.sources.push(entity);

        fmt!(&mut f, "WHERE " expr);

        f.finish()?;
        Ok(ret)
    }

    /// Serializes a SELECT, binding its constants into `params`.
    pub fn serialize_query(&self, query: &Query, params: &mut ParameterBag) -> Result<String> {
        let mut ret = String::new();
        let mut bind = Bind::new(params);
        let mut f = Formatter::new(self, &mut ret, &mut bind);
        f.alias = true;
        f.sources = query
            .sources
            .iter()
            .map(|source| &*source.entity)
            .collect();

        fmt!(&mut f, query);

        f.finish()?;
        ret.push_str(TERMINATOR);
        Ok(ret)
    }

    /// SQL for a transaction control operation.
    pub fn serialize_transaction(&self, op: Transaction) -> &'static str {
        match (op, self.flavor) {
            (Transaction::Start, Flavor::Mysql) => "START TRANSACTION",
            (Transaction::Start, _) => "BEGIN",
            (Transaction::Commit, _) => "COMMIT",
            (Transaction::Rollback, _) => "ROLLBACK",
        }
    }

    fn end_statement(&self, dst: &mut String) {
        dst.push_str(TERMINATOR);
        dst.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlbridge_core::{schema::Property, stmt::Value};

    fn user() -> EntityType {
        EntityType::builder("User")
            .table("users")
            .schema("app")
            .property(Property::new("Id").primary_key().generated_on_add())
            .property(Property::new("Name1").column("usr_name"))
            .build()
    }

    #[test]
    fn table_names_are_quoted_per_flavor() {
        assert_eq!(Serializer::sqlite().table_name(&user()), r#""app"."users""#);
        assert_eq!(Serializer::mysql().table_name(&user()), "`app`.`users`");
    }

    #[test]
    fn where_clause_uses_physical_columns() {
        let mut params = ParameterBag::new();
        let sql = Serializer::sqlite()
            .where_clause(
                &user(),
                &Expr::col("Name1").eq("bob").and(Expr::col("Id").gt(3_i64)),
                &mut params,
            )
            .unwrap();

        assert_eq!(sql, r#"WHERE "usr_name" = @__p_0 AND "Id" > @__p_1"#);
        assert_eq!(params.get("__p_0"), Some(&Value::from("bob")));
        assert_eq!(params.get("__p_1"), Some(&Value::I64(3)));
    }

    #[test]
    fn where_clause_rejects_unknown_property() {
        let err = Serializer::sqlite()
            .where_clause(&user(), &Expr::col("Nope").eq(1_i64), &mut ParameterBag::new())
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument `predicate`: entity `User` has no property `Nope`"
        );
    }

    #[test]
    fn transaction_statements() {
        assert_eq!(
            Serializer::mysql().serialize_transaction(Transaction::Start),
            "START TRANSACTION"
        );
        assert_eq!(
            Serializer::sqlite().serialize_transaction(Transaction::Rollback),
            "ROLLBACK"
        );
    }
}
