use super::{Comma, Formatter, Ident, Params, Placeholder, Serializer, TableName, ToSql};

use sqlbridge_core::{EntityState, Error, ModificationCommand, Result};

impl Serializer {
    /// Appends an UPDATE setting every written column, conditioned on the
    /// command's key and concurrency token columns.
    pub fn append_update_operation(
        &self,
        dst: &mut String,
        command: &ModificationCommand,
    ) -> Result<bool> {
        if command.state() != EntityState::Modified {
            return Err(Error::invalid_argument(
                "command",
                format!("expected an update command, got {:?}", command.state()),
            ));
        }

        if command.write_columns().next().is_none() {
            return Err(Error::invalid_statement(format!(
                "UPDATE of `{}` has no columns to set",
                command.table()
            )));
        }

        let mut no_params = ();
        let mut f = Formatter::new(self, dst, &mut no_params);
        let table = TableName(command.table(), command.schema());
        let assignments = Comma(command.write_columns().map(|column| Assignment {
            column: &column.column,
            parameter: column.parameter_name.as_deref(),
        }));

        fmt!(&mut f, "UPDATE " table " SET " assignments Conditions(command));

        f.finish()?;
        self.end_statement(dst);
        Ok(false)
    }
}

struct Assignment<'a> {
    column: &'a str,
    parameter: Option<&'a str>,
}

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Some(parameter) = self.parameter else {
            f.fail(Error::invalid_statement(format!(
                "column `{}` is written without a parameter",
                self.column
            )));
            return;
        };

        fmt!(f, Ident(self.column) " = " Placeholder(parameter.to_string()));
    }
}

/// ` WHERE k = @p0 AND v = @o_p1` for the condition columns of a command.
///
/// Nothing is written when the command has no conditions.
pub(super) struct Conditions<'a>(pub(super) &'a ModificationCommand);

impl ToSql for Conditions<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let mut s = " WHERE ";

        for column in self.0.condition_columns() {
            fmt!(f, s Ident(&column.column));
            s = " AND ";

            if column.condition_value().is_null() {
                fmt!(f, " IS NULL");
                continue;
            }

            match column.condition_parameter_name() {
                Some(name) => fmt!(f, " = " Placeholder(name.to_string())),
                None => f.fail(Error::invalid_statement(format!(
                    "condition on `{}` has no parameter",
                    column.column
                ))),
            }
        }
    }
}
