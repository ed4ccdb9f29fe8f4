use super::{Comma, Delimited, Formatter, Ident, Placeholder, Serializer, TableName, ToSql};

use sqlbridge_core::{ColumnModification, EntityState, Error, ModificationCommand, Result};

impl Serializer {
    /// Appends an INSERT for one row.
    ///
    /// Returns `true` when the appended text produces a result row holding
    /// the store generated columns, in command order.
    pub fn append_insert_operation(
        &self,
        dst: &mut String,
        command: &ModificationCommand,
    ) -> Result<bool> {
        self.append_bulk_insert_operation(dst, std::slice::from_ref(command))
    }

    /// Appends one multi-row INSERT for `commands` when every row writes the
    /// same columns, otherwise one INSERT per row.
    pub fn append_bulk_insert_operation(
        &self,
        dst: &mut String,
        commands: &[ModificationCommand],
    ) -> Result<bool> {
        let Some(first) = commands.first() else {
            return Ok(false);
        };

        for command in commands {
            if command.state() != EntityState::Added {
                return Err(Error::invalid_argument(
                    "commands",
                    format!("expected an insert command, got {:?}", command.state()),
                ));
            }

            if command.table() != first.table() || command.schema() != first.schema() {
                return Err(Error::invalid_argument(
                    "commands",
                    "every row of a bulk insert must target the same table",
                ));
            }
        }

        if commands.len() > 1 && !self.is_single_statement(commands) {
            let mut returns_rows = false;
            for command in commands {
                returns_rows |= self.append_insert_operation(dst, command)?;
            }
            return Ok(returns_rows);
        }

        let mut no_params = ();
        let mut f = Formatter::new(self, dst, &mut no_params);
        let table = TableName(first.table(), first.schema());
        let columns: Vec<_> = first.write_columns().collect();
        let reads: Vec<_> = first.read_columns().collect();

        fmt!(&mut f, "INSERT INTO " table);

        if columns.is_empty() {
            if self.is_mysql() {
                fmt!(&mut f, " () VALUES ()");
            } else {
                fmt!(&mut f, " DEFAULT VALUES");
            }
        } else {
            let names = Comma(columns.iter().map(|column| Ident(&column.column)));
            let rows = Delimited(commands.iter().map(ValuesRow), ", ");
            fmt!(&mut f, " (" names ") VALUES " rows);
        }

        if !reads.is_empty() && !self.is_mysql() {
            let reads = Comma(reads.iter().map(|column| Ident(&column.column)));
            fmt!(&mut f, " RETURNING " reads);
        }

        f.finish()?;
        self.end_statement(dst);

        if reads.is_empty() {
            return Ok(false);
        }

        if self.is_mysql() {
            return self.append_mysql_read_back(dst, first);
        }

        Ok(true)
    }

    /// True when the rows can share one INSERT statement.
    fn is_single_statement(&self, commands: &[ModificationCommand]) -> bool {
        let shape = |command: &ModificationCommand| -> (Vec<String>, Vec<String>) {
            (
                command.write_columns().map(|c| c.column.clone()).collect(),
                command.read_columns().map(|c| c.column.clone()).collect(),
            )
        };

        let (writes, reads) = shape(&commands[0]);

        // MySQL reads generated values back one row at a time
        if writes.is_empty() || (self.is_mysql() && !reads.is_empty()) {
            return false;
        }

        commands[1..]
            .iter()
            .all(|command| shape(command) == (writes.clone(), reads.clone()))
    }

    /// MySQL has no RETURNING, so generated values are selected back by key
    /// in a second statement.
    fn append_mysql_read_back(&self, dst: &mut String, command: &ModificationCommand) -> Result<bool> {
        let keys: Vec<&ColumnModification> = command
            .column_modifications()
            .iter()
            .filter(|column| column.is_key)
            .collect();

        // Without a way to find the row again nothing is read back
        if keys.is_empty()
            || keys
                .iter()
                .any(|key| !key.is_read && key.parameter_name.is_none())
        {
            return Ok(false);
        }

        let mut no_params = ();
        let mut f = Formatter::new(self, dst, &mut no_params);
        let reads = Comma(command.read_columns().map(|column| Ident(&column.column)));
        let table = TableName(command.table(), command.schema());

        fmt!(&mut f, "SELECT " reads " FROM " table " WHERE ROW_COUNT() = 1");

        for key in keys {
            fmt!(&mut f, " AND " Ident(&key.column) " = ");

            match &key.parameter_name {
                Some(name) if !key.is_read => fmt!(&mut f, Placeholder(name.clone())),
                _ => fmt!(&mut f, "LAST_INSERT_ID()"),
            }
        }

        f.finish()?;
        self.end_statement(dst);
        Ok(true)
    }
}

/// `(@p0, @p1, ...)` for the written columns of one row.
struct ValuesRow<'a>(&'a ModificationCommand);

impl ToSql for ValuesRow<'_> {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) {
        let mut placeholders = Vec::new();

        for column in self.0.write_columns() {
            match &column.parameter_name {
                Some(name) => placeholders.push(Placeholder(name.clone())),
                None => f.fail(Error::invalid_statement(format!(
                    "column `{}` is written without a parameter",
                    column.column
                ))),
            }
        }

        fmt!(f, "(" Comma(placeholders) ")");
    }
}
