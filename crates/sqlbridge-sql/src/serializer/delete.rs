use super::{update::Conditions, Formatter, Serializer, TableName, ToSql};

use sqlbridge_core::{EntityState, Error, ModificationCommand, Result};

impl Serializer {
    /// Appends a DELETE conditioned on the command's key and concurrency
    /// token columns.
    pub fn append_delete_operation(
        &self,
        dst: &mut String,
        command: &ModificationCommand,
    ) -> Result<bool> {
        if command.state() != EntityState::Deleted {
            return Err(Error::invalid_argument(
                "command",
                format!("expected a delete command, got {:?}", command.state()),
            ));
        }

        let mut no_params = ();
        let mut f = Formatter::new(self, dst, &mut no_params);
        let table = TableName(command.table(), command.schema());

        fmt!(&mut f, "DELETE FROM " table Conditions(command));

        f.finish()?;
        self.end_statement(dst);
        Ok(false)
    }
}
