mod column_modification;
pub use column_modification::ColumnModification;

mod parameter_name;
pub use parameter_name::ParameterNameGenerator;

use crate::{
    schema::{EntityType, Property, SaveBehavior},
    stmt::{Value, Values},
};

/// The operation a command performs on its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
}

/// Which columns to read, write, or condition on for one row of one operation.
///
/// A command is built fresh for every call from the entity metadata and the
/// caller's source object, handed to the SQL generator and the parameter
/// bag, and then dropped.
#[derive(Debug, Clone)]
pub struct ModificationCommand {
    table: String,
    schema: Option<String>,
    state: EntityState,
    columns: Vec<ColumnModification>,
}

/// Inputs for building a [`ModificationCommand`].
pub struct CommandSource<'a> {
    /// Current values; `None` for deletes that only carry conditions.
    pub values: Option<&'a dyn Values>,

    /// Values as read at load time, used for concurrency conditions. When
    /// absent the current value stands in for the original.
    pub original: Option<&'a dyn Values>,

    /// Suppresses read-back of store-generated columns.
    pub write_only: bool,
}

impl<'a> CommandSource<'a> {
    pub fn none() -> CommandSource<'a> {
        CommandSource {
            values: None,
            original: None,
            write_only: false,
        }
    }

    pub fn values(values: &'a dyn Values) -> CommandSource<'a> {
        CommandSource {
            values: Some(values),
            original: None,
            write_only: false,
        }
    }

    pub fn original(mut self, original: &'a dyn Values) -> Self {
        self.original = Some(original);
        self
    }

    pub fn write_only(mut self, write_only: bool) -> Self {
        self.write_only = write_only;
        self
    }
}

impl ModificationCommand {
    /// Decides, per property, whether the column is read back, written, or
    /// used as a condition, drawing parameter names from `names`.
    pub fn new(
        entity: &EntityType,
        state: EntityState,
        source: CommandSource<'_>,
        names: &mut ParameterNameGenerator,
    ) -> ModificationCommand {
        let adding = state == EntityState::Added;
        let mut columns = Vec::with_capacity(entity.properties.len());

        for property in &entity.properties {
            let is_key = property.primary_key;
            let is_concurrency_token = property.concurrency_token;
            let is_condition = !adding && (is_key || is_concurrency_token);
            let is_read = is_store_generated(property, state);
            let mut is_write = false;
            let mut value = Value::Null;

            if !is_read {
                let supplied = source.values.and_then(|values| values.get(&property.name));
                let modified = supplied.is_some();

                if let Some(supplied) = supplied {
                    value = supplied;
                }

                if (adding && property.before_save == SaveBehavior::Save)
                    || (modified && property.after_save == SaveBehavior::Save)
                {
                    is_write = true;
                }
            }

            if !(is_read || is_write || is_condition) {
                continue;
            }

            let original_value = match source.original {
                Some(original) => original.get(&property.name).unwrap_or_default(),
                None => value.clone(),
            };

            let mut column = ColumnModification {
                property: property.name.clone(),
                column: property.column.clone(),
                parameter_name: None,
                original_parameter_name: None,
                is_read: is_read && !source.write_only,
                is_write,
                is_key,
                is_condition,
                is_concurrency_token,
                value,
                original_value,
            };

            if column.use_current_value_parameter() {
                column.parameter_name = Some(names.generate_next());
            }

            if column.use_original_value_parameter() {
                column.original_parameter_name = Some(format!("o_{}", names.generate_next()));
            }

            columns.push(column);
        }

        ModificationCommand {
            table: entity.table.clone(),
            schema: entity.schema.clone(),
            state,
            columns,
        }
    }

    /// One command per source, all sharing `names` so parameter names stay
    /// unique across the rows of a multi-row statement.
    pub fn batch<'a, I>(
        entity: &EntityType,
        state: EntityState,
        sources: I,
        names: &mut ParameterNameGenerator,
    ) -> Vec<ModificationCommand>
    where
        I: IntoIterator<Item = CommandSource<'a>>,
    {
        sources
            .into_iter()
            .map(|source| ModificationCommand::new(entity, state, source, names))
            .collect()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    pub fn column_modifications(&self) -> &[ColumnModification] {
        &self.columns
    }

    pub fn read_columns(&self) -> impl Iterator<Item = &ColumnModification> + '_ {
        self.columns.iter().filter(|column| column.is_read)
    }

    pub fn write_columns(&self) -> impl Iterator<Item = &ColumnModification> + '_ {
        self.columns.iter().filter(|column| column.is_write)
    }

    pub fn condition_columns(&self) -> impl Iterator<Item = &ColumnModification> + '_ {
        self.columns.iter().filter(|column| column.is_condition)
    }
}

/// The store assigns the value for this state.
fn is_store_generated(property: &Property, state: EntityState) -> bool {
    match state {
        EntityState::Added => property.value_generated.on_add(),
        EntityState::Modified => property.value_generated.on_update(),
        EntityState::Deleted => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, schema::Property, stmt::Record};

    fn blog() -> EntityType {
        EntityType::builder("Blog")
            .property(Property::new("Id").primary_key().generated_on_add())
            .property(Property::new("Name"))
            .property(Property::new("Description"))
            .property(Property::new("Version").concurrency_token())
            .property(Property::new("UpdatedAt").generated_on_update())
            .build()
    }

    fn names(cmd: &ModificationCommand) -> Vec<&str> {
        cmd.column_modifications()
            .iter()
            .map(|c| c.property.as_str())
            .collect()
    }

    #[test]
    fn insert_reads_identity_and_writes_every_saved_property() {
        let values = record! { "Id" => 99_i64, "Name" => "n" };
        let cmd = ModificationCommand::new(
            &blog(),
            EntityState::Added,
            CommandSource::values(&values),
            &mut ParameterNameGenerator::new(),
        );

        // Properties that are not supplied are still written on insert when their
        // before-save behavior is Save.
        assert_eq!(
            names(&cmd),
            ["Id", "Name", "Description", "Version", "UpdatedAt"]
        );

        let id = &cmd.column_modifications()[0];
        assert!(id.is_read);
        assert!(!id.is_write);
        assert!(!id.is_condition);
        assert_eq!(id.value, Value::Null, "store generated values are not copied");

        let name = &cmd.column_modifications()[1];
        assert!(name.is_write);
        assert_eq!(name.value, Value::from("n"));
        assert_eq!(name.parameter_name.as_deref(), Some("p0"));

        let description = &cmd.column_modifications()[2];
        assert!(description.is_write);
        assert_eq!(description.value, Value::Null);
    }

    #[test]
    fn update_writes_only_supplied_properties() {
        let values = record! { "Id" => 1_i64, "Name" => "renamed", "Unrelated" => 5_i64 };
        let cmd = ModificationCommand::new(
            &blog(),
            EntityState::Modified,
            CommandSource::values(&values),
            &mut ParameterNameGenerator::new(),
        );

        assert_eq!(names(&cmd), ["Id", "Name", "Version", "UpdatedAt"]);

        let id = &cmd.column_modifications()[0];
        assert!(id.is_condition);
        assert!(id.is_key);
        assert!(!id.is_write, "keys are never written after insert");
        assert_eq!(id.value, Value::I64(1));

        let version = &cmd.column_modifications()[2];
        assert!(version.is_condition);
        assert!(!version.is_write);
        assert!(version.use_original_value_parameter());
        assert!(!version.use_current_value_parameter());
        assert_eq!(version.original_parameter_name.as_deref(), Some("o_p2"));

        let updated_at = &cmd.column_modifications()[3];
        assert!(updated_at.is_read);
    }

    #[test]
    fn delete_without_source_keeps_only_conditions() {
        let cmd = ModificationCommand::new(
            &blog(),
            EntityState::Deleted,
            CommandSource::none(),
            &mut ParameterNameGenerator::new(),
        );

        assert_eq!(names(&cmd), ["Id", "Version"]);
        assert!(cmd.column_modifications().iter().all(|c| c.is_condition));
        assert!(cmd.column_modifications().iter().all(|c| c.value.is_null()));
    }

    #[test]
    fn disjoint_source_is_not_an_error() {
        let values = record! { "Nothing" => 1_i64 };
        let cmd = ModificationCommand::new(
            &blog(),
            EntityState::Modified,
            CommandSource::values(&values),
            &mut ParameterNameGenerator::new(),
        );

        assert_eq!(names(&cmd), ["Id", "Version", "UpdatedAt"]);
        assert_eq!(cmd.write_columns().count(), 0);
    }

    #[test]
    fn presence_rule_holds_for_every_state() {
        let entity = blog();
        let values = record! { "Name" => "n", "Version" => 2_i64 };

        for state in [EntityState::Added, EntityState::Modified, EntityState::Deleted] {
            let cmd = ModificationCommand::new(
                &entity,
                state,
                CommandSource::values(&values),
                &mut ParameterNameGenerator::new(),
            );

            for property in &entity.properties {
                let generated = is_store_generated(property, state);
                let supplied = values.contains(&property.name);
                let saves = (state == EntityState::Added
                    && property.before_save == SaveBehavior::Save)
                    || (supplied && property.after_save == SaveBehavior::Save);
                let condition = state != EntityState::Added
                    && (property.primary_key || property.concurrency_token);

                let expected = generated || (!generated && saves) || condition;
                let present = cmd
                    .column_modifications()
                    .iter()
                    .any(|c| c.property == property.name);

                assert_eq!(expected, present, "state={state:?} property={}", property.name);
            }
        }
    }

    #[test]
    fn original_values_feed_concurrency_conditions() {
        let current = record! { "Id" => 1_i64, "Version" => 3_i64 };
        let original = record! { "Version" => 2_i64 };

        let cmd = ModificationCommand::new(
            &blog(),
            EntityState::Modified,
            CommandSource::values(&current).original(&original),
            &mut ParameterNameGenerator::new(),
        );

        let version = cmd
            .column_modifications()
            .iter()
            .find(|c| c.property == "Version")
            .unwrap();

        assert!(version.is_write);
        assert_eq!(version.value, Value::I64(3));
        assert_eq!(version.original_value, Value::I64(2));
        assert!(version.use_current_value_parameter());
        assert!(version.use_original_value_parameter());
        assert_ne!(version.parameter_name, version.original_parameter_name);
    }

    #[test]
    fn batch_shares_parameter_names() {
        let rows = [record! { "Name" => "a" }, record! { "Name" => "b" }];
        let mut names = ParameterNameGenerator::new();

        let cmds = ModificationCommand::batch(
            &blog(),
            EntityState::Added,
            rows.iter()
                .map(|row| CommandSource::values(row as &Record).write_only(true)),
            &mut names,
        );

        assert_eq!(cmds.len(), 2);
        assert!(cmds.iter().all(|cmd| cmd.read_columns().next().is_none()));

        let mut all: Vec<_> = cmds
            .iter()
            .flat_map(|cmd| cmd.column_modifications())
            .filter_map(|c| c.parameter_name.clone())
            .collect();
        let len = all.len();
        all.sort();
        all.dedup();
        assert_eq!(len, all.len());
        assert_eq!(cmds[1].write_columns().next().unwrap().parameter_name.as_deref(), Some("p4"));
    }
}
