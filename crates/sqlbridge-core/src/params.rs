use crate::{command::ModificationCommand, stmt::Value, Error, Result};

use indexmap::IndexMap;

/// Parameter values for one execution, keyed by name without the `@` sigil.
///
/// A bag accumulates the parameters of every command taking part in a
/// statement. Inserting a name twice is an error since it means two commands
/// shared a name generator incorrectly.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParameterBag {
    params: IndexMap<String, Value>,
}

impl ParameterBag {
    pub fn new() -> ParameterBag {
        ParameterBag::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();

        if self.params.contains_key(&name) {
            return Err(Error::duplicate_parameter(name));
        }

        self.params.insert(name, value.into());
        Ok(())
    }

    /// Binds the parameters of every column modification in `command`.
    ///
    /// A concurrency token that is also written binds both its original and
    /// its current value, under different names.
    pub fn add_command(&mut self, command: &ModificationCommand) -> Result<()> {
        for column in command.column_modifications() {
            if column.use_original_value_parameter() {
                if let Some(name) = &column.original_parameter_name {
                    self.insert(name.clone(), column.original_value.clone())?;
                }
            }

            if column.use_current_value_parameter() {
                if let Some(name) = &column.parameter_name {
                    self.insert(name.clone(), column.value.clone())?;
                }
            }
        }

        Ok(())
    }

    pub fn add_commands<'a>(
        &mut self,
        commands: impl IntoIterator<Item = &'a ModificationCommand>,
    ) -> Result<()> {
        for command in commands {
            self.add_command(command)?;
        }

        Ok(())
    }

    /// Moves every parameter of `other` into this bag.
    pub fn extend(&mut self, other: ParameterBag) -> Result<()> {
        for (name, value) in other.params {
            self.insert(name, value)?;
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.params.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a ParameterBag {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
