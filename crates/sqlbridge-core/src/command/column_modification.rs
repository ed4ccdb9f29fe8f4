use crate::stmt::Value;

/// How one column takes part in a modification command.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnModification {
    /// Logical property name.
    pub property: String,

    /// Physical column name.
    pub column: String,

    /// Parameter carrying the current value, when one is bound.
    pub parameter_name: Option<String>,

    /// Parameter carrying the original value, when one is bound.
    pub original_parameter_name: Option<String>,

    /// The store generates the value and it is read back.
    pub is_read: bool,

    /// The value is sent to the store.
    pub is_write: bool,

    pub is_key: bool,

    /// The column is part of the default WHERE clause.
    pub is_condition: bool,

    pub is_concurrency_token: bool,

    pub value: Value,

    pub original_value: Value,
}

impl ColumnModification {
    pub fn use_original_value_parameter(&self) -> bool {
        self.is_condition && self.is_concurrency_token
    }

    pub fn use_current_value_parameter(&self) -> bool {
        self.is_write || (self.is_condition && !self.is_concurrency_token)
    }

    /// Parameter the WHERE clause compares against.
    pub fn condition_parameter_name(&self) -> Option<&str> {
        if self.use_original_value_parameter() {
            self.original_parameter_name.as_deref()
        } else {
            self.parameter_name.as_deref()
        }
    }

    /// The value the WHERE clause compares against.
    pub fn condition_value(&self) -> &Value {
        if self.use_original_value_parameter() {
            &self.original_value
        } else {
            &self.value
        }
    }
}
