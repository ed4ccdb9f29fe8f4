use super::{Record, Value};
use crate::Result;

use std::collections::{BTreeMap, HashMap};

/// Name-based access to the properties of an application object.
///
/// Commands read source values through this trait by logical property name.
/// Properties the object does not carry return `None` and are simply left out
/// of the statement.
pub trait Values {
    fn get(&self, name: &str) -> Option<Value>;

    /// Writes a value back into the object, e.g. a generated identity.
    ///
    /// Returns `Ok(false)` when the object has no writable property with
    /// that name.
    fn set(&mut self, name: &str, value: Value) -> Result<bool> {
        let _ = (name, value);
        Ok(false)
    }
}

/// Builds an application object from a row keyed by property name.
pub trait FromRecord: Sized {
    fn from_record(record: Record) -> Result<Self>;
}

impl Values for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<bool> {
        self.insert(name.to_string(), value);
        Ok(true)
    }
}

impl Values for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<bool> {
        self.insert(name.to_string(), value);
        Ok(true)
    }
}

impl<T: Values + ?Sized> Values for &T {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }
}

macro_rules! impl_from_record_scalar {
    ( $( $ty:ty ),* ) => {
        $(
            /// Single-column rows map to the value of their first column.
            impl FromRecord for $ty {
                fn from_record(mut record: Record) -> Result<Self> {
                    let value = record.take_first().unwrap_or_default();
                    <$ty>::try_from(value)
                }
            }
        )*
    };
}

impl_from_record_scalar!(bool, i32, i64, f64, String, Option<i32>, Option<i64>, Option<String>);
