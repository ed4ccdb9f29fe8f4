use crate::stmt::{Record, Value};

use std::sync::Arc;

/// One result row. Column names are shared by every row of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Row {
        debug_assert_eq!(columns.len(), values.len());
        Row { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Pairs every column with its value, later duplicates winning.
    pub fn into_record(self) -> Record {
        self.columns.iter().cloned().zip(self.values).collect()
    }

    /// Splits the row into consecutive slices of the given widths.
    ///
    /// Returns `None` when the widths do not add up to the row length.
    pub fn split(self, widths: &[usize]) -> Option<Vec<Row>> {
        if widths.iter().sum::<usize>() != self.values.len() {
            return None;
        }

        let mut parts = Vec::with_capacity(widths.len());
        let mut values = self.values.into_iter();
        let mut start = 0;

        for &width in widths {
            let columns: Arc<[String]> = self.columns[start..start + width].into();
            parts.push(Row {
                columns,
                values: values.by_ref().take(width).collect(),
            });
            start += width;
        }

        Some(parts)
    }
}
