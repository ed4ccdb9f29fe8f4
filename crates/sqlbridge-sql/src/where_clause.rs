//! Rewrites the WHERE clause of already generated SQL text.
//!
//! The statement serializers build their own WHERE clause from the command's
//! key and concurrency token columns. When the caller supplies a predicate,
//! that clause is swapped out here; for "delete all" it is removed.
//!
//! Only SQL code is inspected: quoted identifiers, string literals and
//! comments never match the statement key, the terminator, or `WHERE`.

mod scan;
use scan::Code;

use sqlbridge_core::{Error, Result};

/// Replaces the WHERE clause of the first statement containing `key` with
/// `where_sql`, or appends `where_sql` when the statement has none.
///
/// Every other statement is left byte for byte as it was.
pub fn splice(sql: &str, terminator: &str, key: &str, where_sql: &str) -> Result<String> {
    rewrite(sql, terminator, key, |statement| {
        let prefix = match find_where(statement) {
            Some(index) => &statement[..index],
            None => statement,
        };

        format!("{}\n{}", prefix.trim_end(), where_sql)
    })
}

/// Removes the WHERE clause of the first statement containing `key`.
pub fn strip(sql: &str, terminator: &str, key: &str) -> Result<String> {
    rewrite(sql, terminator, key, |statement| match find_where(statement) {
        Some(index) => statement[..index].trim_end().to_string(),
        None => statement.to_string(),
    })
}

fn rewrite(
    sql: &str,
    terminator: &str,
    key: &str,
    edit: impl FnOnce(&str) -> String,
) -> Result<String> {
    let statements = split_statements(sql, terminator);
    let Some(target) = statements
        .iter()
        .position(|statement| contains_code(statement, key))
    else {
        return Err(Error::invalid_statement(format!(
            "no statement containing `{key}` found"
        )));
    };

    let mut edit = Some(edit);
    let mut ret = String::with_capacity(sql.len());

    for (index, statement) in statements.into_iter().enumerate() {
        if index > 0 {
            ret.push_str(terminator);
        }

        if index == target {
            if let Some(edit) = edit.take() {
                ret.push_str(&edit(statement));
                continue;
            }
        }

        ret.push_str(statement);
    }

    if !terminator.is_empty() && sql.ends_with(terminator) && !ret.ends_with(terminator) {
        ret.push_str(terminator);
    }

    Ok(ret)
}

/// Splits on the terminator, dropping empty fragments.
fn split_statements<'a>(sql: &'a str, terminator: &str) -> Vec<&'a str> {
    let mut statements = vec![];
    let mut start = 0;

    if terminator.is_empty() {
        return vec![sql];
    }

    for (index, _, _) in Code::new(sql) {
        if index < start || !sql[index..].starts_with(terminator) {
            continue;
        }

        if index > start {
            statements.push(&sql[start..index]);
        }
        start = index + terminator.len();
    }

    if start < sql.len() {
        statements.push(&sql[start..]);
    }

    statements
}

fn contains_code(statement: &str, key: &str) -> bool {
    !key.is_empty()
        && Code::new(statement).any(|(index, _, _)| statement[index..].starts_with(key))
}

/// Byte offset of the first top-level `WHERE` keyword.
fn find_where(statement: &str) -> Option<usize> {
    const KEYWORD: &str = "WHERE";

    Code::new(statement).find_map(|(index, c, depth)| {
        if depth != 0 || !c.eq_ignore_ascii_case(&'w') {
            return None;
        }

        let candidate = statement.get(index..index + KEYWORD.len())?;
        if !candidate.eq_ignore_ascii_case(KEYWORD) {
            return None;
        }

        let before = statement[..index].chars().next_back();
        let after = statement[index + KEYWORD.len()..].chars().next();

        (!before.is_some_and(is_word) && !after.is_some_and(is_word)).then_some(index)
    })
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
