use super::{Comma, Flavor, Formatter, Ident, Params, TableName, ToSql};

use sqlbridge_core::stmt::{Direction, JoinKind, OrderByExpr, Query};

impl ToSql for &Query {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = Comma(self.sources.iter().enumerate().flat_map(|(index, source)| {
            source
                .entity
                .properties
                .iter()
                .map(move |property| AliasedColumn(index, &property.column))
        }));

        fmt!(f, "SELECT " columns " FROM ");

        for (index, source) in self.sources.iter().enumerate() {
            let table = TableName(&source.entity.table, source.entity.schema.as_deref());

            match &source.join {
                None => fmt!(f, table " AS t" index),
                Some(join) => {
                    let kind = match join.kind {
                        JoinKind::Inner => " INNER JOIN ",
                        JoinKind::Left => " LEFT JOIN ",
                    };
                    let on = &join.on;
                    fmt!(f, kind table " AS t" index " ON " on);
                }
            }
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        match (self.limit, self.offset) {
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT " limit " OFFSET " offset),
            (None, Some(offset)) => match f.serializer.flavor {
                // SQLite and MySQL only accept OFFSET after a LIMIT
                Flavor::Sqlite => fmt!(f, " LIMIT -1 OFFSET " offset),
                Flavor::Mysql => fmt!(f, " LIMIT 18446744073709551615 OFFSET " offset),
                Flavor::Postgresql => fmt!(f, " OFFSET " offset),
            },
            (None, None) => {}
        }
    }
}

struct AliasedColumn<'a>(usize, &'a str);

impl ToSql for AliasedColumn<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "t" self.0 "." Ident(self.1));
    }
}

impl ToSql for &OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };

        fmt!(f, &self.expr direction);
    }
}
