use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use sqlbridge_core::{
    stmt::{BinaryOp, Expr, ExprColumn},
    Error,
};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(operands) if operands.is_empty() => fmt!(f, "1 = 1"),
            Expr::And(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " AND "));
            }
            Expr::Or(operands) if operands.is_empty() => fmt!(f, "1 = 0"),
            Expr::Or(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " OR "));
            }
            Expr::BinaryOp(expr) => match (expr.op, &*expr.rhs) {
                // `= NULL` never matches
                (BinaryOp::Eq, rhs) if rhs.is_value_null() => fmt!(f, &*expr.lhs " IS NULL"),
                (BinaryOp::Ne, rhs) if rhs.is_value_null() => {
                    fmt!(f, &*expr.lhs " IS NOT NULL")
                }
                (op, rhs) => fmt!(f, &*expr.lhs " " op " " rhs),
            },
            Expr::Column(expr) => fmt!(f, expr),
            Expr::InList(expr) if expr.list.is_empty() => fmt!(f, "1 = 0"),
            Expr::InList(expr) => {
                fmt!(f, &*expr.expr " IN (" Comma(&expr.list) ")");
            }
            Expr::IsNull(expr) => {
                let op = if expr.negate {
                    " IS NOT NULL"
                } else {
                    " IS NULL"
                };
                fmt!(f, &*expr.expr op);
            }
            Expr::Like(expr) => fmt!(f, &*expr.expr " LIKE " expr.pattern.as_ref()),
            Expr::Not(expr) => fmt!(f, "NOT " Operand(expr)),
            Expr::Value(value) => match f.params.push(value) {
                Ok(placeholder) => fmt!(f, placeholder),
                Err(err) => f.fail(err),
            },
        }
    }
}

/// Wraps compound operands in parentheses.
struct Operand<'a>(&'a Expr);

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Expr::And(operands) | Expr::Or(operands) if operands.len() > 1 => {
                f.dst.push('(');
                fmt!(f, self.0);
                f.dst.push(')');
            }
            expr => fmt!(f, expr),
        }
    }
}

impl ToSql for &ExprColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Some(entity) = f.sources.get(self.source).copied() else {
            f.fail(Error::invalid_argument(
                "predicate",
                format!("column `{}` refers to a missing source", self.property),
            ));
            return;
        };

        let Some(property) = entity.property(&self.property) else {
            f.fail(Error::invalid_argument(
                "predicate",
                format!(
                    "entity `{}` has no property `{}`",
                    entity.name, self.property
                ),
            ));
            return;
        };

        if f.alias {
            fmt!(f, "t" self.source ".");
        }

        fmt!(f, Ident(&property.column));
    }
}

impl ToSql for BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        });
    }
}
