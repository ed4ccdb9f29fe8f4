mod expr;
pub use expr::{BinaryOp, Expr, ExprBinaryOp, ExprColumn, ExprInList, ExprIsNull, ExprLike, IntoExpr};

mod query;
pub use query::{Direction, Join, JoinKind, OrderByExpr, Query, Source};

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod values;
pub use values::{FromRecord, Values};
