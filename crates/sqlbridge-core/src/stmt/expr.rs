use super::Value;

/// A boolean or scalar expression over entity properties.
///
/// Columns are referenced by *logical* property name and by the index of the
/// query source they belong to. The SQL serializer resolves them to physical
/// column names using the entity metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND of all operands
    And(Vec<Expr>),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// Property of a query source
    Column(ExprColumn),

    /// `expr IN (list)`
    InList(ExprInList),

    /// `expr IS [NOT] NULL`
    IsNull(ExprIsNull),

    /// `expr LIKE pattern`
    Like(ExprLike),

    /// Negation
    Not(Box<Expr>),

    /// OR of all operands
    Or(Vec<Expr>),

    /// Constant, bound as a parameter
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    /// Index of the source in the query's FROM list. Always 0 for
    /// insert/update/delete predicates.
    pub source: usize,

    /// Logical property name
    pub property: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub expr: Box<Expr>,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,
}

/// Conversion into an expression; implemented for expressions and for every
/// type that converts into a [`Value`].
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

macro_rules! impl_into_expr_for_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl IntoExpr for $ty {
                fn into_expr(self) -> Expr {
                    Expr::Value(Value::from(self))
                }
            }
        )*
    };
}

impl_into_expr_for_value!(
    Value,
    bool,
    i32,
    i64,
    f64,
    String,
    &str,
    &String,
    Vec<u8>,
    Option<bool>,
    Option<i32>,
    Option<i64>,
    Option<f64>,
    Option<String>,
    Option<&str>
);

impl Expr {
    /// Property of the first (or only) source.
    pub fn col(property: impl Into<String>) -> Expr {
        Expr::col_of(0, property)
    }

    /// Property of the source at `source` in a joined query.
    pub fn col_of(source: usize, property: impl Into<String>) -> Expr {
        Expr::Column(ExprColumn {
            source,
            property: property.into(),
        })
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn binary_op(lhs: impl IntoExpr, op: BinaryOp, rhs: impl IntoExpr) -> Expr {
        Expr::BinaryOp(ExprBinaryOp {
            lhs: Box::new(lhs.into_expr()),
            op,
            rhs: Box::new(rhs.into_expr()),
        })
    }

    pub fn eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Ne, rhs)
    }

    pub fn gt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Gt, rhs)
    }

    pub fn ge(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Ge, rhs)
    }

    pub fn lt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Lt, rhs)
    }

    pub fn le(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary_op(self, BinaryOp::Le, rhs)
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull(ExprIsNull {
            expr: Box::new(self),
            negate: false,
        })
    }

    pub fn is_not_null(self) -> Expr {
        Expr::IsNull(ExprIsNull {
            expr: Box::new(self),
            negate: true,
        })
    }

    pub fn in_list<I>(self, list: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Expr::InList(ExprInList {
            expr: Box::new(self),
            list: list.into_iter().map(IntoExpr::into_expr).collect(),
        })
    }

    pub fn like(self, pattern: impl IntoExpr) -> Expr {
        Expr::Like(ExprLike {
            expr: Box::new(self),
            pattern: Box::new(pattern.into_expr()),
        })
    }

    /// Combines with AND, flattening nested conjunctions.
    pub fn and(self, rhs: impl IntoExpr) -> Expr {
        let mut operands = match self {
            Expr::And(operands) => operands,
            expr => vec![expr],
        };
        match rhs.into_expr() {
            Expr::And(rhs) => operands.extend(rhs),
            rhs => operands.push(rhs),
        }
        Expr::And(operands)
    }

    /// Combines with OR, flattening nested disjunctions.
    pub fn or(self, rhs: impl IntoExpr) -> Expr {
        let mut operands = match self {
            Expr::Or(operands) => operands,
            expr => vec![expr],
        };
        match rhs.into_expr() {
            Expr::Or(rhs) => operands.extend(rhs),
            rhs => operands.push(rhs),
        }
        Expr::Or(operands)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Expr::Value(Value::Null))
    }
}
