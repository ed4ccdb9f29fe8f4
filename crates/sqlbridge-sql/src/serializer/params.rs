use super::{Formatter, ToSql};

use sqlbridge_core::{stmt::Value, Error, ParameterBag, ParameterNameGenerator, Result};

/// Receives constants found while serializing expressions.
pub trait Params {
    /// Binds `value`, returning the placeholder that references it.
    fn push(&mut self, value: &Value) -> Result<Placeholder>;
}

/// A named parameter reference, written as `@name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder(pub String);

/// Binds constants into a [`ParameterBag`] as `__p_0`, `__p_1`, ...
///
/// Names already present in the bag are skipped, so predicate parameters
/// never clash with the ones bound by modification commands.
pub struct Bind<'a> {
    bag: &'a mut ParameterBag,
    names: ParameterNameGenerator,
}

impl<'a> Bind<'a> {
    pub fn new(bag: &'a mut ParameterBag) -> Bind<'a> {
        Bind {
            bag,
            names: ParameterNameGenerator::with_prefix("__p_"),
        }
    }
}

impl Params for Bind<'_> {
    fn push(&mut self, value: &Value) -> Result<Placeholder> {
        let name = loop {
            let name = self.names.generate_next();
            if !self.bag.contains(&name) {
                break name;
            }
        };

        self.bag.insert(name.clone(), value.clone())?;
        Ok(Placeholder(name))
    }
}

/// Fragments written from modification commands reference parameters the
/// commands already named, so they never bind constants.
impl Params for () {
    fn push(&mut self, _value: &Value) -> Result<Placeholder> {
        Err(Error::invalid_statement(
            "constant values cannot be bound in this statement",
        ))
    }
}

impl ToSql for &Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('@');
        f.dst.push_str(&self.0);
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        (&self).to_sql(f);
    }
}
