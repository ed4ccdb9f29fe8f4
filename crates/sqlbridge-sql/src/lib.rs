pub mod serializer;
pub use serializer::{Flavor, Serializer};

pub mod where_clause;
