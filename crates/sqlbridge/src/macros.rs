/// Implements [`Values`](crate::Values) and [`FromRecord`](crate::FromRecord)
/// for a struct by listing its fields against property names.
///
/// Every field of the struct must be listed.
///
/// ```
/// #[derive(Debug, Default, PartialEq)]
/// struct Blog {
///     id: i64,
///     name: String,
///     url: Option<String>,
/// }
///
/// sqlbridge::fields!(Blog {
///     id => "Id",
///     name => "Name",
///     url => "Url",
/// });
///
/// use sqlbridge::{FromRecord, Values};
///
/// let mut blog = Blog::default();
/// blog.set("Id", 7_i64.into()).unwrap();
/// assert_eq!(blog.get("Id"), Some(7_i64.into()));
/// assert_eq!(blog.get("Missing"), None);
///
/// let blog = Blog::from_record(sqlbridge::record! { "Id" => 1_i64, "Name" => "b" }).unwrap();
/// assert_eq!(blog.url, None);
/// ```
#[macro_export]
macro_rules! fields {
    ( $ty:ty { $( $field:ident => $name:literal ),+ $(,)? } ) => {
        impl $crate::codegen_support::Values for $ty {
            fn get(&self, name: &str) -> $crate::codegen_support::Option<$crate::codegen_support::Value> {
                match name {
                    $(
                        $name => $crate::codegen_support::Option::Some(
                            $crate::codegen_support::Value::from(::core::clone::Clone::clone(&self.$field)),
                        ),
                    )+
                    _ => $crate::codegen_support::Option::None,
                }
            }

            fn set(
                &mut self,
                name: &str,
                value: $crate::codegen_support::Value,
            ) -> $crate::codegen_support::Result<bool> {
                match name {
                    $(
                        $name => {
                            self.$field = $crate::codegen_support::TryFrom::try_from(value)?;
                            Ok(true)
                        }
                    )+
                    _ => Ok(false),
                }
            }
        }

        impl $crate::codegen_support::FromRecord for $ty {
            fn from_record(
                mut record: $crate::codegen_support::Record,
            ) -> $crate::codegen_support::Result<Self> {
                Ok(Self {
                    $( $field: record.take($name)?, )+
                })
            }
        }
    };
}
