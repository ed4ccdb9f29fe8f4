/// Builds a [`Record`](crate::stmt::Record) from `"property" => value` pairs.
///
/// ```
/// let values = sqlbridge_core::record! {
///     "Name" => "hello",
///     "UserId" => 1_i64,
/// };
/// assert_eq!(values.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {{
        let mut record = $crate::stmt::Record::new();
        $(
            record.insert($name, $value);
        )+
        record
    }};
}
