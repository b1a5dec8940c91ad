/// Build an INSERT row: ordered `(column, value)` pairs.
///
/// # Example
/// ```ignore
/// use sqlstmt::{insert, row};
///
/// let q = insert("users").values([
///     row! { "active" => false, "ts" => 1 },
///     row! { "active" => false, "ts" => 2 },
/// ]);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Value)>::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::string::String::from($column), $crate::Value::from($value))),+]
    };
}
