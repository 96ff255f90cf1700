//! The [`php_array!`] macro for building [`PhpValue`](crate::PhpValue)
//! array literals.

/// Builds a [`PhpValue::Array`](crate::PhpValue::Array) with PHP's
/// `key => value` syntax.
///
/// The map form takes `key => value` pairs; keys may be integers or strings,
/// mirroring what the wire format allows. The list form takes bare values
/// and assigns `0..n` integer keys the way `$array[] = $value` does.
///
/// # Examples
///
/// ```rust
/// use serde_php::{php_array, ArrayKey, PhpValue};
///
/// let map = php_array! { "name" => "Alice", "age" => 30 };
/// let list = php_array![1, 2, 3];
/// let empty = php_array![];
///
/// assert_eq!(map.to_php_string().unwrap(), r#"a:2:{s:4:"name";s:5:"Alice";s:3:"age";i:30;}"#);
/// assert_eq!(list.to_php_string().unwrap(), "a:3:{i:0;i:1;i:1;i:2;i:2;i:3;}");
/// assert_eq!(empty.to_php_string().unwrap(), "a:0:{}");
/// ```
#[macro_export]
macro_rules! php_array {
    () => {
        $crate::PhpValue::Array($crate::PhpArray::new())
    };

    // Map form: explicit keys
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut array = $crate::PhpArray::new();
        $(
            array.insert($crate::ArrayKey::from($key), $crate::PhpValue::from($value));
        )+
        $crate::PhpValue::Array(array)
    }};

    // List form: implicit 0..n keys
    ($($value:expr),+ $(,)?) => {{
        let mut array = $crate::PhpArray::new();
        $(
            array.push($crate::PhpValue::from($value));
        )+
        $crate::PhpValue::Array(array)
    }};
}
