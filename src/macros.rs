/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```rust
/// use css_styleguide::{value, Value};
///
/// let palette = value!({ "black": "#000000", "white": "#ffffff" });
/// assert_eq!(
///     palette.as_object().and_then(|o| o.get("white")),
///     Some(&Value::from("#ffffff"))
/// );
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::Array(::std::vec![$($crate::value!($item)),*])
    };

    // Members keep their written order
    ({ $($key:literal : $item:tt),* $(,)? }) => {
        $crate::Value::Object(<$crate::ValueMap as ::std::iter::FromIterator<_>>::from_iter([
            $((::std::string::ToString::to_string($key), $crate::value!($item))),*
        ]))
    };

    ($scalar:expr) => {
        $crate::Value::from($scalar)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value, ValueMap};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(-4.2), Value::Number(Number::Float(-4.2)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_containers() {
        assert_eq!(value!([]), Value::Array(vec![]));
        assert_eq!(value!({}), Value::Object(ValueMap::new()));
        assert_eq!(
            value!(["tiny", 2, null,]),
            Value::Array(vec![Value::from("tiny"), Value::from(2), Value::Null])
        );
    }

    #[test]
    fn test_value_macro_keeps_member_order() {
        let schemes = value!({
            "white": { "background": "#ffffff", "font_color": "#000000" },
            "black": { "background": "#000000", "font_color": "#ffffff" },
        });

        let map = schemes.as_object().unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["white", "black"]);
        assert_eq!(
            map.get("black").and_then(|b| b.as_object()).and_then(|b| b.get("font_color")),
            Some(&Value::from("#ffffff"))
        );
    }
}
