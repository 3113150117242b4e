use crate::{
    lambda::{Invocation, Lambda},
    log::{Error, UNSERIALIZABLE},
};
use serde::Serialize;
use serde_json::Number;
use std::{
    collections::HashMap,
    fmt::{Debug, Display},
    sync::Arc,
};

/// Data that templates are rendered against.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    /// A callable value, see [`Lambda`].
    Lambda(Arc<dyn Lambda>),
}

impl Value {
    /// Create a new [`Value`] from any serializable type.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Value;
    ///
    /// let value = Value::serialize(&vec!["one", "two"]).unwrap();
    /// assert_eq!(value.to_string(), "one,two");
    /// ```
    pub fn serialize<T>(value: &T) -> Result<Self, Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(|error| Error::build(UNSERIALIZABLE).with_help(error.to_string()))
    }

    /// Create a new [`Value::Lambda`] from a closure.
    pub fn lambda<F>(function: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Value::Lambda(Arc::new(function))
    }

    /// Create a new [`Value::Lambda`] from any type implementing [`Lambda`].
    pub fn from_lambda<L>(lambda: L) -> Self
    where
        L: Lambda + 'static,
    {
        Value::Lambda(Arc::new(lambda))
    }

    /// Return true if the value is truthy.
    ///
    /// `Null`, `false`, zero and the empty string are falsy, everything else
    /// is truthy, including empty lists and maps.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(value) => *value,
            Value::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
            Value::String(value) => !value.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Lambda(_) => true,
        }
    }

    /// Return the member with the given key.
    ///
    /// Maps are indexed by key, lists by a key that parses as an index.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::List(list) => key.parse::<usize>().ok().and_then(|index| list.get(index)),
            _ => None,
        }
    }

    /// Return the inner string, if this is a [`Value::String`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Return the inner list, if this is a [`Value::List`].
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Return the inner map, if this is a [`Value::Map`].
    #[inline]
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Writes the text form of the value.
///
/// Lists are joined with `,` and maps are written as `{key: value}` with
/// sorted keys. `Null` and lambdas write nothing.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null | Value::Lambda(_) => Ok(()),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Number(number) => write!(f, "{number}"),
            Value::String(value) => write!(f, "{value}"),
            Value::List(list) => {
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(map) => {
                let mut keys = map.keys().collect::<Vec<_>>();
                keys.sort();
                write!(f, "{{")?;
                for (index, key) in keys.into_iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {}", map[key])?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Value::String(value) => f.debug_tuple("String").field(value).finish(),
            Value::List(list) => f.debug_tuple("List").field(list).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Lambda(_) => write!(f, "Lambda"),
        }
    }
}

/// Lambdas are equal when they are the same instance.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (Value::Map(left), Value::Map(right)) => left == right,
            (Value::Lambda(left), Value::Lambda(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => Value::Number(number),
            serde_json::Value::String(value) => Value::String(value),
            serde_json::Value::Array(list) => {
                Value::List(list.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64, usize);

/// Non-finite numbers become [`Value::Null`].
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T> From<HashMap<String, T>> for Value
where
    T: Into<Value>,
{
    fn from(value: HashMap<String, T>) -> Self {
        Value::Map(
            value
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::{
        compile::compile,
        lambda::{Invocation, Lambda},
        log::Error,
    };
    use serde_json::json;
    use std::collections::HashMap;

    struct Constant(&'static str);

    impl Lambda for Constant {
        fn call(&self, _: &Invocation<'_>) -> Result<Value, Error> {
            Ok(Value::from(self.0))
        }
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!Value::from(falsy.clone()).is_truthy(), "{falsy}");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("0"), json!([]), json!({})] {
            assert!(Value::from(truthy.clone()).is_truthy(), "{truthy}");
        }
        assert!(Value::lambda(|_| Ok(Value::Null)).is_truthy());
    }

    #[test]
    fn test_get() {
        let value = Value::from(json!({ "items": [{ "name": "one" }, { "name": "two" }] }));
        let items = value.get("items").unwrap();

        assert_eq!(items.get("1").and_then(|item| item.get("name")), Some(&Value::from("two")));
        assert_eq!(items.get("2"), None);
        assert_eq!(items.get("name"), None);
        assert_eq!(Value::from("text").get("0"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(json!([1, "a", null, [2, 3]])).to_string(), "1,a,,2,3");
        assert_eq!(
            Value::from(json!({ "b": 2, "a": { "c": "x" } })).to_string(),
            "{a: {c: x}, b: 2}"
        );
    }

    #[test]
    fn test_lambda_equality() {
        let lambda = Value::lambda(|_| Ok(Value::from("x")));

        assert_eq!(lambda, lambda.clone());
        assert_ne!(lambda, Value::lambda(|_| Ok(Value::from("x"))));
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::from(json!(3)));
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(vec!["a", "b"]), Value::from(json!(["a", "b"])));
    }

    #[test]
    fn test_accessors() {
        let value = Value::from(json!({ "list": [1, 2], "name": "stache" }));
        let map = value.as_map().unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["name"].as_str(), Some("stache"));
        assert_eq!(
            value.get("list").and_then(Value::as_list),
            Some(&[Value::from(1), Value::from(2)][..])
        );
        assert_eq!(value.as_list(), None);
        assert_eq!(value.as_str(), None);
        assert_eq!(map["list"].as_map(), None);
    }

    #[test]
    fn test_from_lambda() {
        let data = Value::from(HashMap::from([(
            String::from("word"),
            Value::from_lambda(Constant("hi")),
        )]));

        assert!(matches!(data.get("word"), Some(Value::Lambda(_))));
        assert_eq!(compile("<{{word}}>").unwrap().render(&data, &()).unwrap(), "<hi>");
    }
}
