use crate::{
    lambda::Invocation,
    log::Error,
    value::Value,
};
use serde::Serialize;
use std::collections::HashMap;

/// Provides storage for data that templates can be rendered against.
///
/// The `Store` is the root of the context, a map from keys to [`Value`]
/// instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    data: Value,
}

impl Store {
    /// Create a new Store.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: Value::Map(HashMap::new()),
        }
    }

    /// Insert the value into the Store.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let key = key.into();
        let value = Value::serialize(&value).map_err(|error| {
            let help = format!(
                "value for key `{key}` is unserializable: {}",
                error.help().unwrap_or_default()
            );
            error.with_help(help)
        })?;
        self.insert_value(key, value);

        Ok(())
    }

    /// Insert the value into the Store.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value).unwrap();
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);
        self
    }

    /// Insert a [`Value`] into the Store without serialization.
    pub fn insert_value<S, V>(&mut self, key: S, value: V)
    where
        S: Into<String>,
        V: Into<Value>,
    {
        if let Value::Map(map) = &mut self.data {
            map.insert(key.into(), value.into());
        }
    }

    /// Insert a [`Value`] into the Store without serialization.
    ///
    /// Returns the Store, so additional methods may be chained.
    #[inline]
    pub fn with_value<S, V>(mut self, key: S, value: V) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        self.insert_value(key, value);
        self
    }

    /// Insert a lambda into the Store.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{compile, render, Store, Value};
    ///
    /// let mut store = Store::new();
    /// store.insert_lambda("year", |_| Ok(Value::from(2024)));
    ///
    /// let template = compile("{{year}}").unwrap();
    /// assert_eq!(render(&template, &store).unwrap(), "2024");
    /// ```
    pub fn insert_lambda<S, F>(&mut self, key: S, lambda: F)
    where
        S: Into<String>,
        F: Fn(&Invocation<'_>) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.insert_value(key, Value::lambda(lambda));
    }

    /// Insert a lambda into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    #[inline]
    pub fn with_lambda<S, F>(mut self, key: S, lambda: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Invocation<'_>) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.insert_lambda(key, lambda);
        self
    }

    /// Get the value of the given key, if any.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Return the data as a [`Value::Map`].
    #[inline]
    pub fn as_value(&self) -> &Value {
        &self.data
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        store.data
    }
}
