use crate::{
    compile::program::Scope, log::Error, partials::Partials, render::Renderer, syntax::Syntax,
    value::Value,
};

/// A compiled template that can be rendered with some data.
///
/// Created with [`compile`][`crate::compile`] or [`Engine::compile`][`crate::Engine::compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// The name of the [`Template`], when it was registered with an engine.
    name: Option<String>,
    /// Delimiters the template was compiled with.
    syntax: Syntax,
    /// Compiled sub-procedures, the first one is the entry point.
    scopes: Vec<Scope>,
}

impl Template {
    pub(crate) fn new(name: Option<String>, syntax: Syntax, scopes: Vec<Scope>) -> Self {
        Self {
            name,
            syntax,
            scopes,
        }
    }

    /// Return the name of the [`Template`].
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the [`Syntax`] the template was compiled with.
    #[inline]
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Return the compiled scopes, the first one is the entry point.
    #[inline]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Return the [`Scope`] at the given index.
    #[inline]
    pub(crate) fn scope(&self, index: usize) -> Option<&Scope> {
        self.scopes.get(index)
    }

    /// Render the template with the given data, resolving partials with the
    /// given [`Partials`].
    ///
    /// Use `&()` when there are no partials.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the text returned by a lambda cannot be
    /// compiled, or a lambda returns an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{compile, Value};
    /// use std::collections::HashMap;
    ///
    /// let template = compile("{{> greeting}}, {{name}}!").unwrap();
    /// let partials = HashMap::from([("greeting".to_string(), compile("Hello").unwrap())]);
    /// let data = Value::from(serde_json::json!({ "name": "Taylor" }));
    ///
    /// assert_eq!(template.render(&data, &partials).unwrap(), "Hello, Taylor!");
    /// ```
    pub fn render<P>(&self, data: &Value, partials: &P) -> Result<String, Error>
    where
        P: Partials + ?Sized,
    {
        Renderer::new(self, partials).render(data)
    }
}
