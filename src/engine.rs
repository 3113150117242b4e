use crate::{
    compile::{compile_with, Template},
    log::{error_duplicate_template, error_missing_template, Error},
    partials::Partials,
    store::Store,
    syntax::Syntax,
};
use std::collections::HashMap;

/// Facilitates compiling and rendering templates, and provides storage
/// for named templates.
///
/// Every template added to the `Engine` is available as a partial to the
/// templates it renders.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// Delimiters that templates are compiled with.
    syntax: Syntax,
    /// Templates that this Engine is aware of.
    templates: HashMap<String, Template>,
}

impl Engine {
    /// Create a new instance of [`Engine`] with the given [`Syntax`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{Builder, Engine, Store};
    ///
    /// let engine = Engine::new(Builder::new().with_delimiters("<%", "%>").to_syntax());
    /// let template = engine.compile_must("hello, <% name %>!");
    /// let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!");
    /// ```
    #[inline]
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            templates: HashMap::new(),
        }
    }

    /// Return the [`Syntax`] templates are compiled with.
    #[inline]
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Compile a new [`Template`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails, which most likely means the source
    /// contains invalid syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Engine;
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("hello, {{ name }}!");
    /// assert!(template.is_ok());
    /// ```
    #[inline]
    pub fn compile(&self, text: &str) -> Result<Template, Error> {
        compile_with(text, &self.syntax, None)
    }

    /// Compile a new [`Template`].
    ///
    /// # Panics
    ///
    /// Panics when compilation fails, which most likely means the source
    /// contains invalid syntax.
    #[inline]
    pub fn compile_must(&self, text: &str) -> Template {
        self.compile(text).unwrap()
    }

    /// Render a [`Template`] with the given [`Store`].
    ///
    /// Partial tags are resolved with the templates stored in the [`Engine`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a lambda fails, or returns text that is not a
    /// valid template.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::{Store, Engine};
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template("greeting", "hello, {{ name }}!").unwrap();
    ///
    /// let template = engine.compile_must("{{> greeting}}");
    /// let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!")
    /// ```
    #[inline]
    pub fn render(&self, template: &Template, store: &Store) -> Result<String, Error> {
        template.render(store.as_value(), self)
    }

    /// Render the named [`Template`] with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if no `Template` with the given name exists, or
    /// rendering fails.
    pub fn render_named(&self, name: &str, store: &Store) -> Result<String, Error> {
        let template = self
            .get_template(name)
            .ok_or_else(|| error_missing_template(name))?;

        self.render(template, store).map_err(|error| match error.name() {
            Some(_) => error,
            None => error.with_name(name),
        })
    }

    /// Compile and store a new [`Template`] with the given name.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a `Template` with the given name already exists,
    /// or when compilation fails, which most likely means the source contains invalid
    /// syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Engine;
    ///
    /// let mut engine = Engine::default();
    /// let result = engine.add_template("template_name", "hello, {{ name }}!");
    /// assert!(result.is_ok());
    ///
    /// let second = engine.add_template("template_name", "hello again");
    /// assert!(second.is_err());
    /// ```
    pub fn add_template(&mut self, name: &str, text: &str) -> Result<(), Error> {
        if self.templates.contains_key(name) {
            return Err(error_duplicate_template(name));
        }

        self.add_template_must(name, text)
    }

    /// Compile and store a new [`Template`] with the given name.
    ///
    /// If a `Template` with the given name already exists in the [`Engine`],
    /// it is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails, which most likely means the source
    /// contains invalid syntax.
    pub fn add_template_must(&mut self, name: &str, text: &str) -> Result<(), Error> {
        let template = compile_with(text, &self.syntax, Some(name))?;
        let replaced = self.templates.insert(name.to_owned(), template).is_some();
        tracing::debug!(name, replaced, "added template");

        Ok(())
    }

    /// Compile and store a new [`Template`] with the given name.
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a `Template` with the given name already
    /// exists, or compilation fails.
    #[inline]
    pub fn with_template(mut self, name: &str, text: &str) -> Result<Self, Error> {
        self.add_template(name, text)?;
        Ok(self)
    }

    /// Return the named [`Template`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Engine;
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("template_name", "hello, {{ name }}!").unwrap();
    ///
    /// let template = engine.get_template("template_name");
    /// assert!(template.is_some());
    /// ```
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Remove the named [`Template`], returning it if it existed.
    pub fn remove_template(&mut self, name: &str) -> Option<Template> {
        let removed = self.templates.remove(name);
        tracing::debug!(name, removed = removed.is_some(), "removed template");

        removed
    }

    /// Remove every [`Template`].
    pub fn clear_templates(&mut self) {
        tracing::debug!(count = self.templates.len(), "cleared templates");
        self.templates.clear();
    }
}

impl Partials for Engine {
    #[inline]
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get_template(name)
    }
}
