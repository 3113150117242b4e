//! Contains the `Lambda` trait and the `Invocation` passed to lambdas.
//!
//! A lambda is any type which implements the [`Lambda`][`crate::Lambda`] trait.
//! Lambdas are stored in the data like any other value, usually with
//! [`Store::insert_lambda`][`crate::Store::insert_lambda`], and are called when
//! a tag refers to them.
//!
//! Given this template:
//!
//! ```html
//! {{#bold}}Hi {{name}}.{{/bold}}
//! ```
//!
//! Rendering the section calls the "bold" lambda with the unprocessed text of the
//! section body, `Hi {{name}}.`, available through [`Invocation::text`]. Whatever the
//! lambda returns is compiled as a template, with the delimiters that were active
//! at the section, and rendered against the current context.
//!
//! When a lambda is used as a variable, such as `{{bold}}`, it receives no text.
//! The returned value is compiled as a template with the delimiters the template
//! was compiled with, rendered, and escaped unless the tag was `{{{bold}}}` or
//! `{{&bold}}`.
//!
//! Lambdas are called every time the tag is rendered, results are never cached.
//!
//! # Examples
//!
//! ```rust
//! use stache::{compile, render, Store, Value};
//!
//! let store = Store::new()
//!     .with_must("name", "Willy")
//!     .with_lambda("bold", |call| {
//!         let inner = call.render(call.text().unwrap_or_default())?;
//!         Ok(Value::from(format!("<b>{inner}</b>")))
//!     });
//!
//! let template = compile("{{#bold}}Hi {{name}}.{{/bold}}").unwrap();
//!
//! assert_eq!(render(&template, &store).unwrap(), "<b>Hi Willy.</b>");
//! ```
use crate::{log::Error, value::Value};
use std::fmt::Debug;

/// Describes a type which can produce a value, or template text, when a tag
/// refers to it.
pub trait Lambda: Send + Sync {
    /// Execute the lambda and return a new Value as output.
    ///
    /// The output is converted to text and compiled as a template.
    fn call(&self, invocation: &Invocation<'_>) -> Result<Value, Error>;
}

/// Allows any function matching the signature of `call` to be used as a
/// `Lambda`, instead of requiring a struct be created.
impl<F> Lambda for F
where
    F: Fn(&Invocation<'_>) -> Result<Value, Error> + Send + Sync,
{
    fn call(&self, invocation: &Invocation<'_>) -> Result<Value, Error> {
        self(invocation)
    }
}

/// Information about a single call to a [`Lambda`].
pub struct Invocation<'call> {
    /// Data the template is being rendered with.
    root: &'call Value,
    /// Unprocessed section text, if the lambda was called by a section.
    text: Option<&'call str>,
    /// Renders text as a template in the current context.
    renderer: &'call dyn Fn(&str) -> Result<String, Error>,
}

impl<'call> Invocation<'call> {
    pub(crate) fn new(
        root: &'call Value,
        text: Option<&'call str>,
        renderer: &'call dyn Fn(&str) -> Result<String, Error>,
    ) -> Self {
        Self {
            root,
            text,
            renderer,
        }
    }

    /// Return the data the template is being rendered with.
    #[inline]
    pub fn root(&self) -> &'call Value {
        self.root
    }

    /// Return the unprocessed text of the section that called the lambda.
    ///
    /// Returns `None` when the lambda was called by a variable tag.
    #[inline]
    pub fn text(&self) -> Option<&'call str> {
        self.text
    }

    /// Compile the text as a template and render it in the current context,
    /// with the delimiters that are active where the lambda was called.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the text is not a valid template.
    pub fn render(&self, text: &str) -> Result<String, Error> {
        (self.renderer)(text)
    }
}

impl Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("root", &self.root)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}
