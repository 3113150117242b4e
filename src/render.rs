mod context;
mod pipe;

pub use crate::render::{context::Context, pipe::Pipe};

use crate::{
    compile::{compile_with, Instruction, Path, Template},
    lambda::{Invocation, Lambda},
    log::{error_write, Error},
    partials::Partials,
    store::Store,
    syntax::Syntax,
    value::Value,
};
use std::fmt::Write;

/// Render a [`Template`].
///
/// Provides a shortcut to quickly render a `Template` when no partials are
/// needed. Every partial tag renders nothing.
///
/// You may also prefer to create an [`Engine`][`crate::Engine`], which renders
/// its registered templates as partials.
///
/// # Errors
///
/// Returns an [`Error`] if a lambda fails, or returns text that is not a
/// valid template.
///
/// # Examples
///
/// ```
/// use stache::{compile, render, Store};
///
/// let template = compile("hello, {{ name }}!");
/// assert!(template.is_ok());
///
/// let output = render(&template.unwrap(), &Store::new().with_must("name", "taylor"));
/// assert_eq!(output.unwrap(), "hello, taylor!");
/// ```
pub fn render(template: &Template, store: &Store) -> Result<String, Error> {
    template.render(store.as_value(), &())
}

pub struct Renderer<'render, P>
where
    P: ?Sized,
{
    /// The template being rendered.
    template: &'render Template,
    /// Source of templates for partial tags.
    partials: &'render P,
}

impl<'render, P> Renderer<'render, P>
where
    P: Partials + ?Sized,
{
    /// Create a new Renderer.
    #[inline]
    pub fn new(template: &'render Template, partials: &'render P) -> Self {
        Self { template, partials }
    }

    /// Render the [`Template`] stored inside the [`Renderer`] with the given data.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if a lambda fails, or writing to the buffer fails.
    pub fn render(&self, data: &Value) -> Result<String, Error> {
        let mut buffer = String::new();
        let mut pipe = Pipe::new(&mut buffer);

        self.render_scope(0, &Context::new(data), &mut pipe)?;
        Ok(buffer)
    }

    /// Execute the [`Scope`][`crate::compile::Scope`] at the given index.
    fn render_scope(
        &self,
        index: usize,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let Some(scope) = self.template.scope(index) else {
            return Ok(());
        };

        for instruction in &scope.instructions {
            match instruction {
                Instruction::Text(text) => pipe.write_str(text).map_err(|_| error_write())?,
                Instruction::Indent => pipe.write_indent(),
                Instruction::Variable { path, escape } => {
                    self.render_variable(path, *escape, context, pipe)?
                }
                Instruction::Section {
                    path,
                    body,
                    raw,
                    syntax,
                } => self.render_section(path, *body, raw, syntax, context, pipe)?,
                Instruction::Inverted { path, body } => {
                    self.render_inverted(path, *body, context, pipe)?
                }
                Instruction::Partial { name, indent } => {
                    self.render_partial(name, indent, context, pipe)?
                }
            }
        }

        Ok(())
    }

    /// Write the value of a variable tag.
    ///
    /// A lambda is called, and its output is rendered as a template with the
    /// delimiters the template was compiled with before being written.
    fn render_variable(
        &self,
        path: &Path,
        escape: bool,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let Some(value) = context.lookup(path) else {
            return Ok(());
        };

        if let Value::Lambda(lambda) = value {
            let syntax = self.template.syntax();
            let output = self.call_lambda(&**lambda, None, syntax, context)?;
            let expanded = self.expand(&stringify(&output), syntax, context)?;

            return pipe
                .write_text(&expanded, escape)
                .map_err(|_| error_write());
        }

        pipe.write_value(value, escape).map_err(|_| error_write())
    }

    /// Render a section.
    ///
    /// The body is executed once for every item of a list, or once for any
    /// other truthy value. A lambda receives the raw text of the section, and
    /// its output is rendered in place of the body.
    fn render_section(
        &self,
        path: &Path,
        body: usize,
        raw: &str,
        syntax: &Syntax,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let Some(value) = context.lookup(path) else {
            return Ok(());
        };

        match value {
            Value::Lambda(lambda) => {
                let output = self.call_lambda(&**lambda, Some(raw), syntax, context)?;
                self.render_text(&stringify(&output), syntax, context, pipe)
            }
            Value::List(items) => {
                for item in items {
                    self.render_scope(body, &context.push(item), pipe)?;
                }
                Ok(())
            }
            value if value.is_truthy() => self.render_scope(body, &context.push(value), pipe),
            _ => Ok(()),
        }
    }

    /// Render an inverted section, which executes the body with the current
    /// context when the value is falsy or an empty list.
    fn render_inverted(
        &self,
        path: &Path,
        body: usize,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let render = match context.lookup(path) {
            None => true,
            Some(Value::List(items)) => items.is_empty(),
            Some(value) => !value.is_truthy(),
        };

        if render {
            self.render_scope(body, context, pipe)?;
        }

        Ok(())
    }

    /// Render a partial with the current context.
    ///
    /// Every line the partial writes is indented by `indent`, on top of the
    /// indentation of any enclosing partial.
    fn render_partial(
        &self,
        name: &str,
        indent: &str,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let Some(partial) = self.partials.get_partial(name) else {
            tracing::trace!(partial = %name, "partial not found, rendering nothing");
            return Ok(());
        };

        let previous = pipe.push_indent(indent);
        let result = Renderer::new(partial, self.partials).render_scope(0, context, pipe);
        pipe.pop_indent(previous);

        result
    }

    /// Call a lambda, bound to the root of the context.
    fn call_lambda(
        &self,
        lambda: &dyn Lambda,
        text: Option<&str>,
        syntax: &Syntax,
        context: &Context<'_>,
    ) -> Result<Value, Error> {
        tracing::trace!(section = text.is_some(), "calling lambda");
        let renderer = |text: &str| self.expand(text, syntax, context);

        lambda.call(&Invocation::new(context.root(), text, &renderer))
    }

    /// Render text as a template into a new string.
    fn expand(&self, text: &str, syntax: &Syntax, context: &Context<'_>) -> Result<String, Error> {
        let mut buffer = String::new();
        let mut pipe = Pipe::new(&mut buffer);
        self.render_text(text, syntax, context, &mut pipe)?;

        Ok(buffer)
    }

    /// Compile text with the given delimiters, and render it into the pipe.
    fn render_text(
        &self,
        text: &str,
        syntax: &Syntax,
        context: &Context<'_>,
        pipe: &mut Pipe<'_>,
    ) -> Result<(), Error> {
        let template = compile_with(text, syntax, None)?;

        Renderer::new(&template, self.partials).render_scope(0, context, pipe)
    }
}

/// Return the text form of a value returned by a lambda.
///
/// Falsy values produce no text.
fn stringify(value: &Value) -> String {
    if value.is_truthy() {
        value.to_string()
    } else {
        String::new()
    }
}
