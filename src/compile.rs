mod parse;
mod program;
mod scan;
mod template;

pub use crate::compile::{
    parse::{
        token::{Path, Section, Token},
        Parser,
    },
    program::{Compiler, Instruction, Scope},
    template::Template,
};

use crate::{log::Error, syntax::Syntax};
use std::fmt::Display;

/// Compile a [`Template`] from the given text.
///
/// Provides a shortcut to quickly compile a `Template` with the default
/// `{{ }}` delimiters, without creating an [`Engine`][`crate::Engine`].
///
/// # Errors
///
/// Returns an [`Error`] when the text is not a valid template, such as when a
/// tag or section is never closed.
///
/// # Examples
///
/// ```
/// use stache::compile;
///
/// assert!(compile("{{#people}}{{name}}{{/people}}").is_ok());
/// assert!(compile("{{#people}}{{name}}").is_err());
/// ```
pub fn compile(text: &str) -> Result<Template, Error> {
    compile_with(text, &Syntax::default(), None)
}

/// Compile a [`Template`] with the given starting [`Syntax`].
///
/// The `name` is attached to any [`Error`] and to the returned `Template`.
pub(crate) fn compile_with(
    text: &str,
    syntax: &Syntax,
    name: Option<&str>,
) -> Result<Template, Error> {
    let tokens = Parser::new(text, syntax)
        .and_then(Parser::parse)
        .map_err(|error| match name {
            Some(name) => error.with_name(name),
            None => error,
        })?;
    let scopes = Compiler::new().compile(tokens);
    tracing::debug!(
        name = name.unwrap_or("?"),
        scopes = scopes.len(),
        "compiled template"
    );

    Ok(Template::new(name.map(String::from), syntax.clone(), scopes))
}

/// The character following an open delimiter, which decides the kind of tag.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sigil {
    /// No sigil, an escaped variable - `{{name}}`.
    Escaped,
    /// An unescaped variable - `{{{name}}}`.
    Triple,
    /// An unescaped variable - `{{&name}}`.
    Ampersand,
    /// Beginning of a section - `{{#name}}`.
    Section,
    /// Beginning of an inverted section - `{{^name}}`.
    Inverted,
    /// End of a section - `{{/name}}`.
    Close,
    /// A partial - `{{>name}}`.
    Partial,
    /// A delimiter change - `{{=<% %>=}}`.
    Delimiters,
    /// A comment - `{{! ... }}`.
    Comment,
}

impl Sigil {
    /// Return the [`Sigil`] represented by the given text.
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some("{") => Sigil::Triple,
            Some("&") => Sigil::Ampersand,
            Some("#") => Sigil::Section,
            Some("^") => Sigil::Inverted,
            Some("/") => Sigil::Close,
            Some(">") => Sigil::Partial,
            Some("=") => Sigil::Delimiters,
            Some("!") => Sigil::Comment,
            _ => Sigil::Escaped,
        }
    }

    /// Return true if a tag of this kind may stand alone on a line, in which
    /// case the whole line is removed from the output.
    ///
    /// Only variables are never standalone.
    pub fn is_standalone(&self) -> bool {
        !matches!(self, Sigil::Escaped | Sigil::Triple | Sigil::Ampersand)
    }

    /// Return true if the content of the tag is free text rather than a key.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Sigil::Comment | Sigil::Delimiters)
    }
}

impl Display for Sigil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sigil::Escaped => write!(f, ""),
            Sigil::Triple => write!(f, "{{"),
            Sigil::Ampersand => write!(f, "&"),
            Sigil::Section => write!(f, "#"),
            Sigil::Inverted => write!(f, "^"),
            Sigil::Close => write!(f, "/"),
            Sigil::Partial => write!(f, ">"),
            Sigil::Delimiters => write!(f, "="),
            Sigil::Comment => write!(f, "!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compile, Sigil};
    use crate::log::ErrorKind;

    #[test]
    fn test_sigil_standalone() {
        assert!(!Sigil::Escaped.is_standalone());
        assert!(!Sigil::Triple.is_standalone());
        assert!(!Sigil::Ampersand.is_standalone());
        assert!(Sigil::Section.is_standalone());
        assert!(Sigil::Comment.is_standalone());
        assert!(Sigil::Partial.is_standalone());
    }

    #[test]
    fn test_compile_errors() {
        let kind = |text: &str| compile(text).unwrap_err().kind();

        assert_eq!(kind("{{#a}}"), Some(ErrorKind::UnclosedSection));
        assert_eq!(kind("{{/a}}"), Some(ErrorKind::UnopenedSection));
        assert_eq!(kind("{{#a}}{{/b}}"), Some(ErrorKind::MismatchedSection));
        assert_eq!(kind("hello {{name"), Some(ErrorKind::UnclosedTag));
        assert_eq!(kind("{{=<%=}}"), Some(ErrorKind::InvalidDelimiters));
        assert_eq!(kind("{{#}}{{/}}"), Some(ErrorKind::EmptyTag));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let text = "{{#list}}\n  {{name}}\n{{/list}}\n{{> footer}}";

        assert_eq!(compile(text).unwrap(), compile(text).unwrap());
    }
}
