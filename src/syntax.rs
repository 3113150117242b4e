//! A [`Syntax`] describes the delimiters that identify tags within templates.
//!
//! Every template begins with the delimiters of the `Syntax` it is compiled
//! with, `{{` and `}}` by default. A delimiter change tag such as `{{=<% %>=}}`
//! replaces them for the remainder of that template only.
use crate::log::{Error, ErrorKind};

/// Default open delimiter.
pub const OPEN: &str = "{{";
/// Default close delimiter.
pub const CLOSE: &str = "}}";

/// A pair of delimiters that mark the beginning and end of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syntax {
    open: String,
    close: String,
}

impl Syntax {
    /// Create a new [`Syntax`] from the given delimiters.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind [`ErrorKind::InvalidDelimiters`] when either
    /// delimiter is empty, or contains whitespace or `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Syntax;
    ///
    /// assert!(Syntax::new("<%", "%>").is_ok());
    /// assert!(Syntax::new("<%", "").is_err());
    /// ```
    pub fn new<T>(open: T, close: T) -> Result<Self, Error>
    where
        T: Into<String>,
    {
        let (open, close) = (open.into(), close.into());
        for delimiter in [&open, &close] {
            if !is_valid_delimiter(delimiter) {
                return Err(Error::build(ErrorKind::InvalidDelimiters.to_string())
                    .with_kind(ErrorKind::InvalidDelimiters)
                    .with_help(format!(
                        "delimiter `{delimiter}` must not be empty, \
                        and must not contain whitespace or `=`"
                    )));
            }
        }

        Ok(Self { open, close })
    }

    /// Create a new [`Syntax`] from the content of a delimiter change tag,
    /// such as `<% %>` from `{{=<% %>=}}`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the content does not contain exactly two
    /// valid delimiters separated by whitespace.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut parts = content.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) => Self::new(open, close),
            _ => Err(Error::build(ErrorKind::InvalidDelimiters.to_string())
                .with_kind(ErrorKind::InvalidDelimiters)
                .with_help("expected two delimiters separated by whitespace, like `{{=<% %>=}}`")),
        }
    }

    /// Return the open delimiter.
    #[inline]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Return the close delimiter.
    #[inline]
    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            open: OPEN.to_string(),
            close: CLOSE.to_string(),
        }
    }
}

fn is_valid_delimiter(delimiter: &str) -> bool {
    !delimiter.is_empty() && !delimiter.chars().any(|c| c.is_whitespace() || c == '=')
}

/// Provides methods to build a [`Syntax`].
///
/// # Example
///
/// ```
/// use stache::Builder;
///
/// let syntax = Builder::new()
///     .with_delimiters("<%", "%>")
///     .to_syntax();
///
/// assert_eq!(syntax.open(), "<%");
/// ```
#[derive(Debug, Clone)]
pub struct Builder<'marker> {
    delimiters: (&'marker str, &'marker str),
}

impl<'marker> Builder<'marker> {
    /// Create a new [`Builder`].
    ///
    /// The `Builder` has default delimiters:
    ///
    /// ```text
    /// {{ name }}
    /// ```
    ///
    /// To proceed with these defaults, you may immediately call `to_syntax` to receive the
    /// [`Syntax`] instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            delimiters: (OPEN, CLOSE),
        }
    }

    /// Set the delimiters.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Builder;
    ///
    /// let mut builder = Builder::new();
    /// builder.set_delimiters("[[", "]]");
    /// ```
    #[inline]
    pub fn set_delimiters(&mut self, open: &'marker str, close: &'marker str) {
        self.delimiters = (open, close);
    }

    /// Set the delimiters.
    ///
    /// Returns the [`Builder`], so additional methods may be chained.
    #[inline]
    pub fn with_delimiters(mut self, open: &'marker str, close: &'marker str) -> Self {
        self.set_delimiters(open, close);

        self
    }

    /// Return a [`Syntax`] instance from the delimiters in this [`Builder`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the delimiters are invalid.
    pub fn try_to_syntax(self) -> Result<Syntax, Error> {
        let (open, close) = self.delimiters;

        Syntax::new(open, close)
    }

    /// Return a [`Syntax`] instance from the delimiters in this [`Builder`].
    ///
    /// # Panics
    ///
    /// Panics when the delimiters are invalid.
    pub fn to_syntax(self) -> Syntax {
        self.try_to_syntax().unwrap()
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Builder, Syntax};
    use crate::log::ErrorKind;

    #[test]
    fn test_default() {
        let syntax = Builder::new().to_syntax();

        assert_eq!(syntax, Syntax::default());
        assert_eq!(syntax.open(), "{{");
        assert_eq!(syntax.close(), "}}");
    }

    #[test]
    fn test_parse() {
        let syntax = Syntax::parse(" <%   %> ").unwrap();

        assert_eq!(syntax.open(), "<%");
        assert_eq!(syntax.close(), "%>");
    }

    #[test]
    fn test_parse_invalid() {
        for content in ["", "<%", "<% %> ??", "<% ="] {
            let error = Syntax::parse(content).unwrap_err();
            assert_eq!(error.kind(), Some(ErrorKind::InvalidDelimiters), "{content}");
        }
    }

    #[test]
    fn test_builder_invalid() {
        assert!(Builder::new().with_delimiters("< %", "%>").try_to_syntax().is_err());
        assert!(Builder::new().with_delimiters("", "%>").try_to_syntax().is_err());
    }
}
