use super::{Pointer, Visual};
use crate::region::Region;
use std::fmt::{Debug, Display, Formatter, Result};

/// Classifies the structural problems found while compiling a template.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// A tag was opened but its closing delimiter was never found.
    UnclosedTag,
    /// A section was still open when the end of the source was reached.
    UnclosedSection,
    /// A closing tag was found without any open section.
    UnopenedSection,
    /// A closing tag does not match the innermost open section.
    MismatchedSection,
    /// A delimiter change tag does not contain exactly two delimiters.
    InvalidDelimiters,
    /// A tag that requires a key does not have one.
    EmptyTag,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ErrorKind::UnclosedTag => write!(f, "unclosed tag"),
            ErrorKind::UnclosedSection => write!(f, "unclosed section"),
            ErrorKind::UnopenedSection => write!(f, "unopened section"),
            ErrorKind::MismatchedSection => write!(f, "mismatched section"),
            ErrorKind::InvalidDelimiters => write!(f, "invalid delimiters"),
            ErrorKind::EmptyTag => write!(f, "empty tag"),
        }
    }
}

/// Describes an error, and allows adding a contextual help text and visualization.
///
/// # Examples
///
/// Creating an [`Error`] that includes a [`Visual`] of type [`Pointer`]:
///
/// ```
/// use stache::{Error, Region};
///
/// Error::build("unopened section")
///     .with_pointer("hello {{/name}}", Region::new(6..15))
///     .with_name("template.txt")
///     .with_help("remove the closing tag or open it with `{{#name}}`");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: unopened section
///   --> template.txt:1:7
///    |
///  1 | hello {{/name}}
///    |       ^^^^^^^^^
///    |
///   = help: remove the closing tag or open it with `{{#name}}`
/// ```
pub struct Error {
    /// Describes the cause of the [`Error`].
    reason: String,
    /// The structural problem behind the [`Error`], when it comes from compilation.
    kind: Option<ErrorKind>,
    /// Location of the problem within the template source.
    region: Option<Region>,
    /// A visualization to help illustrate the [`Error`].
    visual: Option<Box<dyn Visual>>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The name of the Template that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// The additional fields may be populated using the various methods
    /// defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Error;
    ///
    /// Error::build("template not found")
    ///     .with_help("add it to the engine with `.add_template`");
    /// ```
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            reason: reason.into(),
            kind: None,
            region: None,
            visual: None,
            help: None,
            name: None,
        }
    }

    /// Create a new [`Error`] of the given [`ErrorKind`].
    ///
    /// The reason text is derived from the kind, and the location is
    /// visualized with a [`Pointer`] into the source.
    pub fn parse(kind: ErrorKind, source: &str, region: Region) -> Self {
        Error::build(kind.to_string())
            .with_kind(kind)
            .with_pointer(source, region)
    }

    /// Set the reason text, which is a short summary of the [`Error`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = text.into();

        self
    }

    /// Set the [`ErrorKind`].
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);

        self
    }

    /// Set the name text, which is the name of the [`Template`][`crate::Template`]
    /// that the [`Error`] is related to.
    ///
    /// # Examples
    ///
    /// ```
    /// use stache::Error;
    ///
    /// let error = Error::build("unclosed tag").with_name("header");
    /// assert_eq!(error.name(), Some("header"));
    /// ```
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the [`Visual`], which is a visualization that helps illustrate the
    /// cause of the error.
    pub fn with_visual(mut self, visual: impl Visual + 'static) -> Self {
        self.visual = Some(Box::new(visual));

        self
    }

    /// Set the visualization to a new [`Pointer`] with the given source text and
    /// [`Region`], and remember the `Region` as the location of the `Error`.
    ///
    /// This is a shortcut method for creating a `Pointer` yourself and then
    /// passing it to `with_visual`.
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        let region = region.into();
        self.region = Some(region);
        self.visual = Some(Box::new(Pointer::new(source, region)));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the reason text.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the [`ErrorKind`], if the `Error` came from compilation.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// Return the location of the problem within the template source.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Return the help text.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Return the name of the `Template` that the error is related to.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("reason", &self.reason)
            .field("kind", &self.kind)
            .field("region", &self.region)
            .field("name", &self.name)
            .field("visual", &self.visual)
            .field("help", &self.help)
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "error: {}", self.reason)?;

        match &self.visual {
            Some(visual) if f.alternate() => {
                visual.display(f, self.name.as_deref(), self.help.as_deref())
            }
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Error {}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason
            && self.kind == other.kind
            && self.region == other.region
            && self.help == other.help
            && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use crate::region::Region;

    #[test]
    fn test_display_plain() {
        let error = Error::parse(ErrorKind::UnclosedTag, "{{name", Region::new(0..6));

        assert_eq!(error.to_string(), "error: unclosed tag");
    }

    #[test]
    fn test_display_alternate() {
        let error = Error::parse(ErrorKind::UnopenedSection, "hello {{/name}}", Region::new(6..15))
            .with_name("greeting")
            .with_help("open the section first");
        let output = format!("{error:#}");

        assert!(output.starts_with("error: unopened section"));
        assert!(output.contains("--> greeting:1:7"));
        assert!(output.contains("1 | hello {{/name}}"));
        assert!(output.contains("^^^^^^^^^"));
        assert!(output.contains("= help: open the section first"));
    }

    #[test]
    fn test_accessors() {
        let error = Error::parse(ErrorKind::MismatchedSection, "{{#a}}{{/b}}", Region::new(6..12));

        assert_eq!(error.kind(), Some(ErrorKind::MismatchedSection));
        assert_eq!(error.region(), Some(Region::new(6..12)));
        assert_eq!(error.reason(), "mismatched section");
        assert_eq!(error.help(), None);
    }

    #[test]
    fn test_with_reason() {
        let error = Error::parse(ErrorKind::EmptyTag, "{{}}", Region::new(0..4))
            .with_reason("tag has no key");

        assert_eq!(error.reason(), "tag has no key");
        assert_eq!(error.kind(), Some(ErrorKind::EmptyTag));
        assert_eq!(error.to_string(), "error: tag has no key");
    }
}
