use crate::{region::Region, syntax::Syntax};
use std::fmt::Display;

/// A reference to data, as written in a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    /// The current head of the context - `{{.}}`.
    Implicit,
    /// One or more keys separated by `.` - `{{person.name}}`.
    Keys(Vec<String>),
}

impl Path {
    /// Create a new [`Path`] from the literal key of a tag.
    pub fn parse(key: &str) -> Self {
        if key == "." {
            return Path::Implicit;
        }

        Path::Keys(key.split('.').map(String::from).collect())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Path::Implicit => write!(f, "."),
            Path::Keys(keys) => write!(f, "{}", keys.join(".")),
        }
    }
}

/// A node in the token tree produced by the [`Parser`][`super::Parser`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text, copied to the output as-is.
    Text(String),
    /// Marks the beginning of a line, where partial indentation may apply.
    LineStart,
    /// Output the value of a path.
    Variable {
        /// Path to the value.
        path: Path,
        /// True if the value should be HTML escaped.
        escape: bool,
    },
    /// A normal or inverted section with its nested tokens.
    Section(Section),
    /// Render another template by name.
    Partial {
        /// Name of the template.
        name: String,
        /// Whitespace that preceded a standalone partial tag.
        indent: String,
    },
}

/// A section, from the open tag to the matching close tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Path to the value the section depends on.
    pub path: Path,
    /// True for `{{^name}}` sections.
    pub invert: bool,
    /// Tokens between the open and close tag.
    pub body: Vec<Token>,
    /// Unprocessed source text between the open and close tag.
    ///
    /// This is the text that lambdas receive.
    pub raw: String,
    /// Delimiters that were active when the section was closed.
    pub syntax: Syntax,
    /// Region spanning the open tag to the close tag.
    pub region: Region,
}

#[cfg(test)]
mod tests {
    use super::Path;

    #[test]
    fn test_path_parse() {
        assert_eq!(Path::parse("."), Path::Implicit);
        assert_eq!(Path::parse("name"), Path::Keys(vec!["name".into()]));
        assert_eq!(
            Path::parse("a.b.c"),
            Path::Keys(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(Path::parse("a.b.c").to_string(), "a.b.c");
    }
}
