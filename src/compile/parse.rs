//! Stache parser.
//!
//! Utilizes a [`Scanner`] to walk the source text, and produces a tree of
//! [`Token`] instances that the compiler turns into a [`Template`][`crate::Template`].
//!
//! Standalone lines are resolved here: a section, inverted section, close,
//! partial, comment or delimiter tag that is the only thing on its line has
//! the whole line removed from the output, including the newline.
pub mod token;

mod state;

use crate::{
    compile::{
        parse::{
            state::OpenSection,
            token::{Path, Section, Token},
        },
        scan::Scanner,
        Sigil,
    },
    log::{expected_close, Error, ErrorKind, INVALID_SYNTAX},
    region::Region,
    syntax::Syntax,
};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[ \t]*").unwrap());
static TRAILING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[ \t]*(?:\r?\n|\z)").unwrap());
static SIGIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[{&#^/>=!]").unwrap());

/// Patterns derived from the active delimiters.
#[derive(Debug)]
struct Patterns {
    /// Finds the next open delimiter with its leading padding.
    open: Regex,
    /// Same as `open`, but only matches at the cursor.
    open_here: Regex,
    /// Finds the next close delimiter.
    close: Regex,
    /// Same as `close`, but only matches at the cursor.
    close_here: Regex,
}

impl Patterns {
    fn new(syntax: &Syntax) -> Result<Self, Error> {
        let open = format!(r"[ \t]*{}", regex::escape(syntax.open()));
        let close = format!(r"[}}!=]?{}", regex::escape(syntax.close()));
        let build = |pattern: &str| {
            Regex::new(pattern).map_err(|error| {
                Error::build(INVALID_SYNTAX)
                    .with_kind(ErrorKind::InvalidDelimiters)
                    .with_help(error.to_string())
            })
        };

        Ok(Self {
            open_here: build(&format!(r"\A{open}"))?,
            open: build(&open)?,
            close_here: build(&format!(r"\A{close}"))?,
            close: build(&close)?,
        })
    }
}

/// Turns template source into a tree of [`Token`] values, tracking open sections
/// and the active delimiters.
pub struct Parser<'source> {
    /// Scanner over the source text.
    scanner: Scanner<'source>,
    /// Delimiters that are currently active.
    syntax: Syntax,
    patterns: Patterns,
    /// Tokens at the top level of the template.
    tokens: Vec<Token>,
    /// Sections that are open, innermost last.
    sections: Vec<OpenSection>,
}

impl<'source> Parser<'source> {
    /// Create a new [`Parser`] over the given source, starting with the given
    /// delimiters.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the delimiters cannot be turned into patterns.
    pub fn new(source: &'source str, syntax: &Syntax) -> Result<Self, Error> {
        Ok(Self {
            scanner: Scanner::new(source),
            syntax: syntax.clone(),
            patterns: Patterns::new(syntax)?,
            tokens: vec![Token::LineStart],
            sections: vec![],
        })
    }

    /// Parse the source text.
    ///
    /// Returns the token tree, which always begins with [`Token::LineStart`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a tag is never closed, a section is closed
    /// without being opened, a section is closed with the wrong key, a section
    /// is never closed, a tag is empty, or a delimiter change is invalid.
    pub fn parse(mut self) -> Result<Vec<Token>, Error> {
        while !self.scanner.is_done() {
            self.parse_next()?;
        }

        if let Some(section) = self.sections.pop() {
            return Err(self
                .error(ErrorKind::UnclosedSection, section.region)
                .with_help(expected_close(
                    self.syntax.open(),
                    &section.key,
                    self.syntax.close(),
                )));
        }

        Ok(self.tokens)
    }

    /// Parse the text up to the next tag, and the tag itself.
    fn parse_next(&mut self) -> Result<(), Error> {
        if let Some(text) = self.scanner.scan_until(&self.patterns.open) {
            self.add_text(text);
        }

        let at_line_start = self.scanner.at_line_start();
        let Some(open) = self.scanner.scan(&self.patterns.open_here) else {
            return Ok(());
        };
        let padding = &open[..open.len() - self.syntax.open().len()];
        let begin = self.scanner.cursor() - self.syntax.open().len();

        let sigil = Sigil::from_text(self.scanner.scan(&SIGIL));
        self.scanner.scan(&WHITESPACE);
        let content = match sigil {
            sigil if sigil.is_free_text() => self.scanner.scan_until(&self.patterns.close),
            Sigil::Partial => self.scanner.scan_while(|c| is_key(c) || c == '/'),
            _ => self.scanner.scan_while(is_key),
        }
        .unwrap_or_default();
        self.scanner.scan(&WHITESPACE);

        if self.scanner.scan(&self.patterns.close_here).is_none() {
            let region = Region::new(begin..self.scanner.cursor());
            return Err(self
                .error(ErrorKind::UnclosedTag, region)
                .with_help(format!("expected `{}`", self.syntax.close())));
        }
        let region = Region::new(begin..self.scanner.cursor());

        if content.is_empty() && !sigil.is_free_text() {
            return Err(self
                .error(ErrorKind::EmptyTag, region)
                .with_help("expected a name, such as `person.name` or `.`"));
        }

        let standalone =
            at_line_start && sigil.is_standalone() && self.scanner.scan(&TRAILING).is_some();
        let indent = if standalone {
            padding
        } else {
            self.add_text(padding);
            ""
        };

        self.add_tag(sigil, content, indent, region)
    }

    /// Add the token described by a tag.
    fn add_tag(
        &mut self,
        sigil: Sigil,
        content: &str,
        indent: &str,
        region: Region,
    ) -> Result<(), Error> {
        match sigil {
            Sigil::Escaped | Sigil::Triple | Sigil::Ampersand => {
                self.collector().push(Token::Variable {
                    path: Path::parse(content),
                    escape: sigil == Sigil::Escaped,
                });
            }
            Sigil::Section | Sigil::Inverted => self.sections.push(OpenSection {
                key: content.to_string(),
                path: Path::parse(content),
                invert: sigil == Sigil::Inverted,
                body: vec![],
                start: self.scanner.cursor(),
                region,
            }),
            Sigil::Close => self.close_section(content, region)?,
            Sigil::Partial => self.collector().push(Token::Partial {
                name: content.to_string(),
                indent: indent.to_string(),
            }),
            Sigil::Delimiters => {
                let source = self.scanner.source();
                self.syntax =
                    Syntax::parse(content).map_err(|error| error.with_pointer(source, region))?;
                self.patterns = Patterns::new(&self.syntax)
                    .map_err(|error| error.with_pointer(source, region))?;
                tracing::trace!(
                    open = self.syntax.open(),
                    close = self.syntax.close(),
                    "changed delimiters"
                );
            }
            Sigil::Comment => {}
        }

        Ok(())
    }

    /// Close the innermost open section, and add it to the enclosing tokens.
    fn close_section(&mut self, key: &str, region: Region) -> Result<(), Error> {
        let Some(open) = self.sections.pop() else {
            return Err(self
                .error(ErrorKind::UnopenedSection, region)
                .with_help(format!("section `{key}` was never opened")));
        };

        if open.key != key {
            let help = expected_close(self.syntax.open(), &open.key, self.syntax.close());
            return Err(self
                .error(ErrorKind::MismatchedSection, region)
                .with_help(help));
        }

        let raw = self
            .scanner
            .source()
            .get(open.start..region.begin)
            .unwrap_or_default();
        let section = Section {
            path: open.path,
            invert: open.invert,
            body: open.body,
            raw: raw.to_string(),
            syntax: self.syntax.clone(),
            region: open.region.combine(region),
        };
        self.collector().push(Token::Section(section));

        Ok(())
    }

    /// Add literal text, marking the beginning of each new line.
    fn add_text(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            let tokens = self.collector();
            match tokens.last_mut() {
                Some(Token::Text(previous)) => previous.push_str(line),
                _ => tokens.push(Token::Text(line.to_string())),
            }
            if line.ends_with('\n') {
                tokens.push(Token::LineStart);
            }
        }
    }

    /// Return the tokens of the innermost open section, or the top level
    /// tokens when no section is open.
    fn collector(&mut self) -> &mut Vec<Token> {
        match self.sections.last_mut() {
            Some(section) => &mut section.body,
            None => &mut self.tokens,
        }
    }

    fn error(&self, kind: ErrorKind, region: Region) -> Error {
        Error::parse(kind, self.scanner.source(), region)
    }
}

/// Return true if the character may appear in a key.
fn is_key(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || matches!(c, '$' | '.' | '-')
}
