use crate::value::Value;
use std::fmt::{Result, Write};

/// Wraps some underlying buffer by providing methods that write to it
/// with partial indentation and HTML escaping applied.
pub struct Pipe<'buffer> {
    buffer: &'buffer mut String,
    /// Indentation of every partial currently being rendered, outermost first.
    indent: String,
    /// True when a line has begun and nothing has been written to it yet.
    pending: bool,
}

impl<'buffer> Pipe<'buffer> {
    /// Create a new Pipe that writes to the given buffer.
    pub fn new(buffer: &'buffer mut String) -> Self {
        Self {
            buffer,
            indent: String::new(),
            pending: false,
        }
    }

    /// Return true if the buffer is empty or ends with a newline.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.buffer.is_empty() || self.buffer.ends_with('\n')
    }

    /// Mark the beginning of a line.
    ///
    /// The indentation is written before the next text, unless that text
    /// begins with a line break. Does nothing in the middle of a line.
    #[inline]
    pub fn write_indent(&mut self) {
        if self.at_line_start() {
            self.pending = true;
        }
    }

    /// Add indentation for a partial.
    ///
    /// Returns the previous length, which should be passed to `pop_indent`
    /// when the partial is done.
    pub fn push_indent(&mut self, indent: &str) -> usize {
        let length = self.indent.len();
        self.indent.push_str(indent);

        length
    }

    /// Restore the indentation to a length returned by `push_indent`.
    #[inline]
    pub fn pop_indent(&mut self, length: usize) {
        self.indent.truncate(length);
    }

    /// Write the given Value to the Pipe buffer.
    ///
    /// Falsy values write nothing.
    ///
    /// # Errors
    ///
    /// Propagates an error from the [write!] macro itself.
    pub fn write_value(&mut self, value: &Value, escape: bool) -> Result {
        if !value.is_truthy() {
            return Ok(());
        }

        match value {
            Value::String(text) => self.write_text(text, escape),
            value if escape => self.write_escaped(&value.to_string()),
            value => write!(self, "{value}"),
        }
    }

    /// Write text, escaping it if requested.
    pub fn write_text(&mut self, text: &str, escape: bool) -> Result {
        if escape {
            self.write_escaped(text)
        } else {
            self.write_str(text)
        }
    }

    /// Write text with `&`, `"`, `<` and `>` replaced by HTML entities.
    pub fn write_escaped(&mut self, text: &str) -> Result {
        let mut rest = text;
        while let Some(index) = rest.find(['&', '"', '<', '>']) {
            self.write_str(&rest[..index])?;
            let entity = match rest.as_bytes()[index] {
                b'&' => "&amp;",
                b'"' => "&quot;",
                b'<' => "&lt;",
                _ => "&gt;",
            };
            self.write_str(entity)?;
            rest = &rest[index + 1..];
        }

        self.write_str(rest)
    }
}

impl Write for Pipe<'_> {
    fn write_str(&mut self, s: &str) -> Result {
        if s.is_empty() {
            return Ok(());
        }

        if self.pending {
            self.pending = false;
            if !s.starts_with(['\r', '\n']) {
                self.buffer.push_str(&self.indent);
            }
        }
        self.buffer.push_str(s);

        Ok(())
    }
}
