use std::{
    cmp::max,
    fmt::{Formatter, Result},
};

use super::{get_line_and_column, get_width, Visual, BLANK, EQUAL, HIGHLIGHT, PIPE};
use crate::region::Region;

/// A type of `Visual` that points to a specific location within source text.
#[derive(Debug, PartialEq)]
pub struct Pointer {
    /// The line that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    line: usize,
    /// The display column that the Pointer is pointing to.
    ///
    /// This number should be zero indexed.
    column: usize,
    /// The display width of the object being highlighted.
    length: usize,
    /// The actual line of text that is being pointed to.
    text: String,
}

impl Pointer {
    /// Create a new Visual over the given source text and Region.
    ///
    /// Only the first line of a multi-line `Region` is highlighted.
    pub fn new(source: &str, region: Region) -> Self {
        let lines: Vec<_> = source.split_terminator('\n').collect();
        let (line, offset) = get_line_and_column(&lines, region.begin);
        let text = lines
            .get(line)
            .map(|line| line.trim_end_matches('\r'))
            .unwrap_or_default()
            .to_string();

        let column = text.get(..offset).map(get_width).unwrap_or(get_width(&text));
        let highlighted = region.literal(source).lines().next().unwrap_or_default();
        let length = max(1, get_width(highlighted));

        Self {
            line,
            column,
            length,
            text,
        }
    }

    /// Return the zero indexed line and column of the `Pointer`.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl Visual for Pointer {
    fn display(
        &self,
        formatter: &mut Formatter<'_>,
        template: Option<&str>,
        help: Option<&str>,
    ) -> Result {
        let num = (self.line + 1).to_string();
        let col = self.column + 1;
        let pad = get_width(&num);
        let align = self.column + self.length;

        let name = template.unwrap_or("?");
        let text = &self.text;
        let underline = HIGHLIGHT.repeat(self.length);

        write!(
            formatter,
            "\n {BLANK:pad$}--> {name}:{num}:{col}\
             \n {BLANK:pad$} {PIPE}\
             \n {num:>} {PIPE} {text}\
             \n {BLANK:pad$} {PIPE} {underline:>align$}\
             \n {BLANK:pad$} {PIPE}\n",
        )?;

        if let Some(help) = help {
            writeln!(formatter, " {BLANK:pad$} {EQUAL} help: {help}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Pointer;
    use crate::region::Region;

    #[test]
    fn test_pointer_position() {
        let source = "hello\n{{#people}}\n  {{name}}";
        let pointer = Pointer::new(source, Region::new(6..17));

        assert_eq!(pointer.position(), (1, 0));
        assert_eq!(pointer.length, 11);
        assert_eq!(pointer.text, "{{#people}}");
    }

    #[test]
    fn test_pointer_end_of_source() {
        let source = "one\ntwo";
        let pointer = Pointer::new(source, Region::new(7..7));

        assert_eq!(pointer.position(), (1, 3));
        assert_eq!(pointer.length, 1);
    }

    #[test]
    fn test_pointer_empty_source() {
        let pointer = Pointer::new("", Region::new(0..0));

        assert_eq!(pointer.position(), (0, 0));
        assert_eq!(pointer.text, "");
    }
}
