use regex::Regex;

/// A cursor over immutable source text.
///
/// Scanning never fails, the absence of a match is represented
/// by `None` and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct Scanner<'source> {
    /// Reference to the source text.
    source: &'source str,
    /// Position within source.
    cursor: usize,
}

impl<'source> Scanner<'source> {
    /// Create a new [`Scanner`] positioned at the beginning of the source.
    #[inline]
    pub fn new(source: &'source str) -> Self {
        Self { source, cursor: 0 }
    }

    /// Return the source text.
    #[inline]
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Return the position within the source.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return true when the whole source has been consumed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Return the text that has not been consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'source str {
        &self.source[self.cursor..]
    }

    /// Return true if the cursor is at the beginning of the source, or the
    /// previous character is a newline.
    pub fn at_line_start(&self) -> bool {
        self.cursor == 0 || self.source[..self.cursor].ends_with('\n')
    }

    /// Match the pattern at the cursor only.
    ///
    /// On success the cursor is advanced past the match, and the matched text
    /// is returned.
    pub fn scan(&mut self, pattern: &Regex) -> Option<&'source str> {
        let remaining = self.remaining();
        let found = pattern.find(remaining).filter(|found| found.start() == 0)?;
        self.cursor += found.end();

        Some(&remaining[..found.end()])
    }

    /// Consume everything before the next occurrence of the pattern.
    ///
    /// When the pattern never occurs, the rest of the source is consumed.
    /// Returns `None` when nothing was consumed, which happens when the
    /// pattern occurs at the cursor.
    pub fn scan_until(&mut self, pattern: &Regex) -> Option<&'source str> {
        let remaining = self.remaining();
        let end = pattern
            .find(remaining)
            .map(|found| found.start())
            .unwrap_or(remaining.len());
        if end == 0 {
            return None;
        }
        self.cursor += end;

        Some(&remaining[..end])
    }

    /// Consume characters for as long as the predicate holds.
    ///
    /// Returns `None` when the first character does not satisfy the predicate.
    pub fn scan_while<F>(&mut self, predicate: F) -> Option<&'source str>
    where
        F: Fn(char) -> bool,
    {
        let remaining = self.remaining();
        let end = remaining
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map(|(index, _)| index)
            .unwrap_or(remaining.len());
        if end == 0 {
            return None;
        }
        self.cursor += end;

        Some(&remaining[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;
    use regex::Regex;

    #[test]
    fn test_at_line_start() {
        let mut scanner = Scanner::new("a\nb");
        assert!(scanner.at_line_start());

        scanner.scan_while(|c| c == 'a');
        assert!(!scanner.at_line_start());

        scanner.scan_while(|c| c == '\n');
        assert!(scanner.at_line_start());
    }

    #[test]
    fn test_scan_is_anchored() {
        let pattern = Regex::new(r"\{\{").unwrap();
        let mut scanner = Scanner::new("ab{{");

        assert_eq!(scanner.scan(&pattern), None);
        assert_eq!(scanner.cursor(), 0);

        scanner.scan_until(&pattern);
        assert_eq!(scanner.scan(&pattern), Some("{{"));
        assert_eq!(scanner.cursor(), 4);
        assert!(scanner.is_done());
    }

    #[test]
    fn test_scan_until() {
        let pattern = Regex::new(r"[ \t]*\{\{").unwrap();
        let mut scanner = Scanner::new("hello  {{name}}");

        assert_eq!(scanner.scan_until(&pattern), Some("hello"));
        assert_eq!(scanner.remaining(), "  {{name}}");

        // The pattern occurs at the cursor, so nothing is consumed.
        assert_eq!(scanner.scan_until(&pattern), None);
        assert_eq!(scanner.cursor(), 5);
    }

    #[test]
    fn test_scan_until_no_match() {
        let pattern = Regex::new(r"\{\{").unwrap();
        let mut scanner = Scanner::new("plain text");

        assert_eq!(scanner.scan_until(&pattern), Some("plain text"));
        assert!(scanner.is_done());
        assert_eq!(scanner.scan_until(&pattern), None);
    }

    #[test]
    fn test_scan_while_unicode() {
        let mut scanner = Scanner::new("héllo wörld");

        assert_eq!(scanner.scan_while(|c| !c.is_whitespace()), Some("héllo"));
        assert_eq!(scanner.scan_while(char::is_alphabetic), None);
        assert_eq!(scanner.remaining(), " wörld");
    }
}
