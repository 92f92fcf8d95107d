//! Tag boundary scanner.
//!
//! Walks the input with a single forward cursor and splits it into text runs,
//! tag bodies and comments. It never looks past the boundary it is currently
//! resolving and never backtracks.

use super::helpers::{COMMENT_CLOSE, COMMENT_OPEN, find_from, find_unquoted_tag_end};

/// One piece of input located by the [`TagScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary<'a> {
    /// Raw (undecoded) text before the next `<`.
    Text {
        /// The text run. Never empty.
        raw: &'a str,
        /// Byte offset of the run.
        offset: usize,
    },
    /// Raw (undecoded) remainder after the last `<...>` boundary. Always the
    /// final boundary.
    TrailingText {
        /// The text run. Never empty.
        raw: &'a str,
        /// Byte offset of the run.
        offset: usize,
    },
    /// An opening or self-closing tag: the trimmed text between `<` and `>`.
    StartTag {
        /// Trimmed tag body, for example `p class="a"` or `br /`.
        body: &'a str,
        /// Byte offset of the `<`.
        offset: usize,
    },
    /// A tag whose trimmed body starts with `/`.
    EndTag {
        /// Trimmed tag body including the leading `/`.
        body: &'a str,
        /// Byte offset of the `<`.
        offset: usize,
    },
    /// The raw interior of `<!-- ... -->`.
    Comment {
        /// Comment interior, not trimmed or decoded.
        data: &'a str,
        /// Byte offset of the `<!--`.
        offset: usize,
    },
    /// A `<` with no `>` anywhere after it. Scanning stops here.
    UnterminatedTag {
        /// Byte offset of the `<`.
        offset: usize,
    },
    /// A `<!--` with no `-->`. Scanning stops here.
    UnterminatedComment {
        /// Byte offset of the `<!--`.
        offset: usize,
    },
}

/// Splits markup into [`Boundary`] values.
///
/// After yielding an `Unterminated*` boundary the scanner is exhausted: the
/// rest of the input is dropped.
#[derive(Debug, Clone)]
pub struct TagScanner<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> TagScanner<'a> {
    /// Create a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// Current byte offset of the cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the whole input has been consumed or dropped.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor >= self.input.len()
    }

    const fn halt(&mut self) {
        self.cursor = self.input.len();
    }

    /// Resolve the comment opened at `start`.
    ///
    /// The terminator is searched from the `<`, so in `<!-->` it overlaps the
    /// opener. The comment's data is then the overlapped span (`--`).
    fn scan_comment(&mut self, start: usize) -> Boundary<'a> {
        let data_start = start + COMMENT_OPEN.len();
        match find_from(self.input, start, COMMENT_CLOSE) {
            Some(close) => {
                self.cursor = close + COMMENT_CLOSE.len();
                Boundary::Comment {
                    data: &self.input[close.min(data_start)..close.max(data_start)],
                    offset: start,
                }
            }
            None => {
                self.halt();
                Boundary::UnterminatedComment { offset: start }
            }
        }
    }

    /// Resolve the tag opened at `start`.
    ///
    /// When every `>` sits inside an unbalanced double quote, the first `>`
    /// ends the tag anyway.
    fn scan_tag(&mut self, start: usize) -> Boundary<'a> {
        let end = find_unquoted_tag_end(self.input, start)
            .or_else(|| find_from(self.input, start, ">"));
        let Some(end) = end else {
            self.halt();
            return Boundary::UnterminatedTag { offset: start };
        };
        self.cursor = end + 1;

        let body = self.input[start + 1..end].trim();
        if body.starts_with('/') {
            Boundary::EndTag {
                body,
                offset: start,
            }
        } else {
            Boundary::StartTag {
                body,
                offset: start,
            }
        }
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Boundary<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }

        let Some(start) = find_from(self.input, self.cursor, "<") else {
            let offset = self.cursor;
            self.halt();
            return Some(Boundary::TrailingText {
                raw: &self.input[offset..],
                offset,
            });
        };

        // Text before the tag comes out first; the tag is resolved on the
        // next call with the cursor sitting on its `<`.
        if start > self.cursor {
            let offset = self.cursor;
            self.cursor = start;
            return Some(Boundary::Text {
                raw: &self.input[offset..start],
                offset,
            });
        }

        if self.input[start..].starts_with(COMMENT_OPEN) {
            Some(self.scan_comment(start))
        } else {
            Some(self.scan_tag(start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<Boundary<'_>> {
        TagScanner::new(input).collect()
    }

    #[test]
    fn test_text_then_tags() {
        assert_eq!(
            scan("a<p>b</p >"),
            [
                Boundary::Text { raw: "a", offset: 0 },
                Boundary::StartTag { body: "p", offset: 1 },
                Boundary::Text { raw: "b", offset: 4 },
                Boundary::EndTag { body: "/p", offset: 5 },
            ]
        );
    }

    #[test]
    fn test_comment_interior_is_raw() {
        assert_eq!(
            scan("<!-- a > b -->c"),
            [
                Boundary::Comment {
                    data: " a > b ",
                    offset: 0
                },
                Boundary::TrailingText { raw: "c", offset: 14 },
            ]
        );
    }

    #[test]
    fn test_empty_comment() {
        assert_eq!(scan("<!---->"), [Boundary::Comment { data: "", offset: 0 }]);
    }

    #[test]
    fn test_comment_terminator_may_overlap_opener() {
        assert_eq!(
            scan("<!-->x"),
            [
                Boundary::Comment {
                    data: "--",
                    offset: 0
                },
                Boundary::TrailingText { raw: "x", offset: 5 },
            ]
        );
        assert_eq!(scan("<!--->")[0], Boundary::Comment { data: "-", offset: 0 });
    }

    #[test]
    fn test_unbalanced_quote_falls_back_to_first_gt() {
        assert_eq!(
            scan("x<p class=\"a>b"),
            [
                Boundary::Text { raw: "x", offset: 0 },
                Boundary::StartTag {
                    body: "p class=\"a",
                    offset: 1
                },
                Boundary::TrailingText { raw: "b", offset: 13 },
            ]
        );
    }

    #[test]
    fn test_unterminated_tag_halts() {
        let mut scanner = TagScanner::new("x<p class=\"a");
        assert_eq!(scanner.next(), Some(Boundary::Text { raw: "x", offset: 0 }));
        assert_eq!(scanner.next(), Some(Boundary::UnterminatedTag { offset: 1 }));
        assert!(scanner.is_exhausted());
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_unterminated_comment_halts() {
        assert_eq!(
            scan("<!-- open <p>x</p>"),
            [Boundary::UnterminatedComment { offset: 0 }]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            scan("é<b>ü"),
            [
                Boundary::Text { raw: "é", offset: 0 },
                Boundary::StartTag { body: "b", offset: 2 },
                Boundary::TrailingText { raw: "ü", offset: 5 },
            ]
        );
    }
}
