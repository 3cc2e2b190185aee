//! Escape-aware lexical walk shared by the splitter and the locator.
//!
//! The scanner does not tokenize SQL. It only tells its caller which parts of
//! the buffer are plain code and which are comments or quoted strings, so that
//! a `;` inside `'a;b'` or `-- x; y` is never mistaken for a terminator.
//!
//! Rules, checked in order while in [`ScanState::Normal`]:
//! 1. `--` opens a line comment running through the next `\n` (inclusive).
//! 2. `/*` opens a block comment running through the next `*/`.
//! 3. `'` or `"` opens a quoted string. Inside it a doubled quote (`''`,
//!    `""`) or a backslash pair (`\x`) is consumed without closing the string.
//! 4. Anything else is a single code character.
//!
//! Comments have no escapes. Unterminated comments and strings extend to the
//! end of input; the scanner never fails.
//!
//! All delimiters are ASCII, so scanning bytes never splits a multi-byte
//! character and every lexeme span is a valid `&str` range.

/// State of the walk at a given byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Normal,
    InLineComment,
    InBlockComment,
    InSingleQuotedString,
    InDoubleQuotedString,
}

/// One classified region of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    /// A single character of plain code.
    Code(char),
    LineComment,
    BlockComment,
    SingleQuoted,
    DoubleQuoted,
}

impl Lexeme {
    /// True if this lexeme is the plain-code character `c`.
    pub fn is_code(&self, c: char) -> bool {
        matches!(self.kind, LexemeKind::Code(x) if x == c)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, LexemeKind::LineComment | LexemeKind::BlockComment)
    }
}

/// Iterator over the [`Lexeme`]s of a buffer, left to right.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::starting_at(text, 0)
    }

    /// Scan from `start`. An offset inside a multi-byte character moves up to
    /// the next character; one past the end yields nothing.
    pub fn starting_at(text: &'a str, start: usize) -> Self {
        let mut pos = start.min(text.len());
        while !text.is_char_boundary(pos) {
            pos += 1;
        }
        Self { text, pos }
    }

    /// Consume one region starting at `self.pos` and return its state and end.
    fn step(&self) -> (ScanState, usize) {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        match (bytes[start], bytes.get(start + 1).copied()) {
            (b'-', Some(b'-')) => (ScanState::InLineComment, line_comment_end(bytes, start)),
            (b'/', Some(b'*')) => (ScanState::InBlockComment, block_comment_end(bytes, start)),
            (b'\'', _) => (ScanState::InSingleQuotedString, quoted_end(bytes, start)),
            (b'"', _) => (ScanState::InDoubleQuotedString, quoted_end(bytes, start)),
            _ => {
                let width = self.text[start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                (ScanState::Normal, start + width)
            }
        }
    }
}

/// End of a `--` comment opened at `start`, newline included.
fn line_comment_end(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + 2 + offset + 1)
}

/// End of a `/*` comment opened at `start`, terminator included.
fn block_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// End of a quoted string opened at `start`, closing quote included.
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote && bytes.get(i + 1) == Some(&quote) => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    // A trailing backslash may have stepped past the end.
    bytes.len()
}

impl Iterator for Scanner<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let (state, end) = self.step();
        self.pos = end;
        let kind = match state {
            ScanState::Normal => LexemeKind::Code(self.text[start..end].chars().next()?),
            ScanState::InLineComment => LexemeKind::LineComment,
            ScanState::InBlockComment => LexemeKind::BlockComment,
            ScanState::InSingleQuotedString => LexemeKind::SingleQuoted,
            ScanState::InDoubleQuotedString => LexemeKind::DoubleQuoted,
        };
        Some(Lexeme { kind, start, end })
    }
}

/// Remove every comment from `text`, keeping strings and code verbatim.
pub fn strip_comments(text: &str) -> String {
    Scanner::new(text)
        .filter(|lexeme| !lexeme.is_comment())
        .map(|lexeme| &text[lexeme.start..lexeme.end])
        .collect()
}
