//! Lexical scanner for the import section of a source file.
//!
//! The scanner partitions raw lines into statement tokens terminated by `;`,
//! up to the first non-import statement that follows an import. Everything
//! from that statement to the end of the buffer becomes one final body token.
//!
//! The delimiter search is a small state machine so that `;` inside line
//! comments, block comments, string literals and character literals is not
//! mistaken for a statement end.
//!
//! ```text
//! package a;            <- token 0 (not an import)
//!
//! import b.B; // note   <- token 1 (trailing line comment included)
//! import c.C;           <- token 2
//!
//! public class A { }    <- body token (to end of buffer)
//! ```

use thiserror::Error;

/// Errors raised when the buffer cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A `/*` comment was never closed.
    #[error("unterminated block comment starting at line {line}")]
    UnterminatedBlockComment {
        /// Line (1-indexed) where the comment opens.
        line: usize,
    },

    /// The buffer ended before a statement delimiter was found.
    #[error("unexpected end of input while scanning statement starting at line {line}")]
    UnexpectedEndOfInput {
        /// Line (1-indexed) where the unterminated statement starts.
        line: usize,
    },
}

/// A position in a line buffer (0-indexed, columns count characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index.
    pub line: usize,
    /// Character index within the line.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A statement-level span of the buffer. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    start: Position,
    end: Position,
    text: String,
}

impl Token {
    /// First character of the token.
    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Last character of the token.
    #[must_use]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Line index of the first character.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start.line
    }

    /// Column index of the first character.
    #[must_use]
    pub fn start_column(&self) -> usize {
        self.start.column
    }

    /// Line index of the last character.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.end.line
    }

    /// Column index of the last character.
    #[must_use]
    pub fn end_column(&self) -> usize {
        self.end.column
    }

    /// The spanned text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether `line` lies within the token's line span.
    #[must_use]
    pub fn spans_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    /// Whether the token contains only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the token is an `import` declaration.
    ///
    /// Leading comments are skipped; the keyword must be followed by whitespace
    /// so `importer` does not match.
    #[must_use]
    pub fn is_import(&self) -> bool {
        let Some(rest) = strip_leading_comments(&self.text) else {
            return false;
        };
        rest.strip_prefix("import")
            .and_then(|r| r.chars().next())
            .is_some_and(char::is_whitespace)
    }
}

fn strip_leading_comments(text: &str) -> Option<&str> {
    let mut rest = text.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("/*") {
            let close = after.find("*/")?;
            rest = after[close + 2..].trim_start();
        } else if let Some(after) = rest.strip_prefix("//") {
            let newline = after.find('\n')?;
            rest = after[newline + 1..].trim_start();
        } else {
            return Some(rest);
        }
    }
}

/// Returns `false` if two consecutive tokens share a physical line.
#[must_use]
pub fn every_import_on_separate_line(tokens: &[Token]) -> bool {
    first_shared_line(tokens).is_none()
}

/// Index of the first token whose start line equals the previous token's end line.
#[must_use]
pub fn first_shared_line(tokens: &[Token]) -> Option<usize> {
    (1..tokens.len()).find(|&i| tokens[i - 1].end_line() == tokens[i].start_line())
}

#[derive(Debug, Clone, Copy)]
enum State {
    Normal,
    LineComment,
    BlockComment { opened: usize },
    StringLiteral,
    CharLiteral,
}

/// Tokenizes the import section of a line buffer.
pub struct ImportScanner {
    lines: Vec<Vec<char>>,
}

impl ImportScanner {
    /// Creates a scanner over the given lines.
    #[must_use]
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref().chars().collect()).collect(),
        }
    }

    /// Produces the statement tokens followed by the body token.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the buffer ends inside a block comment or
    /// before a statement is terminated.
    pub fn tokenize(&self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        let mut seen_import = false;
        let mut cursor = Position::new(0, 0);

        loop {
            let start = self
                .skip_whitespace(cursor)
                .ok_or(ScanError::UnexpectedEndOfInput {
                    line: cursor.line.min(self.lines.len().saturating_sub(1)) + 1,
                })?;
            let delimiter = self.find_delimiter(start)?;
            let end = self.include_trailing_comment(delimiter);
            let token = self.token(start, end);

            if token.is_import() {
                seen_import = true;
            } else if seen_import {
                tokens.push(self.token(start, self.last_position()));
                return Ok(tokens);
            }

            tracing::trace!(
                start_line = token.start_line() + 1,
                end_line = token.end_line() + 1,
                import = token.is_import(),
                "scanned statement"
            );
            tokens.push(token);
            cursor = Position::new(end.line, end.column + 1);
        }
    }

    fn skip_whitespace(&self, from: Position) -> Option<Position> {
        let mut line = from.line;
        let mut column = from.column;
        while let Some(chars) = self.lines.get(line) {
            if let Some(offset) = chars.iter().skip(column).position(|c| !c.is_whitespace()) {
                return Some(Position::new(line, column + offset));
            }
            line += 1;
            column = 0;
        }
        None
    }

    fn find_delimiter(&self, start: Position) -> Result<Position, ScanError> {
        let mut state = State::Normal;
        let mut line = start.line;
        let mut column = start.column;

        loop {
            let Some(chars) = self.lines.get(line) else {
                return Err(match state {
                    State::BlockComment { opened } => {
                        ScanError::UnterminatedBlockComment { line: opened + 1 }
                    }
                    _ => ScanError::UnexpectedEndOfInput {
                        line: start.line + 1,
                    },
                });
            };

            let Some(&c) = chars.get(column) else {
                // Line comments and literals end with the line.
                if !matches!(state, State::BlockComment { .. }) {
                    state = State::Normal;
                }
                line += 1;
                column = 0;
                continue;
            };
            let next = chars.get(column + 1).copied();

            match state {
                State::Normal => match (c, next) {
                    (';', _) => return Ok(Position::new(line, column)),
                    ('/', Some('/')) => {
                        state = State::LineComment;
                        column += 2;
                        continue;
                    }
                    ('/', Some('*')) => {
                        state = State::BlockComment { opened: line };
                        column += 2;
                        continue;
                    }
                    ('"', _) => state = State::StringLiteral,
                    ('\'', _) => state = State::CharLiteral,
                    _ => {}
                },
                State::LineComment => {
                    column = chars.len();
                    continue;
                }
                State::BlockComment { .. } => {
                    if c == '*' && next == Some('/') {
                        state = State::Normal;
                        column += 2;
                        continue;
                    }
                }
                State::StringLiteral | State::CharLiteral => {
                    let quote = if matches!(state, State::StringLiteral) {
                        '"'
                    } else {
                        '\''
                    };
                    if c == '\\' {
                        column += 2;
                        continue;
                    }
                    if c == quote {
                        state = State::Normal;
                    }
                }
            }
            column += 1;
        }
    }

    /// Extends the token over a `//` comment that follows the delimiter on the same line.
    fn include_trailing_comment(&self, delimiter: Position) -> Position {
        let chars = &self.lines[delimiter.line];
        let rest = &chars[delimiter.column + 1..];
        let Some(offset) = rest.iter().position(|c| !c.is_whitespace()) else {
            return delimiter;
        };
        if rest[offset..].starts_with(&['/', '/']) {
            Position::new(delimiter.line, chars.len() - 1)
        } else {
            delimiter
        }
    }

    fn last_position(&self) -> Position {
        let line = self.lines.len().saturating_sub(1);
        let column = self
            .lines
            .get(line)
            .map_or(0, |chars| chars.len().saturating_sub(1));
        Position::new(line, column)
    }

    fn token(&self, start: Position, end: Position) -> Token {
        let mut text = String::new();
        for line in start.line..=end.line {
            let chars = &self.lines[line];
            let from = if line == start.line { start.column } else { 0 };
            let to = if line == end.line {
                (end.column + 1).min(chars.len())
            } else {
                chars.len()
            };
            if line != start.line {
                text.push('\n');
            }
            if from < to {
                text.extend(&chars[from..to]);
            }
        }
        Token { start, end, text }
    }
}

/// Tokenizes `lines` with a fresh [`ImportScanner`].
///
/// # Errors
///
/// See [`ImportScanner::tokenize`].
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Token>, ScanError> {
    ImportScanner::new(lines).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(String::from).collect()
    }

    #[test]
    fn one_token_per_import_plus_body() {
        let buffer = lines(
            "import a.A;\nimport b.B;\nimport static c.C.d;\n\npublic class X {\n    int y;\n}",
        );
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens.len(), 4);
        assert!(tokens[..3].iter().all(Token::is_import));
        assert!(!tokens[3].is_import());
        assert_eq!(tokens[3].start(), Position::new(4, 0));
        assert_eq!(tokens[3].end(), Position::new(6, 0));
        assert!(every_import_on_separate_line(&tokens));
    }

    #[test]
    fn leading_package_statement_is_kept_before_imports() {
        let buffer = lines("package p;\n\nimport a.A;\n\nclass X { int i; }");
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].is_import());
        assert_eq!(tokens[0].text(), "package p;");
        assert!(tokens[1].is_import());
        assert_eq!(tokens[1].start_line(), 2);
        assert_eq!(tokens[2].text(), "class X { int i; }");
    }

    #[test]
    fn detects_two_statements_on_one_line() {
        let buffer = lines("import a.B; import c.D;\nclass X { int i; }");
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].end(), Position::new(0, 10));
        assert_eq!(tokens[1].start(), Position::new(0, 12));
        assert!(!every_import_on_separate_line(&tokens));
        assert_eq!(first_shared_line(&tokens), Some(1));
    }

    #[test]
    fn trailing_line_comment_belongs_to_statement() {
        let buffer = lines("import a.A;   // why\nimport b.B;\nclass X { int i; }");
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens[0].text(), "import a.A;   // why");
        assert_eq!(tokens[0].end_column(), 19);
        assert_eq!(tokens[1].start_line(), 1);
    }

    #[test]
    fn delimiters_inside_comments_are_ignored() {
        let buffer = lines(
            "import a. /* ; */ A;\n/*\nimport x.Y;\n*/\nimport // ;\nb.B;\nclass X { int i; }",
        );
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text(), "import a. /* ; */ A;");
        assert!(tokens[1].is_import());
        assert_eq!(tokens[1].start_line(), 1);
        assert_eq!(tokens[1].end(), Position::new(5, 3));
    }

    #[test]
    fn leading_comments_do_not_hide_imports() {
        let buffer = lines(
            "/* block */ import a.A;\n// group\nimport b.B;\nclass X { int i; }",
        );
        let tokens = tokenize(&buffer).unwrap();

        assert!(tokens[0].is_import());
        assert!(tokens[1].is_import());
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn keyword_prefix_is_not_an_import() {
        let buffer = lines("importer x;\nimport a.A;\nclass X { int i; }");
        let tokens = tokenize(&buffer).unwrap();

        assert!(!tokens[0].is_import());
        assert!(tokens[1].is_import());
    }

    #[test]
    fn string_literals_cannot_end_a_statement() {
        let buffer = lines("import a.A;\nclass X { String s = \"a;b\"; }");
        let tokens = tokenize(&buffer).unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text(), "class X { String s = \"a;b\"; }");
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let buffer = lines("import a.A;\n/* never\nclosed");
        assert_eq!(
            tokenize(&buffer),
            Err(ScanError::UnterminatedBlockComment { line: 2 })
        );
    }

    #[test]
    fn missing_delimiter_after_imports_is_an_error() {
        let buffer = lines("import a.A;\nclass X {}");
        assert_eq!(
            tokenize(&buffer),
            Err(ScanError::UnexpectedEndOfInput { line: 2 })
        );
    }

    #[test]
    fn empty_buffer_is_an_error() {
        let buffer: Vec<String> = Vec::new();
        assert!(matches!(
            tokenize(&buffer),
            Err(ScanError::UnexpectedEndOfInput { .. })
        ));
    }
}
