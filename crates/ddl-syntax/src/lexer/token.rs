use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Names and keywords. Keywords are not reserved at this level; the
    // builder decides from context whether a word is one.
    Word(String),
    QuotedIdent(String), // `name` or "name", quotes removed

    // Literals
    String(String), // unescaped content
    Number(String), // kept as written so defaults survive untouched

    // Delimiters
    LeftParen,   // (
    RightParen,  // )
    Comma,       // ,
    Semicolon,   // ;
    Equals,      // =
    Dot,         // .
    DoubleColon, // ::

    // Anything else, e.g. operators inside CHECK expressions
    Symbol(String),

    // Special
    Eof,
}

impl Token {
    /// Case-insensitive match of an unquoted word.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Name carried by a bare word or a quoted identifier.
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(name) | TokenKind::QuotedIdent(name) => Some(name),
            _ => None,
        }
    }

    /// Textual value of an option or attribute argument.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(v)
            | TokenKind::QuotedIdent(v)
            | TokenKind::String(v)
            | TokenKind::Number(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(w) => write!(f, "{}", w),
            TokenKind::QuotedIdent(name) => write!(f, "\"{}\"", name),
            TokenKind::String(s) => write!(f, "'{}'", s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Dot => write!(f, "."),
            TokenKind::DoubleColon => write!(f, "::"),
            TokenKind::Symbol(s) => write!(f, "{}", s),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}
