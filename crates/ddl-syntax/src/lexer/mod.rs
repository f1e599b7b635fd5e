use crate::{
    lexer::{
        error::LexerError,
        token::{Token, TokenKind},
    },
    parser::{DdlParser, Rule},
};
use pest::{Parser, iterators::Pair};

pub mod error;
pub mod token;

pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexerError> {
        self.tokens.clear();

        let pairs = DdlParser::parse(Rule::program, input).map_err(LexerError::from_pest_error)?;

        for pair in pairs {
            self.process_pair(pair)?;
        }

        // Add EOF token
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: input.lines().count().max(1),
            column: input.lines().last().map(|l| l.chars().count() + 1).unwrap_or(1),
            span: (input.len(), input.len()),
        });

        Ok(self.tokens.clone())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn process_pair(&mut self, pair: Pair<Rule>) -> Result<(), LexerError> {
        let rule = pair.as_rule();
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        let lexeme = span.as_str().to_string();

        let kind = match rule {
            Rule::word => TokenKind::Word(lexeme.clone()),
            Rule::backtick_ident => TokenKind::QuotedIdent(unquote_identifier(&lexeme, '`')),
            Rule::dquote_ident => TokenKind::QuotedIdent(unquote_identifier(&lexeme, '"')),
            Rule::string => TokenKind::String(unescape_string(&lexeme)),
            Rule::number => TokenKind::Number(lexeme.clone()),
            Rule::unterminated => return Err(LexerError::UnterminatedLiteral { line, column }),

            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::comma => TokenKind::Comma,
            Rule::semicolon => TokenKind::Semicolon,
            Rule::equals => TokenKind::Equals,
            Rule::dot => TokenKind::Dot,
            Rule::double_colon => TokenKind::DoubleColon,
            Rule::symbol => TokenKind::Symbol(lexeme.clone()),

            // Recursively process other rules
            _ => {
                for inner_pair in pair.into_inner() {
                    self.process_pair(inner_pair)?;
                }
                return Ok(());
            }
        };

        self.add_token(kind, lexeme, line, column, span.start(), span.end());
        Ok(())
    }

    fn add_token(
        &mut self,
        kind: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
        start: usize,
        end: usize,
    ) {
        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
            span: (start, end),
        });
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer { tokens: vec![] }
    }
}

/// Strips the surrounding quote characters and collapses doubled quotes.
fn unquote_identifier(lexeme: &str, quote: char) -> String {
    let inner = &lexeme[quote.len_utf8()..lexeme.len() - quote.len_utf8()];
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}

fn unescape_string(lexeme: &str) -> String {
    let inner = &lexeme[1..lexeme.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    out
}
