use crate::parser::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        source_snippet: String,
    },

    #[error("Unterminated quoted literal starting at line {line}, column {column}")]
    UnterminatedLiteral { line: usize, column: usize },
}

impl LexerError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        LexerError::Syntax {
            message: format!("{}", err.variant),
            line,
            column,
            source_snippet: err.line().to_string(),
        }
    }

    /// Format error with a caret under the offending column
    pub fn format_error(&self) -> String {
        match self {
            LexerError::Syntax {
                message,
                line,
                column,
                source_snippet,
            } => format!(
                "Syntax error at line {}, column {}:\n{}\n{}^\n{}",
                line,
                column,
                source_snippet,
                " ".repeat(column.saturating_sub(1)),
                message
            ),
            _ => self.to_string(),
        }
    }
}
