//! Parsing of `CREATE TABLE` statements into [`model`] tables.
//!
//! Text flows through [`strip::strip_comments`], then (for batches)
//! [`splitter::split_statements`], then the pest tokenizer, the
//! recursive-descent [`builder`] and finally [`reconcile`].

use crate::{builder::build_table, error::ParseError, lexer::Lexer, reconcile::reconcile};
use model::schema::table::Table;
use tracing::{info, warn};

pub mod builder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reconcile;
pub mod splitter;
pub mod strip;

/// Parses the first `CREATE TABLE` statement found in `input`.
pub fn parse_single(input: &str) -> Result<Table, ParseError> {
    let stripped = strip::strip_comments(input);
    parse_statement(&stripped)
}

/// Parses every `CREATE TABLE` statement in `input`, one result per
/// statement in source order. A failing statement never stops the rest of
/// the batch. An empty vector means the input held no table definitions.
pub fn parse_batch(input: &str) -> Vec<Result<Table, ParseError>> {
    let stripped = strip::strip_comments(input);

    let results: Vec<_> = splitter::split_statements(&stripped)
        .enumerate()
        .map(|(i, statement)| {
            let result = parse_statement(&statement);
            if let Err(err) = &result {
                warn!("Statement {} could not be parsed: {}", i + 1, err);
            }
            result
        })
        .collect();

    let parsed = results.iter().filter(|r| r.is_ok()).count();
    info!(
        "Parsed {} of {} CREATE TABLE statements",
        parsed,
        results.len()
    );

    results
}

/// The tables that parsed successfully, or [`ParseError::EmptyBatchResult`]
/// when the batch contained no `CREATE TABLE` statement at all.
pub fn successful_tables(results: Vec<Result<Table, ParseError>>) -> Result<Vec<Table>, ParseError> {
    if results.is_empty() {
        return Err(ParseError::EmptyBatchResult);
    }
    Ok(results.into_iter().filter_map(Result::ok).collect())
}

fn parse_statement(statement: &str) -> Result<Table, ParseError> {
    let tokens = Lexer::new().tokenize(statement)?;
    let draft = build_table(statement, &tokens)?;
    reconcile(draft)
}
