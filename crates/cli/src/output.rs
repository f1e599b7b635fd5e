use crate::error::CliError;
use ddl_syntax::error::ParseError;
use model::schema::table::Table;
use serde::Serialize;

/// Outcome of one statement of a parsed batch.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatementReport {
    Ok { statement: usize, table: Table },
    Error { statement: usize, error: String },
}

pub fn batch_report(results: Vec<Result<Table, ParseError>>) -> Vec<StatementReport> {
    results
        .into_iter()
        .enumerate()
        .map(|(i, result)| match result {
            Ok(table) => StatementReport::Ok {
                statement: i + 1,
                table,
            },
            Err(err) => StatementReport::Error {
                statement: i + 1,
                error: err.to_string(),
            },
        })
        .collect()
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

/// Writes `text` to `path`, or prints it when no path is given.
pub fn emit(text: &str, path: Option<String>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_report_numbers_statements() {
        let results = vec![
            Ok(Table::new("users")),
            Err(ParseError::MissingTableName),
        ];
        let json = serde_json::to_value(batch_report(results)).unwrap();

        assert_eq!(json[0]["status"], "ok");
        assert_eq!(json[0]["statement"], 1);
        assert_eq!(json[0]["table"]["name"], "users");
        assert_eq!(json[1]["status"], "error");
        assert_eq!(json[1]["statement"], 2);
    }
}
