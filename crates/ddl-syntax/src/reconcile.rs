use crate::{builder::TableDraft, error::ParseError};
use model::schema::{
    index::{Index, IndexKind},
    table::Table,
};

/// Finishes a parsed table.
///
/// Columns named by `PRIMARY KEY (...)` clauses are flagged, indexes that
/// were declared twice are collapsed, and single-column unique keys fold
/// into the column's `unique` flag. Multi-column unique keys stay indexes,
/// and so do unique keys on primary key columns, whose flag is never
/// rendered.
/// The result satisfies [`Table::validate`].
pub fn reconcile(draft: TableDraft) -> Result<Table, ParseError> {
    let TableDraft {
        mut table,
        primary_key,
    } = draft;

    for column in &primary_key {
        match table.field_mut(column) {
            Some(field) => field.is_primary_key = true,
            None => {
                return Err(ParseError::UnknownIndexColumn {
                    index: "PRIMARY".to_string(),
                    column: column.clone(),
                });
            }
        }
    }

    let indexes = dedup_indexes(std::mem::take(&mut table.indexes))?;
    for index in indexes {
        if index.kind != IndexKind::Unique || index.fields.len() != 1 {
            table.indexes.push(index);
            continue;
        }

        let column = &index.fields[0];
        let is_primary_key = match table.field(column) {
            Some(field) => field.is_primary_key,
            None => {
                return Err(ParseError::UnknownIndexColumn {
                    index: index.name.clone(),
                    column: column.clone(),
                });
            }
        };

        if is_primary_key {
            table.indexes.push(index);
        } else if let Some(field) = table.field_mut(column) {
            field.unique = true;
        }
    }
    promote_primary_key_uniques(&mut table);

    table.validate()?;
    Ok(table)
}

/// Inline `UNIQUE` on a primary key column becomes a `uk_<column>` key.
fn promote_primary_key_uniques(table: &mut Table) {
    let columns: Vec<String> = table
        .fields
        .iter_mut()
        .filter(|f| f.is_primary_key && f.unique)
        .map(|f| {
            f.unique = false;
            f.name.clone()
        })
        .collect();

    for column in columns {
        let covered = table
            .indexes
            .iter()
            .any(|i| i.kind == IndexKind::Unique && i.fields == [column.as_str()]);
        if covered {
            continue;
        }

        let base = format!("uk_{}", column);
        let mut name = base.clone();
        let mut suffix = 2;
        while table.indexes.iter().any(|i| i.name == name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        table.indexes.push(Index::new(name, IndexKind::Unique, vec![column]));
    }
}

/// Drops exact repeats by `(kind, name)`. Reusing a name for a different
/// index is an error.
fn dedup_indexes(indexes: Vec<Index>) -> Result<Vec<Index>, ParseError> {
    let mut kept: Vec<Index> = Vec::with_capacity(indexes.len());

    for index in indexes {
        match kept.iter().find(|seen| seen.name == index.name) {
            Some(seen) if seen.key() == index.key() && seen.fields == index.fields => continue,
            Some(_) => return Err(ParseError::DuplicateIndexName { name: index.name }),
            None => kept.push(index),
        }
    }

    Ok(kept)
}
