use crate::{
    error::ParseError,
    lexer::token::{Token, TokenKind},
};
use model::{
    core::data_type::DataType,
    schema::{
        constraint::{CheckConstraint, ForeignKey},
        field::Field,
        index::{Index, IndexKind},
        table::Table,
    },
};
use tracing::debug;

pub type BuildResult<T> = Result<T, ParseError>;

/// A table as read from source, before `PRIMARY KEY (...)` clauses are
/// applied to its columns and duplicate keys are folded.
#[derive(Debug, Default)]
pub struct TableDraft {
    pub table: Table,
    /// Columns named by table-level `PRIMARY KEY (...)` clauses, in order.
    pub primary_key: Vec<String>,
}

/// Builds a table from the tokens of one statement.
///
/// The first `CREATE [TEMPORARY] TABLE` in the token stream is used; any
/// tokens after that statement's terminator are ignored.
pub fn build_table(source: &str, tokens: &[Token]) -> BuildResult<TableDraft> {
    let mut cursor = Cursor::new(tokens);

    if !seek_create_table(&mut cursor) {
        return Err(ParseError::MissingTableName);
    }
    cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);

    let name = qualified_name(&mut cursor).ok_or(ParseError::MissingTableName)?;
    let open = match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::LeftParen => tok,
        _ => return Err(ParseError::MissingTableName),
    };
    let items = column_items(&mut cursor, open)?;

    let mut draft = TableDraft {
        table: Table::new(name),
        primary_key: Vec::new(),
    };
    for item in &items {
        let mut item_cursor = Cursor::new(item.tokens);
        if build_item(&mut item_cursor, &mut draft, source).is_none() {
            return Err(unparseable(source, item));
        }
    }

    build_table_options(&mut cursor, &mut draft.table);
    Ok(draft)
}

/// One comma-separated member of the column list.
struct Item<'t> {
    tokens: &'t [Token],
    /// The `,` or `)` that closed the item.
    end: &'t Token,
}

fn seek_create_table(cursor: &mut Cursor) -> bool {
    while !cursor.is_done() {
        if cursor.eat_keyword("CREATE") {
            if !cursor.eat_keyword("TEMPORARY") {
                cursor.eat_keyword("TEMP");
            }
            if cursor.eat_keyword("TABLE") {
                return true;
            }
        } else {
            cursor.advance();
        }
    }
    false
}

/// Splits the parenthesised column list on top-level commas. The cursor is
/// left just past the closing parenthesis.
fn column_items<'t>(cursor: &mut Cursor<'t>, open: &Token) -> BuildResult<Vec<Item<'t>>> {
    let unterminated = || ParseError::UnterminatedColumnList {
        line: open.line,
        column: open.column,
    };

    cursor.advance();
    let mut items = Vec::new();
    let mut start = cursor.pos;
    let mut depth = 0usize;

    loop {
        let Some(tok) = cursor.advance() else {
            return Err(unterminated());
        };
        match tok.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen if depth == 0 => {
                items.push(Item {
                    tokens: cursor.slice(start, cursor.pos - 1),
                    end: tok,
                });
                return Ok(items);
            }
            TokenKind::RightParen => depth -= 1,
            TokenKind::Comma if depth == 0 => {
                items.push(Item {
                    tokens: cursor.slice(start, cursor.pos - 1),
                    end: tok,
                });
                start = cursor.pos;
            }
            TokenKind::Semicolon => return Err(unterminated()),
            _ => {}
        }
    }
}

fn unparseable(source: &str, item: &Item) -> ParseError {
    match item.tokens.first() {
        Some(first) => ParseError::UnparseableColumnItem {
            fragment: source_text(source, item.tokens),
            line: first.line,
            column: first.column,
        },
        None => ParseError::UnparseableColumnItem {
            fragment: String::new(),
            line: item.end.line,
            column: item.end.column,
        },
    }
}

/// Classifies one item and records it on the draft. `None` means the item
/// has none of the recognised shapes.
fn build_item(cursor: &mut Cursor, draft: &mut TableDraft, source: &str) -> Option<()> {
    let constraint = if cursor.eat_keyword("CONSTRAINT") {
        let unnamed = ["PRIMARY", "UNIQUE", "FOREIGN", "CHECK"]
            .iter()
            .any(|kw| cursor.peek_keyword(kw));
        if unnamed {
            None
        } else {
            Some(cursor.identifier()?)
        }
    } else {
        None
    };

    if cursor.eat_keywords(&["PRIMARY", "KEY"]) {
        skip_index_type(cursor);
        let columns = column_list(cursor.group()?)?;
        draft.primary_key.extend(columns);
        return Some(());
    }

    if let Some(kind) = index_kind(cursor) {
        let index = build_index(cursor, kind, constraint)?;
        draft.table.indexes.push(index);
        return Some(());
    }

    if cursor.eat_keywords(&["FOREIGN", "KEY"]) {
        // MySQL accepts an index name between FOREIGN KEY and the columns
        let index_name = if cursor.peek_kind(&TokenKind::LeftParen) {
            None
        } else {
            Some(cursor.identifier()?)
        };
        let fields = column_list(cursor.group()?)?;
        let reference = build_reference(cursor)?;
        let name = constraint
            .or(index_name)
            .unwrap_or_else(|| format!("fk_{}_{}", draft.table.name, fields.join("_")));
        draft
            .table
            .foreign_keys
            .push(reference.into_foreign_key(name, fields));
        return Some(());
    }

    if cursor.eat_keyword("CHECK") {
        let expression = source_text(source, cursor.group()?);
        draft.table.checks.push(CheckConstraint {
            name: constraint,
            expression,
        });
        return Some(());
    }

    if constraint.is_some() {
        return None;
    }

    let field = build_column(cursor, draft, source)?;
    draft.table.fields.push(field);
    Some(())
}

/// `[UNIQUE | FULLTEXT | SPATIAL] [KEY | INDEX]`, or a bare `KEY | INDEX`.
fn index_kind(cursor: &mut Cursor) -> Option<IndexKind> {
    let kind = if cursor.eat_keyword("UNIQUE") {
        IndexKind::Unique
    } else if cursor.eat_keyword("FULLTEXT") {
        IndexKind::Fulltext
    } else if cursor.eat_keyword("SPATIAL") {
        IndexKind::Spatial
    } else if cursor.peek_keyword("KEY") || cursor.peek_keyword("INDEX") {
        IndexKind::Normal
    } else {
        return None;
    };

    if !cursor.eat_keyword("KEY") {
        cursor.eat_keyword("INDEX");
    }
    Some(kind)
}

fn build_index(cursor: &mut Cursor, kind: IndexKind, constraint: Option<String>) -> Option<Index> {
    let name = match cursor.peek() {
        Some(tok) if tok.kind != TokenKind::LeftParen && !tok.is_keyword("USING") => {
            Some(cursor.identifier()?)
        }
        _ => None,
    };
    skip_index_type(cursor);

    // Trailing index options (USING, COMMENT, KEY_BLOCK_SIZE...) are ignored
    let fields = column_list(cursor.group()?)?;
    let name = name
        .or(constraint)
        .unwrap_or_else(|| default_index_name(kind, &fields));

    Some(Index::new(name, kind, fields))
}

fn default_index_name(kind: IndexKind, fields: &[String]) -> String {
    let prefix = match kind {
        IndexKind::Unique => "uk",
        _ => "idx",
    };
    format!("{}_{}", prefix, fields.join("_"))
}

fn skip_index_type(cursor: &mut Cursor) {
    if cursor.eat_keyword("USING") {
        cursor.advance();
    }
}

/// Key part names of `(a, b(10), c DESC)`.
fn column_list(group: &[Token]) -> Option<Vec<String>> {
    let mut columns = Vec::new();
    for part in split_top_level(group) {
        columns.push(part.first()?.identifier()?.to_string());
    }
    Some(columns)
}

fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

struct Reference {
    table: String,
    fields: Vec<String>,
    on_delete: Option<String>,
    on_update: Option<String>,
}

impl Reference {
    fn into_foreign_key(self, name: String, fields: Vec<String>) -> ForeignKey {
        ForeignKey {
            name,
            fields,
            referenced_table: self.table,
            referenced_fields: self.fields,
            on_delete: self.on_delete,
            on_update: self.on_update,
        }
    }
}

/// `REFERENCES t [(cols)] [ON DELETE action] [ON UPDATE action] [MATCH x]`
fn build_reference(cursor: &mut Cursor) -> Option<Reference> {
    if !cursor.eat_keyword("REFERENCES") {
        return None;
    }

    let table = qualified_name(cursor)?;
    let fields = match cursor.group() {
        Some(group) => column_list(group)?,
        None => Vec::new(),
    };
    let mut reference = Reference {
        table,
        fields,
        on_delete: None,
        on_update: None,
    };

    loop {
        if cursor.eat_keywords(&["ON", "DELETE"]) {
            reference.on_delete = Some(referential_action(cursor)?);
        } else if cursor.eat_keywords(&["ON", "UPDATE"]) {
            reference.on_update = Some(referential_action(cursor)?);
        } else if cursor.eat_keyword("MATCH") {
            cursor.advance();
        } else {
            break;
        }
    }

    Some(reference)
}

fn referential_action(cursor: &mut Cursor) -> Option<String> {
    let first = cursor.identifier()?.to_uppercase();
    if first == "SET" || first == "NO" {
        let second = cursor.identifier()?.to_uppercase();
        Some(format!("{} {}", first, second))
    } else {
        Some(first)
    }
}

fn build_column(cursor: &mut Cursor, draft: &mut TableDraft, source: &str) -> Option<Field> {
    let name = cursor.identifier()?;
    let (data_type, serial, params) = column_type(cursor)?;

    let mut field = Field::new(name, data_type);
    field.is_auto_increment = serial;
    apply_type_params(&mut field, params);

    while !cursor.is_done() {
        column_attribute(cursor, &mut field, draft, source)?;
    }

    Some(field)
}

/// Reads the type name, including multi-word spellings, and its optional
/// parameter list. The flag reports PostgreSQL serial pseudo-types.
fn column_type<'t>(cursor: &mut Cursor<'t>) -> Option<(DataType, bool, Option<&'t [Token]>)> {
    let mut type_name = match &cursor.advance()?.kind {
        TokenKind::Word(word) => word.to_uppercase(),
        _ => return None,
    };

    if type_name == "DOUBLE" && cursor.eat_keyword("PRECISION") {
        type_name = "DOUBLE PRECISION".to_string();
    } else if matches!(type_name.as_str(), "CHARACTER" | "CHAR") && cursor.eat_keyword("VARYING") {
        type_name = "CHARACTER VARYING".to_string();
    }

    let params = cursor.group();

    if matches!(type_name.as_str(), "TIME" | "TIMESTAMP")
        && !cursor.eat_keywords(&["WITH", "TIME", "ZONE"])
    {
        cursor.eat_keywords(&["WITHOUT", "TIME", "ZONE"]);
    }

    let (data_type, serial) = match type_name.as_str() {
        "SERIAL" | "SERIAL4" => (DataType::Int, true),
        "BIGSERIAL" | "SERIAL8" => (DataType::BigInt, true),
        "SMALLSERIAL" | "SERIAL2" => (DataType::SmallInt, true),
        other => (DataType::from_name(other), false),
    };

    Some((data_type, serial, params))
}

/// Numbers become length (or precision) and scale; quoted strings are the
/// members of an ENUM or SET.
fn apply_type_params(field: &mut Field, params: Option<&[Token]>) {
    let Some(params) = params else {
        return;
    };

    let mut numbers = Vec::new();
    for part in split_top_level(params) {
        match part.first().map(|tok| &tok.kind) {
            Some(TokenKind::Number(n)) => match n.parse::<u32>() {
                Ok(value) => numbers.push(value),
                Err(_) => debug!("Ignoring type parameter '{}' of column '{}'", n, field.name),
            },
            Some(TokenKind::String(value)) => field.enum_values.push(value.clone()),
            _ => debug!("Ignoring type parameter of column '{}'", field.name),
        }
    }

    let mut numbers = numbers.into_iter();
    if field.data_type.is_decimal() {
        field.precision = numbers.next();
    } else {
        field.length = numbers.next();
    }
    field.scale = numbers.next();
}

/// Consumes one attribute from the flag region of a column definition.
/// Unknown words and parenthesised groups are skipped.
fn column_attribute(
    cursor: &mut Cursor,
    field: &mut Field,
    draft: &mut TableDraft,
    source: &str,
) -> Option<()> {
    if cursor.eat_keywords(&["NOT", "NULL"]) {
        field.nullable = false;
    } else if cursor.eat_keyword("NULL") {
        field.nullable = true;
    } else if cursor.eat_keyword("DEFAULT") {
        field.default_value = Some(default_value(cursor, source)?);
    } else if cursor.eat_keyword("AUTO_INCREMENT") || cursor.eat_keyword("AUTOINCREMENT") {
        field.is_auto_increment = true;
    } else if cursor.eat_keyword("UNSIGNED") {
        field.unsigned = true;
    } else if cursor.eat_keyword("SIGNED") {
        field.unsigned = false;
    } else if cursor.eat_keyword("ZEROFILL") {
        field.zerofill = true;
    } else if cursor.eat_keyword("COMMENT") {
        field.comment = Some(cursor.string()?);
    } else if cursor.eat_keywords(&["PRIMARY", "KEY"]) {
        field.is_primary_key = true;
    } else if cursor.eat_keyword("UNIQUE") {
        if !cursor.eat_keyword("KEY") {
            cursor.eat_keyword("INDEX");
        }
        field.unique = true;
    } else if cursor.eat_keywords(&["CHARACTER", "SET"])
        || cursor.eat_keyword("CHARSET")
        || cursor.eat_keyword("COLLATE")
    {
        cursor.advance()?;
    } else if cursor.eat_keywords(&["ON", "UPDATE"]) {
        field.on_update = Some(call_text(cursor, source)?);
    } else if cursor.eat_keyword("GENERATED") {
        generated_column(cursor, field);
    } else if cursor.peek_keyword("REFERENCES") {
        let reference = build_reference(cursor)?;
        let name = format!("fk_{}_{}", draft.table.name, field.name);
        draft
            .table
            .foreign_keys
            .push(reference.into_foreign_key(name, vec![field.name.clone()]));
    } else if cursor.eat_keyword("CHECK") {
        let expression = source_text(source, cursor.group()?);
        draft.table.checks.push(CheckConstraint {
            name: None,
            expression,
        });
    } else if cursor.eat_keyword("CONSTRAINT") {
        cursor.identifier()?;
    } else if cursor.group().is_some() {
        debug!("Skipping parenthesised attribute of column '{}'", field.name);
    } else {
        let tok = cursor.advance()?;
        debug!("Skipping unknown attribute '{}' of column '{}'", tok.lexeme, field.name);
    }

    Some(())
}

/// `GENERATED {ALWAYS | BY DEFAULT} AS IDENTITY [(...)]`. Computed columns
/// (`AS (expr)`) leave their expression for the attribute loop to skip.
fn generated_column(cursor: &mut Cursor, field: &mut Field) {
    if !cursor.eat_keyword("ALWAYS") {
        cursor.eat_keywords(&["BY", "DEFAULT"]);
    }
    cursor.eat_keyword("AS");
    if cursor.eat_keyword("IDENTITY") {
        field.is_auto_increment = true;
        cursor.group();
    }
}

fn default_value(cursor: &mut Cursor, source: &str) -> Option<String> {
    let value = match &cursor.peek()?.kind {
        TokenKind::String(value) | TokenKind::QuotedIdent(value) | TokenKind::Number(value) => {
            let value = value.clone();
            cursor.advance();
            value
        }
        TokenKind::LeftParen => {
            let start = cursor.peek()?.span.0;
            cursor.group()?;
            let end = cursor.previous()?.span.1;
            source.get(start..end)?.to_string()
        }
        TokenKind::Word(_) => match prefixed_literal(cursor, source) {
            Some(literal) => literal,
            None => call_text(cursor, source)?,
        },
        _ => return None,
    };

    // PostgreSQL casts such as 'x'::character varying
    while cursor.eat(&TokenKind::DoubleColon) {
        cursor.identifier()?;
        cursor.group();
    }

    Some(value)
}

/// A string with an adjacent prefix such as `b'0'`, `x'00'` or
/// `_utf8mb4'abc'`, as written.
fn prefixed_literal(cursor: &mut Cursor, source: &str) -> Option<String> {
    let prefix = cursor.peek()?;
    let literal = cursor.peek_next()?;
    if !matches!(literal.kind, TokenKind::String(_)) || prefix.span.1 != literal.span.0 {
        return None;
    }

    let text = source.get(prefix.span.0..literal.span.1)?.to_string();
    cursor.advance();
    cursor.advance();
    Some(text)
}

/// A keyword or function call, e.g. `CURRENT_TIMESTAMP(3)`, as written.
fn call_text(cursor: &mut Cursor, source: &str) -> Option<String> {
    let start = cursor.peek()?.span.0;
    cursor.identifier()?;
    if cursor.peek_kind(&TokenKind::LeftParen) {
        cursor.group()?;
    }
    let end = cursor.previous()?.span.1;
    source.get(start..end).map(str::to_string)
}

fn qualified_name(cursor: &mut Cursor) -> Option<String> {
    let mut name = cursor.identifier()?;
    while cursor.eat(&TokenKind::Dot) {
        name = cursor.identifier()?;
    }
    Some(name)
}

/// Table options after the column list, up to the statement terminator.
/// The first occurrence of an option wins.
fn build_table_options(cursor: &mut Cursor, table: &mut Table) {
    while let Some(tok) = cursor.peek() {
        if tok.kind == TokenKind::Semicolon {
            break;
        }

        if cursor.eat_keyword("ENGINE") {
            set_once(&mut table.engine, option_value(cursor));
        } else if cursor.eat_keywords(&["CHARACTER", "SET"]) || cursor.eat_keyword("CHARSET") {
            set_once(&mut table.charset, option_value(cursor));
        } else if cursor.eat_keyword("COLLATE") {
            set_once(&mut table.collation, option_value(cursor));
        } else if cursor.eat_keyword("AUTO_INCREMENT") {
            let start = option_value(cursor).and_then(|v| v.parse().ok());
            set_once(&mut table.auto_increment_start, start);
        } else if cursor.eat_keyword("ROW_FORMAT") {
            set_once(&mut table.row_format, option_value(cursor));
        } else if cursor.eat_keyword("TABLESPACE") {
            set_once(&mut table.table_space, option_value(cursor));
        } else if cursor.eat_keyword("COMMENT") {
            set_once(&mut table.comment, option_value(cursor));
        } else {
            cursor.advance();
        }
    }
}

/// `[=] value`
fn option_value(cursor: &mut Cursor) -> Option<String> {
    cursor.eat(&TokenKind::Equals);
    let value = cursor.peek()?.value()?.to_string();
    cursor.advance();
    Some(value)
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Source text covered by `tokens`.
fn source_text(source: &str, tokens: &[Token]) -> String {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => source
            .get(first.span.0..last.span.1)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// Index-based cursor over an immutable token slice.
struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens
            .get(self.pos)
            .filter(|tok| tok.kind != TokenKind::Eof)
    }

    fn peek_next(&self) -> Option<&'t Token> {
        self.tokens
            .get(self.pos + 1)
            .filter(|tok| tok.kind != TokenKind::Eof)
    }

    fn previous(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos.checked_sub(1)?)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    fn is_done(&self) -> bool {
        self.peek().is_none()
    }

    fn slice(&self, start: usize, end: usize) -> &'t [Token] {
        &self.tokens[start..end]
    }

    fn peek_kind(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|tok| &tok.kind == kind)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|tok| tok.is_keyword(keyword))
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.peek_kind(kind);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let matched = self.peek_keyword(keyword);
        if matched {
            self.pos += 1;
        }
        matched
    }

    /// Consumes the whole keyword sequence, or nothing.
    fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let rest = self.tokens.get(self.pos..).unwrap_or_default();
        let matched = rest.len() >= keywords.len()
            && keywords
                .iter()
                .zip(rest)
                .all(|(keyword, tok)| tok.is_keyword(keyword));
        if matched {
            self.pos += keywords.len();
        }
        matched
    }

    fn identifier(&mut self) -> Option<String> {
        let name = self.peek()?.identifier()?.to_string();
        self.pos += 1;
        Some(name)
    }

    fn string(&mut self) -> Option<String> {
        match &self.peek()?.kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.pos += 1;
                Some(value)
            }
            _ => None,
        }
    }

    /// Consumes a balanced `( ... )` group and returns the tokens inside it.
    fn group(&mut self) -> Option<&'t [Token]> {
        if !self.peek_kind(&TokenKind::LeftParen) {
            return None;
        }

        let start = self.pos + 1;
        let mut depth = 0usize;
        let mut pos = self.pos;
        while let Some(tok) = self.tokens.get(pos) {
            pos += 1;
            match tok.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = pos;
                        return Some(&self.tokens[start..pos - 1]);
                    }
                }
                TokenKind::Eof => break,
                _ => {}
            }
        }
        None
    }
}
