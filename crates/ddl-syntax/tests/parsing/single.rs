//! Tests for single statement parsing

use ddl_syntax::{error::ParseError, parse_single};
use model::{
    core::data_type::DataType,
    schema::index::{Index, IndexKind},
};

#[test]
fn test_users_table() {
    let input = "CREATE TABLE users (id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, username VARCHAR(50) NOT NULL, PRIMARY KEY (id), UNIQUE KEY uk_username (username)) COMMENT='用户表';";

    let table = parse_single(input).unwrap();
    assert_eq!(table.name, "users");
    assert_eq!(table.comment.as_deref(), Some("用户表"));
    assert!(table.indexes.is_empty());
    assert_eq!(table.fields.len(), 2);

    let id = &table.fields[0];
    assert_eq!(id.name, "id");
    assert_eq!(id.data_type, DataType::BigInt);
    assert!(id.unsigned && id.is_auto_increment && id.is_primary_key);
    assert!(!id.nullable);
    assert!(!id.unique);

    let username = &table.fields[1];
    assert_eq!(username.name, "username");
    assert_eq!(username.data_type, DataType::VarChar);
    assert_eq!(username.length, Some(50));
    assert!(!username.nullable);
    assert!(username.unique);
    assert!(!username.is_primary_key);
}

#[test]
fn test_primary_key_merge_adds_no_phantom_field() {
    let table =
        parse_single("CREATE TABLE t (id INT NOT NULL, name VARCHAR(20), PRIMARY KEY (id));")
            .unwrap();

    assert_eq!(table.fields.len(), 2);
    let keys: Vec<_> = table.primary_key_fields().map(|f| f.name.as_str()).collect();
    assert_eq!(keys, vec!["id"]);
}

#[test]
fn test_decimal_parameters_do_not_split_the_column_list() {
    let table = parse_single("CREATE TABLE t (price DECIMAL(10,2), qty INT);").unwrap();

    assert_eq!(table.fields.len(), 2);
    assert_eq!(table.fields[0].precision, Some(10));
    assert_eq!(table.fields[0].scale, Some(2));
}

#[test]
fn test_comments_are_ignored() {
    let input = r#"
        -- users of the shop
        CREATE TABLE `users` ( /* surrogate key */
            `id` INT NOT NULL, # MySQL style
            `note` VARCHAR(100) DEFAULT '-- not a comment'
        );
    "#;

    let table = parse_single(input).unwrap();
    assert_eq!(table.fields.len(), 2);
    assert_eq!(
        table.fields[1].default_value.as_deref(),
        Some("-- not a comment")
    );
}

#[test]
fn test_multi_column_unique_key_is_preserved() {
    let table = parse_single(
        "CREATE TABLE t (a INT, b INT, UNIQUE KEY uk_ab (a, b), KEY idx_b (b));",
    )
    .unwrap();

    assert_eq!(
        table.indexes,
        vec![
            Index::new("uk_ab", IndexKind::Unique, vec!["a".into(), "b".into()]),
            Index::new("idx_b", IndexKind::Normal, vec!["b".into()]),
        ]
    );
    assert!(table.fields.iter().all(|f| !f.unique));
}

#[test]
fn test_index_on_unknown_column() {
    let err = parse_single("CREATE TABLE t (a INT, KEY idx_x (x));").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownIndexColumn {
            index: "idx_x".to_string(),
            column: "x".to_string(),
        }
    );
}

#[test]
fn test_duplicate_column() {
    let err = parse_single("CREATE TABLE t (a INT, a TEXT);").unwrap_err();
    assert_eq!(err, ParseError::DuplicateColumn { name: "a".to_string() });
}

#[test]
fn test_duplicate_index_name() {
    let err = parse_single("CREATE TABLE t (a INT, b INT, KEY idx (a), KEY idx (b));").unwrap_err();
    assert_eq!(err, ParseError::DuplicateIndexName { name: "idx".to_string() });
}

#[test]
fn test_foreign_key_on_unknown_column() {
    let err = parse_single(
        "CREATE TABLE t (a INT, CONSTRAINT fk_t FOREIGN KEY (b) REFERENCES u (id));",
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::UnknownForeignKeyColumn { constraint, column }
        if constraint == "fk_t" && column == "b"));
}

#[test]
fn test_unterminated_literal() {
    let err = parse_single("CREATE TABLE t (a TEXT COMMENT 'oops);").unwrap_err();
    assert!(matches!(err, ParseError::Lexer(_)));
}

#[test]
fn test_unparseable_item() {
    let err = parse_single("CREATE TABLE t (a INT, = 1);").unwrap_err();
    assert!(matches!(err, ParseError::UnparseableColumnItem { fragment, .. } if fragment == "= 1"));
}

#[test]
fn test_postgres_style_table() {
    let input = r#"
        DROP TABLE IF EXISTS "accounts";
        CREATE TABLE IF NOT EXISTS "public"."accounts" (
            "id" SERIAL,
            "email" CHARACTER VARYING(120) NOT NULL DEFAULT ''::character varying,
            "balance" NUMERIC(12,2) DEFAULT 0,
            "created_at" TIMESTAMP WITHOUT TIME ZONE DEFAULT now(),
            CONSTRAINT "accounts_pkey" PRIMARY KEY ("id"),
            CONSTRAINT "accounts_email_key" UNIQUE ("email")
        );
        CREATE INDEX "accounts_created_at" ON "accounts" ("created_at");
    "#;

    let table = parse_single(input).unwrap();
    assert_eq!(table.name, "accounts");

    let id = table.field("id").unwrap();
    assert!(id.is_primary_key && id.is_auto_increment);
    assert_eq!(id.data_type, DataType::Int);

    let email = table.field("email").unwrap();
    assert_eq!(email.data_type, DataType::VarChar);
    assert_eq!(email.length, Some(120));
    assert_eq!(email.default_value.as_deref(), Some(""));
    assert!(email.unique);

    let balance = table.field("balance").unwrap();
    assert_eq!(balance.data_type, DataType::Numeric);
    assert_eq!((balance.precision, balance.scale), (Some(12), Some(2)));

    let created = table.field("created_at").unwrap();
    assert_eq!(created.data_type, DataType::Timestamp);
    assert_eq!(created.default_value.as_deref(), Some("now()"));
}

#[test]
fn test_sqlite_style_table() {
    let table = parse_single(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY AUTOINCREMENT, body TEXT NOT NULL, archived INTEGER DEFAULT 0);",
    )
    .unwrap();

    let id = table.field("id").unwrap();
    assert!(id.is_primary_key && id.is_auto_increment);
    assert_eq!(id.data_type, DataType::Int);
    assert_eq!(table.field("archived").unwrap().default_value.as_deref(), Some("0"));
}
