//! Parse, generate and parse again

use ddl_render::{DialectKind, GenerationOptions, generate_batch, generate_single};
use ddl_syntax::{parse_batch, parse_single, successful_tables};
use model::schema::{index::Index, table::Table};
use std::collections::HashSet;

const USERS: &str = "CREATE TABLE users (id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT, username VARCHAR(50) NOT NULL, PRIMARY KEY (id), UNIQUE KEY uk_username (username)) COMMENT='用户表';";

const ORDERS: &str = "
-- Orders placed by users
CREATE TABLE `orders` (
  `id` INT(11) NOT NULL AUTO_INCREMENT COMMENT 'order id',
  `user_id` BIGINT UNSIGNED NOT NULL,
  `status` ENUM('new','paid','shipped') NOT NULL DEFAULT 'new',
  `total` DECIMAL(10,2) NOT NULL DEFAULT '0.00',
  `note` VARCHAR(255) DEFAULT NULL COMMENT 'it''s optional; really',
  `created_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
  `updated_at` TIMESTAMP NULL DEFAULT NULL ON UPDATE CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_user_status` (`user_id`, `status`),
  KEY `idx_created` (`created_at`),
  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=100 DEFAULT CHARSET=utf8mb4 COMMENT='订单';
";

const FLAGS: &str = "CREATE TABLE `flags` (
  `id` INT NOT NULL,
  `flag` BIT(1) NOT NULL DEFAULT b'0',
  `h` BINARY(1) DEFAULT x'00',
  `label` VARCHAR(20) DEFAULT _utf8mb4'none',
  `qty` INT NOT NULL DEFAULT 0,
  PRIMARY KEY (`id`),
  CONSTRAINT `chk_qty` CHECK (`qty` >= 0),
  CHECK (`flag` IN (b'0', b'1'))
);";

fn index_set(table: &Table) -> HashSet<Index> {
    table.indexes.iter().cloned().collect()
}

fn assert_equivalent(original: &Table, reparsed: &Table) {
    assert_eq!(reparsed.name, original.name);
    assert_eq!(reparsed.fields, original.fields);
    assert_eq!(index_set(reparsed), index_set(original));
    assert_eq!(reparsed.foreign_keys, original.foreign_keys);
    assert_eq!(reparsed.checks, original.checks);
    assert_eq!(reparsed.comment, original.comment);
}

fn mysql_roundtrip(ddl: &str) -> (Table, Table) {
    let original = parse_single(ddl).unwrap();
    let sql = generate_single(&original, &GenerationOptions::default());
    let reparsed = parse_single(&sql).unwrap();
    assert_equivalent(&original, &reparsed);
    (original, reparsed)
}

#[test]
fn test_mysql_roundtrip_users() {
    let original = parse_single(USERS).unwrap();
    let sql = generate_single(&original, &GenerationOptions::default());
    let reparsed = parse_single(&sql).unwrap();

    assert_equivalent(&original, &reparsed);
}

#[test]
fn test_mysql_roundtrip_keeps_attributes() {
    let original = parse_single(ORDERS).unwrap();
    assert_eq!(original.fields.len(), 7);
    assert_eq!(original.indexes.len(), 2);

    let sql = generate_single(&original, &GenerationOptions::default());
    let reparsed = parse_single(&sql).unwrap();

    assert_equivalent(&original, &reparsed);
    assert_eq!(reparsed.auto_increment_start, Some(100));
    assert_eq!(reparsed.charset.as_deref(), Some("utf8mb4"));
}

#[test]
fn test_roundtrip_without_optional_parts() {
    let options = GenerationOptions {
        include_comments: false,
        include_drop_table: false,
        include_if_not_exists: false,
        include_charset: false,
        ..Default::default()
    };
    let original = parse_single(ORDERS).unwrap();
    let reparsed = parse_single(&generate_single(&original, &options)).unwrap();

    assert_eq!(reparsed.fields.len(), original.fields.len());
    assert!(reparsed.fields.iter().all(|f| f.comment.is_none()));
    assert!(reparsed.comment.is_none());
    assert_eq!(index_set(&reparsed), index_set(&original));
}

#[test]
fn test_postgres_output_parses_back() {
    let original = parse_single(USERS).unwrap();
    let sql = generate_single(
        &original,
        &GenerationOptions::for_dialect(DialectKind::PostgreSql),
    );
    let reparsed = parse_single(&sql).unwrap();

    let names: Vec<_> = reparsed.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "username"]);

    let id = &reparsed.fields[0];
    assert!(id.is_primary_key && id.is_auto_increment && !id.nullable);
    assert!(reparsed.fields[1].unique);
    assert!(reparsed.indexes.is_empty());
}

#[test]
fn test_sqlite_output_parses_back() {
    let original = parse_single(USERS).unwrap();
    let sql = generate_single(&original, &GenerationOptions::for_dialect(DialectKind::Sqlite));
    let reparsed = parse_single(&sql).unwrap();

    assert_eq!(reparsed.sole_primary_key().map(|f| f.name.as_str()), Some("id"));
    assert!(reparsed.fields[0].is_auto_increment);
    assert!(reparsed.fields[1].unique);
}

#[test]
fn test_batch_roundtrip() {
    let input = format!("{USERS}\n{ORDERS}");
    let tables = successful_tables(parse_batch(&input)).unwrap();
    assert_eq!(tables.len(), 2);

    let sql = generate_batch(&tables, &GenerationOptions::default());
    let reparsed = successful_tables(parse_batch(&sql)).unwrap();

    assert_eq!(reparsed.len(), 2);
    for (original, reparsed) in tables.iter().zip(&reparsed) {
        assert_equivalent(original, reparsed);
    }
}

#[test]
fn test_mysql_roundtrip_keeps_prefixed_defaults_and_checks() {
    let (original, reparsed) = mysql_roundtrip(FLAGS);

    assert_eq!(original.fields[1].default_value.as_deref(), Some("b'0'"));
    assert_eq!(original.fields[2].default_value.as_deref(), Some("x'00'"));
    assert_eq!(reparsed.checks.len(), 2);
    assert_eq!(reparsed.checks[0].name.as_deref(), Some("chk_qty"));
    assert_eq!(reparsed.engine.as_deref(), Some("InnoDB"));
}

#[test]
fn test_prefixed_defaults_in_generated_sql() {
    let table = parse_single(FLAGS).unwrap();
    let sql = generate_single(&table, &GenerationOptions::default());

    assert!(sql.contains("`flag` BIT(1) NOT NULL DEFAULT b'0'"));
    assert!(sql.contains("`h` BINARY(1) DEFAULT x'00'"));
    assert!(sql.contains("`label` VARCHAR(20) DEFAULT _utf8mb4'none'"));
    assert!(!sql.contains("DEFAULT 'b'"));
}

#[test]
fn test_unique_field_survives_key_name_clash() {
    let (_, reparsed) =
        mysql_roundtrip("CREATE TABLE t (email VARCHAR(10) UNIQUE, KEY uk_email (email));");
    assert!(reparsed.field("email").unwrap().unique);

    let (_, reparsed) = mysql_roundtrip(
        "CREATE TABLE t (email VARCHAR(10) UNIQUE, a INT, b INT, UNIQUE KEY uk_email (a, b));",
    );
    assert!(reparsed.field("email").unwrap().unique);
    assert_eq!(reparsed.indexes.len(), 1);
}

#[test]
fn test_unique_key_on_primary_key_survives() {
    const DDL: &str = "CREATE TABLE t (id INT NOT NULL, PRIMARY KEY (id), UNIQUE KEY uk_id (id));";
    let (original, _) = mysql_roundtrip(DDL);
    assert_eq!(original.indexes.len(), 1);

    let sql = generate_single(
        &original,
        &GenerationOptions::for_dialect(DialectKind::PostgreSql),
    );
    assert!(sql.contains(r#"CONSTRAINT "uk_id" UNIQUE ("id")"#));
    assert_equivalent(&original, &parse_single(&sql).unwrap());
}
