//! Generation from parsed DDL in each dialect

use ddl_render::{DialectKind, GenerationOptions, generate_single, map_type};
use ddl_syntax::parse_single;

const PRODUCTS: &str = "CREATE TABLE products (
    id INT NOT NULL AUTO_INCREMENT,
    sku VARCHAR(32) NOT NULL,
    price DECIMAL(10,2) DEFAULT 0,
    description TEXT,
    listed_at DATETIME,
    PRIMARY KEY (id),
    KEY idx_listed (listed_at)
) COMMENT='商品';";

fn options(dialect: DialectKind) -> GenerationOptions {
    GenerationOptions {
        include_drop_table: false,
        ..GenerationOptions::for_dialect(dialect)
    }
}

#[test]
fn test_type_mapping_of_parsed_fields() {
    let table = parse_single(PRODUCTS).unwrap();
    let id = &table.fields[0];
    let price = &table.fields[2];

    assert_eq!(map_type(id, DialectKind::PostgreSql), "SERIAL");
    assert_eq!(map_type(&table.fields[1], DialectKind::MySql), "VARCHAR(32)");
    assert_eq!(map_type(price, DialectKind::Sqlite), "REAL");
    assert_eq!(map_type(price, DialectKind::PostgreSql), "DECIMAL(10,2)");
}

#[test]
fn test_mysql_products() {
    let table = parse_single(PRODUCTS).unwrap();
    let sql = generate_single(&table, &options(DialectKind::MySql));

    assert!(sql.contains("`id` INT NOT NULL AUTO_INCREMENT,"));
    assert!(sql.contains("`price` DECIMAL(10,2) DEFAULT 0,"));
    assert!(sql.contains("KEY `idx_listed` (`listed_at`)"));
    assert!(sql.contains("COMMENT = '商品';"));
}

#[test]
fn test_postgres_products() {
    let table = parse_single(PRODUCTS).unwrap();
    let sql = generate_single(&table, &options(DialectKind::PostgreSql));

    assert!(sql.contains(r#""id" SERIAL NOT NULL,"#));
    assert!(sql.contains(r#""listed_at" TIMESTAMP"#));
    assert!(sql.contains("\n);\n"));
    assert!(sql.contains(r#"CREATE INDEX IF NOT EXISTS "products_listed_at" ON "products" ("listed_at");"#));
    assert!(sql.ends_with(r#"COMMENT ON TABLE "products" IS '商品';"#));
    assert!(!sql.contains("AUTO_INCREMENT"));
    assert!(!sql.contains("ENGINE"));
}

#[test]
fn test_sqlite_products() {
    let table = parse_single(PRODUCTS).unwrap();
    let sql = generate_single(&table, &options(DialectKind::Sqlite));

    assert!(sql.contains("id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,"));
    assert!(sql.contains("sku TEXT NOT NULL,"));
    assert!(sql.contains("price REAL DEFAULT 0,"));
    assert!(sql.contains("listed_at DATETIME\n);"));
    assert!(!sql.contains("PRIMARY KEY (id)"));
    assert!(sql.ends_with("CREATE INDEX IF NOT EXISTS products_listed_at ON products (listed_at);"));
}
