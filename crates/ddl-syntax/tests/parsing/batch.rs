//! Tests for batch parsing

use ddl_syntax::{error::ParseError, parse_batch, successful_tables};

#[test]
fn test_partial_failure_keeps_going() {
    let input = "
        CREATE TABLE good (id INT NOT NULL, PRIMARY KEY (id));
        CREATE TABLE bad (id INT, PRIMARY KEY (missing));
    ";

    let results = parse_batch(input);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().name, "good");
    assert!(matches!(
        &results[1],
        Err(ParseError::UnknownIndexColumn { column, .. }) if column == "missing"
    ));
}

#[test]
fn test_failure_before_success_does_not_abort() {
    let input = "CREATE TABLE (id INT);\nCREATE TABLE second (id INT);\n";

    let results = parse_batch(input);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Err(ParseError::MissingTableName));
    assert_eq!(results[1].as_ref().unwrap().name, "second");
}

#[test]
fn test_dump_with_other_statements() {
    let input = r#"
/*!40101 SET NAMES utf8mb4 */;
SET FOREIGN_KEY_CHECKS = 0;

-- ----------------------------
-- Table structure for dept
-- ----------------------------
DROP TABLE IF EXISTS `dept`;
CREATE TABLE `dept` (
  `id` int NOT NULL AUTO_INCREMENT COMMENT 'key',
  `name` varchar(64) NOT NULL DEFAULT '' COMMENT 'name',
  PRIMARY KEY (`id`)
) ENGINE=InnoDB AUTO_INCREMENT=7 DEFAULT CHARSET=utf8mb4 COMMENT='departments';

INSERT INTO `dept` VALUES (1, 'R&D');

DROP TABLE IF EXISTS `emp`;
CREATE TABLE `emp` (
  `id` bigint NOT NULL,
  `dept_id` int DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `idx_dept` (`dept_id`),
  CONSTRAINT `fk_emp_dept` FOREIGN KEY (`dept_id`) REFERENCES `dept` (`id`)
) ENGINE=InnoDB;

SET FOREIGN_KEY_CHECKS = 1;
"#;

    let tables = successful_tables(parse_batch(input)).unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["dept", "emp"]);

    let dept = &tables[0];
    assert_eq!(dept.auto_increment_start, Some(7));
    assert_eq!(dept.charset.as_deref(), Some("utf8mb4"));
    assert_eq!(dept.comment.as_deref(), Some("departments"));

    let emp = &tables[1];
    assert_eq!(emp.indexes.len(), 1);
    assert_eq!(emp.foreign_keys[0].referenced_table, "dept");
}

#[test]
fn test_terminator_inside_comment_literal() {
    let input = "CREATE TABLE a (id INT COMMENT 'ends with;\n');\nCREATE TABLE b (id INT);\n";

    let results = parse_batch(input);
    assert_eq!(results.len(), 2);
    let a = results[0].as_ref().unwrap();
    assert_eq!(a.fields[0].comment.as_deref(), Some("ends with;\n"));
    assert_eq!(results[1].as_ref().unwrap().name, "b");
}

#[test]
fn test_no_tables_is_an_empty_result() {
    let results = parse_batch("INSERT INTO t VALUES (1);\nUPDATE t SET a = 2;\n");
    assert!(results.is_empty());
    assert_eq!(successful_tables(results), Err(ParseError::EmptyBatchResult));
}
