use std::borrow::Cow;
use tracing::debug;

/// Lazy sequence of the `CREATE TABLE` statements found in a batch.
///
/// The iterator is cheap to clone, so a consumer can restart the sequence
/// from the beginning by cloning it before the first call to `next`.
#[derive(Debug, Clone)]
pub struct Statements<'a> {
    input: &'a str,
    pos: usize,
}

/// Splits comment-free DDL into statements.
///
/// A `;` ends a statement only outside quoted literals and only when it is
/// followed by whitespace or the end of input. Statements that are not
/// `CREATE TABLE` are discarded. Every yielded statement ends with `;`.
pub fn split_statements(input: &str) -> Statements<'_> {
    Statements { input, pos: 0 }
}

impl<'a> Iterator for Statements<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            let end = statement_end(rest);
            self.pos += end;

            let statement = rest[..end].trim();
            if statement.is_empty() || statement == ";" {
                continue;
            }
            if !is_create_table(statement) {
                debug!("Discarding non CREATE TABLE statement: {}", preview(statement));
                continue;
            }

            return Some(if statement.ends_with(';') {
                Cow::Borrowed(statement)
            } else {
                Cow::Owned(format!("{};", statement))
            });
        }
        None
    }
}

/// Byte offset just past the terminator of the first statement in `text`,
/// or `text.len()` when the statement runs to the end of input.
fn statement_end(text: &str) -> usize {
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' && q != '`' {
                    chars.next();
                } else if c == q {
                    if matches!(chars.peek(), Some(&(_, next)) if next == q) {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                ';' => match chars.peek() {
                    None => return i + 1,
                    Some(&(_, next)) if next.is_whitespace() => return i + 1,
                    Some(_) => {}
                },
                _ => {}
            },
        }
    }

    text.len()
}

/// `CREATE [TEMPORARY] TABLE ...`, keywords matched case-insensitively.
pub(crate) fn is_create_table(statement: &str) -> bool {
    let mut words = statement.split(|c: char| !(c.is_alphanumeric() || c == '_'));

    // The keyword has to open the statement
    match words.next() {
        Some(first) if first.eq_ignore_ascii_case("CREATE") => {}
        _ => return false,
    }

    let mut words = words.filter(|w| !w.is_empty());
    match words.next() {
        Some(w) if w.eq_ignore_ascii_case("TABLE") => true,
        Some(w) if w.eq_ignore_ascii_case("TEMPORARY") || w.eq_ignore_ascii_case("TEMP") => {
            matches!(words.next(), Some(t) if t.eq_ignore_ascii_case("TABLE"))
        }
        _ => false,
    }
}

fn preview(statement: &str) -> String {
    let line = statement.lines().next().unwrap_or_default();
    if line.chars().count() > 60 {
        format!("{}...", line.chars().take(60).collect::<String>())
    } else {
        line.to_string()
    }
}
