use std::fmt;

use super::comments::strip_comments;

/// One SQL command cut out of a seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based position within the file.
    pub index: usize,
    pub sql: String,
}

impl Statement {
    pub fn as_str(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Split seed file text into statements at top-level semicolons.
///
/// Comments are stripped first. The scan tracks single- and double-quoted
/// literals; a semicolon inside a literal is data. A backslash escapes the
/// next character, so `\'` never opens or closes a literal. SQL quote
/// doubling (`'it''s'`) needs no special case: the two quotes close and
/// reopen the literal with nothing in between.
///
/// Statements are trimmed and whitespace-only statements are dropped. Text
/// after the last semicolon counts as a statement when it isn't blank.
pub fn split_statements(sql: &str) -> Vec<Statement> {
    let stripped = strip_comments(sql);
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = stripped.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '\'' | '"' => {
                current.push(ch);
                match quote {
                    None => quote = Some(ch),
                    Some(open) if open == ch => quote = None,
                    Some(_) => {}
                }
            }
            ';' if quote.is_none() => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<Statement>, raw: &str) {
    let sql = raw.trim();
    if sql.is_empty() {
        return;
    }
    statements.push(Statement {
        index: statements.len() + 1,
        sql: sql.to_string(),
    });
}
