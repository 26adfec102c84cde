/// Remove `--` line comments and `/* */` block comments from SQL text.
///
/// Quote-aware: comment markers inside single- or double-quoted literals are
/// kept. A line comment keeps its terminating newline; a block comment is
/// replaced by a single space so the tokens on either side stay separate.
/// An unterminated block comment runs to the end of the text.
pub fn strip_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(open) = quote {
            out.push(ch);
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => {
                quote = Some(ch);
                out.push(ch);
            }
            '\\' => {
                out.push(ch);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment() {
        let sql = "INSERT INTO t VALUES (1); -- seed the first row\nSELECT 1;";
        assert_eq!(strip_comments(sql), "INSERT INTO t VALUES (1); \nSELECT 1;");
    }

    #[test]
    fn test_strip_line_comment_at_end_without_newline() {
        assert_eq!(strip_comments("SELECT 1; -- done"), "SELECT 1; ");
    }

    #[test]
    fn test_strip_block_comment() {
        let sql = "SELECT /* inline */ 1;";
        assert_eq!(strip_comments(sql), "SELECT   1;");
    }

    #[test]
    fn test_strip_multiline_block_comment() {
        let sql = "/*\n DROP TABLE users;\n*/\nINSERT INTO t VALUES (1);";
        let stripped = strip_comments(sql);
        assert!(!stripped.contains("DROP"));
        assert!(stripped.contains("INSERT INTO t VALUES (1);"));
    }

    #[test]
    fn test_block_comment_between_tokens_keeps_them_apart() {
        assert_eq!(strip_comments("DROP/**/TABLE x"), "DROP TABLE x");
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(
            strip_comments("SELECT 1; /* never closed; DROP TABLE x;"),
            "SELECT 1;  "
        );
    }

    #[test]
    fn test_comment_markers_inside_literals_are_data() {
        let sql = "INSERT INTO links VALUES ('http://a--b', '/* not a comment */');";
        assert_eq!(strip_comments(sql), sql);
    }

    #[test]
    fn test_escaped_quote_does_not_end_literal() {
        let sql = r"INSERT INTO t VALUES ('it\'s -- fine');";
        assert_eq!(strip_comments(sql), sql);
    }

    #[test]
    fn test_single_dash_is_not_a_comment() {
        let sql = "UPDATE t SET n = n - 1;";
        assert_eq!(strip_comments(sql), sql);
    }
}
