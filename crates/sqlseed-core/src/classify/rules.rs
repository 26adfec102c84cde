use std::sync::LazyLock;

use regex::Regex;

use super::{Classification, DangerousOperation};
use crate::sql::{split_statements, strip_comments};

/// A danger rule: case-insensitive regex + the operation it detects.
struct DangerRule {
    pattern: &'static str,
    operation: DangerousOperation,
    /// Match against each statement separately instead of the whole text.
    per_statement: bool,
}

/// A pre-compiled danger rule with a ready-to-use regex.
struct CompiledRule {
    pattern: Regex,
    operation: DangerousOperation,
    per_statement: bool,
}

const DANGER_RULES: &[DangerRule] = &[
    DangerRule {
        pattern: r"(?i)\bDELETE\s+FROM\b",
        operation: DangerousOperation::DeleteFrom,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bTRUNCATE\s+(?:TABLE\s+)?\S",
        operation: DangerousOperation::Truncate,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+TABLE\b",
        operation: DangerousOperation::DropTable,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+SCHEMA\b",
        operation: DangerousOperation::DropSchema,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+DATABASE\b",
        operation: DangerousOperation::DropDatabase,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+INDEX\b",
        operation: DangerousOperation::DropIndex,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+VIEW\b",
        operation: DangerousOperation::DropView,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+FUNCTION\b",
        operation: DangerousOperation::DropFunction,
        per_statement: false,
    },
    DangerRule {
        pattern: r"(?i)\bDROP\s+TRIGGER\b",
        operation: DangerousOperation::DropTrigger,
        per_statement: false,
    },
    // ALTER TABLE and DROP must be in the same statement.
    DangerRule {
        pattern: r"(?is)\bALTER\s+TABLE\b.*?\bDROP\b",
        operation: DangerousOperation::AlterTableDrop,
        per_statement: true,
    },
];

/// Pre-compiled danger rules, built once on first access.
static COMPILED_DANGER_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    DANGER_RULES
        .iter()
        .map(|r| CompiledRule {
            pattern: Regex::new(r.pattern).unwrap(),
            operation: r.operation,
            per_statement: r.per_statement,
        })
        .collect()
});

/// Classify a seed file's full text.
///
/// Comments are stripped first so commented-out statements don't count.
/// Most rules are tested against the whole remaining text; statement-scoped
/// rules are tested against each statement as the executor would split it.
/// The result lists each distinct operation that matched anywhere.
pub fn classify(sql: &str) -> Classification {
    let stripped = strip_comments(sql);
    let statements = split_statements(sql);

    let operations: Vec<DangerousOperation> = COMPILED_DANGER_RULES
        .iter()
        .filter(|rule| {
            if rule.per_statement {
                statements.iter().any(|s| rule.pattern.is_match(&s.sql))
            } else {
                rule.pattern.is_match(&stripped)
            }
        })
        .map(|rule| rule.operation)
        .collect();

    if operations.is_empty() {
        Classification::Safe
    } else {
        Classification::Dangerous(operations)
    }
}
