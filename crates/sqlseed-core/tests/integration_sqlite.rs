//! End-to-end tests against an in-memory SQLite database through sqlx.
//!
//! These exercise real `BEGIN` / `ROLLBACK` semantics, so they check that a
//! failed file leaves no rows behind rather than trusting a mock.

use sqlseed_core::db::{DatabaseType, SeedConnection, SqlxConnection};
use sqlseed_core::discover::discover_files;
use sqlseed_core::execute::{BlockReason, ExecutionResult, SeedExecutor};
use sqlseed_testutil::{seed_dir, ScriptedOperator};

async fn connect_with_schema() -> SqlxConnection {
    let mut conn = SqlxConnection::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    assert_eq!(conn.database_type(), DatabaseType::SQLite);
    conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL, note TEXT)")
        .await
        .expect("create users table");
    conn
}

async fn count_users(conn: &mut SqlxConnection) -> i64 {
    match conn {
        SqlxConnection::Sqlite(c) => sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(c)
            .await
            .expect("count users"),
        _ => unreachable!("tests only open sqlite connections"),
    }
}

#[tokio::test]
async fn test_failing_statement_leaves_no_rows() {
    let dir = seed_dir(&[(
        "001_users.sql",
        "INSERT INTO users (id, email) VALUES (1, 'a@example.com');\n\
         INSERT INTO users (id, email) VALUES (2, NULL);\n\
         INSERT INTO users (id, email) VALUES (3, 'c@example.com');\n",
    )]);
    let files = discover_files(dir.path()).unwrap();
    let mut conn = connect_with_schema().await;
    let mut operator = ScriptedOperator::default();

    let result = SeedExecutor::new(&mut conn, &mut operator, false)
        .execute_file(&files[0])
        .await;

    assert_eq!(result.failed_statement(), Some(2));
    assert_eq!(count_users(&mut conn).await, 0);
}

#[tokio::test]
async fn test_batch_commits_each_file_independently() {
    let dir = seed_dir(&[
        (
            "001_admins.sql",
            "INSERT INTO users (id, email, note) VALUES (1, 'admin@example.com', 'a;b');\n\
             INSERT OR IGNORE INTO users (id, email) VALUES (1, 'admin@example.com');\n",
        ),
        (
            "002_broken.sql",
            "INSERT INTO users (id, email) VALUES (2, 'b@example.com');\nINSERT INTO nope VALUES (1);\n",
        ),
        ("003_cleanup.sql", "DELETE FROM users WHERE id = 1;"),
        (
            "004_staff.sql",
            "-- staff accounts\nINSERT INTO users (id, email) VALUES (4, 'd@example.com');",
        ),
    ]);
    let files = discover_files(dir.path()).unwrap();
    let mut conn = connect_with_schema().await;
    let mut operator = ScriptedOperator::default();

    let report = SeedExecutor::new(&mut conn, &mut operator, false)
        .execute_batch(&files)
        .await;

    assert_eq!(report.counts.succeeded, 2);
    assert_eq!(report.counts.failed, 1);
    assert_eq!(report.counts.blocked, 1);
    assert!(matches!(
        report.outcomes[2].result,
        ExecutionResult::Blocked {
            reason: BlockReason::ForceRequired,
            ..
        }
    ));
    // 001 and 004 committed; 002 rolled back; 003 never ran.
    assert_eq!(count_users(&mut conn).await, 2);

    let note: Option<String> = match &mut conn {
        SqlxConnection::Sqlite(c) => sqlx::query_scalar("SELECT note FROM users WHERE id = 1")
            .fetch_one(c)
            .await
            .unwrap(),
        _ => unreachable!(),
    };
    assert_eq!(note.as_deref(), Some("a;b"));
}

#[tokio::test]
async fn test_rerunning_idempotent_seed_is_a_no_op() {
    let dir = seed_dir(&[(
        "001_users.sql",
        "INSERT OR IGNORE INTO users (id, email) VALUES (1, 'a@example.com');\n\
         INSERT OR IGNORE INTO users (id, email) VALUES (2, 'b@example.com');\n",
    )]);
    let files = discover_files(dir.path()).unwrap();
    let mut conn = connect_with_schema().await;
    let mut operator = ScriptedOperator::default();

    for _ in 0..2 {
        let report = SeedExecutor::new(&mut conn, &mut operator, false)
            .execute_batch(&files)
            .await;
        assert!(report.is_success());
    }
    assert_eq!(count_users(&mut conn).await, 2);
}

#[tokio::test]
async fn test_forced_dangerous_file_runs_after_confirmation() {
    let dir = seed_dir(&[(
        "001_reset.sql",
        "DELETE FROM users;\nINSERT INTO users (id, email) VALUES (9, 'fresh@example.com');",
    )]);
    let files = discover_files(dir.path()).unwrap();
    let mut conn = connect_with_schema().await;
    conn.execute("INSERT INTO users (id, email) VALUES (1, 'old@example.com')")
        .await
        .unwrap();
    let mut operator = ScriptedOperator::new(true, true);

    let result = SeedExecutor::new(&mut conn, &mut operator, true)
        .execute_file(&files[0])
        .await;

    assert_eq!(result, ExecutionResult::Succeeded { statements: 2 });
    assert_eq!(count_users(&mut conn).await, 1);
}

#[tokio::test]
async fn test_file_scheme_url_opens_sqlite_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file:{}?mode=rwc", dir.path().join("dev.db").display());

    let mut conn = SqlxConnection::connect(&url)
        .await
        .expect("connect via file: url");
    assert_eq!(conn.database_type(), DatabaseType::SQLite);
    conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL)")
        .await
        .expect("create users table");
    conn.close().await.unwrap();

    assert!(dir.path().join("dev.db").exists());
}
