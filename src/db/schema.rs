use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

const MIGRATION_SQL: &str = include_str!("../../migrations/001_initial_schema.sql");

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");

    for (i, statement) in split_sql_statements(MIGRATION_SQL).iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| {
                format!(
                    "Failed to execute migration statement {}: {}",
                    i + 1,
                    &statement[..statement.len().min(100)]
                )
            })?;
    }

    info!("Database migrations completed successfully");
    Ok(())
}

// The schema holds no function bodies, so a statement simply ends at a
// semicolon-terminated line.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }

        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            statements.push(current.trim().to_string());
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        statements.push(current.trim().to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_sql_creates_all_tables() {
        for table in ["users", "properties", "reservations", "property_reviews"] {
            assert!(
                MIGRATION_SQL.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "missing {} table",
                table
            );
        }
    }

    #[test]
    fn statements_split_at_semicolons_and_skip_comments() {
        let statements = split_sql_statements("-- comment\nCREATE TABLE a (\n  id INT\n);\nCREATE INDEX b ON a (id);\n");
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE a"));
        assert!(statements[1].starts_with("CREATE INDEX b"));
    }
}
