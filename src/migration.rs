//! Schema synchronization for the `products` table.

use sqlx::PgPool;

/// Create the `products` table when missing and add columns introduced since it was first created.
/// Idempotent; safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            availability BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
    "#;
    sqlx::query(ddl).execute(pool).await?;

    for column in ["created_at", "updated_at"] {
        let alter = format!(
            "ALTER TABLE products ADD COLUMN IF NOT EXISTS {} TIMESTAMPTZ NOT NULL DEFAULT NOW()",
            column
        );
        sqlx::query(&alter).execute(pool).await?;
    }
    tracing::debug!("products schema synchronized");
    Ok(())
}
