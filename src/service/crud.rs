//! Product persistence: the repository seam and its PostgreSQL implementation.

use crate::error::StorageError;
use crate::model::{NewProduct, Product, ProductChanges, PRODUCTS_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

/// Create/read/update/delete primitives for products. One statement per call.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a row and return it with its generated id.
    async fn create(&self, fields: NewProduct) -> Result<Product, StorageError>;

    /// `Ok(None)` when no row has this id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StorageError>;

    /// Every row, ascending by id.
    async fn find_all(&self) -> Result<Vec<Product>, StorageError>;

    /// Persist the provided fields of `changes` on the row behind `record`.
    /// Columns absent from `changes` keep their stored value, not the one in `record`.
    async fn update(&self, record: Product, changes: ProductChanges) -> Result<Product, StorageError>;

    async fn destroy(&self, record: &Product) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, fields: NewProduct) -> Result<Product, StorageError> {
        let sql = format!(
            "INSERT INTO {} (name, price, availability) VALUES ($1, $2, COALESCE($3, TRUE)) RETURNING {}",
            PRODUCTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, name = %fields.name, price = fields.price, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(fields.availability)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StorageError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StorageError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id ASC", COLUMNS, PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update(&self, mut record: Product, changes: ProductChanges) -> Result<Product, StorageError> {
        // Absent fields keep the stored column value.
        let sql = format!(
            "UPDATE {} SET name = COALESCE($2, name), price = COALESCE($3, price), \
             availability = COALESCE($4, availability), updated_at = NOW() WHERE id = $1 RETURNING {}",
            PRODUCTS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = record.id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(record.id)
            .bind(changes.name.as_deref())
            .bind(changes.price)
            .bind(changes.availability)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(row),
            // Deleted since it was fetched: report the record as it would have been saved.
            None => {
                changes.apply_to(&mut record);
                Ok(record)
            }
        }
    }

    async fn destroy(&self, record: &Product) -> Result<(), StorageError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", PRODUCTS_TABLE);
        tracing::debug!(sql = %sql, id = record.id, "query");
        sqlx::query(&sql).bind(record.id).execute(&self.pool).await?;
        Ok(())
    }
}
