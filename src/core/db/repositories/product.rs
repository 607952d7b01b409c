//! Product catalog repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::db::models::{NewProduct, Product};
use crate::core::db::store::{ProductStore, StoreError};

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `%`, `_` and `\` so the query is matched literally by ILIKE
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock, image
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, category, stock, image
            FROM products
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY name
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

        for product in &products {
            sqlx::query(
                r#"
                INSERT INTO products (name, description, price, category, stock, image)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.category)
            .bind(product.stock)
            .bind(&product.image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(products.len())
    }
}
