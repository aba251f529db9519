use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A crop/product grouping (e.g. Rice, High-Value Crops).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CommodityCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A crop/product type under a category.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Commodity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category together with the commodities it owns, as the dashboard and
/// allocation-type forms consume it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CommodityCategoryWithCommodities {
    #[serde(flatten)]
    #[ts(flatten)]
    pub category: CommodityCategory,
    pub commodities: Vec<Commodity>,
}

impl std::ops::Deref for CommodityCategoryWithCommodities {
    type Target = CommodityCategory;
    fn deref(&self) -> &Self::Target {
        &self.category
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCommodityCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCommodity {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
}

impl CommodityCategory {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM commodity_categories
               ORDER BY name ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM commodity_categories
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Load every category with its commodities attached, one query per table.
    pub async fn find_all_with_commodities(
        pool: &SqlitePool,
    ) -> Result<Vec<CommodityCategoryWithCommodities>, sqlx::Error> {
        let categories = Self::find_all(pool).await?;
        let commodities = Commodity::find_all(pool).await?;

        let mut by_category: HashMap<Uuid, Vec<Commodity>> = HashMap::new();
        for commodity in commodities {
            by_category
                .entry(commodity.category_id)
                .or_default()
                .push(commodity);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let commodities = by_category.remove(&category.id).unwrap_or_default();
                CommodityCategoryWithCommodities {
                    category,
                    commodities,
                }
            })
            .collect())
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCommodityCategory,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO commodity_categories (id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateCommodityCategory,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE commodity_categories
               SET name = $2, description = $3, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM commodity_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl Commodity {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, category_id, created_at, updated_at
               FROM commodities
               ORDER BY name ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, category_id, created_at, updated_at
               FROM commodities
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCommodity,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO commodities (id, name, description, category_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, description, category_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateCommodity,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE commodities
               SET name = $2, description = $3, category_id = $4,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id, name, description, category_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM commodities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
