use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A parcel worked by a farmer, tied to one barangay and one commodity.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Farm {
    pub id: Uuid,
    pub name: Option<String>,
    pub farmer_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Uuid,
    pub ha: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Farm row joined with display names for the profile grid.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct FarmWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub farm: Farm,
    pub barangay_name: String,
    pub commodity_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateFarm {
    pub name: Option<String>,
    pub farmer_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Uuid,
    pub ha: f64,
}

const FARM_COLUMNS: &str =
    "id, name, farmer_id, brgy_id, commodity_id, ha, created_at, updated_at";

impl Farm {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {FARM_COLUMNS} FROM farms ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("SELECT {FARM_COLUMNS} FROM farms WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_farmer_id(
        pool: &SqlitePool,
        farmer_id: Uuid,
    ) -> Result<Vec<FarmWithNames>, sqlx::Error> {
        sqlx::query_as::<_, FarmWithNames>(
            r#"SELECT fa.id, fa.name, fa.farmer_id, fa.brgy_id, fa.commodity_id, fa.ha,
                      fa.created_at, fa.updated_at,
                      b.name AS barangay_name,
                      c.name AS commodity_name
               FROM farms fa
               JOIN barangays b ON b.id = fa.brgy_id
               JOIN commodities c ON c.id = fa.commodity_id
               WHERE fa.farmer_id = $1
               ORDER BY fa.created_at DESC"#,
        )
        .bind(farmer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateFarm,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO farms (id, name, farmer_id, brgy_id, commodity_id, ha)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {FARM_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(data.farmer_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.ha)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateFarm,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE farms
               SET name = $2, farmer_id = $3, brgy_id = $4, commodity_id = $5, ha = $6,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {FARM_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(data.farmer_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.ha)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM farms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
