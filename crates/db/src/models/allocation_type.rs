use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A kind of support distributed to farmers (cash assistance, seed, fertilizer...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct AllocationType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal `{id, name}` reference used by the linked collections.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LinkedRef {
    pub id: Uuid,
    pub name: String,
}

/// An allocation type with the reference data it is scoped to, shaped the way
/// the admin list page consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AllocationTypeWithLinks {
    #[serde(flatten)]
    #[ts(flatten)]
    pub allocation_type: AllocationType,
    pub barangays: Vec<LinkedRef>,
    pub commodities: Vec<LinkedRef>,
    pub crop_damage_causes: Vec<LinkedRef>,
    pub eligibilities: Vec<LinkedRef>,
}

impl std::ops::Deref for AllocationTypeWithLinks {
    type Target = AllocationType;
    fn deref(&self) -> &Self::Target {
        &self.allocation_type
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateAllocationType {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub barangay_ids: Vec<Uuid>,
    #[serde(default)]
    pub commodity_ids: Vec<Uuid>,
    #[serde(default)]
    pub crop_damage_cause_ids: Vec<Uuid>,
    #[serde(default)]
    pub eligibility_ids: Vec<Uuid>,
}

/// (link table, fk column, referenced table, name column) for the four scoped
/// collections.
const LINK_SPECS: [(&str, &str, &str, &str); 4] = [
    ("allocation_type_barangays", "barangay_id", "barangays", "name"),
    ("allocation_type_commodities", "commodity_id", "commodities", "name"),
    (
        "allocation_type_crop_damage_causes",
        "crop_damage_cause_id",
        "crop_damage_causes",
        "name",
    ),
    (
        "allocation_type_eligibilities",
        "eligibility_id",
        "eligibilities",
        "eligibility_type",
    ),
];

impl AllocationType {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM allocation_types
               ORDER BY name ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM allocation_types
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    async fn load_links(
        pool: &SqlitePool,
        spec: (&str, &str, &str, &str),
    ) -> Result<HashMap<Uuid, Vec<LinkedRef>>, sqlx::Error> {
        let (link_table, fk_column, ref_table, name_column) = spec;
        let rows = sqlx::query_as::<_, (Uuid, Uuid, String)>(&format!(
            r#"SELECT l.allocation_type_id, r.id, r.{name_column}
               FROM {link_table} l
               JOIN {ref_table} r ON r.id = l.{fk_column}
               ORDER BY r.{name_column} ASC"#
        ))
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<LinkedRef>> = HashMap::new();
        for (allocation_type_id, id, name) in rows {
            grouped
                .entry(allocation_type_id)
                .or_default()
                .push(LinkedRef { id, name });
        }
        Ok(grouped)
    }

    /// Every allocation type with its four linked collections attached.
    pub async fn find_all_with_links(
        pool: &SqlitePool,
    ) -> Result<Vec<AllocationTypeWithLinks>, sqlx::Error> {
        let types = Self::find_all(pool).await?;

        let mut barangays = Self::load_links(pool, LINK_SPECS[0]).await?;
        let mut commodities = Self::load_links(pool, LINK_SPECS[1]).await?;
        let mut causes = Self::load_links(pool, LINK_SPECS[2]).await?;
        let mut eligibilities = Self::load_links(pool, LINK_SPECS[3]).await?;

        Ok(types
            .into_iter()
            .map(|allocation_type| {
                let id = allocation_type.id;
                AllocationTypeWithLinks {
                    allocation_type,
                    barangays: barangays.remove(&id).unwrap_or_default(),
                    commodities: commodities.remove(&id).unwrap_or_default(),
                    crop_damage_causes: causes.remove(&id).unwrap_or_default(),
                    eligibilities: eligibilities.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Insert the type and its link rows in one transaction.
    pub async fn create(
        pool: &SqlitePool,
        data: &CreateAllocationType,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let allocation_type = sqlx::query_as::<_, Self>(
            r#"INSERT INTO allocation_types (id, name, description)
               VALUES ($1, $2, $3)
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await?;

        for barangay_id in &data.barangay_ids {
            sqlx::query(
                "INSERT INTO allocation_type_barangays (id, allocation_type_id, barangay_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(barangay_id)
            .execute(&mut *tx)
            .await?;
        }
        for commodity_id in &data.commodity_ids {
            sqlx::query(
                "INSERT INTO allocation_type_commodities (id, allocation_type_id, commodity_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(commodity_id)
            .execute(&mut *tx)
            .await?;
        }
        for cause_id in &data.crop_damage_cause_ids {
            sqlx::query(
                "INSERT INTO allocation_type_crop_damage_causes \
                 (id, allocation_type_id, crop_damage_cause_id) VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(cause_id)
            .execute(&mut *tx)
            .await?;
        }
        for eligibility_id in &data.eligibility_ids {
            sqlx::query(
                "INSERT INTO allocation_type_eligibilities \
                 (id, allocation_type_id, eligibility_id) VALUES ($1, $2, $3)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(eligibility_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(allocation_type)
    }

    /// Replace the type's fields and its link rows in one transaction.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateAllocationType,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let allocation_type = sqlx::query_as::<_, Self>(
            r#"UPDATE allocation_types
               SET name = $2, description = $3, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING id, name, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&mut *tx)
        .await?;

        for (link_table, ..) in LINK_SPECS {
            sqlx::query(&format!(
                "DELETE FROM {link_table} WHERE allocation_type_id = $1"
            ))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        for (ids, link_table, fk_column) in [
            (&data.barangay_ids, "allocation_type_barangays", "barangay_id"),
            (&data.commodity_ids, "allocation_type_commodities", "commodity_id"),
            (
                &data.crop_damage_cause_ids,
                "allocation_type_crop_damage_causes",
                "crop_damage_cause_id",
            ),
            (
                &data.eligibility_ids,
                "allocation_type_eligibilities",
                "eligibility_id",
            ),
        ] {
            for linked_id in ids {
                sqlx::query(&format!(
                    "INSERT INTO {link_table} (id, allocation_type_id, {fk_column}) \
                     VALUES ($1, $2, $3)"
                ))
                .bind(Uuid::new_v4())
                .bind(id)
                .bind(linked_id)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;

        Ok(allocation_type)
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM allocation_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
