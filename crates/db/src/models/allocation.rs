use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// One recorded distribution event.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Allocation {
    pub id: Uuid,
    pub allocation_type_id: Uuid,
    pub farmer_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Option<Uuid>,
    pub received: bool,
    pub date_received: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Allocation joined with display names for the list grid.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct AllocationWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub allocation: Allocation,
    pub allocation_type_name: String,
    pub barangay_name: String,
    pub farmer_name: String,
}

impl std::ops::Deref for AllocationWithNames {
    type Target = Allocation;
    fn deref(&self) -> &Self::Target {
        &self.allocation
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateAllocation {
    pub allocation_type_id: Uuid,
    pub farmer_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Option<Uuid>,
    pub received: Option<bool>,
    pub date_received: Option<NaiveDate>,
}

const ALLOCATION_COLUMNS: &str = "id, allocation_type_id, farmer_id, brgy_id, commodity_id, \
     received, date_received, created_at, updated_at";

impl Allocation {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {ALLOCATION_COLUMNS} FROM allocations ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_all_with_names(
        pool: &SqlitePool,
    ) -> Result<Vec<AllocationWithNames>, sqlx::Error> {
        sqlx::query_as::<_, AllocationWithNames>(
            r#"SELECT a.id, a.allocation_type_id, a.farmer_id, a.brgy_id, a.commodity_id,
                      a.received, a.date_received, a.created_at, a.updated_at,
                      at.name AS allocation_type_name,
                      b.name AS barangay_name,
                      f.firstname || ' ' || f.lastname AS farmer_name
               FROM allocations a
               JOIN allocation_types at ON at.id = a.allocation_type_id
               JOIN barangays b ON b.id = a.brgy_id
               JOIN farmers f ON f.id = a.farmer_id
               ORDER BY a.created_at DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {ALLOCATION_COLUMNS} FROM allocations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM allocations")
            .fetch_one(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateAllocation,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO allocations
               (id, allocation_type_id, farmer_id, brgy_id, commodity_id, received, date_received)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {ALLOCATION_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.allocation_type_id)
        .bind(data.farmer_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.received.unwrap_or(false))
        .bind(data.date_received)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateAllocation,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE allocations
               SET allocation_type_id = $2, farmer_id = $3, brgy_id = $4, commodity_id = $5,
                   received = $6, date_received = $7, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {ALLOCATION_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.allocation_type_id)
        .bind(data.farmer_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.received.unwrap_or(false))
        .bind(data.date_received)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM allocations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        allocation_type::{AllocationType, CreateAllocationType},
        barangay::{Barangay, CreateBarangay},
        farmer::{CreateFarmer, Farmer, FarmerStatus},
    };

    async fn seed(pool: &SqlitePool) -> (Barangay, Farmer, AllocationType) {
        let barangay = Barangay::create(
            pool,
            &CreateBarangay {
                name: "Dawis".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let farmer = Farmer::create(
            pool,
            &CreateFarmer {
                rsbsa_ref_no: "11-22-33-0002".to_string(),
                firstname: "Maria".to_string(),
                lastname: "Santos".to_string(),
                dob: None,
                age: 39,
                sex: "female".to_string(),
                status: Some(FarmerStatus::Registered),
                coop: None,
                pwd: None,
                four_ps: None,
                registration_date: None,
                brgy_id: barangay.id,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let allocation_type = AllocationType::create(
            pool,
            &CreateAllocationType {
                name: "Fertilizer".to_string(),
                description: None,
                barangay_ids: vec![],
                commodity_ids: vec![],
                crop_damage_cause_ids: vec![],
                eligibility_ids: vec![],
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        (barangay, farmer, allocation_type)
    }

    #[sqlx::test]
    async fn create_and_list_with_names(pool: SqlitePool) {
        let (barangay, farmer, allocation_type) = seed(&pool).await;

        Allocation::create(
            &pool,
            &CreateAllocation {
                allocation_type_id: allocation_type.id,
                farmer_id: farmer.id,
                brgy_id: barangay.id,
                commodity_id: None,
                received: Some(true),
                date_received: NaiveDate::from_ymd_opt(2024, 11, 12),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let listed = Allocation::find_all_with_names(&pool).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].allocation_type_name, "Fertilizer");
        assert_eq!(listed[0].barangay_name, "Dawis");
        assert_eq!(listed[0].farmer_name, "Maria Santos");
        assert!(listed[0].received);
        assert_eq!(Allocation::count_all(&pool).await.unwrap(), 1);
    }
}
