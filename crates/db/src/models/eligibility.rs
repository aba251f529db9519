use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// A program-eligibility label attachable to farmers and allocation types.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Eligibility {
    pub id: Uuid,
    pub eligibility_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateEligibility {
    pub eligibility_type: String,
}

impl Eligibility {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, eligibility_type, created_at
               FROM eligibilities
               ORDER BY eligibility_type ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateEligibility,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO eligibilities (id, eligibility_type)
               VALUES ($1, $2)
               RETURNING id, eligibility_type, created_at"#,
        )
        .bind(id)
        .bind(&data.eligibility_type)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM eligibilities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Attach an eligibility to a farmer (idempotency is the caller's concern).
    pub async fn attach_to_farmer(
        pool: &SqlitePool,
        farmer_id: Uuid,
        eligibility_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO farmer_eligibilities (id, farmer_id, eligibility_id) VALUES ($1, $2, $3)",
        )
        .bind(Uuid::new_v4())
        .bind(farmer_id)
        .bind(eligibility_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_farmer_id(
        pool: &SqlitePool,
        farmer_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT e.id, e.eligibility_type, e.created_at
               FROM eligibilities e
               JOIN farmer_eligibilities fe ON fe.eligibility_id = e.id
               WHERE fe.farmer_id = $1
               ORDER BY e.eligibility_type ASC"#,
        )
        .bind(farmer_id)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        barangay::{Barangay, CreateBarangay},
        farmer::{CreateFarmer, Farmer, FarmerStatus},
    };

    #[sqlx::test]
    async fn attach_and_list_for_farmer(pool: SqlitePool) {
        let barangay = Barangay::create(
            &pool,
            &CreateBarangay {
                name: "Ruparan".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let farmer = Farmer::create(
            &pool,
            &CreateFarmer {
                rsbsa_ref_no: "11-22-33-0004".to_string(),
                firstname: "Ana".to_string(),
                lastname: "Lim".to_string(),
                dob: None,
                age: 47,
                sex: "female".to_string(),
                status: Some(FarmerStatus::Unregistered),
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

        let eligibility = Eligibility::create(
            &pool,
            &CreateEligibility {
                eligibility_type: "4Ps Beneficiary".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        Eligibility::attach_to_farmer(&pool, farmer.id, eligibility.id)
            .await
            .unwrap();

        let attached = Eligibility::find_by_farmer_id(&pool, farmer.id).await.unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].eligibility_type, "4Ps Beneficiary");
    }
}
