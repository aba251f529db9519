use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// RSBSA registration status of a farmer.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "farmer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FarmerStatus {
    Registered,
    #[default]
    Unregistered,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Farmer {
    pub id: Uuid,
    pub rsbsa_ref_no: String,
    pub firstname: String,
    pub lastname: String,
    pub dob: Option<NaiveDate>,
    pub age: i64,
    pub sex: String,
    pub status: FarmerStatus,
    pub coop: Option<String>,
    pub pwd: bool,
    #[serde(rename = "4ps")]
    pub four_ps: bool,
    pub registration_date: Option<NaiveDate>,
    pub brgy_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Farmer row joined with its barangay name, as the list grid displays it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct FarmerWithBarangay {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub farmer: Farmer,
    pub barangay_name: String,
}

impl std::ops::Deref for FarmerWithBarangay {
    type Target = Farmer;
    fn deref(&self) -> &Self::Target {
        &self.farmer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateFarmer {
    pub rsbsa_ref_no: String,
    pub firstname: String,
    pub lastname: String,
    pub dob: Option<NaiveDate>,
    pub age: i64,
    pub sex: String,
    pub status: Option<FarmerStatus>,
    pub coop: Option<String>,
    pub pwd: Option<bool>,
    #[serde(rename = "4ps")]
    pub four_ps: Option<bool>,
    pub registration_date: Option<NaiveDate>,
    pub brgy_id: Uuid,
}

const FARMER_COLUMNS: &str = "id, rsbsa_ref_no, firstname, lastname, dob, age, sex, status, \
     coop, pwd, four_ps, registration_date, brgy_id, created_at, updated_at";

impl Farmer {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// One grid page of farmers with their barangay names, newest first.
    /// `search` matches name fragments and the RSBSA reference number.
    pub async fn paginate(
        pool: &SqlitePool,
        page: i64,
        per_page: i64,
        search: Option<&str>,
    ) -> Result<(Vec<FarmerWithBarangay>, i64), sqlx::Error> {
        let pattern = search
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));
        let offset = (page - 1) * per_page;

        let farmers = sqlx::query_as::<_, FarmerWithBarangay>(
            r#"SELECT f.id, f.rsbsa_ref_no, f.firstname, f.lastname, f.dob, f.age, f.sex,
                      f.status, f.coop, f.pwd, f.four_ps, f.registration_date, f.brgy_id,
                      f.created_at, f.updated_at,
                      b.name AS barangay_name
               FROM farmers f
               JOIN barangays b ON b.id = f.brgy_id
               WHERE ($1 IS NULL
                      OR f.firstname LIKE $1
                      OR f.lastname LIKE $1
                      OR f.rsbsa_ref_no LIKE $1)
               ORDER BY f.created_at DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(&pattern)
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*)
               FROM farmers f
               WHERE ($1 IS NULL
                      OR f.firstname LIKE $1
                      OR f.lastname LIKE $1
                      OR f.rsbsa_ref_no LIKE $1)"#,
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((farmers, total))
    }

    pub async fn count_by_status(
        pool: &SqlitePool,
        status: FarmerStatus,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    pub async fn count_all(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers")
            .fetch_one(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateFarmer,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let status = data.status.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO farmers
               (id, rsbsa_ref_no, firstname, lastname, dob, age, sex, status, coop, pwd,
                four_ps, registration_date, brgy_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               RETURNING {FARMER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.rsbsa_ref_no)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(data.dob)
        .bind(data.age)
        .bind(&data.sex)
        .bind(status)
        .bind(&data.coop)
        .bind(data.pwd.unwrap_or(false))
        .bind(data.four_ps.unwrap_or(false))
        .bind(data.registration_date)
        .bind(data.brgy_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateFarmer,
    ) -> Result<Self, sqlx::Error> {
        let status = data.status.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE farmers
               SET rsbsa_ref_no = $2, firstname = $3, lastname = $4, dob = $5, age = $6,
                   sex = $7, status = $8, coop = $9, pwd = $10, four_ps = $11,
                   registration_date = $12, brgy_id = $13,
                   updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {FARMER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&data.rsbsa_ref_no)
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(data.dob)
        .bind(data.age)
        .bind(&data.sex)
        .bind(status)
        .bind(&data.coop)
        .bind(data.pwd.unwrap_or(false))
        .bind(data.four_ps.unwrap_or(false))
        .bind(data.registration_date)
        .bind(data.brgy_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM farmers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::barangay::{Barangay, CreateBarangay};

    async fn seed_barangay(pool: &SqlitePool) -> Barangay {
        Barangay::create(
            pool,
            &CreateBarangay {
                name: "Aplaya".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap()
    }

    fn sample_farmer(brgy_id: Uuid, lastname: &str, status: FarmerStatus) -> CreateFarmer {
        CreateFarmer {
            rsbsa_ref_no: format!("11-22-33-{lastname}"),
            firstname: "Juan".to_string(),
            lastname: lastname.to_string(),
            dob: None,
            age: 45,
            sex: "male".to_string(),
            status: Some(status),
            coop: None,
            pwd: Some(false),
            four_ps: Some(false),
            registration_date: None,
            brgy_id,
        }
    }

    #[sqlx::test]
    async fn create_defaults_to_unregistered(pool: SqlitePool) {
        let barangay = seed_barangay(&pool).await;
        let mut data = sample_farmer(barangay.id, "Reyes", FarmerStatus::Registered);
        data.status = None;

        let farmer = Farmer::create(&pool, &data, Uuid::new_v4()).await.unwrap();
        assert_eq!(farmer.status, FarmerStatus::Unregistered);
    }

    #[sqlx::test]
    async fn status_counts_partition_total(pool: SqlitePool) {
        let barangay = seed_barangay(&pool).await;
        for (lastname, status) in [
            ("Reyes", FarmerStatus::Registered),
            ("Santos", FarmerStatus::Registered),
            ("Cruz", FarmerStatus::Unregistered),
        ] {
            Farmer::create(&pool, &sample_farmer(barangay.id, lastname, status), Uuid::new_v4())
                .await
                .unwrap();
        }

        let registered = Farmer::count_by_status(&pool, FarmerStatus::Registered)
            .await
            .unwrap();
        let unregistered = Farmer::count_by_status(&pool, FarmerStatus::Unregistered)
            .await
            .unwrap();
        assert_eq!(registered, 2);
        assert_eq!(unregistered, 1);
        assert_eq!(Farmer::count_all(&pool).await.unwrap(), registered + unregistered);
    }

    #[sqlx::test]
    async fn paginate_filters_by_search_and_joins_barangay(pool: SqlitePool) {
        let barangay = seed_barangay(&pool).await;
        for lastname in ["Reyes", "Santos", "Cruz"] {
            Farmer::create(
                &pool,
                &sample_farmer(barangay.id, lastname, FarmerStatus::Registered),
                Uuid::new_v4(),
            )
            .await
            .unwrap();
        }

        let (rows, total) = Farmer::paginate(&pool, 1, 10, Some("San")).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lastname, "Santos");
        assert_eq!(rows[0].barangay_name, "Aplaya");

        let (rows, total) = Farmer::paginate(&pool, 2, 2, None).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 1);
    }
}
