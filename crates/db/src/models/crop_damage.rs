use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// How severely a farm was hit.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "damage_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DamageSeverity {
    High,
    Medium,
    #[default]
    Low,
}

/// Reference data describing what caused a crop loss (typhoon, drought, pests...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CropDamageCause {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCropDamageCause {
    pub name: String,
    pub description: Option<String>,
}

/// One reported damage incident on a farm.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CropDamage {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub farm_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Uuid,
    pub crop_damage_cause_id: Uuid,
    pub total_damaged_area: f64,
    pub partially_damaged_area: f64,
    pub area_affected: f64,
    pub severity: DamageSeverity,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Damage record joined with display names for the list grid.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct CropDamageWithNames {
    #[sqlx(flatten)]
    #[serde(flatten)]
    #[ts(flatten)]
    pub crop_damage: CropDamage,
    pub farmer_name: String,
    pub barangay_name: String,
    pub commodity_name: String,
    pub cause_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateCropDamage {
    pub farmer_id: Uuid,
    pub farm_id: Uuid,
    pub brgy_id: Uuid,
    pub commodity_id: Uuid,
    pub crop_damage_cause_id: Uuid,
    pub total_damaged_area: f64,
    pub partially_damaged_area: f64,
    pub area_affected: f64,
    pub severity: Option<DamageSeverity>,
    pub remarks: Option<String>,
}

const DAMAGE_COLUMNS: &str = "id, farmer_id, farm_id, brgy_id, commodity_id, \
     crop_damage_cause_id, total_damaged_area, partially_damaged_area, area_affected, \
     severity, remarks, created_at, updated_at";

impl CropDamageCause {
    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM crop_damage_causes
               ORDER BY name ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"SELECT id, name, description, created_at, updated_at
               FROM crop_damage_causes
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCropDamageCause,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"INSERT INTO crop_damage_causes (id, name, description)
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
        data: &CreateCropDamageCause,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"UPDATE crop_damage_causes
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
        let result = sqlx::query("DELETE FROM crop_damage_causes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl CropDamage {
    pub async fn find_all_with_names(
        pool: &SqlitePool,
    ) -> Result<Vec<CropDamageWithNames>, sqlx::Error> {
        sqlx::query_as::<_, CropDamageWithNames>(
            r#"SELECT d.id, d.farmer_id, d.farm_id, d.brgy_id, d.commodity_id,
                      d.crop_damage_cause_id, d.total_damaged_area, d.partially_damaged_area,
                      d.area_affected, d.severity, d.remarks, d.created_at, d.updated_at,
                      f.firstname || ' ' || f.lastname AS farmer_name,
                      b.name AS barangay_name,
                      c.name AS commodity_name,
                      cause.name AS cause_name
               FROM crop_damages d
               JOIN farmers f ON f.id = d.farmer_id
               JOIN barangays b ON b.id = d.brgy_id
               JOIN commodities c ON c.id = d.commodity_id
               JOIN crop_damage_causes cause ON cause.id = d.crop_damage_cause_id
               ORDER BY d.created_at DESC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {DAMAGE_COLUMNS} FROM crop_damages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        data: &CreateCropDamage,
        id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let severity = data.severity.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"INSERT INTO crop_damages
               (id, farmer_id, farm_id, brgy_id, commodity_id, crop_damage_cause_id,
                total_damaged_area, partially_damaged_area, area_affected, severity, remarks)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {DAMAGE_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.farmer_id)
        .bind(data.farm_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.crop_damage_cause_id)
        .bind(data.total_damaged_area)
        .bind(data.partially_damaged_area)
        .bind(data.area_affected)
        .bind(severity)
        .bind(&data.remarks)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: &CreateCropDamage,
    ) -> Result<Self, sqlx::Error> {
        let severity = data.severity.clone().unwrap_or_default();
        sqlx::query_as::<_, Self>(&format!(
            r#"UPDATE crop_damages
               SET farmer_id = $2, farm_id = $3, brgy_id = $4, commodity_id = $5,
                   crop_damage_cause_id = $6, total_damaged_area = $7,
                   partially_damaged_area = $8, area_affected = $9, severity = $10,
                   remarks = $11, updated_at = datetime('now', 'subsec')
               WHERE id = $1
               RETURNING {DAMAGE_COLUMNS}"#
        ))
        .bind(id)
        .bind(data.farmer_id)
        .bind(data.farm_id)
        .bind(data.brgy_id)
        .bind(data.commodity_id)
        .bind(data.crop_damage_cause_id)
        .bind(data.total_damaged_area)
        .bind(data.partially_damaged_area)
        .bind(data.area_affected)
        .bind(severity)
        .bind(&data.remarks)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM crop_damages WHERE id = $1")
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
        barangay::{Barangay, CreateBarangay},
        commodity::{Commodity, CommodityCategory, CreateCommodity, CreateCommodityCategory},
        farm::{CreateFarm, Farm},
        farmer::{CreateFarmer, Farmer, FarmerStatus},
    };

    #[sqlx::test]
    async fn damage_record_round_trips_with_names(pool: SqlitePool) {
        let barangay = Barangay::create(
            &pool,
            &CreateBarangay {
                name: "Goma".to_string(),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let category = CommodityCategory::create(
            &pool,
            &CreateCommodityCategory {
                name: "Corn".to_string(),
                description: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let commodity = Commodity::create(
            &pool,
            &CreateCommodity {
                name: "Yellow Corn".to_string(),
                description: None,
                category_id: category.id,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let farmer = Farmer::create(
            &pool,
            &CreateFarmer {
                rsbsa_ref_no: "11-22-33-0003".to_string(),
                firstname: "Pedro".to_string(),
                lastname: "Cruz".to_string(),
                dob: None,
                age: 61,
                sex: "male".to_string(),
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
        let farm = Farm::create(
            &pool,
            &CreateFarm {
                name: None,
                farmer_id: farmer.id,
                brgy_id: barangay.id,
                commodity_id: commodity.id,
                ha: 2.0,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let cause = CropDamageCause::create(
            &pool,
            &CreateCropDamageCause {
                name: "Typhoon".to_string(),
                description: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

        let damage = CropDamage::create(
            &pool,
            &CreateCropDamage {
                farmer_id: farmer.id,
                farm_id: farm.id,
                brgy_id: barangay.id,
                commodity_id: commodity.id,
                crop_damage_cause_id: cause.id,
                total_damaged_area: 1.25,
                partially_damaged_area: 0.5,
                area_affected: 1.75,
                severity: Some(DamageSeverity::High),
                remarks: Some("flooded paddies".to_string()),
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        assert_eq!(damage.severity, DamageSeverity::High);

        let listed = CropDamage::find_all_with_names(&pool).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].cause_name, "Typhoon");
        assert_eq!(listed[0].farmer_name, "Pedro Cruz");
        assert_eq!(listed[0].crop_damage.area_affected, 1.75);
    }
}
