//! Per-barangay distribution series for the dashboard charts.

use std::collections::HashMap;

use db::models::farmer::FarmerStatus;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use ts_rs::TS;
use tracing::debug;
use uuid::Uuid;

use super::report::ReportError;

/// Farmer counts for one barangay. `value` holds `[registered, unregistered]`
/// or a single element when a status filter is applied, matching what the
/// stacked chart consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct FarmerDistribution {
    pub barangay: String,
    pub value: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct AllocationTypeCount {
    pub allocation_type: String,
    pub allocation_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct AllocationDistribution {
    pub barangay: String,
    pub allocations: Vec<AllocationTypeCount>,
}

pub struct DistributionService;

impl DistributionService {
    /// Registered/unregistered farmer counts per barangay, optionally
    /// restricted to a registration year and/or one status.
    pub async fn farmers_by_barangay(
        pool: &SqlitePool,
        year: Option<&str>,
        status: Option<FarmerStatus>,
    ) -> Result<Vec<FarmerDistribution>, ReportError> {
        let rows = sqlx::query_as::<_, (String, i64, i64)>(
            r#"SELECT b.name,
                      COALESCE(SUM(CASE WHEN f.status = 'registered' THEN 1 ELSE 0 END), 0),
                      COALESCE(SUM(CASE WHEN f.status = 'unregistered' THEN 1 ELSE 0 END), 0)
               FROM barangays b
               LEFT JOIN farmers f
                      ON f.brgy_id = b.id
                     AND ($1 IS NULL OR strftime('%Y', f.registration_date) = $1)
               GROUP BY b.id, b.name
               ORDER BY b.name ASC"#,
        )
        .bind(year)
        .fetch_all(pool)
        .await?;

        debug!(rows = rows.len(), ?year, "farmer distribution loaded");

        Ok(rows
            .into_iter()
            .map(|(barangay, registered, unregistered)| {
                let value = match status {
                    Some(FarmerStatus::Registered) => vec![registered],
                    Some(FarmerStatus::Unregistered) => vec![unregistered],
                    None => vec![registered, unregistered],
                };
                FarmerDistribution { barangay, value }
            })
            .collect())
    }

    /// Allocation counts per barangay grouped by type, optionally restricted
    /// to a receipt year and/or one allocation type. Every barangay appears,
    /// with an empty series when nothing matched.
    pub async fn allocations_by_barangay(
        pool: &SqlitePool,
        year: Option<&str>,
        allocation_type_id: Option<Uuid>,
    ) -> Result<Vec<AllocationDistribution>, ReportError> {
        let barangays = sqlx::query_as::<_, (String,)>(
            "SELECT name FROM barangays ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await?;

        let rows = sqlx::query_as::<_, (String, String, i64)>(
            r#"SELECT b.name, at.name, COUNT(a.id)
               FROM allocations a
               JOIN barangays b ON b.id = a.brgy_id
               JOIN allocation_types at ON at.id = a.allocation_type_id
               WHERE ($1 IS NULL OR strftime('%Y', a.date_received) = $1)
                 AND ($2 IS NULL OR a.allocation_type_id = $2)
               GROUP BY b.id, b.name, at.id, at.name
               ORDER BY b.name ASC, at.name ASC"#,
        )
        .bind(year)
        .bind(allocation_type_id)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<String, Vec<AllocationTypeCount>> = HashMap::new();
        for (barangay, allocation_type, allocation_count) in rows {
            grouped.entry(barangay).or_default().push(AllocationTypeCount {
                allocation_type,
                allocation_count,
            });
        }

        Ok(barangays
            .into_iter()
            .map(|(barangay,)| {
                let allocations = grouped.remove(&barangay).unwrap_or_default();
                AllocationDistribution {
                    barangay,
                    allocations,
                }
            })
            .collect())
    }
}
