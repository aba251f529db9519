//! Aggregate report builder feeding the dashboard and choropleth map.

use std::collections::{BTreeMap, HashMap};

use db::models::{
    allocation::Allocation,
    allocation_type::AllocationType,
    barangay::Barangay,
    commodity::{CommodityCategory, CommodityCategoryWithCommodities},
    farm::Farm,
    farmer::{Farmer, FarmerStatus},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use ts_rs::TS;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Per-commodity count within one category bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct CommodityCount {
    pub name: String,
    pub count: i64,
}

/// Farmer counts keyed by registration status. The capitalized keys are part
/// of the contract with the map/grid frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct FarmerStatusCounts {
    #[serde(rename = "Registered")]
    pub registered: i64,
    #[serde(rename = "Unregistered")]
    pub unregistered: i64,
}

/// Everything the map shows for one barangay. The three keys (`allocations`,
/// `commodities`, `farmers`) are contractual; every allocation type and every
/// commodity category appears even when its count is zero, so the frontend
/// never special-cases missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct BarangayBreakdown {
    pub allocations: BTreeMap<String, i64>,
    pub commodities: BTreeMap<String, Vec<CommodityCount>>,
    pub farmers: FarmerStatusCounts,
}

/// In-memory snapshot the builder runs over. Already fetched; the builder
/// does no I/O of its own.
pub struct ReportInputs<'a> {
    pub barangays: &'a [Barangay],
    pub allocation_types: &'a [AllocationType],
    pub commodity_categories: &'a [CommodityCategoryWithCommodities],
    pub allocations: &'a [Allocation],
    pub farms: &'a [Farm],
    pub farmers: &'a [Farmer],
}

/// Build the nested per-barangay count map.
///
/// One grouping pass per record collection, then a lookup-with-default-zero
/// when emitting, so cost stays linear in the record counts instead of
/// rescanning every collection per barangay. Records referencing a barangay
/// (or type/commodity) that is not in the snapshot fall out of every bucket.
/// Pure: identical inputs serialize byte-identically.
pub fn build_report(inputs: &ReportInputs<'_>) -> BTreeMap<String, BarangayBreakdown> {
    let mut allocation_counts: HashMap<(Uuid, Uuid), i64> = HashMap::new();
    for allocation in inputs.allocations {
        *allocation_counts
            .entry((allocation.brgy_id, allocation.allocation_type_id))
            .or_insert(0) += 1;
    }

    let mut farm_counts: HashMap<(Uuid, Uuid), i64> = HashMap::new();
    for farm in inputs.farms {
        *farm_counts
            .entry((farm.brgy_id, farm.commodity_id))
            .or_insert(0) += 1;
    }

    let mut farmer_counts: HashMap<Uuid, FarmerStatusCounts> = HashMap::new();
    for farmer in inputs.farmers {
        let counts = farmer_counts.entry(farmer.brgy_id).or_default();
        match farmer.status {
            FarmerStatus::Registered => counts.registered += 1,
            FarmerStatus::Unregistered => counts.unregistered += 1,
        }
    }

    let mut report = BTreeMap::new();
    for barangay in inputs.barangays {
        let allocations = inputs
            .allocation_types
            .iter()
            .map(|allocation_type| {
                let count = allocation_counts
                    .get(&(barangay.id, allocation_type.id))
                    .copied()
                    .unwrap_or(0);
                (allocation_type.name.clone(), count)
            })
            .collect();

        let commodities = inputs
            .commodity_categories
            .iter()
            .map(|category| {
                let counts = category
                    .commodities
                    .iter()
                    .map(|commodity| CommodityCount {
                        name: commodity.name.clone(),
                        count: farm_counts
                            .get(&(barangay.id, commodity.id))
                            .copied()
                            .unwrap_or(0),
                    })
                    .collect();
                (category.name.clone(), counts)
            })
            .collect();

        let farmers = farmer_counts
            .get(&barangay.id)
            .cloned()
            .unwrap_or_default();

        report.insert(
            barangay.name.clone(),
            BarangayBreakdown {
                allocations,
                commodities,
                farmers,
            },
        );
    }

    report
}

/// Global per-category commodity totals over all farms, independent of
/// barangay iteration order.
pub fn commodity_totals(
    commodity_categories: &[CommodityCategoryWithCommodities],
    farms: &[Farm],
) -> BTreeMap<String, Vec<CommodityCount>> {
    let mut per_commodity: HashMap<Uuid, i64> = HashMap::new();
    for farm in farms {
        *per_commodity.entry(farm.commodity_id).or_insert(0) += 1;
    }

    commodity_categories
        .iter()
        .map(|category| {
            let counts = category
                .commodities
                .iter()
                .map(|commodity| CommodityCount {
                    name: commodity.name.clone(),
                    count: per_commodity.get(&commodity.id).copied().unwrap_or(0),
                })
                .collect();
            (category.name.clone(), counts)
        })
        .collect()
}

/// Full dashboard payload: headline totals plus the nested heatmap report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DashboardData {
    pub total_farmers: i64,
    pub registered_farmers: i64,
    pub unregistered_farmers: i64,
    pub total_allocations: i64,
    pub heatmap_data: BTreeMap<String, BarangayBreakdown>,
    pub commodity_counts: BTreeMap<String, Vec<CommodityCount>>,
}

pub struct ReportService;

impl ReportService {
    /// Load a point-in-time snapshot and assemble the dashboard payload.
    pub async fn dashboard(pool: &SqlitePool) -> Result<DashboardData, ReportError> {
        let barangays = Barangay::find_all(pool).await?;
        let allocation_types = AllocationType::find_all(pool).await?;
        let commodity_categories = CommodityCategory::find_all_with_commodities(pool).await?;
        let allocations = Allocation::find_all(pool).await?;
        let farms = Farm::find_all(pool).await?;
        let farmers = Farmer::find_all(pool).await?;

        debug!(
            barangays = barangays.len(),
            allocation_types = allocation_types.len(),
            allocations = allocations.len(),
            farms = farms.len(),
            farmers = farmers.len(),
            "building dashboard report"
        );

        let heatmap_data = build_report(&ReportInputs {
            barangays: &barangays,
            allocation_types: &allocation_types,
            commodity_categories: &commodity_categories,
            allocations: &allocations,
            farms: &farms,
            farmers: &farmers,
        });
        let commodity_counts = commodity_totals(&commodity_categories, &farms);

        let registered_farmers = farmers
            .iter()
            .filter(|f| f.status == FarmerStatus::Registered)
            .count() as i64;
        let total_farmers = farmers.len() as i64;

        Ok(DashboardData {
            total_farmers,
            registered_farmers,
            unregistered_farmers: total_farmers - registered_farmers,
            total_allocations: allocations.len() as i64,
            heatmap_data,
            commodity_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::models::commodity::Commodity;

    use super::*;

    fn barangay(name: &str) -> Barangay {
        Barangay {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn allocation_type(name: &str) -> AllocationType {
        AllocationType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn allocation(brgy_id: Uuid, allocation_type_id: Uuid) -> Allocation {
        Allocation {
            id: Uuid::new_v4(),
            allocation_type_id,
            farmer_id: Uuid::new_v4(),
            brgy_id,
            commodity_id: None,
            received: true,
            date_received: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn farmer(brgy_id: Uuid, status: FarmerStatus) -> Farmer {
        Farmer {
            id: Uuid::new_v4(),
            rsbsa_ref_no: "11-22-33".to_string(),
            firstname: "Juan".to_string(),
            lastname: "Reyes".to_string(),
            dob: None,
            age: 40,
            sex: "male".to_string(),
            status,
            coop: None,
            pwd: false,
            four_ps: false,
            registration_date: None,
            brgy_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn farm(brgy_id: Uuid, commodity_id: Uuid) -> Farm {
        Farm {
            id: Uuid::new_v4(),
            name: None,
            farmer_id: Uuid::new_v4(),
            brgy_id,
            commodity_id,
            ha: 1.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category_with(name: &str, commodity_names: &[&str]) -> CommodityCategoryWithCommodities {
        let category = CommodityCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let commodities = commodity_names
            .iter()
            .map(|commodity_name| Commodity {
                id: Uuid::new_v4(),
                name: commodity_name.to_string(),
                description: None,
                category_id: category.id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect();
        CommodityCategoryWithCommodities {
            category,
            commodities,
        }
    }

    #[test]
    fn worked_example_two_barangays_two_types() {
        let a = barangay("A");
        let b = barangay("B");
        let cash = allocation_type("Cash");
        let seed = allocation_type("Seed");
        let allocations = vec![
            allocation(a.id, cash.id),
            allocation(a.id, cash.id),
            allocation(b.id, seed.id),
        ];

        let report = build_report(&ReportInputs {
            barangays: &[a, b],
            allocation_types: &[cash, seed],
            commodity_categories: &[],
            allocations: &allocations,
            farms: &[],
            farmers: &[],
        });

        assert_eq!(report["A"].allocations["Cash"], 2);
        assert_eq!(report["A"].allocations["Seed"], 0);
        assert_eq!(report["B"].allocations["Cash"], 0);
        assert_eq!(report["B"].allocations["Seed"], 1);
    }

    #[test]
    fn empty_barangays_yield_empty_report() {
        let cash = allocation_type("Cash");
        let allocations = vec![allocation(Uuid::new_v4(), cash.id)];
        let report = build_report(&ReportInputs {
            barangays: &[],
            allocation_types: &[cash],
            commodity_categories: &[],
            allocations: &allocations,
            farms: &[],
            farmers: &[],
        });
        assert!(report.is_empty());
    }

    #[test]
    fn barangay_absent_from_records_is_zero_filled() {
        let quiet = barangay("Quiet");
        let cash = allocation_type("Cash");
        let category = category_with("Rice", &["Hybrid"]);

        let report = build_report(&ReportInputs {
            barangays: std::slice::from_ref(&quiet),
            allocation_types: std::slice::from_ref(&cash),
            commodity_categories: std::slice::from_ref(&category),
            allocations: &[],
            farms: &[],
            farmers: &[],
        });

        let breakdown = &report["Quiet"];
        assert_eq!(breakdown.allocations["Cash"], 0);
        assert_eq!(breakdown.commodities["Rice"][0].count, 0);
        assert_eq!(breakdown.farmers.registered, 0);
        assert_eq!(breakdown.farmers.unregistered, 0);
    }

    #[test]
    fn allocation_counts_sum_to_per_barangay_record_count() {
        let a = barangay("A");
        let cash = allocation_type("Cash");
        let seed = allocation_type("Seed");
        let allocations = vec![
            allocation(a.id, cash.id),
            allocation(a.id, seed.id),
            allocation(a.id, seed.id),
            // Dangling record: unknown barangay, must fall out of every bucket.
            allocation(Uuid::new_v4(), cash.id),
        ];

        let report = build_report(&ReportInputs {
            barangays: std::slice::from_ref(&a),
            allocation_types: &[cash, seed],
            commodity_categories: &[],
            allocations: &allocations,
            farms: &[],
            farmers: &[],
        });

        let sum: i64 = report["A"].allocations.values().sum();
        assert_eq!(sum, 3);
    }

    #[test]
    fn farmer_statuses_partition_the_barangay_total() {
        let a = barangay("A");
        let farmers = vec![
            farmer(a.id, FarmerStatus::Registered),
            farmer(a.id, FarmerStatus::Registered),
            farmer(a.id, FarmerStatus::Unregistered),
        ];

        let report = build_report(&ReportInputs {
            barangays: std::slice::from_ref(&a),
            allocation_types: &[],
            commodity_categories: &[],
            allocations: &[],
            farms: &[],
            farmers: &farmers,
        });

        let counts = &report["A"].farmers;
        assert_eq!(counts.registered + counts.unregistered, farmers.len() as i64);
        assert_eq!(counts.registered, 2);
    }

    #[test]
    fn farm_counts_land_in_their_commodity_bucket() {
        let a = barangay("A");
        let category = category_with("Rice", &["Hybrid", "Inbred"]);
        let hybrid_id = category.commodities[0].id;
        let farms = vec![farm(a.id, hybrid_id), farm(a.id, hybrid_id)];

        let report = build_report(&ReportInputs {
            barangays: std::slice::from_ref(&a),
            allocation_types: &[],
            commodity_categories: std::slice::from_ref(&category),
            allocations: &[],
            farms: &farms,
            farmers: &[],
        });

        let rice = &report["A"].commodities["Rice"];
        assert_eq!(rice[0], CommodityCount { name: "Hybrid".to_string(), count: 2 });
        assert_eq!(rice[1], CommodityCount { name: "Inbred".to_string(), count: 0 });
    }

    #[test]
    fn repeated_calls_are_deep_equal() {
        let a = barangay("A");
        let b = barangay("B");
        let cash = allocation_type("Cash");
        let category = category_with("Rice", &["Hybrid"]);
        let allocations = vec![allocation(a.id, cash.id)];
        let farms = vec![farm(b.id, category.commodities[0].id)];
        let farmers = vec![farmer(a.id, FarmerStatus::Registered)];

        let inputs = ReportInputs {
            barangays: &[a, b],
            allocation_types: std::slice::from_ref(&cash),
            commodity_categories: std::slice::from_ref(&category),
            allocations: &allocations,
            farms: &farms,
            farmers: &farmers,
        };

        let first = build_report(&inputs);
        let second = build_report(&inputs);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn commodity_totals_span_all_barangays() {
        // Two barangays contribute farms; the totals must reflect both, not
        // just the last one processed.
        let a = barangay("A");
        let b = barangay("B");
        let category = category_with("Rice", &["Hybrid"]);
        let hybrid_id = category.commodities[0].id;
        let farms = vec![farm(a.id, hybrid_id), farm(b.id, hybrid_id)];

        let totals = commodity_totals(std::slice::from_ref(&category), &farms);
        assert_eq!(totals["Rice"][0].count, 2);
    }
}
